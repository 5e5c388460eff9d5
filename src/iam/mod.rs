//! IAM access key module
//!
//! This module provides the identity-service side of the tool:
//! - [`client::IamClient`] - access key operations over the AWS SDK
//! - [`client::KeyService`] - the operations both front-ends run against
//! - [`credentials`] - shared credentials file and console-entered credentials
//! - [`types`] - access key data types and their text rendering

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use client::{IamClient, IamClientConfig, KeyService};
pub use credentials::{ProfileCredentials, SessionCredentials, DEFAULT_PROFILE, DEFAULT_REGION};
pub use error::{KeyError, Result};
pub use types::{AccessKey, AccessKeyMetadata, KeyStatus};
