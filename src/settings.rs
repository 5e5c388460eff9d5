//! Runtime settings
//!
//! Resolved once at startup from command-line flags, which fall back to
//! environment variables and then to the built-in defaults:
//! - profile: `--profile` / `AWS_KEY_UPDATER_PROFILE` / `default`
//! - region: `--region` / `AWS_KEY_UPDATER_REGION` / `us-gov-west-1`
//! - endpoint: `--endpoint-url` / `AWS_KEY_UPDATER_ENDPOINT_URL` / SDK default
//!
//! Nothing here is ever written to disk.

use crate::iam::{DEFAULT_PROFILE, DEFAULT_REGION};

/// Settings shared by both front-ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Profile read from the credentials file (batch only)
    pub profile: String,

    /// Region the batch client is built for
    pub region: String,

    /// IAM endpoint override
    pub endpoint_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

impl Settings {
    /// Update the profile; blank input keeps the current one
    pub fn set_profile(&mut self, profile: Option<&str>) {
        if let Some(p) = profile.map(str::trim).filter(|p| !p.is_empty()) {
            self.profile = p.to_string();
        }
    }

    /// Update the region; blank input keeps the current one
    pub fn set_region(&mut self, region: Option<&str>) {
        if let Some(r) = region.map(str::trim).filter(|r| !r.is_empty()) {
            self.region = r.to_string();
        }
    }

    pub fn set_endpoint_url(&mut self, endpoint_url: Option<&str>) {
        self.endpoint_url = endpoint_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);
    }
}
