//! AWS IAM client wrapper

use aws_config::{BehaviorVersion, Region};
use aws_sdk_iam::config::Credentials;
use aws_sdk_iam::primitives::DateTime as SmithyDateTime;
use aws_sdk_iam::Client;
use chrono::{DateTime, Utc};

use crate::iam::credentials::{ProfileCredentials, SessionCredentials};
use crate::iam::error::{KeyError, Result};
use crate::iam::types::{AccessKey, AccessKeyMetadata, KeyStatus};

/// The three access key operations, scoped to the authenticated user.
///
/// Both front-ends are written against this trait rather than the SDK client.
#[allow(async_fn_in_trait)]
pub trait KeyService {
    /// Create a new key; the returned secret is never available again
    async fn create_access_key(&self) -> Result<AccessKey>;

    async fn delete_access_key(&self, key_id: &str) -> Result<()>;

    /// Keys in the order the service returned them
    async fn list_access_keys(&self) -> Result<Vec<AccessKeyMetadata>>;

    /// Trial list call used to validate credentials.
    ///
    /// Returns the HTTP status: 200 on success, or the status of the error
    /// response. Failures that never produced a response are returned as errors.
    async fn probe(&self) -> Result<u16> {
        match self.list_access_keys().await {
            Ok(_) => Ok(200),
            Err(e) => match e.status() {
                Some(status) => Ok(status),
                None => Err(e),
            },
        }
    }
}

/// Everything needed to build an [`IamClient`]
#[derive(Clone)]
pub struct IamClientConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    /// Override for IAM-compatible endpoints (e.g. a local emulator)
    pub endpoint_url: Option<String>,
}

impl IamClientConfig {
    pub fn from_profile(credentials: ProfileCredentials, region: &str) -> Self {
        Self {
            region: region.to_string(),
            access_key_id: credentials.access_key_id,
            secret_access_key: credentials.secret_access_key,
            session_token: credentials.session_token,
            endpoint_url: None,
        }
    }

    pub fn from_session(credentials: &SessionCredentials) -> Self {
        Self {
            region: credentials.region.clone(),
            access_key_id: credentials.access_key_id.clone(),
            secret_access_key: credentials.secret_access_key.clone(),
            session_token: None,
            endpoint_url: None,
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }
}

/// IAM client wrapper with access key operations
pub struct IamClient {
    client: Client,
    region: String,
}

impl IamClient {
    /// Create a client from explicit static credentials
    pub async fn with_config(config: IamClientConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id,
            config.secret_access_key,
            config.session_token,
            None,
            "aws-key-updater",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(url) = config.endpoint_url {
            tracing::debug!("Using IAM endpoint override {}", url);
            loader = loader.endpoint_url(url);
        }

        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            region: config.region,
        }
    }

    /// Get the configured region
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl KeyService for IamClient {
    async fn create_access_key(&self) -> Result<AccessKey> {
        let response = self.client.create_access_key().send().await?;

        let key = response
            .access_key()
            .ok_or(KeyError::MissingField("AccessKey"))?;

        tracing::info!("Created access key {}", key.access_key_id());

        Ok(AccessKey {
            id: key.access_key_id().to_string(),
            secret: key.secret_access_key().to_string(),
            user_name: key.user_name().to_string(),
            status: KeyStatus::parse(key.status().as_str()),
            create_date: key.create_date().and_then(to_utc),
        })
    }

    async fn delete_access_key(&self, key_id: &str) -> Result<()> {
        self.client
            .delete_access_key()
            .access_key_id(key_id)
            .send()
            .await?;

        tracing::info!("Deleted access key {}", key_id);
        Ok(())
    }

    async fn list_access_keys(&self) -> Result<Vec<AccessKeyMetadata>> {
        let response = self.client.list_access_keys().send().await?;

        let keys: Vec<AccessKeyMetadata> = response
            .access_key_metadata()
            .iter()
            .map(|m| AccessKeyMetadata {
                id: m.access_key_id().unwrap_or_default().to_string(),
                user_name: m.user_name().unwrap_or_default().to_string(),
                status: m
                    .status()
                    .map(|s| KeyStatus::parse(s.as_str()))
                    .unwrap_or_else(|| KeyStatus::Unknown(String::new())),
                create_date: m.create_date().and_then(to_utc),
            })
            .collect();

        tracing::debug!("Listed {} access keys", keys.len());
        Ok(keys)
    }
}

fn to_utc(d: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(d.secs(), d.subsec_nanos())
}
