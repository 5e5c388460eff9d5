//! IAM access key data types

use chrono::{DateTime, Utc};
use std::fmt;

/// Status of an access key as reported by IAM
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    Active,
    Inactive,
    Expired,
    /// A value this tool does not know about yet
    Unknown(String),
}

impl KeyStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "Active" => KeyStatus::Active,
            "Inactive" => KeyStatus::Inactive,
            "Expired" => KeyStatus::Expired,
            other => KeyStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            KeyStatus::Active => "Active",
            KeyStatus::Inactive => "Inactive",
            KeyStatus::Expired => "Expired",
            KeyStatus::Unknown(s) => s,
        }
    }
}

/// A freshly created access key.
///
/// This is the only place the secret ever appears; IAM will not return it again.
#[derive(Clone)]
pub struct AccessKey {
    pub id: String,
    pub secret: String,
    pub user_name: String,
    pub status: KeyStatus,
    pub create_date: Option<DateTime<Utc>>,
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("status", &self.status)
            .field("create_date", &self.create_date)
            .finish()
    }
}

impl AccessKey {
    /// Secret-free view of this key, as `list` would return it
    pub fn metadata(&self) -> AccessKeyMetadata {
        AccessKeyMetadata {
            id: self.id.clone(),
            user_name: self.user_name.clone(),
            status: self.status.clone(),
            create_date: self.create_date,
        }
    }

    /// Lines printed after a successful create
    pub fn created_lines(&self) -> [String; 3] {
        [
            "Access key created:".to_string(),
            format!("Id: {}", self.id),
            format!("Secret: {}", self.secret),
        ]
    }
}

/// Listable description of an access key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyMetadata {
    pub id: String,
    pub user_name: String,
    pub status: KeyStatus,
    pub create_date: Option<DateTime<Utc>>,
}

impl AccessKeyMetadata {
    /// Creation date for display, empty when IAM did not send one
    pub fn date_string(&self) -> String {
        self.create_date
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }

    /// One line of `list` output
    pub fn list_line(&self) -> String {
        format!(
            "Key: {}, User: {}, Date: {}",
            self.id,
            self.user_name,
            self.date_string()
        )
    }
}

/// Lines printed after a successful delete
pub fn deleted_lines(key_id: &str) -> [String; 2] {
    ["Access key deleted:".to_string(), format!("Id: {}", key_id)]
}

/// Header and one line per key, in the order given
pub fn list_lines(keys: &[AccessKeyMetadata]) -> Vec<String> {
    let mut lines = Vec::with_capacity(keys.len() + 1);
    lines.push("Access keys:".to_string());
    lines.extend(keys.iter().map(AccessKeyMetadata::list_line));
    lines
}
