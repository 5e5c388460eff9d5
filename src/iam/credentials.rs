//! AWS credential sources
//!
//! Two ways of getting hold of a key pair:
//! - [`ProfileCredentials`] - read from one profile of a shared credentials file
//!   (the `~/.aws/credentials` format)
//! - [`SessionCredentials`] - typed in at the console, kept in memory only

use crate::iam::error::{KeyError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Profile used by the batch tool when none is given
pub const DEFAULT_PROFILE: &str = "default";

/// Region used when none is given
pub const DEFAULT_REGION: &str = "us-gov-west-1";

/// Static credentials taken from a shared credentials file
#[derive(Clone)]
pub struct ProfileCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for ProfileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProfileCredentials {
    /// Read `profile` from the credentials file at `path`
    pub fn load(path: &Path, profile: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KeyError::credentials(format!(
                "Failed to read credentials file {:?}: {}",
                path, e
            ))
        })?;

        tracing::debug!("Reading profile '{}' from {:?}", profile, path);
        Self::parse(&content, profile)
    }

    /// Extract `profile` from credentials file content
    pub fn parse(content: &str, profile: &str) -> Result<Self> {
        let sections = parse_sections(content);

        let values = sections.get(profile).ok_or_else(|| {
            let mut known: Vec<_> = sections.keys().map(String::as_str).collect();
            known.sort();
            KeyError::credentials(format!(
                "Profile '{}' not found (available: {})",
                profile,
                if known.is_empty() { "none".to_string() } else { known.join(", ") }
            ))
        })?;

        let field = |key: &str| values.get(key).filter(|v| !v.is_empty()).cloned();

        let access_key_id = field("aws_access_key_id").ok_or_else(|| {
            KeyError::credentials(format!("Profile '{}' is missing aws_access_key_id", profile))
        })?;
        let secret_access_key = field("aws_secret_access_key").ok_or_else(|| {
            KeyError::credentials(format!(
                "Profile '{}' is missing aws_secret_access_key",
                profile
            ))
        })?;

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token: field("aws_session_token"),
        })
    }
}

/// Split INI content into `section -> (key -> value)`.
///
/// Lines outside any section are ignored. Later duplicates win.
fn parse_sections(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let name = line[1..line.len() - 1].trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if let Some(ref name) = current {
                if let Some(section) = sections.get_mut(name) {
                    section.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }
    }

    sections
}

/// Credentials entered at the interactive prompt
#[derive(Clone)]
pub struct SessionCredentials {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl SessionCredentials {
    /// Build from raw prompt input; an empty region means [`DEFAULT_REGION`]
    pub fn new(region: &str, access_key_id: &str, secret_access_key: &str) -> Self {
        let region = region.trim();
        Self {
            region: if region.is_empty() {
                DEFAULT_REGION.to_string()
            } else {
                region.to_string()
            },
            access_key_id: access_key_id.trim().to_string(),
            secret_access_key: secret_access_key.trim().to_string(),
        }
    }
}
