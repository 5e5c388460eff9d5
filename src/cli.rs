//! One-shot command-line front-end
//!
//! `aws-key-updater <credential file> <list|create|delete <access key id>>`

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::iam::types::{deleted_lines, list_lines};
use crate::iam::{IamClient, IamClientConfig, KeyService, ProfileCredentials, Result};
use crate::settings::Settings;

/// Usage text, printed for missing arguments and unknown commands alike
pub const USAGE: [&str; 2] = [
    "Error: Missing Arguments",
    "Syntax: aws-key-updater <current credential file> <list|create|delete <access key id>>",
];

/// Create, list or delete IAM access keys for the user in a credentials file.
#[derive(Parser, Debug)]
#[command(name = "aws-key-updater", author, version, about)]
pub struct Args {
    /// Profile to read from the credentials file [default: default]
    #[arg(long, env = "AWS_KEY_UPDATER_PROFILE")]
    pub profile: Option<String>,

    /// AWS region [default: us-gov-west-1]
    #[arg(long, env = "AWS_KEY_UPDATER_REGION")]
    pub region: Option<String>,

    /// Send IAM requests to this endpoint instead of the AWS default
    #[arg(long, env = "AWS_KEY_UPDATER_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// <current credential file> <list|create|delete <access key id>>
    #[arg(value_name = "ARGS", num_args = 0..)]
    pub args: Vec<String>,
}

impl Args {
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.set_profile(self.profile.as_deref());
        settings.set_region(self.region.as_deref());
        settings.set_endpoint_url(self.endpoint_url.as_deref());
        settings
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create,
    List,
    Delete { key_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing arguments")]
    MissingArguments,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

/// A checked set of positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub credentials_path: PathBuf,
    pub command: Command,
}

impl Invocation {
    /// Validate positionals.
    ///
    /// Fewer than two arguments is an error, and so is fewer than three when
    /// any argument is `delete`. Extra trailing arguments are ignored.
    pub fn parse(args: &[String]) -> std::result::Result<Self, UsageError> {
        if args.len() < 2 || (args.iter().any(|a| a == "delete") && args.len() < 3) {
            return Err(UsageError::MissingArguments);
        }

        let command = match args[1].as_str() {
            "create" => Command::Create,
            "list" => Command::List,
            "delete" => Command::Delete {
                key_id: args[2].clone(),
            },
            other => return Err(UsageError::UnknownCommand(other.to_string())),
        };

        Ok(Self {
            credentials_path: PathBuf::from(&args[0]),
            command,
        })
    }
}

pub fn write_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    for line in USAGE {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Build a client from one profile of the credentials file
pub async fn connect(invocation: &Invocation, settings: &Settings) -> Result<IamClient> {
    let credentials = ProfileCredentials::load(&invocation.credentials_path, &settings.profile)?;

    tracing::debug!(
        "Connecting to IAM in {} as profile '{}'",
        settings.region,
        settings.profile
    );

    let config = IamClientConfig::from_profile(credentials, &settings.region)
        .with_endpoint_url(settings.endpoint_url.clone());
    Ok(IamClient::with_config(config).await)
}

/// Run one command and print its result.
///
/// Nothing is written for a failed operation; the error is returned instead.
pub async fn execute<S, W>(service: &S, command: &Command, out: &mut W) -> Result<()>
where
    S: KeyService,
    W: Write,
{
    match command {
        Command::Create => {
            let key = service.create_access_key().await?;
            for line in key.created_lines() {
                writeln!(out, "{}", line)?;
            }
        }
        Command::Delete { key_id } => {
            service.delete_access_key(key_id).await?;
            for line in deleted_lines(key_id) {
                writeln!(out, "{}", line)?;
            }
        }
        Command::List => {
            let keys = service.list_access_keys().await?;
            for line in list_lines(&keys) {
                writeln!(out, "{}", line)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_create() {
        let inv = Invocation::parse(&args(&["./creds", "create"])).unwrap();
        assert_eq!(inv.credentials_path, PathBuf::from("./creds"));
        assert_eq!(inv.command, Command::Create);
    }

    #[test]
    fn test_parse_list_ignores_extra() {
        let inv = Invocation::parse(&args(&["./creds", "list", "extra"])).unwrap();
        assert_eq!(inv.command, Command::List);
    }

    #[test]
    fn test_parse_delete() {
        let inv = Invocation::parse(&args(&["./creds", "delete", "AKIAEXAMPLE123"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Delete {
                key_id: "AKIAEXAMPLE123".to_string()
            }
        );
    }

    #[test]
    fn test_parse_too_few() {
        assert_eq!(Invocation::parse(&[]), Err(UsageError::MissingArguments));
        assert_eq!(
            Invocation::parse(&args(&["./creds"])),
            Err(UsageError::MissingArguments)
        );
    }

    #[test]
    fn test_parse_delete_without_id() {
        assert_eq!(
            Invocation::parse(&args(&["./creds", "delete"])),
            Err(UsageError::MissingArguments)
        );
    }

    #[test]
    fn test_parse_delete_anywhere_needs_three() {
        // `delete` in the path position still counts
        assert_eq!(
            Invocation::parse(&args(&["delete", "list"])),
            Err(UsageError::MissingArguments)
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Invocation::parse(&args(&["./creds", "rotate"])),
            Err(UsageError::UnknownCommand("rotate".to_string()))
        );
    }

    #[test]
    fn test_write_usage() {
        let mut out = Vec::new();
        write_usage(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Missing Arguments\nSyntax: aws-key-updater <current credential file> <list|create|delete <access key id>>\n"
        );
    }

    #[test]
    fn test_args_settings() {
        let parsed = Args::try_parse_from([
            "aws-key-updater",
            "--profile",
            "rotation",
            "--region",
            "us-east-1",
            "./creds",
            "list",
        ])
        .unwrap();

        assert_eq!(parsed.args, args(&["./creds", "list"]));
        let settings = parsed.settings();
        assert_eq!(settings.profile, "rotation");
        assert_eq!(settings.region, "us-east-1");
    }

    #[test]
    fn test_args_without_positionals() {
        let parsed = Args::try_parse_from(["aws-key-updater"]).unwrap();
        assert!(parsed.args.is_empty());
    }

    #[tokio::test]
    async fn test_connect_missing_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        std::fs::write(&path, "[other]\naws_access_key_id=A\naws_secret_access_key=S\n").unwrap();

        let inv = Invocation {
            credentials_path: path,
            command: Command::List,
        };
        let err = match connect(&inv, &Settings::default()).await {
            Ok(_) => panic!("expected a credentials error"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Profile 'default' not found"));
    }
}
