//! Error type shared by the IAM layer and both front-ends

use aws_sdk_iam::config::http::HttpResponse;
use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeyError>;

#[derive(Debug, Error)]
pub enum KeyError {
    /// Credentials could not be read from a file or were incomplete
    #[error("{message}")]
    Credentials { message: String },

    /// A failure reported by (or on the way to) the identity service.
    ///
    /// Displays as the raw remote message so it can be shown to the user as-is.
    #[error("{message}")]
    Service {
        code: Option<String>,
        message: String,
        status: Option<u16>,
    },

    /// The service answered but left out a member we rely on
    #[error("response is missing {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KeyError {
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// HTTP status of the failed request, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }
}

impl<E> From<SdkError<E, HttpResponse>> for KeyError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    fn from(err: SdkError<E, HttpResponse>) -> Self {
        let status = err.raw_response().map(|r| r.status().as_u16());
        let code = err.code().map(str::to_string);
        let message = match err.message() {
            Some(m) => m.to_string(),
            None => DisplayErrorContext(&err).to_string(),
        };

        Self::Service {
            code,
            message,
            status,
        }
    }
}
