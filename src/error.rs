use thiserror::Error;

use crate::adapter::{RestError, RestErrorKind};

/// Why a submission produced no content resource.
#[derive(Clone, Debug, Error)]
pub enum SubmissionError {
    /// The service answered with something other than `201 Created`.
    #[error("content rejected with status {status_code}: {body_text}")]
    Rejected { status_code: u16, body_text: String },

    /// The exchange never completed as a usable HTTP response.
    #[error("transport failure ({kind}): {details}")]
    TransportFailure { kind: RestErrorKind, details: String },
}

impl SubmissionError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status_code, .. } => Some(*status_code),
            Self::TransportFailure { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<RestError> for SubmissionError {
    fn from(err: RestError) -> Self {
        Self::TransportFailure {
            kind: err.kind,
            details: err.message,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load client configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("no API key configured; set ATLAS_API_KEY or `api_key` in atlas.toml")]
    MissingApiKey,

    #[error("base URL must not be empty")]
    EmptyBaseUrl,
}
