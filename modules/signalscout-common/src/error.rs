use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Service-level error taxonomy. Handlers map these onto HTTP statuses:
/// missing parameter → 400, upstream → the provider's status, rest → 500.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("{provider} error (status {status}): {message}")]
    Upstream {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ScoutError {
    pub fn upstream(provider: &str, status: u16, message: impl Into<String>) -> Self {
        ScoutError::Upstream {
            provider: provider.to_string(),
            status,
            message: message.into(),
        }
    }

    /// HTTP status this error maps to. Upstream statuses are mirrored only
    /// when they are themselves valid error statuses.
    pub fn http_status(&self) -> u16 {
        match self {
            ScoutError::MissingParameter(_) => 400,
            ScoutError::Upstream { status, .. } if *status >= 400 => *status,
            ScoutError::Upstream { .. } => 502,
            ScoutError::MissingCredential(_) => 500,
            ScoutError::Internal(_) => 500,
        }
    }
}
