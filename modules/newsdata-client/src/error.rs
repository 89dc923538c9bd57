use thiserror::Error;

pub type Result<T> = std::result::Result<T, NewsdataError>;

#[derive(Debug, Error)]
pub enum NewsdataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for NewsdataError {
    fn from(err: reqwest::Error) -> Self {
        NewsdataError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for NewsdataError {
    fn from(err: serde_json::Error) -> Self {
        NewsdataError::Parse(err.to_string())
    }
}
