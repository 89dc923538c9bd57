use thiserror::Error;

pub type Result<T> = std::result::Result<T, WikidataError>;

#[derive(Debug, Error)]
pub enum WikidataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Search API error (status {status}): {message}")]
    Search { status: u16, message: String },

    #[error("SPARQL error (status {status}): {message}")]
    Sparql { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WikidataError {
    pub fn status(&self) -> Option<u16> {
        match self {
            WikidataError::Search { status, .. } | WikidataError::Sparql { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WikidataError {
    fn from(err: reqwest::Error) -> Self {
        WikidataError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WikidataError {
    fn from(err: serde_json::Error) -> Self {
        WikidataError::Parse(err.to_string())
    }
}
