pub mod error;
pub mod types;

pub use error::{GdeltError, Result};
pub use types::{parse_seen_date, GdeltArticle};

use types::ArtListResponse;

const BASE_URL: &str = "https://api.gdeltproject.org/api/v2/doc/doc";

const USER_AGENT: &str = "signal-scout/0.1";

pub struct GdeltClient {
    client: reqwest::Client,
}

impl GdeltClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the most recent articles matching `query` (ArtList mode).
    pub async fn fetch_articles(&self, query: &str, max_records: u32) -> Result<Vec<GdeltArticle>> {
        let resp = self
            .client
            .get(BASE_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("query", query),
                ("mode", "ArtList"),
                ("maxrecords", &max_records.to_string()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GdeltError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: ArtListResponse = resp.json().await?;
        let articles: Vec<GdeltArticle> = envelope
            .articles
            .into_iter()
            .filter_map(|raw| raw.normalize())
            .collect();
        tracing::debug!(query, count = articles.len(), "Fetched GDELT articles");

        Ok(articles)
    }
}

impl Default for GdeltClient {
    fn default() -> Self {
        Self::new()
    }
}
