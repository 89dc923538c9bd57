pub mod error;
pub mod types;

pub use error::{NewsdataError, Result};
pub use types::{parse_pub_date, NewsdataArticle};

use types::LatestResponse;

const BASE_URL: &str = "https://newsdata.io/api/1/latest";

const USER_AGENT: &str = "signal-scout/0.1";

pub struct NewsdataClient {
    client: reqwest::Client,
    api_key: String,
}

impl NewsdataClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Fetch the latest English-language articles matching `query`.
    /// The API allows at most 10 results per page; `size` is clamped to 1..=10.
    pub async fn fetch_articles(&self, query: &str, size: u32) -> Result<Vec<NewsdataArticle>> {
        let size = size.clamp(1, 10);

        let resp = self
            .client
            .get(BASE_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("q", query),
                ("language", "en"),
                ("size", &size.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NewsdataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: LatestResponse = resp.json().await?;
        let articles: Vec<NewsdataArticle> = envelope
            .into_items()
            .into_iter()
            .filter_map(|raw| raw.normalize())
            .take(size as usize)
            .collect();
        tracing::debug!(query, count = articles.len(), "Fetched Newsdata articles");

        Ok(articles)
    }
}
