use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article from the Newsdata.io latest-news response, normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsdataArticle {
    pub title: String,
    pub url: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub source_id: Option<String>,
}

/// Raw response envelope. Older API versions returned `data` instead of
/// `results`; both are accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct LatestResponse {
    #[serde(default)]
    pub results: Vec<RawArticle>,
    #[serde(default)]
    pub data: Vec<RawArticle>,
}

impl LatestResponse {
    pub fn into_items(self) -> Vec<RawArticle> {
        if self.results.is_empty() {
            self.data
        } else {
            self.results
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub source_id: Option<String>,
    pub source: Option<String>,
}

impl RawArticle {
    /// Articles without a link are dropped.
    pub fn normalize(self) -> Option<NewsdataArticle> {
        let url = self.link.or(self.url).filter(|u| !u.is_empty())?;
        Some(NewsdataArticle {
            title: self.title.unwrap_or_else(|| "Untitled article".to_string()),
            url,
            pub_date: self.pub_date.as_deref().and_then(parse_pub_date),
            source_id: self.source_id.or(self.source),
        })
    }
}

/// Newsdata timestamps come as `YYYY-MM-DD HH:MM:SS` (UTC); RFC 3339 is
/// accepted as a fallback.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
