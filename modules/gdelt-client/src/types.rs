use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One article from the GDELT ArtList response, normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdeltArticle {
    pub title: String,
    pub url: String,
    pub seen_date: Option<DateTime<Utc>>,
    pub source_country: Option<String>,
    pub domain: Option<String>,
}

/// Raw GDELT DOC API envelope. Field names follow the wire format.
#[derive(Debug, Deserialize)]
pub(crate) struct ArtListResponse {
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub seendate: Option<String>,
    pub sourcecountry: Option<String>,
    pub domain: Option<String>,
}

impl RawArticle {
    pub fn normalize(self) -> Option<GdeltArticle> {
        let url = self.url?;
        Some(GdeltArticle {
            title: self.title.unwrap_or_else(|| "Untitled article".to_string()),
            url,
            seen_date: self.seendate.as_deref().and_then(parse_seen_date),
            source_country: self.sourcecountry,
            domain: self.domain,
        })
    }
}

/// Parse GDELT's `seendate` (`YYYYMMDDHHMMSS`, sometimes with a `T`/`Z`).
/// Only the date portion is trusted; time-of-day is dropped.
pub fn parse_seen_date(raw: &str) -> Option<DateTime<Utc>> {
    if raw.len() < 8 {
        return None;
    }
    let year: i32 = raw.get(0..4)?.parse().ok()?;
    let month: u32 = raw.get(4..6)?.parse().ok()?;
    let day: u32 = raw.get(6..8)?.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn seen_date_parses_compact_timestamp() {
        let parsed = parse_seen_date("20240301120000").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 3, 1));
    }

    #[test]
    fn seen_date_parses_iso_style_timestamp() {
        let parsed = parse_seen_date("20240301T120000Z").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 3, 1));
    }

    #[test]
    fn seen_date_rejects_short_or_garbage_input() {
        assert!(parse_seen_date("2024").is_none());
        assert!(parse_seen_date("not-a-date").is_none());
        assert!(parse_seen_date("20241399000000").is_none());
    }

    #[test]
    fn normalize_defaults_missing_title_and_drops_missing_url() {
        let with_url = RawArticle {
            title: None,
            url: Some("https://example.com/a".into()),
            seendate: None,
            sourcecountry: None,
            domain: None,
        };
        assert_eq!(with_url.normalize().unwrap().title, "Untitled article");

        let without_url = RawArticle {
            title: Some("t".into()),
            url: None,
            seendate: None,
            sourcecountry: None,
            domain: None,
        };
        assert!(without_url.normalize().is_none());
    }
}
