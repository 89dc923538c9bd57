use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which news feed an article came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Gdelt,
    Newsdata,
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTag::Gdelt => write!(f, "gdelt"),
            SourceTag::Newsdata => write!(f, "newsdata"),
        }
    }
}

/// A news article normalized into the shape the pipeline works with.
/// Built per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub source: SourceTag,
    pub published_at: Option<DateTime<Utc>>,
}

/// A verified knowledge-graph record for an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

/// A "has sponsor" relationship edge: the linked entity is sponsored by the
/// entity we looked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorshipLink {
    pub id: String,
    pub label: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result of the two-step knowledge-graph query: best-match entity plus its
/// outgoing sponsorship links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityLookup {
    pub entity: Option<Entity>,
    pub sponsor_of: Vec<SponsorshipLink>,
}

/// Behavioral signal categories detected from article titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Funding,
    Geo,
    Cmo,
    Sponsorship,
}

/// One detected signal category for a candidate, with the titles that
/// triggered it (capped at 3 for display).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMatch {
    pub category: SignalCategory,
    pub weight: u32,
    pub matched_titles: Vec<String>,
}

/// Mention counts broken down by feed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCounts {
    pub gdelt: u32,
    pub newsdata: u32,
}

impl SourceCounts {
    pub fn total(&self) -> u32 {
        self.gdelt + self.newsdata
    }

    /// True when at least one mention came from each feed.
    pub fn multi_source(&self) -> bool {
        self.gdelt > 0 && self.newsdata > 0
    }
}

/// One scored discovery result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub name: String,
    pub total_score: u32,
    pub mention_count: u32,
    pub gdelt_mentions: u32,
    pub newsdata_mentions: u32,
    pub sponsor_link_count: u32,
    pub signals: Vec<SignalMatch>,
    pub evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Entity>,
}
