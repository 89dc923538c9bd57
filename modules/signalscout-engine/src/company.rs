//! Single-company scoring: static base rating plus explained external
//! components from recent coverage and existing sponsorship links.

use serde::{Deserialize, Serialize};
use tracing::info;

use signalscout_common::{ArticleRecord, EntityLookup, Result, ScoutError};

use crate::directory::find_company;
use crate::providers::CachedProviders;
use crate::score::{
    clamp_score, count_recent, recency_signal, sponsorship_signal, ExternalSignal,
    DEFAULT_BASE_SCORE,
};

const PRIMARY_FETCH_LIMIT: u32 = 25;

const ALTERNATE_FETCH_LIMIT: u32 = 10;

/// Scored company with the raw provider payloads that fed the components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScore {
    pub company_id: Option<String>,
    pub name: String,
    pub base_score: u32,
    pub external_score: u32,
    pub total_score: u32,
    pub external_signals: Vec<ExternalSignal>,
    pub gdelt: Vec<ArticleRecord>,
    pub newsdata: Vec<ArticleRecord>,
    pub wikidata: EntityLookup,
}

/// Score one organization. The primary feed and knowledge graph are queried
/// concurrently and both must succeed; the alternate feed is an isolated
/// step whose failure is absorbed.
pub async fn score_company(
    providers: &CachedProviders,
    company_id: &str,
    name_override: &str,
) -> Result<CompanyScore> {
    let known = find_company(company_id, name_override);
    let name = known
        .map(|c| c.name.to_string())
        .or_else(|| {
            let trimmed = name_override.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .ok_or_else(|| ScoutError::MissingParameter("companyId or name".to_string()))?;

    let (gdelt, wikidata) = tokio::join!(
        providers.primary_articles(&name, PRIMARY_FETCH_LIMIT),
        providers.entity_lookup(&name),
    );
    let gdelt = gdelt?;
    let wikidata = wikidata?;

    let newsdata = providers
        .alternate_articles_or_empty(&name, ALTERNATE_FETCH_LIMIT)
        .await;

    let now = chrono::Utc::now();
    let external_signals = vec![
        recency_signal(
            "Media coverage",
            "media",
            None,
            count_recent(gdelt.iter().map(|a| a.published_at), now),
        ),
        recency_signal(
            "Newsdata coverage",
            "Newsdata",
            Some("Newsdata"),
            count_recent(newsdata.iter().map(|a| a.published_at), now),
        ),
        sponsorship_signal(wikidata.sponsor_of.len()),
    ];

    let base_score = known.map(|c| c.base_score).unwrap_or(DEFAULT_BASE_SCORE);
    let external_score: u32 = external_signals.iter().map(|s| s.impact).sum();
    let total_score = clamp_score(base_score as i64 + external_score as i64);
    info!(%name, base_score, external_score, total_score, "Scored company");

    Ok(CompanyScore {
        company_id: known.map(|c| c.id.to_string()),
        name,
        base_score,
        external_score,
        total_score,
        external_signals,
        gdelt,
        newsdata,
        wikidata,
    })
}
