//! Discovery orchestration: query → merged titles → candidates → gates →
//! verification → ranked results.
//!
//! Both feeds are fetched concurrently; knowledge-graph verification of the
//! (at most 12) survivors runs sequentially, trading latency for simplicity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use signalscout_common::{RankedResult, Result};

use crate::extractor::extract_candidates;
use crate::gates::{gate_candidate, GateOutcome};
use crate::providers::CachedProviders;
use crate::rules::{detect_signals, is_disallowed_candidate, signal_score};
use crate::score::{discovery_score, rank_results};

/// Broad sponsorship-vocabulary query used when the caller supplies none.
pub const DEFAULT_DISCOVERY_QUERY: &str =
    "\"sponsorship deal\" OR \"official partner\" OR \"naming rights\"";

/// Articles pulled from the primary feed per discovery run.
const PRIMARY_FETCH_LIMIT: u32 = 25;

/// Articles pulled from the alternate feed (its API caps a page at 10).
const ALTERNATE_FETCH_LIMIT: u32 = 10;

/// One discovery run's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub updated_at: DateTime<Utc>,
    pub query: String,
    pub results: Vec<RankedResult>,
}

/// Run the full discovery pipeline. Primary-feed and knowledge-graph
/// failures propagate; an alternate-feed failure degrades to "no results".
pub async fn discover(
    providers: &CachedProviders,
    query: Option<&str>,
    page_size: usize,
) -> Result<DiscoveryReport> {
    let query = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_DISCOVERY_QUERY);

    let (primary, alternate) = tokio::join!(
        providers.primary_articles(query, PRIMARY_FETCH_LIMIT),
        providers.alternate_articles_or_empty(query, ALTERNATE_FETCH_LIMIT),
    );
    let mut articles = primary?;
    articles.extend(alternate);
    info!(query, articles = articles.len(), "Merged feed articles for discovery");

    let candidates = extract_candidates(&articles);

    // Signal detection is pure and cheap; only verification talks to the
    // network, so it runs last over the gated survivors.
    let mut survivors = Vec::new();
    for candidate in candidates {
        if is_disallowed_candidate(&candidate.name) {
            debug!(name = %candidate.name, "Dropped disallowed candidate");
            continue;
        }
        let signals = detect_signals(&candidate.retained_titles);
        match gate_candidate(&candidate, &signals) {
            GateOutcome::Pass => survivors.push((candidate, signals)),
            outcome => {
                debug!(name = %candidate.name, ?outcome, "Candidate gated out");
            }
        }
    }

    let mut results = Vec::new();
    for (candidate, signals) in survivors {
        let lookup = providers.entity_lookup(&candidate.name).await?;
        let Some(entity) = lookup.entity else {
            debug!(name = %candidate.name, "No knowledge-graph entity, dropped");
            continue;
        };

        let sponsor_link_count = lookup.sponsor_of.len() as u32;
        let total_score = discovery_score(
            candidate.mention_count,
            sponsor_link_count,
            signal_score(&signals),
        );

        results.push(RankedResult {
            name: candidate.name,
            total_score,
            mention_count: candidate.mention_count,
            gdelt_mentions: candidate.sources.gdelt,
            newsdata_mentions: candidate.sources.newsdata,
            sponsor_link_count,
            signals,
            evidence: candidate.evidence,
            entity: Some(entity),
        });
    }

    rank_results(&mut results, page_size);
    info!(query, results = results.len(), "Discovery run complete");

    Ok(DiscoveryReport {
        updated_at: Utc::now(),
        query: query.to_string(),
        results,
    })
}
