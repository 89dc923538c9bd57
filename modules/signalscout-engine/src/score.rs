//! Score aggregation and ranking.
//!
//! All outputs are integers clamped to [0, 100]. Discovery scoring fuses
//! mention volume, sponsorship links, signal weights, and the entity bonus;
//! company scoring adds per-feed recency components on top of a static base
//! rating.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use signalscout_common::RankedResult;

/// Fixed recency window for "recent coverage".
pub const RECENCY_WINDOW_DAYS: i64 = 60;

/// Base score every verified discovery candidate starts from.
const DISCOVERY_BASE: u32 = 35;

/// Mention volume contributes 4 points per mention, capped at 25.
const MENTION_CAP: u32 = 25;
const MENTION_WEIGHT: u32 = 4;

/// Sponsorship links contribute 4 points per link, capped at 20.
const LINK_CAP: u32 = 20;
const LINK_WEIGHT: u32 = 4;

/// Flat bonus for having a verified knowledge-graph entity.
pub const ENTITY_BONUS: u32 = 5;

/// Per-feed recency: 3 points per recent article, capped at 20.
const RECENCY_CAP: u32 = 20;
const RECENCY_WEIGHT: u32 = 3;

/// Existing sponsorships: 3 points per link, capped at 15.
const SPONSOR_CAP: u32 = 15;
const SPONSOR_WEIGHT: u32 = 3;

/// Base rating for organizations not in the known-company directory.
pub const DEFAULT_BASE_SCORE: u32 = 50;

/// One explained component of a company's external score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSignal {
    #[serde(rename = "type")]
    pub kind: String,
    pub impact: u32,
    pub detail: String,
}

/// Clamp to [0, 100]. Accepts a wide signed value so callers can sum
/// components without worrying about overflow direction.
pub fn clamp_score(value: i64) -> u32 {
    value.clamp(0, 100) as u32
}

/// Discovery composite:
/// `35 + min(25, mentions*4) + min(20, links*4) + signal_score + 5`.
pub fn discovery_score(mention_count: u32, sponsor_link_count: u32, signal_score: u32) -> u32 {
    let mention_component = (mention_count.saturating_mul(MENTION_WEIGHT)).min(MENTION_CAP);
    let link_component = (sponsor_link_count.saturating_mul(LINK_WEIGHT)).min(LINK_CAP);
    clamp_score(
        DISCOVERY_BASE as i64
            + mention_component as i64
            + link_component as i64
            + signal_score as i64
            + ENTITY_BONUS as i64,
    )
}

/// Count articles published within the recency window. Only the lower
/// bound is checked; feed timestamps slightly ahead of the clock still
/// count as recent.
pub fn count_recent<I>(published: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    let cutoff = now - Duration::days(RECENCY_WINDOW_DAYS);
    published
        .into_iter()
        .filter(|date| matches!(date, Some(d) if *d >= cutoff))
        .count()
}

/// `min(20, recent_count * 3)`.
pub fn recency_score(recent_count: usize) -> u32 {
    (recent_count as u32).saturating_mul(RECENCY_WEIGHT).min(RECENCY_CAP)
}

/// Recency component with its explanation string. `label` names the feed
/// in the no-coverage detail ("media", "Newsdata"); `count_label`
/// optionally qualifies the article count, which stays bare for the
/// primary feed.
pub fn recency_signal(
    kind: &str,
    label: &str,
    count_label: Option<&str>,
    recent_count: usize,
) -> ExternalSignal {
    let detail = if recent_count > 0 {
        match count_label {
            Some(feed) => {
                format!("{recent_count} {feed} articles in the last {RECENCY_WINDOW_DAYS} days")
            }
            None => format!("{recent_count} articles in the last {RECENCY_WINDOW_DAYS} days"),
        }
    } else {
        format!("No recent {label} coverage detected")
    };
    ExternalSignal {
        kind: kind.to_string(),
        impact: recency_score(recent_count),
        detail,
    }
}

/// Existing-sponsorships component: `min(15, links * 3)` with explanation.
pub fn sponsorship_signal(link_count: usize) -> ExternalSignal {
    let detail = if link_count > 0 {
        format!("{link_count} sponsorship links found")
    } else {
        "No sponsorship links found in Wikidata".to_string()
    };
    ExternalSignal {
        kind: "Existing sponsorships".to_string(),
        impact: (link_count as u32).saturating_mul(SPONSOR_WEIGHT).min(SPONSOR_CAP),
        detail,
    }
}

/// Stable sort by total score descending, then truncate to the page size.
/// Ties keep discovery order.
pub fn rank_results(results: &mut Vec<RankedResult>, page_size: usize) {
    results.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    results.truncate(page_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn recency_zero_articles_scores_zero_with_no_coverage_detail() {
        let signal = recency_signal("Media coverage", "media", None, 0);
        assert_eq!(signal.impact, 0);
        assert_eq!(signal.detail, "No recent media coverage detected");
    }

    #[test]
    fn recency_detail_labels_only_the_alternate_feed() {
        let primary = recency_signal("Media coverage", "media", None, 3);
        assert_eq!(primary.detail, "3 articles in the last 60 days");

        let alternate = recency_signal("Newsdata coverage", "Newsdata", Some("Newsdata"), 2);
        assert_eq!(alternate.detail, "2 Newsdata articles in the last 60 days");
    }

    #[test]
    fn recency_caps_at_twenty() {
        // 7 * 3 = 21 → 20
        assert_eq!(recency_score(7), 20);
        assert_eq!(recency_score(100), 20);
        assert_eq!(recency_score(6), 18);
    }

    #[test]
    fn sponsorship_component_caps_at_fifteen() {
        assert_eq!(sponsorship_signal(0).impact, 0);
        assert_eq!(sponsorship_signal(4).impact, 12);
        assert_eq!(sponsorship_signal(6).impact, 15);
    }

    #[test]
    fn count_recent_ignores_old_and_undated_articles() {
        let now = Utc::now();
        let dates = vec![
            Some(now - Duration::days(1)),
            Some(now - Duration::days(59)),
            Some(now - Duration::days(61)),
            None,
        ];
        assert_eq!(count_recent(dates, now), 2);
    }

    #[test]
    fn count_recent_includes_future_dated_articles() {
        let now = Utc::now();
        let dates = vec![Some(now + Duration::hours(2)), Some(now + Duration::days(3))];
        assert_eq!(count_recent(dates, now), 2);
    }

    #[test]
    fn discovery_score_known_values() {
        // 35 + min(25, 3*4) + min(20, 2*4) + 24 + 5 = 35+12+8+24+5 = 84
        assert_eq!(discovery_score(3, 2, 24), 84);
        // Everything capped: 35 + 25 + 20 + 30 + 5 = 115 → 100
        assert_eq!(discovery_score(50, 50, 30), 100);
    }

    #[test]
    fn discovery_score_clamped_for_any_inputs() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let mentions = rng.random_range(0..5_000u32);
            let links = rng.random_range(0..5_000u32);
            let signal = rng.random_range(0..500u32);
            let score = discovery_score(mentions, links, signal);
            assert!(score <= 100, "score {score} out of range");
        }
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(64), 64);
        assert_eq!(clamp_score(250), 100);
    }

    #[test]
    fn rank_is_stable_on_ties_and_truncates() {
        fn result(name: &str, score: u32) -> RankedResult {
            RankedResult {
                name: name.to_string(),
                total_score: score,
                mention_count: 0,
                gdelt_mentions: 0,
                newsdata_mentions: 0,
                sponsor_link_count: 0,
                signals: vec![],
                evidence: vec![],
                entity: None,
            }
        }

        let mut results = vec![
            result("first-60", 60),
            result("second-60", 60),
            result("the-90", 90),
            result("the-40", 40),
        ];
        rank_results(&mut results, 3);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["the-90", "first-60", "second-60"]);
    }
}
