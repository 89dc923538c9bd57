//! End-to-end pipeline tests over deterministic fake providers.
//!
//! Fakes implement the `NewsFeed` / `KnowledgeGraph` traits in memory, so
//! these tests exercise extraction, gating, verification, scoring, ranking,
//! the cache, and the failure policy without touching the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use signalscout_common::{
    ArticleRecord, Entity, EntityLookup, FetchCache, Result, ScoutError, SourceTag,
    SponsorshipLink,
};
use signalscout_engine::{
    discover, score_company, CachedProviders, KnowledgeGraph, NewsFeed, ProviderSet,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

struct FakeFeed {
    tag: SourceTag,
    titles: Vec<String>,
    calls: AtomicUsize,
}

impl FakeFeed {
    fn new(tag: SourceTag, titles: &[&str]) -> Self {
        Self {
            tag,
            titles: titles.iter().map(|t| t.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsFeed for FakeFeed {
    fn tag(&self) -> SourceTag {
        self.tag
    }

    async fn fetch(&self, _query: &str, _limit: u32) -> Result<Vec<ArticleRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| ArticleRecord {
                title: title.clone(),
                url: format!("https://example.com/{i}"),
                source: self.tag,
                published_at: Some(Utc::now() - ChronoDuration::days(1)),
            })
            .collect())
    }
}

struct FailingFeed {
    tag: SourceTag,
}

#[async_trait]
impl NewsFeed for FailingFeed {
    fn tag(&self) -> SourceTag {
        self.tag
    }

    async fn fetch(&self, _query: &str, _limit: u32) -> Result<Vec<ArticleRecord>> {
        Err(ScoutError::MissingCredential("NEWSDATA_API_KEY".to_string()))
    }
}

struct FakeGraph {
    entities: HashMap<String, EntityLookup>,
    calls: AtomicUsize,
}

impl FakeGraph {
    fn new() -> Self {
        Self {
            entities: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn with_entity(mut self, name: &str, link_count: usize) -> Self {
        let id = format!("Q{}", self.entities.len() + 1);
        self.entities.insert(
            name.to_string(),
            EntityLookup {
                entity: Some(Entity {
                    id: id.clone(),
                    label: name.to_string(),
                    description: None,
                    url: format!("https://www.wikidata.org/wiki/{id}"),
                }),
                sponsor_of: (0..link_count)
                    .map(|i| SponsorshipLink {
                        id: format!("{id}-link{i}"),
                        label: format!("Sponsored Thing {i}"),
                        url: "https://www.wikidata.org/wiki/Q0".to_string(),
                        instance: None,
                    })
                    .collect(),
            },
        );
        self
    }
}

#[async_trait]
impl KnowledgeGraph for FakeGraph {
    async fn lookup(&self, name: &str) -> Result<EntityLookup> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entities.get(name).cloned().unwrap_or_default())
    }
}

fn providers(
    primary: Arc<dyn NewsFeed>,
    alternate: Arc<dyn NewsFeed>,
    graph: Arc<dyn KnowledgeGraph>,
    ttl: Duration,
) -> CachedProviders {
    CachedProviders::new(
        ProviderSet {
            primary,
            alternate,
            graph,
        },
        Arc::new(FetchCache::new(ttl)),
    )
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn discovery_scores_and_ranks_verified_candidates() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Acme Corp raises $50M Series B",
            "Acme Corp raises $50M Series B",
            "Orbital Systems expands into Japan",
        ],
    ));
    let alternate = Arc::new(FakeFeed::new(
        SourceTag::Newsdata,
        &["Orbital Systems expands into Japan"],
    ));
    let graph = Arc::new(
        FakeGraph::new()
            .with_entity("Acme Corp", 2)
            .with_entity("Orbital Systems", 0),
    );

    let providers = providers(primary, alternate, graph, Duration::from_secs(60));
    let report = discover(&providers, Some("expansion"), 12).await.unwrap();

    assert_eq!(report.results.len(), 2);

    // 35 + min(25, 2*4) + min(20, 2*4) + 14 + 5 = 70
    let acme = &report.results[0];
    assert_eq!(acme.name, "Acme Corp");
    assert_eq!(acme.total_score, 70);
    assert_eq!(acme.mention_count, 2);
    assert_eq!(acme.gdelt_mentions, 2);
    assert_eq!(acme.sponsor_link_count, 2);
    assert!(acme.entity.is_some());

    // 35 + 8 + 0 + 10 + 5 = 58, one mention per feed satisfies the gate
    let orbital = &report.results[1];
    assert_eq!(orbital.name, "Orbital Systems");
    assert_eq!(orbital.total_score, 58);
    assert_eq!(orbital.gdelt_mentions, 1);
    assert_eq!(orbital.newsdata_mentions, 1);
}

#[tokio::test]
async fn sponsorship_only_candidates_are_excluded() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Bright Harbor named official partner of the music festival",
            "Bright Harbor named official partner of the music festival",
        ],
    ));
    let alternate = Arc::new(FakeFeed::new(SourceTag::Newsdata, &[]));
    let graph = Arc::new(FakeGraph::new().with_entity("Bright Harbor", 3));

    let providers = providers(primary, alternate, graph.clone(), Duration::from_secs(60));
    let report = discover(&providers, None, 12).await.unwrap();

    assert!(report.results.is_empty());
    // Gated out before verification: the graph is never consulted.
    assert_eq!(graph.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unverified_candidates_are_dropped() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Ghost Ventures raises seed round",
            "Ghost Ventures raises seed round",
        ],
    ));
    let alternate = Arc::new(FakeFeed::new(SourceTag::Newsdata, &[]));
    let graph = Arc::new(FakeGraph::new());

    let providers = providers(primary, alternate, graph, Duration::from_secs(60));
    let report = discover(&providers, None, 12).await.unwrap();

    assert!(report.results.is_empty());
}

#[tokio::test]
async fn disallowed_candidates_never_reach_verification() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Leeds United raises funding for stadium expansion",
            "Leeds United raises funding for stadium expansion",
            "Mercy Hospital expands clinic network",
            "Mercy Hospital expands clinic network",
        ],
    ));
    let alternate = Arc::new(FakeFeed::new(SourceTag::Newsdata, &[]));
    let graph = Arc::new(FakeGraph::new());

    let providers = providers(primary, alternate, graph.clone(), Duration::from_secs(60));
    let report = discover(&providers, None, 12).await.unwrap();

    assert!(report.results.is_empty());
    assert_eq!(graph.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn alternate_feed_failure_degrades_inside_discovery() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Acme Corp raises $50M Series B",
            "Acme Corp raises $50M Series B",
        ],
    ));
    let alternate = Arc::new(FailingFeed {
        tag: SourceTag::Newsdata,
    });
    let graph = Arc::new(FakeGraph::new().with_entity("Acme Corp", 0));

    let providers = providers(primary, alternate, graph, Duration::from_secs(60));
    let report = discover(&providers, None, 12).await.unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].name, "Acme Corp");
}

#[tokio::test]
async fn alternate_feed_failure_propagates_when_queried_directly() {
    let alternate: Arc<dyn NewsFeed> = Arc::new(FailingFeed {
        tag: SourceTag::Newsdata,
    });
    let providers = providers(
        Arc::new(FakeFeed::new(SourceTag::Gdelt, &[])),
        alternate,
        Arc::new(FakeGraph::new()),
        Duration::from_secs(60),
    );

    let err = providers.alternate_articles("acme", 10).await.unwrap_err();
    assert!(matches!(err, ScoutError::MissingCredential(_)));
}

#[tokio::test]
async fn page_size_truncates_ranked_output() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Acme Corp raises $50M Series B",
            "Acme Corp raises $50M Series B",
            "Ghost Ventures raises seed round",
            "Ghost Ventures raises seed round",
        ],
    ));
    let alternate = Arc::new(FakeFeed::new(SourceTag::Newsdata, &[]));
    let graph = Arc::new(
        FakeGraph::new()
            .with_entity("Acme Corp", 1)
            .with_entity("Ghost Ventures", 0),
    );

    let providers = providers(primary, alternate, graph, Duration::from_secs(60));
    let report = discover(&providers, None, 1).await.unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].name, "Acme Corp");
}

// ---------------------------------------------------------------------------
// Cache behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn identical_fetches_within_ttl_hit_the_provider_once() {
    let primary = Arc::new(FakeFeed::new(SourceTag::Gdelt, &["Acme Corp raises funding"]));
    let providers = providers(
        primary.clone(),
        Arc::new(FakeFeed::new(SourceTag::Newsdata, &[])),
        Arc::new(FakeGraph::new()),
        Duration::from_millis(100),
    );

    providers.primary_articles("acme", 25).await.unwrap();
    providers.primary_articles("acme", 25).await.unwrap();
    assert_eq!(primary.call_count(), 1);

    tokio::time::sleep(Duration::from_millis(150)).await;
    providers.primary_articles("acme", 25).await.unwrap();
    assert_eq!(primary.call_count(), 2);
}

#[tokio::test]
async fn different_queries_and_limits_miss_the_cache() {
    let primary = Arc::new(FakeFeed::new(SourceTag::Gdelt, &[]));
    let providers = providers(
        primary.clone(),
        Arc::new(FakeFeed::new(SourceTag::Newsdata, &[])),
        Arc::new(FakeGraph::new()),
        Duration::from_secs(60),
    );

    providers.primary_articles("acme", 25).await.unwrap();
    providers.primary_articles("acme", 10).await.unwrap();
    providers.primary_articles("orbital", 25).await.unwrap();
    // Query normalization is case-insensitive, so this one hits.
    providers.primary_articles("ACME", 25).await.unwrap();
    assert_eq!(primary.call_count(), 3);
}

#[tokio::test]
async fn failed_fetches_are_not_cached() {
    let alternate = Arc::new(FailingFeed {
        tag: SourceTag::Newsdata,
    });
    let providers = providers(
        Arc::new(FakeFeed::new(SourceTag::Gdelt, &[])),
        alternate,
        Arc::new(FakeGraph::new()),
        Duration::from_secs(60),
    );

    assert!(providers.alternate_articles("acme", 10).await.is_err());
    // Still an error on the second call: nothing was cached.
    assert!(providers.alternate_articles("acme", 10).await.is_err());
}

// ---------------------------------------------------------------------------
// Company scoring
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_company_scores_from_default_base() {
    let primary = Arc::new(FakeFeed::new(
        SourceTag::Gdelt,
        &[
            "Acme Corp raises $50M Series B",
            "Acme Corp opens Berlin office",
            "Acme Corp hires CMO",
        ],
    ));
    let alternate = Arc::new(FailingFeed {
        tag: SourceTag::Newsdata,
    });
    let graph = Arc::new(FakeGraph::new().with_entity("Acme Corp", 2));

    let providers = providers(primary, alternate, graph, Duration::from_secs(60));
    let score = score_company(&providers, "", "Acme Corp").await.unwrap();

    assert_eq!(score.company_id, None);
    assert_eq!(score.base_score, 50);
    // media: 3 recent * 3 = 9; newsdata absorbed failure: 0; links: 2 * 3 = 6
    assert_eq!(score.external_score, 15);
    assert_eq!(score.total_score, 65);
    assert_eq!(score.external_signals.len(), 3);
    assert!(score.external_signals[1].detail.contains("No recent"));
}

#[tokio::test]
async fn known_company_uses_directory_base_and_clamps() {
    let titles: Vec<String> = (0..10).map(|i| format!("Aurora Mobility story {i}")).collect();
    let title_refs: Vec<&str> = titles.iter().map(|s| s.as_str()).collect();
    let primary = Arc::new(FakeFeed::new(SourceTag::Gdelt, &title_refs));
    let alternate = Arc::new(FakeFeed::new(SourceTag::Newsdata, &title_refs));
    let graph = Arc::new(FakeGraph::new().with_entity("Aurora Mobility", 10));

    let providers = providers(primary, alternate, graph, Duration::from_secs(60));
    let score = score_company(&providers, "aurora-mobility", "").await.unwrap();

    assert_eq!(score.company_id.as_deref(), Some("aurora-mobility"));
    assert_eq!(score.base_score, 84);
    // 20 + 20 + 15 on top of 84 clamps to 100
    assert_eq!(score.external_score, 55);
    assert_eq!(score.total_score, 100);
}

#[tokio::test]
async fn missing_identifiers_reject_the_request() {
    let providers = providers(
        Arc::new(FakeFeed::new(SourceTag::Gdelt, &[])),
        Arc::new(FakeFeed::new(SourceTag::Newsdata, &[])),
        Arc::new(FakeGraph::new()),
        Duration::from_secs(60),
    );

    let err = score_company(&providers, "", "  ").await.unwrap_err();
    assert!(matches!(err, ScoutError::MissingParameter(_)));
}
