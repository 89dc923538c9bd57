//! Provider seams and the cache-through layer.
//!
//! The pipeline talks to two news feeds and one knowledge graph through
//! `async_trait` interfaces so tests can substitute deterministic fakes.
//! `CachedProviders` fronts every call with the injected `FetchCache`;
//! only successful fetches are cached, so failures retry on the next
//! request. The degrade-vs-propagate policy lives here too: aggregate flows
//! absorb alternate-feed failures, everything else propagates.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use gdelt_client::GdeltClient;
use newsdata_client::NewsdataClient;
use signalscout_common::{
    ArticleRecord, Config, Entity, EntityLookup, FetchCache, Result, ScoutError, SourceTag,
    SponsorshipLink,
};
use wikidata_client::WikidataClient;

/// A news feed queried by text, returning normalized article records.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    fn tag(&self) -> SourceTag;
    async fn fetch(&self, query: &str, limit: u32) -> Result<Vec<ArticleRecord>>;
}

/// Entity search plus sponsorship-relationship query.
#[async_trait]
pub trait KnowledgeGraph: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<EntityLookup>;
}

/// The three collaborators a pipeline run needs.
#[derive(Clone)]
pub struct ProviderSet {
    pub primary: Arc<dyn NewsFeed>,
    pub alternate: Arc<dyn NewsFeed>,
    pub graph: Arc<dyn KnowledgeGraph>,
}

/// Build the live provider set from configuration. The alternate feed is
/// constructed even without a credential; it fails on use, and aggregate
/// flows absorb that failure.
pub fn live_providers(config: &Config) -> ProviderSet {
    ProviderSet {
        primary: Arc::new(GdeltFeed::new()),
        alternate: Arc::new(NewsdataFeed::new(config.newsdata_api_key.clone())),
        graph: Arc::new(WikidataGraph::new()),
    }
}

// --- Live adapters ---

pub struct GdeltFeed {
    client: GdeltClient,
}

impl GdeltFeed {
    pub fn new() -> Self {
        Self {
            client: GdeltClient::new(),
        }
    }
}

impl Default for GdeltFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsFeed for GdeltFeed {
    fn tag(&self) -> SourceTag {
        SourceTag::Gdelt
    }

    async fn fetch(&self, query: &str, limit: u32) -> Result<Vec<ArticleRecord>> {
        let articles = self
            .client
            .fetch_articles(query, limit)
            .await
            .map_err(|e| match e {
                gdelt_client::GdeltError::Api { status, message } => {
                    ScoutError::upstream("GDELT", status, message)
                }
                other => ScoutError::upstream("GDELT", 502, other.to_string()),
            })?;

        Ok(articles
            .into_iter()
            .map(|a| ArticleRecord {
                title: a.title,
                url: a.url,
                source: SourceTag::Gdelt,
                published_at: a.seen_date,
            })
            .collect())
    }
}

pub struct NewsdataFeed {
    client: Option<NewsdataClient>,
}

impl NewsdataFeed {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: api_key.map(NewsdataClient::new),
        }
    }
}

#[async_trait]
impl NewsFeed for NewsdataFeed {
    fn tag(&self) -> SourceTag {
        SourceTag::Newsdata
    }

    async fn fetch(&self, query: &str, limit: u32) -> Result<Vec<ArticleRecord>> {
        let Some(client) = &self.client else {
            return Err(ScoutError::MissingCredential("NEWSDATA_API_KEY".to_string()));
        };

        let articles = client.fetch_articles(query, limit).await.map_err(|e| match e {
            newsdata_client::NewsdataError::Api { status, message } => {
                ScoutError::upstream("Newsdata", status, message)
            }
            other => ScoutError::upstream("Newsdata", 502, other.to_string()),
        })?;

        Ok(articles
            .into_iter()
            .map(|a| ArticleRecord {
                title: a.title,
                url: a.url,
                source: SourceTag::Newsdata,
                published_at: a.pub_date,
            })
            .collect())
    }
}

pub struct WikidataGraph {
    client: WikidataClient,
}

impl WikidataGraph {
    pub fn new() -> Self {
        Self {
            client: WikidataClient::new(),
        }
    }
}

impl Default for WikidataGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeGraph for WikidataGraph {
    async fn lookup(&self, name: &str) -> Result<EntityLookup> {
        let lookup = self.client.lookup(name).await.map_err(|e| {
            let status = e.status().unwrap_or(502);
            ScoutError::upstream("Wikidata", status, e.to_string())
        })?;

        Ok(EntityLookup {
            entity: lookup.entity.map(|e| Entity {
                id: e.id,
                label: e.label,
                description: e.description,
                url: e.url,
            }),
            sponsor_of: lookup
                .sponsor_of
                .into_iter()
                .map(|s| SponsorshipLink {
                    id: s.id,
                    label: s.label,
                    url: s.url,
                    instance: s.instance,
                })
                .collect(),
        })
    }
}

// --- Cache-through layer ---

/// Provider access fronted by the fetch cache. One instance per process,
/// constructed in `main` with the cache it should share.
#[derive(Clone)]
pub struct CachedProviders {
    providers: ProviderSet,
    cache: Arc<FetchCache>,
}

impl CachedProviders {
    pub fn new(providers: ProviderSet, cache: Arc<FetchCache>) -> Self {
        Self { providers, cache }
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    async fn fetch_feed(
        &self,
        feed: &Arc<dyn NewsFeed>,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArticleRecord>> {
        let key = FetchCache::key(&feed.tag().to_string(), query, &limit.to_string());
        if let Some(hit) = self.cache.get::<Vec<ArticleRecord>>(&key) {
            return Ok(hit);
        }

        let articles = feed.fetch(query, limit).await?;
        self.cache.put(&key, &articles);
        Ok(articles)
    }

    /// Primary feed. Failures propagate to the caller.
    pub async fn primary_articles(&self, query: &str, limit: u32) -> Result<Vec<ArticleRecord>> {
        self.fetch_feed(&self.providers.primary, query, limit).await
    }

    /// Alternate feed, surfacing failures. Used when queried directly.
    pub async fn alternate_articles(&self, query: &str, limit: u32) -> Result<Vec<ArticleRecord>> {
        self.fetch_feed(&self.providers.alternate, query, limit).await
    }

    /// Alternate feed inside aggregate flows: failures (including a missing
    /// credential) degrade to an empty result so partial output survives.
    pub async fn alternate_articles_or_empty(&self, query: &str, limit: u32) -> Vec<ArticleRecord> {
        match self.alternate_articles(query, limit).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(query, error = %e, "Alternate feed unavailable, continuing without it");
                Vec::new()
            }
        }
    }

    /// Knowledge-graph lookup. Failures propagate.
    pub async fn entity_lookup(&self, name: &str) -> Result<EntityLookup> {
        let key = FetchCache::key("wikidata", name, "1");
        if let Some(hit) = self.cache.get::<EntityLookup>(&key) {
            return Ok(hit);
        }

        let lookup = self.providers.graph.lookup(name).await?;
        self.cache.put(&key, &lookup);
        Ok(lookup)
    }
}
