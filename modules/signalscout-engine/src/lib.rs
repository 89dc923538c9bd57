//! Signal aggregation and candidate scoring pipeline.
//!
//! Turns merged news titles into normalized organization-name candidates,
//! detects weighted behavioral signals in their coverage, verifies survivors
//! against Wikidata, and fuses everything into a bounded readiness score.

pub mod company;
pub mod directory;
pub mod discovery;
pub mod extractor;
pub mod gates;
pub mod providers;
pub mod rules;
pub mod score;

pub use company::{score_company, CompanyScore};
pub use directory::{find_company, KnownCompany};
pub use discovery::{discover, DiscoveryReport, DEFAULT_DISCOVERY_QUERY};
pub use extractor::{extract_candidates, normalize_candidate, Candidate};
pub use providers::{live_providers, CachedProviders, KnowledgeGraph, NewsFeed, ProviderSet};
pub use rules::{detect_signals, is_disallowed_candidate, signal_score};
pub use score::{clamp_score, discovery_score, ExternalSignal};
