pub mod error;
pub mod types;

pub use error::{Result, WikidataError};
pub use types::{WikidataEntity, WikidataLookup, WikidataSponsorship};

use types::{SearchResponse, SparqlResponse};

const SEARCH_URL: &str = "https://www.wikidata.org/w/api.php";

const SPARQL_URL: &str = "https://query.wikidata.org/sparql";

const USER_AGENT: &str = "signal-scout/0.1";

/// How many sponsorship edges one lookup pulls at most.
const SPONSOR_LIMIT: u32 = 10;

pub struct WikidataClient {
    client: reqwest::Client,
}

impl WikidataClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Best-match entity search, limit 1.
    pub async fn search_entity(&self, name: &str) -> Result<Option<WikidataEntity>> {
        let resp = self
            .client
            .get(SEARCH_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("action", "wbsearchentities"),
                ("search", name),
                ("language", "en"),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WikidataError::Search {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: SearchResponse = resp.json().await?;
        Ok(envelope.search.into_iter().next().map(|hit| WikidataEntity {
            url: format!("https://www.wikidata.org/wiki/{}", hit.id),
            id: hit.id,
            label: hit.label,
            description: hit.description,
        }))
    }

    /// Entities whose "has sponsor" (P859) statement points at `entity_id`,
    /// i.e. things this entity sponsors.
    pub async fn sponsorship_links(&self, entity_id: &str) -> Result<Vec<WikidataSponsorship>> {
        let sparql = format!(
            "SELECT ?item ?itemLabel ?instanceLabel WHERE {{\n\
             ?item wdt:P859 wd:{entity_id}.\n\
             OPTIONAL {{ ?item wdt:P31 ?instance. }}\n\
             SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"en\". }}\n\
             }}\n\
             LIMIT {SPONSOR_LIMIT}"
        );

        let resp = self
            .client
            .get(SPARQL_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/sparql-results+json")
            .query(&[("format", "json"), ("query", sparql.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WikidataError::Sparql {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: SparqlResponse = resp.json().await?;
        Ok(envelope
            .results
            .bindings
            .into_iter()
            .map(|binding| binding.into_sponsorship())
            .collect())
    }

    /// Two-step lookup: entity search, then sponsorship edges for the match.
    /// No match short-circuits to an empty result rather than an error.
    pub async fn lookup(&self, name: &str) -> Result<WikidataLookup> {
        let Some(entity) = self.search_entity(name).await? else {
            return Ok(WikidataLookup::default());
        };

        let sponsor_of = self.sponsorship_links(&entity.id).await?;
        tracing::debug!(
            name,
            entity_id = %entity.id,
            links = sponsor_of.len(),
            "Wikidata lookup complete"
        );

        Ok(WikidataLookup {
            entity: Some(entity),
            sponsor_of,
        })
    }
}

impl Default for WikidataClient {
    fn default() -> Self {
        Self::new()
    }
}
