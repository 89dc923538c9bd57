use serde::{Deserialize, Serialize};

/// Best-match entity from `wbsearchentities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikidataEntity {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub url: String,
}

/// An entity sponsored by the looked-up entity (P859 edge), with its
/// optional instance-of label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikidataSponsorship {
    pub id: String,
    pub label: String,
    pub url: String,
    pub instance: Option<String>,
}

/// Combined result of the two-step lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikidataLookup {
    pub entity: Option<WikidataEntity>,
    pub sponsor_of: Vec<WikidataSponsorship>,
}

// --- Raw wire shapes ---

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SparqlResults {
    #[serde(default)]
    pub bindings: Vec<SparqlBinding>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SparqlBinding {
    pub item: Option<SparqlValue>,
    #[serde(rename = "itemLabel")]
    pub item_label: Option<SparqlValue>,
    #[serde(rename = "instanceLabel")]
    pub instance_label: Option<SparqlValue>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SparqlValue {
    pub value: String,
}

impl SparqlBinding {
    /// Map one result row onto a sponsorship edge. The entity id is the tail
    /// of the item URI; the label falls back to the id when the label
    /// service returned nothing useful.
    pub fn into_sponsorship(self) -> WikidataSponsorship {
        let item_url = self.item.map(|v| v.value).unwrap_or_default();
        let id = item_url
            .rsplit('/')
            .next()
            .unwrap_or(item_url.as_str())
            .to_string();
        let url = if item_url.is_empty() {
            format!("https://www.wikidata.org/wiki/{id}")
        } else {
            item_url
        };
        WikidataSponsorship {
            label: self
                .item_label
                .map(|v| v.value)
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| id.clone()),
            id,
            url,
            instance: self.instance_label.map(|v| v.value),
        }
    }
}
