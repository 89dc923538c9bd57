use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use signalscout_common::ScoutError;

use crate::AppState;

// --- Query structs ---

/// `query` preferred, `q` accepted as an alias.
#[derive(Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
    q: Option<String>,
}

impl SearchQuery {
    fn value(&self) -> Option<&str> {
        self.query
            .as_deref()
            .or(self.q.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    company_id: Option<String>,
    name: Option<String>,
}

// --- Helpers ---

fn error_response(err: ScoutError) -> Response {
    warn!(error = %err, "Request failed");
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

fn missing_query() -> Response {
    error_response(ScoutError::MissingParameter("query".to_string()))
}

// --- Handlers ---

/// Primary news feed, queried directly.
pub async fn signal_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(query) = params.value() else {
        return missing_query();
    };

    match state.providers.primary_articles(query, 10).await {
        Ok(articles) => Json(serde_json::json!({
            "query": query,
            "articles": articles,
            "fetchedAt": Utc::now(),
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Knowledge-graph lookup: best-match entity plus its sponsorship links.
pub async fn entity_lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(query) = params.value() else {
        return missing_query();
    };

    match state.providers.entity_lookup(query).await {
        Ok(lookup) => Json(serde_json::json!({
            "query": query,
            "entity": lookup.entity,
            "sponsorOf": lookup.sponsor_of,
            "fetchedAt": Utc::now(),
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Score one organization by directory id or name.
pub async fn company_score(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompanyQuery>,
) -> Response {
    let company_id = params.company_id.as_deref().unwrap_or("");
    let name = params.name.as_deref().unwrap_or("");

    match signalscout_engine::score_company(&state.providers, company_id, name).await {
        Ok(score) => Json(score).into_response(),
        Err(e) => error_response(e),
    }
}

/// Run discovery. The query defaults to the broad sponsorship vocabulary.
pub async fn discover(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Response {
    match signalscout_engine::discover(&state.providers, params.value(), state.page_size).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}
