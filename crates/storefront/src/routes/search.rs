//! Search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::search::SearchResults;
use crate::state::AppState;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Full search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchPageQuery {
    #[serde(default)]
    pub q: String,
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub results: SearchResults,
    pub is_ready: bool,
}

/// Full search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchPageTemplate {
    pub query: String,
    pub results: SearchResults,
    pub is_ready: bool,
}

/// Search suggestions endpoint (HTMX).
///
/// Returns HTML fragment with search results grouped by type.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    let query_str = query.q.trim();

    if query_str.is_empty() {
        return SearchResultsTemplate {
            results: SearchResults::default(),
            is_ready: state.search().is_ready(),
        }
        .into_response();
    }

    let results = state.search().search(query_str, 4).unwrap_or_default();

    SearchResultsTemplate {
        results,
        is_ready: state.search().is_ready(),
    }
    .into_response()
}

/// Full search page.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchPageQuery>,
) -> impl IntoResponse {
    let query_str = query.q.trim();

    let results = state.search().search(query_str, 50).unwrap_or_default();

    SearchPageTemplate {
        query: query.q.clone(),
        results,
        is_ready: state.search().is_ready(),
    }
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_page))
        .route("/suggest", get(suggest))
}
