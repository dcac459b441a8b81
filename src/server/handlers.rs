// HTTP request handlers

use crate::display::DisplayIcon;
use crate::formatter::{plugin_listings, PluginListing};
use crate::registry::Table;
use crate::search::dispatch::{self, filter_fields, EntityView};
use crate::search::params::PAGE_PARAM;
use crate::search::{PageResult, QueryFailure, SearchParams, ViewError};
use crate::server::ServerState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

// ── Request/Response types ───────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub plugins: Vec<PluginListing>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: Option<String>,
    pub tables: BTreeMap<&'static str, u64>,
}

/// Navigation link to one page of the current search
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub page: u64,
    pub url: String,
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub last: String,
    pub pages: Vec<PageLink>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub table: &'static str,
    pub name: &'static str,
    /// Active filters as a flat `key, value, ...` list
    pub filters: Vec<String>,
    #[serde(flatten)]
    pub result: PageResult<DisplayIcon>,
    pub links: PageLinks,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

fn error_response(status: StatusCode, code: &str, error: String) -> Response {
    let error = ErrorResponse {
        error,
        code: code.to_string(),
    };
    (status, Json(error)).into_response()
}

fn unknown_table(state: &ServerState, path: &str) -> Response {
    state.metrics.inc_not_found();
    error_response(
        StatusCode::NOT_FOUND,
        "TABLE_NOT_FOUND",
        format!("Unknown table: {}", path),
    )
}

fn query_failed(state: &ServerState, err: QueryFailure) -> Response {
    state.metrics.inc_errors();
    tracing::error!("Query failed: {}", err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "QUERY_FAILED", err.to_string())
}

/// Links for every page in the navigation window plus first/previous/next/last
pub fn page_links<S>(result: &PageResult<S>, url_for: impl Fn(u64) -> String) -> PageLinks {
    PageLinks {
        first: url_for(1),
        previous: result.has_previous.then(|| url_for(result.page - 1)),
        next: result.has_next.then(|| url_for(result.page + 1)),
        last: url_for(result.total_pages),
        pages: result
            .nav_pages()
            .map(|page| PageLink {
                page,
                url: url_for(page),
                current: page == result.page,
            })
            .collect(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// Plugins with their tables
pub async fn index() -> impl IntoResponse {
    Json(IndexResponse {
        plugins: plugin_listings(),
    })
}

/// Health check endpoint
pub async fn health(State(state): State<ServerState>) -> Response {
    let store = state.store.lock().await;

    match store.table_counts() {
        Ok(counts) => Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: store.path().map(|p| p.display().to_string()),
            tables: counts.into_iter().collect(),
        })
        .into_response(),
        Err(e) => query_failed(&state, e),
    }
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<ServerState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Single entity detail
pub async fn view(
    State(state): State<ServerState>,
    Path((path, id)): Path<(String, String)>,
) -> Response {
    let Some(table) = Table::from_path(&path) else {
        return unknown_table(&state, &path);
    };
    state.metrics.inc_views();

    let result: Result<EntityView, ViewError> = {
        let store = state.store.lock().await;
        dispatch::view_table(&store, table, &id)
    };

    match result {
        Ok(view) => Json(view).into_response(),
        Err(e) if e.is_not_found() => {
            state.metrics.inc_not_found();
            error_response(StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND", e.to_string())
        }
        Err(ViewError::Query(e)) => query_failed(&state, e),
        Err(e) => {
            state.metrics.inc_errors();
            tracing::error!("View failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "VIEW_FAILED", e.to_string())
        }
    }
}

/// Filtered, paginated search
pub async fn search(
    State(state): State<ServerState>,
    Path(path): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let Some(table) = Table::from_path(&path) else {
        return unknown_table(&state, &path);
    };
    state.metrics.inc_searches();

    let params = SearchParams::from_pairs(pairs);
    // single connection; requests are serialized
    let result = {
        let store = state.store.lock().await;
        dispatch::search_table(&store, &state.service, table, params.page(), &params)
    };

    match result {
        Ok(result) => {
            let filters = params.active_filters(filter_fields(table));
            let links = page_links(&result, |page| {
                let mut query = filters.clone();
                query.push(PAGE_PARAM.to_string());
                query.push(page.to_string());
                table.search_url_with_params(&query)
            });
            Json(SearchResponse {
                table: table.path(),
                name: table.name(),
                filters,
                result,
                links,
            })
            .into_response()
        }
        Err(e) => query_failed(&state, e),
    }
}

/// Unfiltered listing; virtual tables apply their default search
pub async fn all(
    State(state): State<ServerState>,
    Path(path): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let Some(table) = Table::from_path(&path) else {
        return unknown_table(&state, &path);
    };
    state.metrics.inc_searches();

    let page = SearchParams::from_pairs(pairs).page();
    let result = {
        let store = state.store.lock().await;
        dispatch::all_table(&store, &state.service, table, page)
    };

    match result {
        Ok(result) => {
            let links = page_links(&result, |page| {
                table.all_url_with_params(&[PAGE_PARAM.to_string(), page.to_string()])
            });
            Json(SearchResponse {
                table: table.path(),
                name: table.name(),
                filters: Vec::new(),
                result,
                links,
            })
            .into_response()
        }
        Err(e) => query_failed(&state, e),
    }
}
