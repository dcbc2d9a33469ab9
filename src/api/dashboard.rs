//! Catalog dashboard endpoint

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;

/// Header carrying the caller's session id between visits
pub const SESSION_HEADER: &str = "x-session-id";

/// Catalog summary with the caller's visit count
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Total number of books
    pub num_books: i64,
    /// Total number of authors
    pub num_authors: i64,
    /// Total number of copies
    pub num_instances: i64,
    /// Copies currently available
    pub num_instances_available: i64,
    /// Visits by this session before the current one
    pub num_visits: u64,
    /// Session id to send back in the X-Session-Id header
    pub session_id: Uuid,
}

/// Catalog summary: entity counts plus the per-session visit counter.
/// Pass the session id from a previous response in the X-Session-Id header
/// to keep counting; without one a new session is started.
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "dashboard",
    params(
        ("X-Session-Id" = Option<Uuid>, Header, description = "Session id from a previous visit")
    ),
    responses(
        (status = 200, description = "Catalog summary", body = DashboardResponse)
    )
)]
pub async fn catalog_summary(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DashboardResponse>> {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok());

    let counts = state.services.dashboard.counts().await?;
    let (session_id, num_visits) = state.services.dashboard.record_visit(session_id);

    Ok(Json(DashboardResponse {
        num_books: counts.num_books,
        num_authors: counts.num_authors,
        num_instances: counts.num_instances,
        num_instances_available: counts.num_instances_available,
        num_visits,
        session_id,
    }))
}
