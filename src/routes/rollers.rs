use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::error::AppResult;
use crate::routes::parse_kind;
use crate::services::context::RequestContext;
use crate::services::search_service::{RollerFilters, SearchService};

#[derive(Deserialize)]
pub struct RollerQuery {
    pub kind: Option<String>,
    pub closed: Option<bool>,
    pub query: Option<String>,
}

pub async fn search_rollers(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(params): Query<RollerQuery>,
) -> AppResult<impl IntoResponse> {
    let filters = RollerFilters {
        kind: params.kind.as_deref().map(parse_kind).transpose()?,
        closed: params.closed,
        query: params.query,
    };
    let db = state.store.read();
    let rollers = SearchService::search(&db, &ctx, &filters);
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(rollers, "Rollers retrieved successfully")),
    ))
}
