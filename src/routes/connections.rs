use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::error::AppResult;
use crate::routes::parse_kind;
use crate::services::connections_service::ConnectionsService;
use crate::services::context::RequestContext;

#[derive(Deserialize)]
pub struct CreateConnectionRequest {
    pub kind: String,
    pub source_id: Uuid,
    pub target_id: Uuid,
}

pub async fn create_connection(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateConnectionRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&payload.kind)?;
    let mut db = state.store.write();
    let connection = ConnectionsService::create(
        &mut db,
        state.mailer.as_ref(),
        &ctx,
        kind,
        payload.source_id,
        payload.target_id,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            connection,
            "Connection created, source closed",
        )),
    ))
}

pub async fn get_roller_connections(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, roller_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let db = state.store.read();
    let connections = ConnectionsService::list_by_roller(&db, &ctx, kind, roller_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            connections,
            "Connections retrieved successfully",
        )),
    ))
}

pub async fn delete_connection(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(connection_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    ConnectionsService::destroy(&mut db, state.mailer.as_ref(), &ctx, connection_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success(
            (),
            "Connection deleted successfully",
        )),
    ))
}
