use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::progressions_service::ProgressionsService;

pub async fn create_progression(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let progression = ProgressionsService::create(&mut db, &ctx, task_id)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(progression, "Progression started")),
    ))
}

pub async fn get_task_progressions(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let progressions = ProgressionsService::list_by_task(&db, &ctx, task_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            progressions,
            "Progressions retrieved successfully",
        )),
    ))
}

pub async fn finish_progression(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(progression_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let progression = ProgressionsService::finish(&mut db, &ctx, progression_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(progression, "Progression finished")),
    ))
}

pub async fn delete_progression(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(progression_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    ProgressionsService::destroy(&mut db, &ctx, progression_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success(
            (),
            "Progression deleted successfully",
        )),
    ))
}
