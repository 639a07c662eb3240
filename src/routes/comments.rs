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
use crate::services::comments_service::CommentsService;
use crate::services::context::RequestContext;

#[derive(Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, roller_id)): Path<(String, Uuid)>,
    Json(payload): Json<CommentRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    let comment = CommentsService::create(
        &mut db,
        state.mailer.as_ref(),
        &ctx,
        kind,
        roller_id,
        payload.body,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(comment, "Comment created successfully")),
    ))
}

pub async fn get_roller_comments(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, roller_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let db = state.store.read();
    let comments = CommentsService::list_by_roller(&db, &ctx, kind, roller_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            comments,
            "Comments retrieved successfully",
        )),
    ))
}

pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(comment_id): Path<Uuid>,
    Json(payload): Json<CommentRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let comment = CommentsService::update(&mut db, &ctx, comment_id, payload.body)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(comment, "Comment updated successfully")),
    ))
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(comment_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    CommentsService::destroy(&mut db, &ctx, comment_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Comment deleted successfully")),
    ))
}
