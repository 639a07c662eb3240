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
use crate::db::models::review::ReviewResponse;
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::reviews_service::ReviewsService;

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let review = ReviewsService::create(&mut db, &ctx, task_id)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            ReviewResponse::from(review),
            "Review requested",
        )),
    ))
}

pub async fn get_task_reviews(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let reviews = ReviewsService::list_by_task(&db, &ctx, task_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(reviews, "Reviews retrieved successfully")),
    ))
}

pub async fn update_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(review_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let review = ReviewsService::update(&mut db, &ctx, review_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(review, "Review refreshed")),
    ))
}

pub async fn approve_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(review_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let review = ReviewsService::approve(&mut db, state.mailer.as_ref(), &ctx, review_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(review, "Review approved, task closed")),
    ))
}

pub async fn disapprove_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(review_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let review = ReviewsService::disapprove(&mut db, state.mailer.as_ref(), &ctx, review_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(review, "Review disapproved, task reopened")),
    ))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(review_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    ReviewsService::destroy(&mut db, &ctx, review_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Review deleted successfully")),
    ))
}
