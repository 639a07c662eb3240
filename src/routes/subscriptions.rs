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
use crate::routes::parse_kind;
use crate::services::context::RequestContext;
use crate::services::subscriptions_service::SubscriptionsService;

pub async fn get_subscriptions(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let subscriptions = SubscriptionsService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            subscriptions,
            "Subscriptions retrieved successfully",
        )),
    )
}

fn subscribed_response(created: bool) -> (StatusCode, Json<ApiResponse<bool>>) {
    if created {
        (
            StatusCode::CREATED,
            Json(ApiResponse::created(true, "Subscribed")),
        )
    } else {
        (
            StatusCode::OK,
            Json(ApiResponse::success(false, "Already subscribed")),
        )
    }
}

pub async fn subscribe_roller(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, roller_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    let created = SubscriptionsService::subscribe_roller(&mut db, &ctx, kind, roller_id)?;
    Ok(subscribed_response(created))
}

pub async fn unsubscribe_roller(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, roller_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    SubscriptionsService::unsubscribe_roller(&mut db, &ctx, kind, roller_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Unsubscribed")),
    ))
}

pub async fn subscribe_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, project_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    let created = SubscriptionsService::subscribe_project(&mut db, &ctx, kind, project_id)?;
    Ok(subscribed_response(created))
}

pub async fn unsubscribe_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, project_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    SubscriptionsService::unsubscribe_project(&mut db, &ctx, kind, project_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Unsubscribed")),
    ))
}

pub async fn subscribe_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, category_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    let created = SubscriptionsService::subscribe_category(&mut db, &ctx, kind, category_id)?;
    Ok(subscribed_response(created))
}

pub async fn unsubscribe_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, category_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    SubscriptionsService::unsubscribe_category(&mut db, &ctx, kind, category_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Unsubscribed")),
    ))
}
