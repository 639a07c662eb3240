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
use crate::services::notifications_service::NotificationsService;

pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let notifications = NotificationsService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            notifications,
            "Notifications retrieved successfully",
        )),
    )
}

pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(notification_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    NotificationsService::destroy(&mut db, &ctx, notification_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success(
            (),
            "Notification deleted successfully",
        )),
    ))
}

pub async fn delete_roller_notifications(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((kind, roller_id)): Path<(String, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let mut db = state.store.write();
    let deleted = NotificationsService::destroy_for_roller(&mut db, &ctx, kind, roller_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(deleted, "Notifications cleared")),
    ))
}
