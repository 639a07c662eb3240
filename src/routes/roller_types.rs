use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use crate::db::models::roller_type::{NewRollerType, UpdateRollerType};
use crate::error::AppResult;
use crate::routes::parse_kind;
use crate::services::context::RequestContext;
use crate::services::roller_types_service::RollerTypesService;

#[derive(Deserialize)]
pub struct CreateRollerTypeRequest {
    pub kind: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Deserialize)]
pub struct UpdateRollerTypeRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct RollerTypeQuery {
    pub kind: Option<String>,
}

pub async fn create_roller_type(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateRollerTypeRequest>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&payload.kind)?;
    let mut db = state.store.write();
    let roller_type = RollerTypesService::create(
        &mut db,
        &ctx,
        NewRollerType {
            kind,
            name: payload.name,
            icon: payload.icon,
            color: payload.color,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(roller_type, "Type created successfully")),
    ))
}

pub async fn get_roller_types(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(params): Query<RollerTypeQuery>,
) -> AppResult<impl IntoResponse> {
    let kind = params.kind.as_deref().map(parse_kind).transpose()?;
    let db = state.store.read();
    let types = RollerTypesService::list(&db, &ctx, kind)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(types, "Types retrieved successfully")),
    ))
}

pub async fn get_roller_type(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(type_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let roller_type = RollerTypesService::get(&db, &ctx, type_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            roller_type,
            "Type retrieved successfully",
        )),
    ))
}

pub async fn update_roller_type(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(type_id): Path<Uuid>,
    Json(payload): Json<UpdateRollerTypeRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let roller_type = RollerTypesService::update(
        &mut db,
        &ctx,
        type_id,
        UpdateRollerType {
            name: payload.name,
            icon: payload.icon,
            color: payload.color,
        },
    )?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(roller_type, "Type updated successfully")),
    ))
}

pub async fn delete_roller_type(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(type_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    RollerTypesService::destroy(&mut db, &ctx, type_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Type deleted successfully")),
    ))
}
