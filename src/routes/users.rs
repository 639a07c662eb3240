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
use crate::db::enums::EmployeeType;
use crate::db::models::api::ApiResponse;
use crate::db::models::user::{UpdateUser, UserBasicInfo};
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;
use crate::services::users_service::UsersService;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub employee_type: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct PromoteRequest {
    pub employee_type: String,
}

fn parse_employee_type(s: &str) -> AppResult<EmployeeType> {
    EmployeeType::parse(s)
        .ok_or_else(|| AppError::validation(format!("unknown employee type: {}", s)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let employee_type = payload
        .employee_type
        .as_deref()
        .map(parse_employee_type)
        .transpose()?;
    let mut db = state.store.write();
    let user = UsersService::create(&mut db, &ctx, payload.name, payload.email, employee_type)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            UserBasicInfo::from(user),
            "User created successfully",
        )),
    ))
}

pub async fn get_users(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let users = UsersService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(users, "Users retrieved successfully")),
    )
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let user = UsersService::get(&db, &ctx, user_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserBasicInfo::from(user),
            "User retrieved successfully",
        )),
    ))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let user = UsersService::update(
        &mut db,
        &ctx,
        user_id,
        UpdateUser {
            name: payload.name,
            email: payload.email,
        },
    )?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserBasicInfo::from(user),
            "User updated successfully",
        )),
    ))
}

pub async fn promote_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<PromoteRequest>,
) -> AppResult<impl IntoResponse> {
    let employee_type = parse_employee_type(&payload.employee_type)?;
    let mut db = state.store.write();
    let user = UsersService::promote(&mut db, &ctx, user_id, employee_type)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserBasicInfo::from(user),
            "Role assigned successfully",
        )),
    ))
}

pub async fn cancel_role(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let user = UsersService::cancel(&mut db, &ctx, user_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            UserBasicInfo::from(user),
            "Role revoked successfully",
        )),
    ))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(user_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    UsersService::destroy(&mut db, &ctx, user_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "User deleted successfully")),
    ))
}
