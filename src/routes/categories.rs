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
use crate::db::models::category::{NewCategory, UpdateCategory};
use crate::error::AppResult;
use crate::services::categories_service::CategoriesService;
use crate::services::context::RequestContext;

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub internal: bool,
}

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub internal: Option<bool>,
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let category = CategoriesService::create(
        &mut db,
        &ctx,
        NewCategory {
            name: payload.name,
            visible: payload.visible,
            internal: payload.internal,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(category, "Category created successfully")),
    ))
}

pub async fn get_categories(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let categories = CategoriesService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            categories,
            "Categories retrieved successfully",
        )),
    )
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let category = CategoriesService::get(&db, &ctx, category_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            category,
            "Category retrieved successfully",
        )),
    ))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let category = CategoriesService::update(
        &mut db,
        &ctx,
        category_id,
        UpdateCategory {
            name: payload.name,
            visible: payload.visible,
            internal: payload.internal,
        },
    )?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(category, "Category updated successfully")),
    ))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    CategoriesService::destroy(&mut db, &ctx, category_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success(
            (),
            "Category deleted successfully",
        )),
    ))
}
