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
use crate::db::models::project::{NewProject, UpdateProject};
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::projects_service::ProjectsService;

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub category_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub internal: bool,
}

#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub internal: Option<bool>,
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let project = ProjectsService::create(
        &mut db,
        &ctx,
        NewProject {
            category_id: payload.category_id,
            name: payload.name,
            visible: payload.visible,
            internal: payload.internal,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(project, "Project created successfully")),
    ))
}

pub async fn get_projects(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let projects = ProjectsService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            projects,
            "Projects retrieved successfully",
        )),
    )
}

pub async fn get_category_projects(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let projects = ProjectsService::list_by_category(&db, &ctx, category_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            projects,
            "Projects retrieved successfully",
        )),
    ))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(project_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let project = ProjectsService::get(&db, &ctx, project_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(project, "Project retrieved successfully")),
    ))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let project = ProjectsService::update(
        &mut db,
        &ctx,
        project_id,
        UpdateProject {
            name: payload.name,
            visible: payload.visible,
            internal: payload.internal,
        },
    )?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(project, "Project updated successfully")),
    ))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(project_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    ProjectsService::destroy(&mut db, &ctx, project_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Project deleted successfully")),
    ))
}
