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
use crate::db::models::task::UpdateTask;
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::tasks_service::{NewTaskData, TasksService};

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub project_id: Uuid,
    pub task_type_id: Uuid,
    pub issue_id: Option<Uuid>,
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub task_type_id: Option<Uuid>,
    pub issue_id: Option<Uuid>,
    /// Explicit flag because a missing and a null issue_id are
    /// indistinguishable in JSON.
    #[serde(default)]
    pub detach_issue: bool,
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub assignee_id: Uuid,
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let task = TasksService::create(
        &mut db,
        state.mailer.as_ref(),
        &ctx,
        NewTaskData {
            project_id: payload.project_id,
            task_type_id: payload.task_type_id,
            issue_id: payload.issue_id,
            summary: payload.summary,
            description: payload.description,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task, "Task created successfully")),
    ))
}

pub async fn get_tasks(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let tasks = TasksService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(tasks, "Tasks retrieved successfully")),
    )
}

pub async fn get_project_tasks(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(project_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let tasks = TasksService::list_by_project(&db, &ctx, project_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(tasks, "Tasks retrieved successfully")),
    ))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let task = TasksService::get(&db, &ctx, task_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(task, "Task retrieved successfully")),
    ))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let issue_id = if payload.detach_issue {
        Some(None)
    } else {
        payload.issue_id.map(Some)
    };
    let mut db = state.store.write();
    let task = TasksService::update(
        &mut db,
        &ctx,
        task_id,
        UpdateTask {
            summary: payload.summary,
            description: payload.description,
            task_type_id: payload.task_type_id,
            issue_id,
        },
    )?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(task, "Task updated successfully")),
    ))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    TasksService::destroy(&mut db, &ctx, task_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Task deleted successfully")),
    ))
}

pub async fn close_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let task = TasksService::close(&mut db, state.mailer.as_ref(), &ctx, task_id)?;
    Ok((StatusCode::OK, Json(ApiResponse::success(task, "Task closed"))))
}

pub async fn open_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let task = TasksService::open(&mut db, state.mailer.as_ref(), &ctx, task_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(task, "Task reopened")),
    ))
}

pub async fn assign_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let task = TasksService::assign(&mut db, &ctx, task_id, payload.assignee_id)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task, "Assignee added successfully")),
    ))
}

pub async fn unassign_task(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path((task_id, user_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let task = TasksService::unassign(&mut db, &ctx, task_id, user_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(task, "Assignee removed successfully")),
    ))
}
