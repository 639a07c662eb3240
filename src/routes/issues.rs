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
use crate::db::models::issue::UpdateIssue;
use crate::error::AppResult;
use crate::services::context::RequestContext;
use crate::services::issues_service::IssuesService;

#[derive(Deserialize)]
pub struct CreateIssueRequest {
    pub project_id: Uuid,
    pub issue_type_id: Uuid,
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateIssueRequest {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub issue_type_id: Option<Uuid>,
}

pub async fn create_issue(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CreateIssueRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let issue = IssuesService::create(
        &mut db,
        state.mailer.as_ref(),
        &ctx,
        payload.project_id,
        payload.issue_type_id,
        payload.summary,
        payload.description,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(issue, "Issue created successfully")),
    ))
}

pub async fn get_issues(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> impl IntoResponse {
    let db = state.store.read();
    let issues = IssuesService::list(&db, &ctx);
    (
        StatusCode::OK,
        Json(ApiResponse::success(issues, "Issues retrieved successfully")),
    )
}

pub async fn get_project_issues(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(project_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let issues = IssuesService::list_by_project(&db, &ctx, project_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issues, "Issues retrieved successfully")),
    ))
}

pub async fn get_issue(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(issue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let db = state.store.read();
    let issue = IssuesService::get(&db, &ctx, issue_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issue, "Issue retrieved successfully")),
    ))
}

pub async fn update_issue(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(issue_id): Path<Uuid>,
    Json(payload): Json<UpdateIssueRequest>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let issue = IssuesService::update(
        &mut db,
        &ctx,
        issue_id,
        UpdateIssue {
            summary: payload.summary,
            description: payload.description,
            issue_type_id: payload.issue_type_id,
        },
    )?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issue, "Issue updated successfully")),
    ))
}

pub async fn delete_issue(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(issue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    IssuesService::destroy(&mut db, &ctx, issue_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::<()>::success((), "Issue deleted successfully")),
    ))
}

pub async fn close_issue(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(issue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let issue = IssuesService::close(&mut db, state.mailer.as_ref(), &ctx, issue_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issue, "Issue closed")),
    ))
}

pub async fn open_issue(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(issue_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut db = state.store.write();
    let issue = IssuesService::open(&mut db, state.mailer.as_ref(), &ctx, issue_id)?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(issue, "Issue reopened")),
    ))
}
