use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::{RollerKind, TaskStatus};
use crate::db::models::project::Project;
use crate::db::repositories::categories::CategoryRepo;
use crate::db::repositories::projects::ProjectRepo;
use crate::db::repositories::tasks::TaskAssigneeRepo;
use crate::policy::project_visible;
use crate::services::context::RequestContext;

/// Unified listing row over issues and tasks.
#[derive(Debug, Clone, Serialize)]
pub struct RollerView {
    pub kind: RollerKind,
    pub id: Uuid,
    pub summary: String,
    pub closed: bool,
    pub status: &'static str,
    pub project_id: Uuid,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone)]
pub struct RollerFilters {
    pub kind: Option<RollerKind>,
    pub closed: Option<bool>,
    /// Case-insensitive substring match on the summary.
    pub query: Option<String>,
}

pub struct SearchService;

impl SearchService {
    /// Visibility is applied first: rollers in projects the actor cannot see
    /// never appear, whatever the filters say.
    pub fn search(db: &Database, ctx: &RequestContext, filters: &RollerFilters) -> Vec<RollerView> {
        let visible: HashMap<Uuid, Project> = ProjectRepo::list(db)
            .into_iter()
            .filter(|p| {
                CategoryRepo::find(db, p.category_id)
                    .is_some_and(|c| project_visible(&ctx.actor, p, &c))
            })
            .map(|p| (p.id, p))
            .collect();

        let needle = filters.query.as_deref().map(str::to_lowercase);
        let mut rows: Vec<RollerView> = Vec::new();

        if filters.kind != Some(RollerKind::Task) {
            for issue in db.issues.values() {
                let Some(project) = visible.get(&issue.project_id) else {
                    continue;
                };
                rows.push(RollerView {
                    kind: RollerKind::Issue,
                    id: issue.id,
                    summary: issue.summary.clone(),
                    closed: issue.closed,
                    status: if issue.closed { "closed" } else { "open" },
                    project_id: project.id,
                    project_name: project.name.clone(),
                    created_at: issue.created_at,
                });
            }
        }
        if filters.kind != Some(RollerKind::Issue) {
            for task in db.tasks.values() {
                let Some(project) = visible.get(&task.project_id) else {
                    continue;
                };
                let assignees = TaskAssigneeRepo::assignee_ids(db, task.id).len();
                let status: TaskStatus = task.status(assignees);
                rows.push(RollerView {
                    kind: RollerKind::Task,
                    id: task.id,
                    summary: task.summary.clone(),
                    closed: task.closed,
                    status: status.as_str(),
                    project_id: project.id,
                    project_name: project.name.clone(),
                    created_at: task.created_at,
                });
            }
        }

        rows.retain(|row| {
            filters.closed.is_none_or(|closed| row.closed == closed)
                && needle
                    .as_deref()
                    .is_none_or(|q| row.summary.to_lowercase().contains(q))
        });
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}
