pub mod categories_service;
pub mod comments_service;
pub mod connections_service;
pub mod context;
pub mod issues_service;
pub mod notifications_service;
pub mod progressions_service;
pub mod projects_service;
pub mod reviews_service;
pub mod roller_types_service;
pub mod search_service;
pub mod subscriptions_service;
pub mod tasks_service;
pub mod users_service;
pub mod workflow;

use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::RollerKind;
use crate::db::models::category::Category;
use crate::db::models::issue::Issue;
use crate::db::models::project::Project;
use crate::db::models::task::Task;
use crate::db::repositories::categories::CategoryRepo;
use crate::db::repositories::issues::IssueRepo;
use crate::db::repositories::projects::ProjectRepo;
use crate::db::repositories::tasks::TaskRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;

// Scope loaders shared by the services: a roller's permission checks always
// need its project and category.

pub(crate) fn project_scope(db: &Database, project_id: Uuid) -> AppResult<(Project, Category)> {
    let project = ProjectRepo::find(db, project_id).ok_or_else(|| AppError::not_found("project"))?;
    let category = CategoryRepo::find(db, project.category_id)
        .ok_or_else(|| AppError::not_found("category"))?;
    Ok((project, category))
}

pub(crate) fn issue_scope(db: &Database, issue_id: Uuid) -> AppResult<(Issue, Project, Category)> {
    let issue = IssueRepo::find(db, issue_id).ok_or_else(|| AppError::not_found("issue"))?;
    let (project, category) = project_scope(db, issue.project_id)?;
    Ok((issue, project, category))
}

pub(crate) fn task_scope(db: &Database, task_id: Uuid) -> AppResult<(Task, Project, Category)> {
    let task = TaskRepo::find(db, task_id).ok_or_else(|| AppError::not_found("task"))?;
    let (project, category) = project_scope(db, task.project_id)?;
    Ok((task, project, category))
}

/// Read gate over either roller kind, for the surfaces that hang off a
/// roller (comments, subscriptions, connections).
pub(crate) fn authorize_roller_read(
    db: &Database,
    ctx: &RequestContext,
    kind: RollerKind,
    roller_id: Uuid,
) -> AppResult<()> {
    match kind {
        RollerKind::Issue => {
            let (issue, project, category) = issue_scope(db, roller_id)?;
            policy::authorize(
                &ctx.actor,
                Action::Read,
                &Resource::Issue {
                    issue: &issue,
                    project: &project,
                    category: &category,
                },
            )
        }
        RollerKind::Task => {
            let (task, project, category) = task_scope(db, roller_id)?;
            policy::authorize(
                &ctx.actor,
                Action::Read,
                &Resource::Task {
                    task: &task,
                    project: &project,
                    category: &category,
                    assignee_is_actor: false,
                },
            )
        }
    }
}
