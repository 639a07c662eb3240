use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::{NotificationEvent, RollerKind};
use crate::db::models::task::{NewTask, Task, TaskResponse, UpdateTask};
use crate::db::repositories::progressions::ProgressionRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::db::repositories::tasks::{TaskAssigneeRepo, TaskRepo};
use crate::error::AppResult;
use crate::mailer::MailQueue;
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;
use crate::services::notifications_service::NotificationsService;
use crate::services::{project_scope, task_scope, workflow};
use crate::validation::roller::{validate_create_roller, validate_update_roller};

pub struct TasksService;

impl TasksService {
    /// Direct task creation is an admin surface; the normal path into the
    /// board is planning a task out of an issue with the same call.
    pub fn create(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        new_task: NewTaskData,
    ) -> AppResult<TaskResponse> {
        policy::authorize(&ctx.actor, Action::Create, &Resource::Tasks)?;
        project_scope(db, new_task.project_id)?;
        validate_create_roller(&new_task.summary, &new_task.description)?;
        let task = TaskRepo::insert(
            db,
            NewTask {
                project_id: new_task.project_id,
                task_type_id: new_task.task_type_id,
                issue_id: new_task.issue_id,
                user_id: ctx.actor_id(),
                summary: new_task.summary,
                description: new_task.description,
            },
        )?;
        SubscriptionRepo::ensure_roller(db, ctx.actor_id(), RollerKind::Task, task.id)?;
        NotificationsService::fan_out(
            db,
            mailer,
            ctx.actor_id(),
            RollerKind::Task,
            task.id,
            NotificationEvent::New,
            None,
            None,
        )?;
        tracing::info!(task_id = %task.id, "task created");
        Ok(Self::response(db, task))
    }

    pub fn list(db: &Database, ctx: &RequestContext) -> Vec<TaskResponse> {
        TaskRepo::list(db)
            .into_iter()
            .filter(|task| Self::readable(db, ctx, task.id))
            .map(|task| Self::response(db, task))
            .collect()
    }

    pub fn list_by_project(
        db: &Database,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<Vec<TaskResponse>> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Read,
            &Resource::Project {
                project: &project,
                category: &category,
            },
        )?;
        Ok(TaskRepo::list_by_project(db, project_id)
            .into_iter()
            .map(|task| Self::response(db, task))
            .collect())
    }

    pub fn get(db: &Database, ctx: &RequestContext, task_id: Uuid) -> AppResult<TaskResponse> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Read,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: false,
            },
        )?;
        Ok(Self::response(db, task))
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        task_id: Uuid,
        changes: UpdateTask,
    ) -> AppResult<TaskResponse> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Update,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: false,
            },
        )?;
        validate_update_roller(&changes.summary, &changes.description)?;
        let task = TaskRepo::update(db, task_id, &changes)?;
        Ok(Self::response(db, task))
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, task_id: Uuid) -> AppResult<()> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: false,
            },
        )?;
        TaskRepo::delete(db, task_id)?;
        tracing::info!(task_id = %task_id, "task destroyed");
        Ok(())
    }

    pub fn close(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> AppResult<TaskResponse> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Close,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: false,
            },
        )?;
        let task: Task = workflow::close(db, mailer, ctx.actor_id(), task_id)?;
        Ok(Self::response(db, task))
    }

    pub fn open(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> AppResult<TaskResponse> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Open,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: false,
            },
        )?;
        let task: Task = workflow::open(db, mailer, ctx.actor_id(), task_id)?;
        Ok(Self::response(db, task))
    }

    /// Assigning subscribes the assignee; status flips to "assigned" by
    /// derivation, nothing stored.
    pub fn assign(
        db: &mut Database,
        ctx: &RequestContext,
        task_id: Uuid,
        assignee_id: Uuid,
    ) -> AppResult<TaskResponse> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Assign,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: assignee_id == ctx.actor_id(),
            },
        )?;
        TaskAssigneeRepo::insert(db, task_id, assignee_id)?;
        SubscriptionRepo::ensure_roller(db, assignee_id, RollerKind::Task, task_id)?;
        Ok(Self::response(db, task))
    }

    /// Unassigning force-finishes the assignee's unfinished progressions on
    /// this task only; rows on other tasks survive.
    pub fn unassign(
        db: &mut Database,
        ctx: &RequestContext,
        task_id: Uuid,
        assignee_id: Uuid,
    ) -> AppResult<TaskResponse> {
        let (task, project, category) = task_scope(db, task_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Unassign,
            &Resource::Task {
                task: &task,
                project: &project,
                category: &category,
                assignee_is_actor: assignee_id == ctx.actor_id(),
            },
        )?;
        TaskAssigneeRepo::delete(db, task_id, assignee_id)?;
        ProgressionRepo::finish_all_unfinished(db, task_id, assignee_id, Utc::now());
        Ok(Self::response(db, task))
    }

    fn readable(db: &Database, ctx: &RequestContext, task_id: Uuid) -> bool {
        crate::services::authorize_roller_read(db, ctx, RollerKind::Task, task_id).is_ok()
    }

    fn response(db: &Database, task: Task) -> TaskResponse {
        let assignee_ids = TaskAssigneeRepo::assignee_ids(db, task.id);
        TaskResponse::from_row(task, assignee_ids)
    }
}

/// Creation payload, separate from the row-shaped `NewTask` because the
/// creator is taken from the request context.
pub struct NewTaskData {
    pub project_id: Uuid,
    pub task_type_id: Uuid,
    pub issue_id: Option<Uuid>,
    pub summary: String,
    pub description: String,
}
