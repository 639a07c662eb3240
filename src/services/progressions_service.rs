use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::db::models::progression::{NewProgression, Progression};
use crate::db::repositories::progressions::ProgressionRepo;
use crate::db::repositories::tasks::TaskAssigneeRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;
use crate::services::task_scope;

pub struct ProgressionsService;

impl ProgressionsService {
    /// Starts a work session. Only a current assignee may start one, and only
    /// one unfinished session per (task, user) may exist.
    pub fn create(
        db: &mut Database,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> AppResult<Progression> {
        task_scope(db, task_id)?;
        let actor_is_assignee = TaskAssigneeRepo::is_assigned(db, task_id, ctx.actor_id());
        policy::authorize(
            &ctx.actor,
            Action::Create,
            &Resource::Progressions { actor_is_assignee },
        )?;
        Ok(ProgressionRepo::insert(
            db,
            NewProgression {
                task_id,
                user_id: ctx.actor_id(),
            },
        )?)
    }

    /// Staff see every session on the task, workers only their own.
    pub fn list_by_task(
        db: &Database,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> AppResult<Vec<Progression>> {
        task_scope(db, task_id)?;
        Ok(ProgressionRepo::list_by_task(db, task_id)
            .into_iter()
            .filter(|p| {
                policy::allowed(
                    &ctx.actor,
                    Action::Read,
                    &Resource::Progression { owner_id: p.user_id },
                )
            })
            .collect())
    }

    /// Idempotent: finishing a finished session changes nothing.
    pub fn finish(
        db: &mut Database,
        ctx: &RequestContext,
        progression_id: Uuid,
    ) -> AppResult<Progression> {
        let progression = ProgressionRepo::find(db, progression_id)
            .ok_or_else(|| AppError::not_found("progression"))?;
        policy::authorize(
            &ctx.actor,
            Action::Finish,
            &Resource::Progression {
                owner_id: progression.user_id,
            },
        )?;
        if progression.finished {
            return Ok(progression);
        }
        Ok(ProgressionRepo::finish(db, progression_id, Utc::now())?)
    }

    pub fn destroy(
        db: &mut Database,
        ctx: &RequestContext,
        progression_id: Uuid,
    ) -> AppResult<()> {
        let progression = ProgressionRepo::find(db, progression_id)
            .ok_or_else(|| AppError::not_found("progression"))?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Progression {
                owner_id: progression.user_id,
            },
        )?;
        ProgressionRepo::delete(db, progression_id)?;
        Ok(())
    }
}
