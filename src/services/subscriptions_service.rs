use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::RollerKind;
use crate::db::models::subscription::SubscriptionList;
use crate::db::repositories::categories::CategoryRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::error::{AppError, AppResult};
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;
use crate::services::{authorize_roller_read, project_scope};

// Subscriptions are strictly self-service: every operation targets the
// actor's own rows, so the ownership check is implicit in the signatures.
pub struct SubscriptionsService;

impl SubscriptionsService {
    /// Returns true when a new subscription row was created; false means the
    /// actor was already subscribed.
    pub fn subscribe_roller(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> AppResult<bool> {
        authorize_roller_read(db, ctx, kind, roller_id)?;
        Ok(SubscriptionRepo::ensure_roller(
            db,
            ctx.actor_id(),
            kind,
            roller_id,
        )?)
    }

    pub fn unsubscribe_roller(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> AppResult<()> {
        Ok(SubscriptionRepo::delete_roller(
            db,
            ctx.actor_id(),
            kind,
            roller_id,
        )?)
    }

    pub fn subscribe_category(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        category_id: Uuid,
    ) -> AppResult<bool> {
        let category =
            CategoryRepo::find(db, category_id).ok_or_else(|| AppError::not_found("category"))?;
        policy::authorize(&ctx.actor, Action::Read, &Resource::Category(&category))?;
        Ok(SubscriptionRepo::ensure_category(
            db,
            ctx.actor_id(),
            kind,
            category_id,
        )?)
    }

    pub fn unsubscribe_category(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        category_id: Uuid,
    ) -> AppResult<()> {
        Ok(SubscriptionRepo::delete_category(
            db,
            ctx.actor_id(),
            kind,
            category_id,
        )?)
    }

    pub fn subscribe_project(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        project_id: Uuid,
    ) -> AppResult<bool> {
        let (project, category) = project_scope(db, project_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Read,
            &Resource::Project {
                project: &project,
                category: &category,
            },
        )?;
        Ok(SubscriptionRepo::ensure_project(
            db,
            ctx.actor_id(),
            kind,
            project_id,
        )?)
    }

    pub fn unsubscribe_project(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        project_id: Uuid,
    ) -> AppResult<()> {
        Ok(SubscriptionRepo::delete_project(
            db,
            ctx.actor_id(),
            kind,
            project_id,
        )?)
    }

    pub fn list(db: &Database, ctx: &RequestContext) -> SubscriptionList {
        let (categories, projects, rollers) = SubscriptionRepo::list_for_user(db, ctx.actor_id());
        SubscriptionList {
            categories,
            projects,
            rollers,
        }
    }
}
