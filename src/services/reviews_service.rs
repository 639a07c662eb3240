use uuid::Uuid;

use crate::db::Database;
use crate::db::models::review::{NewReview, Review, ReviewResponse};
use crate::db::models::task::Task;
use crate::db::repositories::reviews::ReviewRepo;
use crate::db::repositories::tasks::{TaskAssigneeRepo, TaskRepo};
use crate::db::repositories::users::UserRepo;
use crate::error::{AppError, AppResult};
use crate::mailer::MailQueue;
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;
use crate::db::enums::RollerKind;
use crate::services::{authorize_roller_read, task_scope, workflow};

pub struct ReviewsService;

impl ReviewsService {
    /// An assignee requests review; the row starts pending. The cohort
    /// uniqueness constraint rejects a second pending/approved review in the
    /// task's current cycle.
    pub fn create(db: &mut Database, ctx: &RequestContext, task_id: Uuid) -> AppResult<Review> {
        task_scope(db, task_id)?;
        let actor_is_assignee = TaskAssigneeRepo::is_assigned(db, task_id, ctx.actor_id());
        policy::authorize(
            &ctx.actor,
            Action::Create,
            &Resource::Reviews { actor_is_assignee },
        )?;
        Ok(ReviewRepo::insert(
            db,
            NewReview {
                task_id,
                user_id: ctx.actor_id(),
            },
        )?)
    }

    pub fn list_by_task(
        db: &Database,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> AppResult<Vec<ReviewResponse>> {
        authorize_roller_read(db, ctx, RollerKind::Task, task_id)?;
        Ok(ReviewRepo::list_by_task(db, task_id)
            .into_iter()
            .map(ReviewResponse::from)
            .collect())
    }

    /// Re-saves a review: the requester refreshes their still-pending row,
    /// typically to pull it back into the task's current cycle after a
    /// reopen; staff may re-save any review. The cohort constraint applies,
    /// so a refresh loses against a newer pending or approved review.
    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        review_id: Uuid,
    ) -> AppResult<ReviewResponse> {
        let (review, task) = Self::load(db, review_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Update,
            &Resource::Review {
                owner_id: review.user_id,
                pending: review.pending(),
                active_pending: review.pending() && ReviewRepo::in_current_cohort(db, &review),
                task_open: !task.closed,
            },
        )?;
        Ok(ReviewRepo::touch(db, review_id)?.into())
    }

    /// Approve: stamps the reviewer onto the row and closes the task with its
    /// full cascade. Refused when the review is stale or no longer valid.
    pub fn approve(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        review_id: Uuid,
    ) -> AppResult<ReviewResponse> {
        let (review, task) = Self::load(db, review_id)?;
        Self::authorize_resolution(db, ctx, Action::Approve, &review, &task)?;
        Self::guard_review_valid(db, &review)?;
        let review = ReviewRepo::save_status(db, review_id, Some(true), ctx.actor_id())?;
        workflow::close::<Task>(db, mailer, ctx.actor_id(), review.task_id)?;
        tracing::info!(review_id = %review.id, task_id = %review.task_id, "review approved");
        Ok(review.into())
    }

    /// Disapprove: symmetric, reopens the task.
    pub fn disapprove(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        review_id: Uuid,
    ) -> AppResult<ReviewResponse> {
        let (review, task) = Self::load(db, review_id)?;
        Self::authorize_resolution(db, ctx, Action::Disapprove, &review, &task)?;
        Self::guard_review_valid(db, &review)?;
        let review = ReviewRepo::save_status(db, review_id, Some(false), ctx.actor_id())?;
        workflow::open::<Task>(db, mailer, ctx.actor_id(), review.task_id)?;
        tracing::info!(review_id = %review.id, task_id = %review.task_id, "review disapproved");
        Ok(review.into())
    }

    /// Only the owner may withdraw a review, and only while it is pending and
    /// the task is still open.
    pub fn destroy(db: &mut Database, ctx: &RequestContext, review_id: Uuid) -> AppResult<()> {
        let (review, task) = Self::load(db, review_id)?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Review {
                owner_id: review.user_id,
                pending: review.pending(),
                active_pending: review.pending() && ReviewRepo::in_current_cohort(db, &review),
                task_open: !task.closed,
            },
        )?;
        ReviewRepo::delete(db, review_id)?;
        Ok(())
    }

    fn load(db: &Database, review_id: Uuid) -> AppResult<(Review, Task)> {
        let review =
            ReviewRepo::find(db, review_id).ok_or_else(|| AppError::not_found("review"))?;
        let task =
            TaskRepo::find(db, review.task_id).ok_or_else(|| AppError::not_found("task"))?;
        Ok((review, task))
    }

    fn authorize_resolution(
        db: &Database,
        ctx: &RequestContext,
        action: Action,
        review: &Review,
        task: &Task,
    ) -> AppResult<()> {
        policy::authorize(
            &ctx.actor,
            action,
            &Resource::Review {
                owner_id: review.user_id,
                pending: review.pending(),
                active_pending: review.pending() && ReviewRepo::in_current_cohort(db, review),
                task_open: !task.closed,
            },
        )
    }

    /// A review whose requesting user has since been destroyed cannot be
    /// resolved; the race surfaces as a stale-state refusal, not a crash.
    fn guard_review_valid(db: &Database, review: &Review) -> AppResult<()> {
        if UserRepo::find(db, review.user_id).is_none() {
            return Err(AppError::stale("review is no longer valid"));
        }
        Ok(())
    }
}
