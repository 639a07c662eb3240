use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::{NotificationEvent, RollerKind};
use crate::db::models::comment::{CommentResponse, NewComment};
use crate::db::repositories::comments::CommentRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::error::{AppError, AppResult};
use crate::mailer::MailQueue;
use crate::policy::{self, Action, Resource};
use crate::services::authorize_roller_read;
use crate::services::context::RequestContext;
use crate::services::notifications_service::NotificationsService;
use crate::validation::comment::validate_comment_body;

pub struct CommentsService;

impl CommentsService {
    /// Commenting subscribes the commenter to the roller and fans a comment
    /// notification out to its subscriber set.
    pub fn create(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        kind: RollerKind,
        roller_id: Uuid,
        body: String,
    ) -> AppResult<CommentResponse> {
        authorize_roller_read(db, ctx, kind, roller_id)?;
        validate_comment_body(&body)?;
        let comment = CommentRepo::insert(
            db,
            NewComment {
                kind,
                roller_id,
                user_id: ctx.actor_id(),
                body,
            },
        )?;
        SubscriptionRepo::ensure_roller(db, ctx.actor_id(), kind, roller_id)?;
        NotificationsService::fan_out(
            db,
            mailer,
            ctx.actor_id(),
            kind,
            roller_id,
            NotificationEvent::Comment,
            None,
            Some(comment.id),
        )?;
        Ok(comment.into())
    }

    pub fn list_by_roller(
        db: &Database,
        ctx: &RequestContext,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> AppResult<Vec<CommentResponse>> {
        authorize_roller_read(db, ctx, kind, roller_id)?;
        Ok(CommentRepo::list_by_roller(db, kind, roller_id)
            .into_iter()
            .map(CommentResponse::from)
            .collect())
    }

    pub fn update(
        db: &mut Database,
        ctx: &RequestContext,
        comment_id: Uuid,
        body: String,
    ) -> AppResult<CommentResponse> {
        let comment =
            CommentRepo::find(db, comment_id).ok_or_else(|| AppError::not_found("comment"))?;
        policy::authorize(
            &ctx.actor,
            Action::Update,
            &Resource::Comment {
                owner_id: comment.user_id,
            },
        )?;
        validate_comment_body(&body)?;
        Ok(CommentRepo::update_body(db, comment_id, body)?.into())
    }

    pub fn destroy(db: &mut Database, ctx: &RequestContext, comment_id: Uuid) -> AppResult<()> {
        let comment =
            CommentRepo::find(db, comment_id).ok_or_else(|| AppError::not_found("comment"))?;
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Comment {
                owner_id: comment.user_id,
            },
        )?;
        CommentRepo::delete(db, comment_id)?;
        Ok(())
    }
}
