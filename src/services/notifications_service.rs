use std::collections::BTreeSet;

use serde_json::json;
use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::{NotificationEvent, RollerKind};
use crate::db::models::notification::{NewNotification, Notification};
use crate::db::repositories::comments::CommentRepo;
use crate::db::repositories::issues::IssueRepo;
use crate::db::repositories::notifications::NotificationRepo;
use crate::db::repositories::projects::ProjectRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::db::repositories::tasks::{TaskAssigneeRepo, TaskRepo};
use crate::error::{AppError, AppResult};
use crate::mailer::{DELIVER_NOW, MAILERS_QUEUE, MailJob, MailQueue};
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;

pub struct NotificationsService;

impl NotificationsService {
    /// Fan-out for a qualifying event: the recipient set is the union of
    /// item subscribers, matching project-broad and category-broad
    /// subscribers, and (for tasks) current assignees, minus the acting
    /// user. One notification row and at most one mail job per recipient.
    pub fn fan_out(
        db: &mut Database,
        mailer: &dyn MailQueue,
        actor_id: Uuid,
        kind: RollerKind,
        roller_id: Uuid,
        event: NotificationEvent,
        details: Option<String>,
        comment_id: Option<Uuid>,
    ) -> AppResult<usize> {
        let project_id = match kind {
            RollerKind::Issue => {
                IssueRepo::find(db, roller_id)
                    .ok_or_else(|| AppError::not_found("issue"))?
                    .project_id
            }
            RollerKind::Task => {
                TaskRepo::find(db, roller_id)
                    .ok_or_else(|| AppError::not_found("task"))?
                    .project_id
            }
        };
        let category_id = ProjectRepo::find(db, project_id)
            .ok_or_else(|| AppError::not_found("project"))?
            .category_id;

        let mut recipients: BTreeSet<Uuid> = BTreeSet::new();
        recipients.extend(SubscriptionRepo::roller_subscribers(db, kind, roller_id));
        recipients.extend(SubscriptionRepo::project_subscribers(db, kind, project_id));
        recipients.extend(SubscriptionRepo::category_subscribers(db, kind, category_id));
        if kind == RollerKind::Task {
            recipients.extend(TaskAssigneeRepo::assignee_ids(db, roller_id));
        }
        recipients.remove(&actor_id);

        let details: Option<String> = details.map(|d| d.chars().take(100).collect());
        let mut delivered = 0;
        for user_id in recipients {
            if !db.users.contains_key(&user_id) {
                continue;
            }
            let notification = NotificationRepo::insert(
                db,
                NewNotification {
                    user_id,
                    kind,
                    roller_id,
                    event,
                    details: details.clone(),
                    comment_id,
                },
            )?;
            Self::send_email(db, mailer, &notification);
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Sole gate for mail enqueue. Silently skips malformed notifications
    /// (comment events without a live comment, status events without
    /// details); enqueue failure is the queue's concern and is only logged.
    pub fn send_email(db: &Database, mailer: &dyn MailQueue, notification: &Notification) {
        let params = match notification.event {
            NotificationEvent::New => json!({
                "roller_id": notification.roller_id,
                "user_id": notification.user_id,
            }),
            NotificationEvent::Status => {
                let Some(details) = &notification.details else {
                    return;
                };
                json!({
                    "roller_id": notification.roller_id,
                    "user_id": notification.user_id,
                    "details": details,
                })
            }
            NotificationEvent::Comment => {
                let Some(comment_id) = notification.comment_id else {
                    return;
                };
                if CommentRepo::find(db, comment_id).is_none() {
                    return;
                }
                json!({
                    "roller_id": notification.roller_id,
                    "user_id": notification.user_id,
                    "comment_id": comment_id,
                })
            }
        };
        let job = MailJob {
            queue: MAILERS_QUEUE,
            mailer: notification.kind.mailer_class().to_string(),
            action: notification.event.as_str().to_string(),
            delivery: DELIVER_NOW,
            params,
        };
        if let Err(e) = mailer.enqueue(job) {
            tracing::warn!("mail enqueue failed: {}", e);
        }
    }

    pub fn list(db: &Database, ctx: &RequestContext) -> Vec<Notification> {
        NotificationRepo::list_for_user(db, ctx.actor_id())
    }

    pub fn destroy(
        db: &mut Database,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<()> {
        let notification = NotificationRepo::find(db, notification_id)
            .ok_or_else(|| AppError::not_found("notification"))?;
        let roller_owner_id = Self::roller_owner(db, notification.kind, notification.roller_id);
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Notification {
                owner_id: notification.user_id,
                roller_owner_id,
            },
        )?;
        NotificationRepo::delete(db, notification_id)?;
        Ok(())
    }

    /// Bulk clear of the actor's own notifications on one roller.
    pub fn destroy_for_roller(
        db: &mut Database,
        ctx: &RequestContext,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> AppResult<usize> {
        policy::authorize(
            &ctx.actor,
            Action::Destroy,
            &Resource::Notification {
                owner_id: ctx.actor_id(),
                roller_owner_id: None,
            },
        )?;
        Ok(NotificationRepo::delete_for_user_roller(
            db,
            ctx.actor_id(),
            kind,
            roller_id,
        ))
    }

    fn roller_owner(db: &Database, kind: RollerKind, roller_id: Uuid) -> Option<Uuid> {
        match kind {
            RollerKind::Issue => IssueRepo::find(db, roller_id).map(|i| i.user_id),
            RollerKind::Task => TaskRepo::find(db, roller_id).map(|t| t.user_id),
        }
    }
}
