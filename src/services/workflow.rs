//! The closed-state machine shared by issues and tasks. Transitions are
//! explicit synchronous calls: every side effect (closure/reopening record,
//! actor subscription, notification fan-out) happens right here, in order,
//! instead of behind persistence hooks.

use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::{NotificationEvent, RollerKind};
use crate::db::models::event::{NewClosure, NewReopening};
use crate::db::models::issue::Issue;
use crate::db::models::task::Task;
use crate::db::repositories::events::{ClosureRepo, ReopeningRepo};
use crate::db::repositories::issues::IssueRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::db::repositories::tasks::{TaskAssigneeRepo, TaskRepo};
use crate::db::repositories::users::UserRepo;
use crate::db::store::StoreError;
use crate::error::{AppError, AppResult};
use crate::mailer::MailQueue;
use crate::services::notifications_service::NotificationsService;

/// Capability implemented once per roller kind so the close/open transitions
/// exist in a single place.
pub trait Closeable: Sized + Clone {
    const KIND: RollerKind;

    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
    fn is_closed(&self) -> bool;
    fn find(db: &Database, id: Uuid) -> Option<Self>;
    fn write_closed(db: &mut Database, id: Uuid, closed: bool) -> Result<Self, StoreError>;
    /// Current status label, fed into "old,new" notification details.
    fn status_label(db: &Database, id: Uuid) -> &'static str;
}

impl Closeable for Issue {
    const KIND: RollerKind = RollerKind::Issue;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn find(db: &Database, id: Uuid) -> Option<Self> {
        IssueRepo::find(db, id)
    }

    fn write_closed(db: &mut Database, id: Uuid, closed: bool) -> Result<Self, StoreError> {
        IssueRepo::set_closed(db, id, closed)
    }

    fn status_label(db: &Database, id: Uuid) -> &'static str {
        match IssueRepo::find(db, id) {
            Some(issue) if issue.closed => "closed",
            _ => "open",
        }
    }
}

impl Closeable for Task {
    const KIND: RollerKind = RollerKind::Task;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn find(db: &Database, id: Uuid) -> Option<Self> {
        TaskRepo::find(db, id)
    }

    fn write_closed(db: &mut Database, id: Uuid, closed: bool) -> Result<Self, StoreError> {
        TaskRepo::set_closed(db, id, closed)
    }

    fn status_label(db: &Database, id: Uuid) -> &'static str {
        match TaskRepo::find(db, id) {
            Some(task) => {
                let assignees = TaskAssigneeRepo::assignee_ids(db, id).len();
                task.status(assignees).as_str()
            }
            None => "open",
        }
    }
}

/// Shared validity guard: a transition is refused when the roller's owning
/// user no longer exists (e.g. was destroyed after the form was loaded).
fn guard_valid<R: Closeable>(db: &Database, roller: &R) -> AppResult<()> {
    if UserRepo::find(db, roller.owner_id()).is_none() {
        return Err(AppError::validation(format!(
            "{} is no longer valid: owning user is gone",
            R::KIND.as_str()
        )));
    }
    Ok(())
}

/// open -> closed. Creates a Closure attributed to the actor, flips the flag,
/// ensures the actor's item subscription, and fans out a status notification.
/// A no-op when already closed.
pub fn close<R: Closeable>(
    db: &mut Database,
    mailer: &dyn MailQueue,
    actor_id: Uuid,
    roller_id: Uuid,
) -> AppResult<R> {
    let roller =
        R::find(db, roller_id).ok_or_else(|| AppError::not_found(R::KIND.as_str()))?;
    if roller.is_closed() {
        return Ok(roller);
    }
    guard_valid(db, &roller)?;
    let old_label = R::status_label(db, roller_id);
    ClosureRepo::insert(
        db,
        NewClosure {
            kind: R::KIND,
            roller_id,
            user_id: actor_id,
        },
    )?;
    let updated = R::write_closed(db, roller_id, true)?;
    SubscriptionRepo::ensure_roller(db, actor_id, R::KIND, roller_id)?;
    NotificationsService::fan_out(
        db,
        mailer,
        actor_id,
        R::KIND,
        roller_id,
        NotificationEvent::Status,
        Some(format!("{},closed", old_label)),
        None,
    )?;
    Ok(updated)
}

/// closed -> open. Creates a Reopening whose user is the actor (which may be
/// the user driving a connection destroy rather than anyone acting on the
/// roller itself), flips the flag, subscribes that user, fans out. A no-op
/// when already open.
pub fn open<R: Closeable>(
    db: &mut Database,
    mailer: &dyn MailQueue,
    actor_id: Uuid,
    roller_id: Uuid,
) -> AppResult<R> {
    let roller =
        R::find(db, roller_id).ok_or_else(|| AppError::not_found(R::KIND.as_str()))?;
    if !roller.is_closed() {
        return Ok(roller);
    }
    guard_valid(db, &roller)?;
    ReopeningRepo::insert(
        db,
        NewReopening {
            kind: R::KIND,
            roller_id,
            user_id: actor_id,
        },
    )?;
    let updated = R::write_closed(db, roller_id, false)?;
    SubscriptionRepo::ensure_roller(db, actor_id, R::KIND, roller_id)?;
    let new_label = R::status_label(db, roller_id);
    NotificationsService::fan_out(
        db,
        mailer,
        actor_id,
        R::KIND,
        roller_id,
        NotificationEvent::Status,
        Some(format!("closed,{}", new_label)),
        None,
    )?;
    Ok(updated)
}
