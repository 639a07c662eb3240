use uuid::Uuid;

use crate::db::Database;
use crate::db::enums::RollerKind;
use crate::db::models::connection::{Connection, NewConnection};
use crate::db::models::issue::Issue;
use crate::db::models::task::Task;
use crate::db::repositories::connections::ConnectionRepo;
use crate::db::repositories::events::{ClosureRepo, ReopeningRepo};
use crate::db::repositories::issues::IssueRepo;
use crate::db::repositories::subscriptions::SubscriptionRepo;
use crate::db::repositories::tasks::TaskRepo;
use crate::error::{AppError, AppResult};
use crate::mailer::MailQueue;
use crate::policy::{self, Action, Resource};
use crate::services::context::RequestContext;
use crate::services::{issue_scope, task_scope, workflow};

pub struct ConnectionsService;

impl ConnectionsService {
    /// Creating a connection closes the source through the normal close
    /// transition and subscribes both the actor and the target's owner to
    /// both endpoints (up to four rows, deduplicated).
    pub fn create(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        kind: RollerKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Connection> {
        if source_id == target_id {
            return Err(AppError::validation("cannot connect a roller to itself"));
        }
        Self::authorize_transition(db, ctx, Action::Close, kind, source_id)?;
        let connection = ConnectionRepo::insert(
            db,
            NewConnection {
                kind,
                source_id,
                target_id,
                user_id: ctx.actor_id(),
            },
        )?;
        match kind {
            RollerKind::Issue => {
                workflow::close::<Issue>(db, mailer, ctx.actor_id(), source_id)?;
            }
            RollerKind::Task => {
                workflow::close::<Task>(db, mailer, ctx.actor_id(), source_id)?;
            }
        }
        let target_owner = Self::owner_of(db, kind, target_id)?;
        for user_id in [ctx.actor_id(), target_owner] {
            SubscriptionRepo::ensure_roller(db, user_id, kind, source_id)?;
            SubscriptionRepo::ensure_roller(db, user_id, kind, target_id)?;
        }
        tracing::info!(connection_id = %connection.id, "connection created, source closed");
        Ok(connection)
    }

    pub fn list_by_roller(
        db: &Database,
        ctx: &RequestContext,
        kind: RollerKind,
        roller_id: Uuid,
    ) -> AppResult<Vec<Connection>> {
        crate::services::authorize_roller_read(db, ctx, kind, roller_id)?;
        Ok(ConnectionRepo::list_by_roller(db, kind, roller_id))
    }

    /// Destroying a connection reopens the source only when the connection is
    /// still the cause of its closed state: the source is closed, the close
    /// came with the connection, and nothing has reopened it since. A stale
    /// connection (pre-closed source, or reopened and re-closed later) is
    /// just deleted.
    pub fn destroy(
        db: &mut Database,
        mailer: &dyn MailQueue,
        ctx: &RequestContext,
        connection_id: Uuid,
    ) -> AppResult<()> {
        let connection = ConnectionRepo::find(db, connection_id)
            .ok_or_else(|| AppError::not_found("connection"))?;
        Self::authorize_transition(db, ctx, Action::Open, connection.kind, connection.source_id)?;
        let caused = Self::still_causes_closure(db, &connection);
        ConnectionRepo::delete(db, connection_id)?;
        if caused {
            match connection.kind {
                RollerKind::Issue => {
                    workflow::open::<Issue>(db, mailer, ctx.actor_id(), connection.source_id)?;
                }
                RollerKind::Task => {
                    workflow::open::<Task>(db, mailer, ctx.actor_id(), connection.source_id)?;
                }
            }
        }
        tracing::info!(connection_id = %connection_id, reopened = caused, "connection destroyed");
        Ok(())
    }

    fn still_causes_closure(db: &Database, connection: &Connection) -> bool {
        let closed = match connection.kind {
            RollerKind::Issue => {
                IssueRepo::find(db, connection.source_id).is_some_and(|i| i.closed)
            }
            RollerKind::Task => TaskRepo::find(db, connection.source_id).is_some_and(|t| t.closed),
        };
        if !closed {
            return false;
        }
        // The create cascade writes its closure right after the connection
        // row. A latest closure predating the connection means the source
        // was already closed when the connection was made.
        let closed_by_connection =
            ClosureRepo::last_for(db, connection.kind, connection.source_id)
                .is_some_and(|closure| closure.created_at >= connection.created_at);
        if !closed_by_connection {
            return false;
        }
        // A reopening after the connection means some later close owns the
        // current closed state.
        match ReopeningRepo::last_for(db, connection.kind, connection.source_id) {
            Some(reopening) => reopening.created_at <= connection.created_at,
            None => true,
        }
    }

    /// Connection authority follows the source's own transition rules: whoever
    /// may close the source may connect from it, whoever may open it may
    /// disconnect.
    fn authorize_transition(
        db: &Database,
        ctx: &RequestContext,
        action: Action,
        kind: RollerKind,
        source_id: Uuid,
    ) -> AppResult<()> {
        match kind {
            RollerKind::Issue => {
                let (issue, project, category) = issue_scope(db, source_id)?;
                policy::authorize(
                    &ctx.actor,
                    action,
                    &Resource::Issue {
                        issue: &issue,
                        project: &project,
                        category: &category,
                    },
                )
            }
            RollerKind::Task => {
                let (task, project, category) = task_scope(db, source_id)?;
                policy::authorize(
                    &ctx.actor,
                    action,
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

    fn owner_of(db: &Database, kind: RollerKind, roller_id: Uuid) -> AppResult<Uuid> {
        match kind {
            RollerKind::Issue => IssueRepo::find(db, roller_id)
                .map(|i| i.user_id)
                .ok_or_else(|| AppError::not_found("issue")),
            RollerKind::Task => TaskRepo::find(db, roller_id)
                .map(|t| t.user_id)
                .ok_or_else(|| AppError::not_found("task")),
        }
    }
}
