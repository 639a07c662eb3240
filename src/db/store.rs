use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use uuid::Uuid;

use crate::db::enums::RollerKind;
use crate::db::models::category::Category;
use crate::db::models::comment::Comment;
use crate::db::models::connection::Connection;
use crate::db::models::event::{Closure, Reopening};
use crate::db::models::issue::Issue;
use crate::db::models::notification::Notification;
use crate::db::models::progression::Progression;
use crate::db::models::project::Project;
use crate::db::models::review::Review;
use crate::db::models::roller_type::RollerType;
use crate::db::models::subscription::{
    CategorySubscription, ProjectSubscription, RollerSubscription,
};
use crate::db::models::task::{Task, TaskAssignee};
use crate::db::models::user::User;

/// Constraint failures surfaced by the store, the in-memory analogue of the
/// relational errors the service layer validates against.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: &'static str },

    #[error("foreign key violated: {relation}")]
    ForeignKey { relation: &'static str },

    #[error("row not found in {table}")]
    NotFound { table: &'static str },
}

/// All tables. Repositories take `&mut Database` the way the services used to
/// thread a pooled connection; one write guard spans one request's unit of
/// work, which keeps each mutation atomic.
#[derive(Default)]
pub struct Database {
    pub users: HashMap<Uuid, User>,
    pub categories: HashMap<Uuid, Category>,
    pub projects: HashMap<Uuid, Project>,
    pub roller_types: HashMap<Uuid, RollerType>,
    pub issues: HashMap<Uuid, Issue>,
    pub tasks: HashMap<Uuid, Task>,
    pub task_assignees: HashMap<Uuid, TaskAssignee>,
    pub progressions: HashMap<Uuid, Progression>,
    pub reviews: HashMap<Uuid, Review>,
    pub connections: HashMap<Uuid, Connection>,
    pub closures: HashMap<Uuid, Closure>,
    pub reopenings: HashMap<Uuid, Reopening>,
    pub comments: HashMap<Uuid, Comment>,
    pub category_subscriptions: HashMap<Uuid, CategorySubscription>,
    pub project_subscriptions: HashMap<Uuid, ProjectSubscription>,
    pub roller_subscriptions: HashMap<Uuid, RollerSubscription>,
    pub notifications: HashMap<Uuid, Notification>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows hanging off a single issue or task: comments, closures,
    /// reopenings, item subscriptions, notifications, and any connection
    /// touching it. Used by the cascade deletes.
    pub fn delete_roller_footprint(&mut self, kind: RollerKind, roller_id: Uuid) {
        self.comments
            .retain(|_, c| !(c.kind == kind && c.roller_id == roller_id));
        self.closures
            .retain(|_, c| !(c.kind == kind && c.roller_id == roller_id));
        self.reopenings
            .retain(|_, r| !(r.kind == kind && r.roller_id == roller_id));
        self.roller_subscriptions
            .retain(|_, s| !(s.kind == kind && s.roller_id == roller_id));
        self.notifications
            .retain(|_, n| !(n.kind == kind && n.roller_id == roller_id));
        self.connections
            .retain(|_, c| !(c.kind == kind && (c.source_id == roller_id || c.target_id == roller_id)));
    }
}

/// Cheap-to-clone handle, shared across request handlers like a pool handle.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Database>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Database::new())),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Database> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Database> {
        self.inner.write()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
