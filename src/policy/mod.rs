//! Authorization engine: a pure function of actor role and a resource
//! snapshot. Services build the `Resource` variant with whatever ownership or
//! state context its rules need, so every decision here is stateless and
//! exhaustively matched over the four roles plus "no role".

use uuid::Uuid;

use crate::db::models::category::Category;
use crate::db::models::issue::Issue;
use crate::db::models::project::Project;
use crate::db::models::task::Task;
use crate::db::models::user::User;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Destroy,
    Close,
    Open,
    Assign,
    Unassign,
    Finish,
    Approve,
    Disapprove,
    Promote,
    Cancel,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Destroy => "destroy",
            Action::Close => "close",
            Action::Open => "open",
            Action::Assign => "assign",
            Action::Unassign => "unassign",
            Action::Finish => "finish",
            Action::Approve => "approve",
            Action::Disapprove => "disapprove",
            Action::Promote => "promote",
            Action::Cancel => "cancel",
        }
    }
}

pub enum Resource<'a> {
    /// Collection-level: create/list categories.
    Categories,
    Category(&'a Category),
    Projects,
    Project {
        project: &'a Project,
        category: &'a Category,
    },
    /// Creating an issue inside a project.
    Issues {
        project: &'a Project,
        category: &'a Category,
    },
    Issue {
        issue: &'a Issue,
        project: &'a Project,
        category: &'a Category,
    },
    /// Creating a task directly (outside the review workflow).
    Tasks,
    Task {
        task: &'a Task,
        project: &'a Project,
        category: &'a Category,
        /// For Assign/Unassign: whether the target assignee is the actor.
        assignee_is_actor: bool,
    },
    /// Creating a progression on a task.
    Progressions {
        actor_is_assignee: bool,
    },
    Progression {
        owner_id: Uuid,
    },
    /// Creating a review on a task.
    Reviews {
        actor_is_assignee: bool,
    },
    Review {
        owner_id: Uuid,
        pending: bool,
        /// Pending and part of the task's current open/close cycle.
        active_pending: bool,
        task_open: bool,
    },
    Comment {
        owner_id: Uuid,
    },
    Subscription {
        owner_id: Uuid,
    },
    RollerTypes,
    Users,
    UserRecord {
        target: &'a User,
    },
    Notification {
        owner_id: Uuid,
        roller_owner_id: Option<Uuid>,
    },
}

impl Resource<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Categories | Resource::Category(_) => "category",
            Resource::Projects | Resource::Project { .. } => "project",
            Resource::Issues { .. } | Resource::Issue { .. } => "issue",
            Resource::Tasks | Resource::Task { .. } => "task",
            Resource::Progressions { .. } | Resource::Progression { .. } => "progression",
            Resource::Reviews { .. } | Resource::Review { .. } => "review",
            Resource::Comment { .. } => "comment",
            Resource::Subscription { .. } => "subscription",
            Resource::RollerTypes => "roller type",
            Resource::Users | Resource::UserRecord { .. } => "user",
            Resource::Notification { .. } => "notification",
        }
    }
}

/// Visibility of a category to an actor. Admin and Reviewer see everything;
/// everyone else needs `visible`, and `internal` additionally requires an
/// employee role.
pub fn category_visible(actor: &User, category: &Category) -> bool {
    actor.is_staff() || (category.visible && (!category.internal || actor.is_employee()))
}

/// Project visibility also requires its category to be visible.
pub fn project_visible(actor: &User, project: &Project, category: &Category) -> bool {
    actor.is_staff()
        || (category_visible(actor, category)
            && project.visible
            && (!project.internal || actor.is_employee()))
}

pub fn allowed(actor: &User, action: Action, resource: &Resource<'_>) -> bool {
    match resource {
        Resource::Categories => match action {
            Action::Create => actor.is_admin(),
            Action::Read => true,
            _ => false,
        },
        Resource::Category(category) => match action {
            Action::Read => category_visible(actor, category),
            Action::Update => actor.is_staff(),
            Action::Destroy => actor.is_admin(),
            _ => false,
        },
        Resource::Projects => match action {
            Action::Create => actor.is_staff(),
            Action::Read => true,
            _ => false,
        },
        Resource::Project { project, category } => match action {
            Action::Read => project_visible(actor, project, category),
            Action::Update => actor.is_staff(),
            Action::Destroy => actor.is_admin(),
            _ => false,
        },
        Resource::Issues { project, category } => match action {
            // Anyone authenticated may report an issue they can see the
            // project of.
            Action::Create => project_visible(actor, project, category),
            _ => false,
        },
        Resource::Issue {
            issue,
            project,
            category,
        } => match action {
            Action::Read => project_visible(actor, project, category),
            Action::Update => actor.is_staff() || issue.user_id == actor.id,
            Action::Destroy => actor.is_admin(),
            Action::Close | Action::Open => actor.is_staff(),
            _ => false,
        },
        Resource::Tasks => match action {
            Action::Create => actor.is_admin(),
            _ => false,
        },
        Resource::Task {
            task,
            project,
            category,
            assignee_is_actor,
        } => match action {
            Action::Read => project_visible(actor, project, category),
            Action::Update => actor.is_staff() || task.user_id == actor.id,
            Action::Destroy => actor.is_admin(),
            Action::Close | Action::Open => actor.is_admin(),
            Action::Assign | Action::Unassign => {
                actor.is_staff()
                    || (actor.employee_type == Some(crate::db::enums::EmployeeType::Worker)
                        && *assignee_is_actor)
            }
            _ => false,
        },
        Resource::Progressions { actor_is_assignee } => match action {
            Action::Create => *actor_is_assignee,
            _ => false,
        },
        Resource::Progression { owner_id } => match action {
            Action::Read | Action::Update => actor.is_staff() || *owner_id == actor.id,
            Action::Destroy => actor.is_staff(),
            Action::Finish => *owner_id == actor.id,
            _ => false,
        },
        Resource::Reviews { actor_is_assignee } => match action {
            Action::Create => *actor_is_assignee,
            _ => false,
        },
        Resource::Review {
            owner_id,
            pending,
            active_pending,
            task_open,
        } => match action {
            Action::Read => true,
            Action::Update => actor.is_staff() || (*owner_id == actor.id && *pending),
            Action::Destroy => *owner_id == actor.id && *pending && *task_open,
            Action::Approve | Action::Disapprove => actor.is_staff() && *active_pending,
            _ => false,
        },
        Resource::Comment { owner_id } => match action {
            Action::Read => true,
            Action::Update | Action::Destroy => actor.is_staff() || *owner_id == actor.id,
            _ => false,
        },
        Resource::Subscription { owner_id } => match action {
            Action::Create | Action::Read | Action::Update | Action::Destroy => {
                *owner_id == actor.id
            }
            _ => false,
        },
        Resource::RollerTypes => match action {
            Action::Create | Action::Read | Action::Update | Action::Destroy => actor.is_admin(),
            _ => false,
        },
        Resource::Users => match action {
            Action::Create => actor.is_admin(),
            Action::Read => true,
            _ => false,
        },
        Resource::UserRecord { target } => match action {
            Action::Read => actor.id == target.id || actor.is_admin() || target.is_employee(),
            Action::Update => actor.id == target.id || actor.is_admin(),
            Action::Destroy => actor.is_admin() && actor.id != target.id,
            Action::Promote => actor.is_admin(),
            Action::Cancel => actor.is_admin() || actor.id == target.id,
            _ => false,
        },
        Resource::Notification {
            owner_id,
            roller_owner_id,
        } => match action {
            Action::Read => *owner_id == actor.id,
            Action::Destroy => {
                *owner_id == actor.id || (actor.is_admin() && *roller_owner_id == Some(actor.id))
            }
            _ => false,
        },
    }
}

/// Gate used by every service entry point: deny before any side effect.
pub fn authorize(actor: &User, action: Action, resource: &Resource<'_>) -> AppResult<()> {
    if allowed(actor, action, resource) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "not allowed to {} {}",
            action.as_str(),
            resource.name()
        )))
    }
}
