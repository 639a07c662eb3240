pub mod categories;
pub mod comments;
pub mod connections;
pub mod issues;
pub mod notifications;
pub mod progressions;
pub mod projects;
pub mod reviews;
pub mod roller_types;
pub mod rollers;
pub mod subscriptions;
pub mod tasks;
pub mod users;

use crate::AppState;
use crate::db::enums::RollerKind;
use crate::error::{AppError, AppResult};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

/// Path segment -> roller kind ("issues"/"tasks" and their singulars).
pub(crate) fn parse_kind(segment: &str) -> AppResult<RollerKind> {
    RollerKind::parse(segment)
        .ok_or_else(|| AppError::validation(format!("unknown roller kind: {}", segment)))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users", get(users::get_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id", put(users::update_user))
        .route("/users/:user_id", delete(users::delete_user))
        .route("/users/:user_id/employee-type", put(users::promote_user))
        .route("/users/:user_id/employee-type", delete(users::cancel_role))
        .route("/categories", post(categories::create_category))
        .route("/categories", get(categories::get_categories))
        .route("/categories/:category_id", get(categories::get_category))
        .route("/categories/:category_id", put(categories::update_category))
        .route(
            "/categories/:category_id",
            delete(categories::delete_category),
        )
        .route(
            "/categories/:category_id/projects",
            get(projects::get_category_projects),
        )
        .route("/projects", post(projects::create_project))
        .route("/projects", get(projects::get_projects))
        .route("/projects/:project_id", get(projects::get_project))
        .route("/projects/:project_id", put(projects::update_project))
        .route("/projects/:project_id", delete(projects::delete_project))
        .route("/projects/:project_id/issues", get(issues::get_project_issues))
        .route("/projects/:project_id/tasks", get(tasks::get_project_tasks))
        .route("/roller-types", post(roller_types::create_roller_type))
        .route("/roller-types", get(roller_types::get_roller_types))
        .route("/roller-types/:type_id", get(roller_types::get_roller_type))
        .route(
            "/roller-types/:type_id",
            put(roller_types::update_roller_type),
        )
        .route(
            "/roller-types/:type_id",
            delete(roller_types::delete_roller_type),
        )
        .route("/issues", post(issues::create_issue))
        .route("/issues", get(issues::get_issues))
        .route("/issues/:issue_id", get(issues::get_issue))
        .route("/issues/:issue_id", put(issues::update_issue))
        .route("/issues/:issue_id", delete(issues::delete_issue))
        .route("/issues/:issue_id/close", post(issues::close_issue))
        .route("/issues/:issue_id/open", post(issues::open_issue))
        .route("/tasks", post(tasks::create_task))
        .route("/tasks", get(tasks::get_tasks))
        .route("/tasks/:task_id", get(tasks::get_task))
        .route("/tasks/:task_id", put(tasks::update_task))
        .route("/tasks/:task_id", delete(tasks::delete_task))
        .route("/tasks/:task_id/close", post(tasks::close_task))
        .route("/tasks/:task_id/open", post(tasks::open_task))
        .route("/tasks/:task_id/assignees", post(tasks::assign_task))
        .route(
            "/tasks/:task_id/assignees/:user_id",
            delete(tasks::unassign_task),
        )
        .route(
            "/tasks/:task_id/progressions",
            post(progressions::create_progression),
        )
        .route(
            "/tasks/:task_id/progressions",
            get(progressions::get_task_progressions),
        )
        .route(
            "/progressions/:progression_id/finish",
            post(progressions::finish_progression),
        )
        .route(
            "/progressions/:progression_id",
            delete(progressions::delete_progression),
        )
        .route("/tasks/:task_id/reviews", post(reviews::create_review))
        .route("/tasks/:task_id/reviews", get(reviews::get_task_reviews))
        .route("/reviews/:review_id", put(reviews::update_review))
        .route("/reviews/:review_id/approve", post(reviews::approve_review))
        .route(
            "/reviews/:review_id/disapprove",
            post(reviews::disapprove_review),
        )
        .route("/reviews/:review_id", delete(reviews::delete_review))
        .route("/connections", post(connections::create_connection))
        .route(
            "/connections/:connection_id",
            delete(connections::delete_connection),
        )
        .route(
            "/rollers/:kind/:roller_id/connections",
            get(connections::get_roller_connections),
        )
        .route(
            "/rollers/:kind/:roller_id/comments",
            post(comments::create_comment),
        )
        .route(
            "/rollers/:kind/:roller_id/comments",
            get(comments::get_roller_comments),
        )
        .route("/comments/:comment_id", put(comments::update_comment))
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route("/subscriptions", get(subscriptions::get_subscriptions))
        .route(
            "/subscriptions/:kind/rollers/:roller_id",
            post(subscriptions::subscribe_roller),
        )
        .route(
            "/subscriptions/:kind/rollers/:roller_id",
            delete(subscriptions::unsubscribe_roller),
        )
        .route(
            "/subscriptions/:kind/projects/:project_id",
            post(subscriptions::subscribe_project),
        )
        .route(
            "/subscriptions/:kind/projects/:project_id",
            delete(subscriptions::unsubscribe_project),
        )
        .route(
            "/subscriptions/:kind/categories/:category_id",
            post(subscriptions::subscribe_category),
        )
        .route(
            "/subscriptions/:kind/categories/:category_id",
            delete(subscriptions::unsubscribe_category),
        )
        .route("/notifications", get(notifications::get_notifications))
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
        .route(
            "/rollers/:kind/:roller_id/notifications",
            delete(notifications::delete_roller_notifications),
        )
        .route("/rollers", get(rollers::search_rollers))
        .with_state(state)
}
