pub mod categories;
pub mod comments;
pub mod connections;
pub mod events;
pub mod issues;
pub mod notifications;
pub mod progressions;
pub mod projects;
pub mod reviews;
pub mod roller_types;
pub mod subscriptions;
pub mod tasks;
pub mod users;
