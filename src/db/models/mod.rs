// Sub-modules organized by functional domain
pub mod api;
pub mod category;
pub mod comment;
pub mod connection;
pub mod event;
pub mod issue;
pub mod notification;
pub mod progression;
pub mod project;
pub mod review;
pub mod roller_type;
pub mod subscription;
pub mod task;
pub mod user;
