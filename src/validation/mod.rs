pub mod category;
pub mod comment;
pub mod project;
pub mod roller;
pub mod roller_type;
pub mod user;
