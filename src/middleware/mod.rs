pub mod actor;
pub mod logger;
