pub mod fixtures;

mod assignments;
mod notifications;
mod policy;
mod progressions;
mod reviews;
mod search;
mod scenarios;
mod workflow;
