pub mod credentials;
pub mod notifications;
pub mod planner_api;
pub mod schedule;
