// Library exports for the planner binary and tests
pub mod config;
pub mod models;
pub mod screens;
pub mod services;

#[cfg(test)]
mod test_support;
