pub mod app;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod logging;
pub mod planner;
pub mod quotes;
pub mod scheduler;
pub mod store;
pub mod validation;
