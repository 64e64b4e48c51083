pub mod classifier;
pub mod config;
pub mod cost;
pub mod formatter;
pub mod logging;
pub mod models;
pub mod process;
pub mod report;
