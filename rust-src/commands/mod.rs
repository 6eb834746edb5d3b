//! CLI command implementations.

pub mod config;
pub mod dashboard;
pub mod export;
pub mod timer;
