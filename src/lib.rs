//! Client for a remote to-do list service: a shared HTTP client plus the
//! list and edit screen controllers that drive it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod screens;
pub mod shell;

#[cfg(test)]
mod fake_backend;

pub use api::TaskClient;
pub use config::Config;
pub use error::{ApiError, ValidationError};
pub use models::Task;
