//! Core types, configuration, and error handling for vigil.
//!
//! This crate provides the shared foundation used by the other vigil crates:
//! - [`VigilError`] — unified error type using `thiserror`
//! - [`VigilConfig`] — configuration loaded from `.vigil.toml`
//! - Shared types: [`PullRequestRecord`], [`Author`], [`ReviewResult`]

mod config;
mod error;
mod types;

pub use config::{LlmConfig, ReviewConfig, VigilConfig};
pub use error::VigilError;
pub use types::{Author, PullRequestRecord, ReviewResult};

/// A convenience `Result` type for vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;
