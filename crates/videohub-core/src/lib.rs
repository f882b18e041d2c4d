//! Core types shared across the VideoHub crates: configuration, the unified
//! error type, domain models, and the storage backend selector.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
