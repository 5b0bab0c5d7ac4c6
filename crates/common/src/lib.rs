//! Shared utilities, configuration, and error handling for Castwright
//!
//! This crate provides common functionality used across the Castwright application:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP response mapping
//! - The uniform generation adapter failure type
//! - Request extractors

pub mod config;
pub mod error;
pub mod extractors;
pub mod generation;
pub mod storage;

pub use error::{Error, Result};
pub use extractors::{present, ValidatedJson};
pub use generation::{AdapterKind, GenerationError};
pub use storage::StoreError;
