//! Centralized error handling module
//!
//! Structured, typed errors for the alert adapter. The binary converts these
//! into `anyhow` at the very top so the process exits non-zero with the full
//! source chain.

pub mod types;

pub use types::{AppError, AppResult};
