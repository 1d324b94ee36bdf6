//! Shared types for the Scentopia core engine
//!
//! Domain models and the unified error stack used by every layer that
//! embeds the engine (bottling stations, survey collectors, back office).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
