//! Data models
//!
//! Shared between the engine and its adapter layers (kiosk, back office,
//! bottling stations). All records serialize with serde so the external
//! persistence collaborator can store them in any shape it likes.
//! All IDs are `i64` (snowflake-style).

pub mod access_code;
pub mod avatar;
pub mod fragrance;

// Re-exports
pub use access_code::*;
pub use avatar::*;
pub use fragrance::*;
