//! Scentopia core engine
//!
//! Domain logic for the perfume-experience kiosks: access code lifecycle
//! (generation, verification, redemption, expiry sweeps) and the
//! fragrance-intensity scoring pipeline (survey tally, per-tier
//! rescaling, drop allocation, avatar derivation, narrative lookup).
//!
//! The engine is synchronous and storage-agnostic. Persistence is a
//! collaborator behind the [`access_code::AccessCodeStore`] trait so it
//! can be backed by memory in tests and by a database in production.

pub mod access_code;
pub mod audit;
pub mod config;
pub mod scoring;

pub use access_code::{AccessCodeService, CodeError, DailyAccessCode, MemoryAccessCodeStore};
pub use config::EngineConfig;
pub use scoring::{ScoreError, compute_score_set};
