//! Scent avatar models

use serde::{Deserialize, Serialize};

use super::fragrance::FamilySet;

/// A scent avatar record from the marketing catalog
///
/// Each avatar is keyed by the exact set of dominant families it
/// represents. Lookup is set equality, never subset matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub id: i64,
    pub name: String,
    /// The family combination this avatar represents
    pub families: FamilySet,
    pub video_url: Option<String>,
    pub overview: Option<String>,
}
