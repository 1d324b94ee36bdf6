//! Intensity narrative lookup
//!
//! Each (family, intensity band) pair maps to a piece of editorial
//! content shown on the results screen. The content itself lives in an
//! external catalog; the engine only owns the banding and the lookup.

use serde::{Deserialize, Serialize};
use shared::models::Family;
use std::collections::HashMap;

/// Intensity bands over a family's raw score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBand {
    Low,
    Mid,
    High,
    Extreme,
}

impl IntensityBand {
    /// Band for a raw score; scores below 1.0 carry no band
    pub fn for_value(value: f64) -> Option<Self> {
        if value < 1.0 {
            None
        } else if value <= 3.5 {
            Some(Self::Low)
        } else if value <= 6.5 {
            Some(Self::Mid)
        } else if value <= 10.5 {
            Some(Self::High)
        } else {
            Some(Self::Extreme)
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for IntensityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Editorial content for one (family, band) cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeContent {
    pub title: String,
    pub body: String,
}

/// Narrative catalog keyed by family and band
#[derive(Default)]
pub struct NarrativeCatalog {
    entries: HashMap<(Family, IntensityBand), NarrativeContent>,
}

impl NarrativeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: Family, band: IntensityBand, content: NarrativeContent) {
        self.entries.insert((family, band), content);
    }

    pub fn get(&self, family: Family, band: IntensityBand) -> Option<&NarrativeContent> {
        self.entries.get(&(family, band))
    }

    /// Narrative for a family's raw score
    ///
    /// Falls back to a generated title when the catalog has no entry for
    /// the cell; returns `None` only when the score carries no band.
    pub fn for_score(&self, family: Family, value: f64) -> Option<NarrativeContent> {
        let band = IntensityBand::for_value(value)?;
        Some(match self.get(family, band) {
            Some(content) => content.clone(),
            None => NarrativeContent {
                title: default_title(family, band),
                body: String::new(),
            },
        })
    }
}

/// Placeholder title when the editorial catalog has no entry
pub fn default_title(family: Family, band: IntensityBand) -> String {
    format!("Your Intensity Index - {} {}", band.label(), family.name())
}
