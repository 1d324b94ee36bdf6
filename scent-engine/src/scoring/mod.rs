//! Fragrance-intensity scoring pipeline
//!
//! Survey answers flow through four stages: tally per family, rescale to
//! each bottle tier's budget, allocate drops for the chosen tier, and
//! derive the avatar and narrative from the raw profile. Everything in
//! this module is pure; the results screen and the bottling station both
//! call into it with plain data.

mod allocation;
mod avatar;
mod narrative;
mod rescale;
mod tally;

pub use allocation::max_drop_allocation;
pub use avatar::{AvatarCatalog, derive_avatar, dominant_families};
pub use narrative::{IntensityBand, NarrativeCatalog, NarrativeContent, default_title};
pub use rescale::rescale;
pub use tally::{normalized_raw_scores, tally_raw_scores};

use shared::error::{AppError, ErrorCode};
use shared::models::{BottleTier, FragranceScoreSet, SurveyAnswer};
use thiserror::Error;

use crate::config::EngineConfig;

/// Scoring domain errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("rescale target {0} is invalid")]
    InvalidTarget(i64),
}

impl From<ScoreError> for AppError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::InvalidTarget(_) => {
                AppError::with_message(ErrorCode::InvalidRescaleTarget, err.to_string())
            }
        }
    }
}

/// Build the full score record for one survey submission
///
/// Tallies and normalizes the answers, then precomputes the rescaled
/// profile for every bottle tier.
pub fn compute_score_set(
    answers: &[SurveyAnswer],
    config: &EngineConfig,
) -> Result<FragranceScoreSet, ScoreError> {
    let mut scores = FragranceScoreSet {
        raw: normalized_raw_scores(answers, config.long_survey_answer_limit),
        ..Default::default()
    };
    recompute_scaled(&mut scores)?;
    Ok(scores)
}

/// Refresh the per-tier scaled profiles from the effective values
///
/// Call after setting manual overrides; any override switches the whole
/// set to manual mode.
pub fn recompute_scaled(scores: &mut FragranceScoreSet) -> Result<(), ScoreError> {
    let values = scores.effective_values();
    scores.scaled_100 = rescale(&values, BottleTier::Ml100.budget())?;
    scores.scaled_50 = rescale(&values, BottleTier::Ml50.budget())?;
    scores.scaled_30 = rescale(&values, BottleTier::Ml30.budget())?;
    Ok(())
}
