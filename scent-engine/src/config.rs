//! Engine configuration
//!
//! All knobs come from `SCENTOPIA_*` environment variables with sensible
//! defaults, so the engine runs unconfigured in development and tests.

use tracing::info;

/// Tunable parameters for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fallback validity (hours) when a create payload has no usable
    /// validity duration
    pub default_validity_hours: i64,
    /// Bounded retries when a freshly generated code collides with an
    /// existing one
    pub max_generate_attempts: u32,
    /// Answer-line count above which raw tallies are halved
    pub long_survey_answer_limit: usize,
    /// Minimum raw score for a family to count as dominant when deriving
    /// the avatar
    pub dominant_family_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_validity_hours: 24,
            max_generate_attempts: 5,
            long_survey_answer_limit: 27,
            dominant_family_threshold: 3.5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            default_validity_hours: env_parse(
                "SCENTOPIA_DEFAULT_VALIDITY_HOURS",
                defaults.default_validity_hours,
            ),
            max_generate_attempts: env_parse(
                "SCENTOPIA_MAX_GENERATE_ATTEMPTS",
                defaults.max_generate_attempts,
            ),
            long_survey_answer_limit: env_parse(
                "SCENTOPIA_LONG_SURVEY_ANSWER_LIMIT",
                defaults.long_survey_answer_limit,
            ),
            dominant_family_threshold: env_parse(
                "SCENTOPIA_DOMINANT_FAMILY_THRESHOLD",
                defaults.dominant_family_threshold,
            ),
        };

        info!(
            default_validity_hours = config.default_validity_hours,
            max_generate_attempts = config.max_generate_attempts,
            long_survey_answer_limit = config.long_survey_answer_limit,
            dominant_family_threshold = config.dominant_family_threshold,
            "engine config loaded"
        );

        config
    }

    /// Default per-family dominance thresholds
    ///
    /// The avatar catalog may supply its own per-family values; this is
    /// the uniform fallback.
    pub fn family_thresholds(&self) -> shared::models::FamilyMap<f64> {
        shared::models::FamilyMap::splat(self.dominant_family_threshold)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
