//! Access code models
//!
//! Single-use (or capped multi-use) codes sold with a booking and redeemed
//! at a bottling station. The `status` field is a cache of the validity
//! predicate, recomputed on every read/use; callers must never trust a
//! stale status without re-checking expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Bottle capacity tier
///
/// Constrains the total "scent wand" budget available when a formula is
/// rescaled for bottling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BottleTier {
    #[serde(rename = "30ml")]
    Ml30,
    #[serde(rename = "50ml")]
    Ml50,
    #[serde(rename = "100ml")]
    Ml100,
}

impl BottleTier {
    /// Total allocation budget for this tier
    pub const fn budget(self) -> i64 {
        match self {
            Self::Ml30 => 6,
            Self::Ml50 => 10,
            Self::Ml100 => 20,
        }
    }

    /// Three-digit suffix appended to generated access codes
    pub const fn code_suffix(self) -> &'static str {
        match self {
            Self::Ml30 => "030",
            Self::Ml50 => "050",
            Self::Ml100 => "100",
        }
    }

    /// Human-readable label ("30ml" etc.)
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ml30 => "30ml",
            Self::Ml50 => "50ml",
            Self::Ml100 => "100ml",
        }
    }
}

impl std::fmt::Display for BottleTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit for code validity durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityUnit {
    Hours,
    Days,
}

/// Validity duration for an access code (value + unit, from the booking UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub value: i64,
    pub unit: ValidityUnit,
}

impl Validity {
    pub const fn hours(value: i64) -> Self {
        Self {
            value,
            unit: ValidityUnit::Hours,
        }
    }

    pub const fn days(value: i64) -> Self {
        Self {
            value,
            unit: ValidityUnit::Days,
        }
    }

    /// Duration represented by this validity; `None` when the value is
    /// non-positive (callers fall back to the configured default).
    pub fn duration(&self) -> Option<Duration> {
        if self.value <= 0 {
            return None;
        }
        Some(match self.unit {
            ValidityUnit::Hours => Duration::hours(self.value),
            ValidityUnit::Days => Duration::days(self.value),
        })
    }
}

/// Access code lifecycle state
///
/// Cache of the validity predicate, not a source of truth. `Used` is a
/// legacy terminal state set by back-office action, never by `redeem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeStatus {
    Active,
    Expired,
    Used,
    Exhausted,
}

impl std::fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Used => "used",
            Self::Exhausted => "exhausted",
        };
        f.write_str(s)
    }
}

/// Access code entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCode {
    pub id: i64,
    /// Opaque token, format `AAA-BBB-999-SSS` (tier suffix)
    pub code: String,
    pub bottle_tier: BottleTier,
    /// Tour-operator booking metadata carried through to reporting
    pub booking_code: Option<String>,
    pub booking_from: Option<String>,
    pub booking_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub usage_count: u32,
    pub max_usage: u32,
    pub last_used_at: Option<DateTime<Utc>>,
    pub status: CodeStatus,
}

impl AccessCode {
    /// Whether the code is past its expiry at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// The validity predicate: active, unexpired, and below the usage cap.
    ///
    /// This is the authoritative check; `status` merely caches it.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.status == CodeStatus::Active
            && !self.is_expired(now)
            && self.usage_count < self.max_usage
    }

    /// Redemptions left before the code is exhausted
    pub fn remaining_uses(&self) -> u32 {
        self.max_usage.saturating_sub(self.usage_count)
    }
}

/// Create access code payload (from the booking flow)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccessCodeCreate {
    /// Required; generation fails with a validation error when absent
    pub bottle_tier: Option<BottleTier>,
    /// Falls back to the configured default (24h) when absent or non-positive
    pub validity: Option<Validity>,
    #[validate(range(min = 1, message = "max_usage must be at least 1"))]
    pub max_usage: Option<u32>,
    #[validate(length(max = 64))]
    pub booking_code: Option<String>,
    #[validate(length(max = 64))]
    pub booking_from: Option<String>,
    #[validate(range(min = 0.0, message = "booking_price must be non-negative"))]
    pub booking_price: Option<f64>,
}

/// Result of a successful redemption at a bottling station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionResult {
    pub redemption_id: uuid::Uuid,
    pub code: String,
    pub bottle_tier: BottleTier,
    pub usage_count: u32,
    pub remaining_uses: u32,
    /// True when this redemption hit the usage cap
    pub exhausted: bool,
    pub redeemed_at: DateTime<Utc>,
}
