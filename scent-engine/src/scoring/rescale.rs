//! Score rescaling
//!
//! Raw tallies are rescaled to one integer budget per bottle tier. The
//! rounding step can drift the total off the budget by a point or two;
//! the drift is folded back into the dominant family so every rescaled
//! profile sums exactly to its target.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{BottleTier, Family, FamilyMap};

use super::ScoreError;

/// Rescale per-family values to sum to `target`
///
/// The survey is constructed so raw tallies sum to the 100ml budget, so
/// that target skips the scale factor and only rounds. Smaller targets
/// apply a proportional factor first. An all-zero input stays all-zero,
/// with no drift correction.
pub fn rescale(values: &FamilyMap<f64>, target: i64) -> Result<FamilyMap<i64>, ScoreError> {
    if target < 0 {
        return Err(ScoreError::InvalidTarget(target));
    }

    let sum = values.total();
    if sum == 0.0 {
        return Ok(FamilyMap::default());
    }

    let factor = if target == BottleTier::Ml100.budget() {
        Decimal::ONE
    } else {
        let sum_dec = Decimal::from_f64(sum).unwrap_or_default();
        if sum_dec.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::from(target) / sum_dec
        }
    };

    let mut rounded = values.map(|_, &v| {
        (Decimal::from_f64(v).unwrap_or_default() * factor)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    });

    let drift = target - rounded.total();
    if drift != 0 {
        *rounded.get_mut(dominant_family(&rounded)) += drift;
    }

    Ok(rounded)
}

/// Family with the largest value, first in canonical order on ties
fn dominant_family(values: &FamilyMap<i64>) -> Family {
    let mut best = Family::Citrus;
    let mut best_value = i64::MIN;
    for (family, &value) in values.iter() {
        if value > best_value {
            best = family;
            best_value = value;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(values: [f64; 5]) -> FamilyMap<f64> {
        FamilyMap {
            citrus: values[0],
            fresh: values[1],
            floral: values[2],
            woody: values[3],
            oriental: values[4],
        }
    }

    #[test]
    fn test_target_20_rounds_without_scaling() {
        let raw = map([6.5, 5.5, 4.0, 3.0, 1.0]);
        let scaled = rescale(&raw, 20).unwrap();
        // 6.5 and 5.5 round away from zero to 7 and 6, total drifts to 21,
        // drift lands on the dominant family
        assert_eq!(scaled.total(), 20);
        assert_eq!(scaled.citrus, 6);
        assert_eq!(scaled.fresh, 6);
        assert_eq!(scaled.floral, 4);
    }

    #[test]
    fn test_target_10_scales_proportionally() {
        let raw = map([8.0, 6.0, 4.0, 2.0, 0.0]);
        let scaled = rescale(&raw, 10).unwrap();
        assert_eq!(scaled.total(), 10);
        assert_eq!(scaled.citrus, 4);
        assert_eq!(scaled.fresh, 3);
        assert_eq!(scaled.floral, 2);
        assert_eq!(scaled.woody, 1);
        assert_eq!(scaled.oriental, 0);
    }

    #[test]
    fn test_target_6_sums_exactly() {
        let raw = map([7.0, 5.0, 4.0, 3.0, 1.0]);
        let scaled = rescale(&raw, 6).unwrap();
        assert_eq!(scaled.total(), 6);
    }

    #[test]
    fn test_all_zero_stays_zero() {
        let scaled = rescale(&map([0.0; 5]), 10).unwrap();
        assert_eq!(scaled, FamilyMap::default());
        // No drift correction is applied to an empty profile
        assert_eq!(scaled.total(), 0);
    }

    #[test]
    fn test_negative_target_rejected() {
        let err = rescale(&map([1.0, 0.0, 0.0, 0.0, 0.0]), -5).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidTarget(-5)));
    }

    #[test]
    fn test_tie_break_prefers_canonical_order() {
        // Citrus and fresh tie for dominant after rounding (6 each, total
        // 21); the -1 drift lands on citrus, the earlier family
        let raw = map([5.5, 5.5, 4.5, 3.0, 1.0]);
        let scaled = rescale(&raw, 20).unwrap();
        assert_eq!(scaled.total(), 20);
        assert_eq!(scaled.citrus, 5);
        assert_eq!(scaled.fresh, 6);
    }
}
