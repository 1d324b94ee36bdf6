//! Drop allocation per bottle tier
//!
//! Converts a rescaled intensity profile into the number of scent-wand
//! drops dispensed per family. The 100ml bottle takes the profile as-is;
//! smaller bottles compress it while keeping every present family
//! represented and the tier budget exactly spent.

use shared::models::{BottleTier, Family, FamilyMap};

/// Allocate drops for `tier` from a full-bottle intensity profile
pub fn max_drop_allocation(values: &FamilyMap<f64>, tier: BottleTier) -> FamilyMap<f64> {
    match tier {
        BottleTier::Ml100 => *values,
        BottleTier::Ml50 => allocate_50ml(values),
        BottleTier::Ml30 => allocate_30ml(values),
    }
}

/// Halve each value, then hand the leftover budget back one drop at a
/// time, strongest families first, cycling until the budget is spent.
fn allocate_50ml(values: &FamilyMap<f64>) -> FamilyMap<f64> {
    let mut drops = values.map(|_, &v| ((v as i64) / 2) as f64);

    let remaining = BottleTier::Ml50.budget() - drops.total() as i64;
    if remaining > 0 {
        let order = families_by_strength(values);
        for i in 0..remaining as usize {
            *drops.get_mut(order[i % Family::COUNT]) += 1.0;
        }
    }

    drops
}

/// One drop per present family, with the leftover budget going to the
/// strongest family. A blank profile falls back to one drop of each.
fn allocate_30ml(values: &FamilyMap<f64>) -> FamilyMap<f64> {
    let present = values.iter().filter(|&(_, &v)| v > 0.0).count() as i64;
    if present == 0 {
        return FamilyMap::splat(1.0);
    }

    let mut drops = values.map(|_, &v| if v > 0.0 { 1.0 } else { 0.0 });

    let remaining = BottleTier::Ml30.budget() - present;
    if remaining > 0 {
        *drops.get_mut(families_by_strength(values)[0]) += remaining as f64;
    }

    drops
}

/// Families sorted by descending value, canonical order on ties
fn families_by_strength(values: &FamilyMap<f64>) -> [Family; Family::COUNT] {
    let mut order = Family::ALL;
    order.sort_by(|a, b| {
        values
            .get(*b)
            .partial_cmp(values.get(*a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
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
    fn test_100ml_passthrough() {
        let profile = map([7.0, 5.0, 4.0, 3.0, 1.0]);
        assert_eq!(max_drop_allocation(&profile, BottleTier::Ml100), profile);
    }

    #[test]
    fn test_50ml_halves_then_redistributes() {
        let profile = map([4.0, 3.0, 2.0, 1.0, 0.0]);
        let drops = max_drop_allocation(&profile, BottleTier::Ml50);
        // Halves are {2,1,1,0,0}; the six leftover drops cycle through the
        // families strongest-first, wrapping back to citrus
        assert_eq!(drops, map([4.0, 2.0, 2.0, 1.0, 1.0]));
        assert_eq!(drops.total(), 10.0);
    }

    #[test]
    fn test_50ml_exact_budget_no_redistribution() {
        let profile = map([8.0, 6.0, 4.0, 2.0, 0.0]);
        let drops = max_drop_allocation(&profile, BottleTier::Ml50);
        assert_eq!(drops, map([4.0, 3.0, 2.0, 1.0, 0.0]));
    }

    #[test]
    fn test_30ml_one_drop_per_present_family() {
        let profile = map([7.0, 5.0, 4.0, 3.0, 1.0]);
        let drops = max_drop_allocation(&profile, BottleTier::Ml30);
        // Five present families take one drop each; the leftover goes to
        // the strongest
        assert_eq!(drops, map([2.0, 1.0, 1.0, 1.0, 1.0]));
        assert_eq!(drops.total(), 6.0);
    }

    #[test]
    fn test_30ml_remainder_to_strongest() {
        let profile = map([4.0, 0.0, 2.0, 0.0, 6.0]);
        let drops = max_drop_allocation(&profile, BottleTier::Ml30);
        // One drop per present family, the remaining three to oriental
        assert_eq!(drops, map([1.0, 0.0, 1.0, 0.0, 4.0]));
    }

    #[test]
    fn test_30ml_sparse_profile() {
        let profile = map([9.0, 0.0, 6.0, 0.0, 0.0]);
        let drops = max_drop_allocation(&profile, BottleTier::Ml30);
        assert_eq!(drops, map([5.0, 0.0, 1.0, 0.0, 0.0]));
        assert_eq!(drops.total(), 6.0);
    }

    #[test]
    fn test_30ml_blank_profile_falls_back() {
        let drops = max_drop_allocation(&map([0.0; 5]), BottleTier::Ml30);
        assert_eq!(drops, FamilyMap::splat(1.0));
    }

    #[test]
    fn test_50ml_blank_profile() {
        let drops = max_drop_allocation(&map([0.0; 5]), BottleTier::Ml50);
        // Halves are all zero and the full budget cycles around evenly
        assert_eq!(drops, map([2.0, 2.0, 2.0, 2.0, 2.0]));
    }
}
