//! Scent avatar derivation
//!
//! The families scoring at or above the dominance threshold form a set,
//! and that set is matched against the avatar catalog by exact equality.
//! A profile with no dominant family yields no avatar.

use shared::models::{Avatar, FamilyMap, FamilySet};
use std::collections::HashMap;
use tracing::warn;

/// Avatar catalog indexed by family set
pub struct AvatarCatalog {
    by_families: HashMap<FamilySet, Avatar>,
}

impl AvatarCatalog {
    /// Build the index from catalog records
    ///
    /// When two records claim the same family set, the one with the
    /// lowest id wins and the conflict is logged.
    pub fn new(avatars: impl IntoIterator<Item = Avatar>) -> Self {
        use std::collections::hash_map::Entry;

        let mut by_families: HashMap<FamilySet, Avatar> = HashMap::new();
        for avatar in avatars {
            match by_families.entry(avatar.families) {
                Entry::Vacant(slot) => {
                    slot.insert(avatar);
                }
                Entry::Occupied(mut slot) => {
                    let existing_id = slot.get().id;
                    let (kept, dropped) = if existing_id <= avatar.id {
                        (existing_id, avatar.id)
                    } else {
                        (avatar.id, existing_id)
                    };
                    warn!(
                        families = %avatar.families,
                        kept,
                        dropped,
                        "duplicate avatar family set, keeping lowest id"
                    );
                    if avatar.id < existing_id {
                        slot.insert(avatar);
                    }
                }
            }
        }
        Self { by_families }
    }

    pub fn len(&self) -> usize {
        self.by_families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_families.is_empty()
    }

    /// Exact set-equality lookup; an empty set never matches
    pub fn find(&self, families: FamilySet) -> Option<&Avatar> {
        if families.is_empty() {
            return None;
        }
        self.by_families.get(&families)
    }
}

/// Families whose score meets their dominance threshold
pub fn dominant_families(scores: &FamilyMap<f64>, thresholds: &FamilyMap<f64>) -> FamilySet {
    scores
        .iter()
        .filter(|&(family, &v)| v >= *thresholds.get(family))
        .map(|(f, _)| f)
        .collect()
}

/// Derive the avatar for a score profile, if the catalog has one
pub fn derive_avatar<'a>(
    catalog: &'a AvatarCatalog,
    scores: &FamilyMap<f64>,
    thresholds: &FamilyMap<f64>,
) -> Option<&'a Avatar> {
    catalog.find(dominant_families(scores, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Family;

    fn avatar(id: i64, name: &str, families: &[Family]) -> Avatar {
        Avatar {
            id,
            name: name.to_string(),
            families: families.iter().copied().collect(),
            video_url: None,
            overview: None,
        }
    }

    fn scores(values: [f64; 5]) -> FamilyMap<f64> {
        FamilyMap {
            citrus: values[0],
            fresh: values[1],
            floral: values[2],
            woody: values[3],
            oriental: values[4],
        }
    }

    fn catalog() -> AvatarCatalog {
        AvatarCatalog::new(vec![
            avatar(1, "Citrus Explorer", &[Family::Citrus]),
            avatar(2, "Coastal Breeze", &[Family::Citrus, Family::Fresh]),
            avatar(3, "Deep Forest", &[Family::Woody, Family::Oriental]),
        ])
    }

    #[test]
    fn test_dominant_families_threshold() {
        let thresholds = FamilyMap::splat(3.5);
        let set = dominant_families(&scores([5.0, 3.5, 3.4, 0.0, 2.0]), &thresholds);
        // 3.5 is inclusive, 3.4 is not
        assert!(set.contains(Family::Citrus));
        assert!(set.contains(Family::Fresh));
        assert!(!set.contains(Family::Floral));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_per_family_thresholds() {
        let mut thresholds = FamilyMap::splat(3.5);
        thresholds.woody = 2.0;
        let set = dominant_families(&scores([5.0, 0.0, 0.0, 2.5, 2.5]), &thresholds);
        assert!(set.contains(Family::Woody));
        assert!(!set.contains(Family::Oriental));
    }

    #[test]
    fn test_exact_match_not_subset() {
        let catalog = catalog();
        let thresholds = FamilyMap::splat(3.5);
        let found = derive_avatar(&catalog, &scores([5.0, 4.0, 0.0, 0.0, 0.0]), &thresholds);
        assert_eq!(found.unwrap().name, "Coastal Breeze");

        // Three dominant families match nothing even though a two-family
        // subset exists in the catalog
        let found = derive_avatar(&catalog, &scores([5.0, 4.0, 4.0, 0.0, 0.0]), &thresholds);
        assert!(found.is_none());
    }

    #[test]
    fn test_no_dominant_family_no_avatar() {
        let catalog = catalog();
        let thresholds = FamilyMap::splat(3.5);
        assert!(derive_avatar(&catalog, &scores([1.0, 1.0, 1.0, 1.0, 1.0]), &thresholds).is_none());
        assert!(derive_avatar(&catalog, &scores([0.0; 5]), &thresholds).is_none());
    }

    #[test]
    fn test_duplicate_family_set_lowest_id_wins() {
        let catalog = AvatarCatalog::new(vec![
            avatar(7, "Late Entry", &[Family::Floral]),
            avatar(2, "First Bloom", &[Family::Floral]),
            avatar(9, "Another Late Entry", &[Family::Floral]),
        ]);
        assert_eq!(catalog.len(), 1);
        let set: FamilySet = [Family::Floral].into_iter().collect();
        assert_eq!(catalog.find(set).unwrap().id, 2);
    }
}
