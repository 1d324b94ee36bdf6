//! Fragrance family models
//!
//! The engine works over a fixed set of five fragrance families. Rather
//! than threading `HashMap<Family, T>` everywhere we use [`FamilyMap`],
//! a dense map with one slot per family. Iteration order is canonical
//! (citrus, fresh, floral, woody, oriental) and doubles as the tie-break
//! order wherever "first family wins" semantics apply.

use serde::{Deserialize, Serialize};

use super::access_code::BottleTier;

/// The five fragrance families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Citrus,
    Fresh,
    Floral,
    Woody,
    Oriental,
}

impl Family {
    /// All families in canonical order
    pub const ALL: [Family; 5] = [
        Family::Citrus,
        Family::Fresh,
        Family::Floral,
        Family::Woody,
        Family::Oriental,
    ];

    pub const COUNT: usize = 5;

    /// Display name as shown on kiosk screens
    pub const fn name(self) -> &'static str {
        match self {
            Self::Citrus => "Citrus",
            Self::Fresh => "Fresh",
            Self::Floral => "Floral",
            Self::Woody => "Woody",
            Self::Oriental => "Oriental",
        }
    }

    /// Position in canonical order
    pub const fn index(self) -> usize {
        match self {
            Self::Citrus => 0,
            Self::Fresh => 1,
            Self::Floral => 2,
            Self::Woody => 3,
            Self::Oriental => 4,
        }
    }

    /// Parse a family from its display or snake_case name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "citrus" => Some(Self::Citrus),
            "fresh" => Some(Self::Fresh),
            "floral" => Some(Self::Floral),
            "woody" => Some(Self::Woody),
            "oriental" => Some(Self::Oriental),
            _ => None,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Dense map from [`Family`] to a value
///
/// One slot per family; always total. Iteration follows canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FamilyMap<T> {
    pub citrus: T,
    pub fresh: T,
    pub floral: T,
    pub woody: T,
    pub oriental: T,
}

impl<T> FamilyMap<T> {
    /// Build a map by evaluating `f` for each family in canonical order
    pub fn from_fn(mut f: impl FnMut(Family) -> T) -> Self {
        Self {
            citrus: f(Family::Citrus),
            fresh: f(Family::Fresh),
            floral: f(Family::Floral),
            woody: f(Family::Woody),
            oriental: f(Family::Oriental),
        }
    }

    pub fn get(&self, family: Family) -> &T {
        match family {
            Family::Citrus => &self.citrus,
            Family::Fresh => &self.fresh,
            Family::Floral => &self.floral,
            Family::Woody => &self.woody,
            Family::Oriental => &self.oriental,
        }
    }

    pub fn get_mut(&mut self, family: Family) -> &mut T {
        match family {
            Family::Citrus => &mut self.citrus,
            Family::Fresh => &mut self.fresh,
            Family::Floral => &mut self.floral,
            Family::Woody => &mut self.woody,
            Family::Oriental => &mut self.oriental,
        }
    }

    pub fn set(&mut self, family: Family, value: T) {
        *self.get_mut(family) = value;
    }

    /// Iterate (family, &value) in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Family, &T)> {
        Family::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    /// Map each value, preserving family association
    pub fn map<U>(&self, mut f: impl FnMut(Family, &T) -> U) -> FamilyMap<U> {
        FamilyMap::from_fn(|family| f(family, self.get(family)))
    }
}

impl<T: Clone> FamilyMap<T> {
    /// Build a map with the same value in every slot
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }

    /// Values in canonical order
    pub fn values(&self) -> [T; 5] {
        [
            self.citrus.clone(),
            self.fresh.clone(),
            self.floral.clone(),
            self.woody.clone(),
            self.oriental.clone(),
        ]
    }
}

impl FamilyMap<f64> {
    pub fn total(&self) -> f64 {
        self.citrus + self.fresh + self.floral + self.woody + self.oriental
    }
}

impl FamilyMap<i64> {
    pub fn total(&self) -> i64 {
        self.citrus + self.fresh + self.floral + self.woody + self.oriental
    }
}

impl FamilyMap<u32> {
    pub fn total(&self) -> u32 {
        self.citrus + self.fresh + self.floral + self.woody + self.oriental
    }
}

/// Compact set of families, used as the avatar catalog lookup key
///
/// A `u8` bitmask over [`Family::index`]. Two sets compare equal exactly
/// when they contain the same families, independent of insertion order,
/// which is what makes catalog lookup an exact set-equality match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilySet(u8);

impl FamilySet {
    pub const EMPTY: FamilySet = FamilySet(0);

    pub fn insert(&mut self, family: Family) {
        self.0 |= 1 << family.index();
    }

    pub fn contains(&self, family: Family) -> bool {
        self.0 & (1 << family.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Family> + '_ {
        Family::ALL.iter().copied().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Family> for FamilySet {
    fn from_iter<I: IntoIterator<Item = Family>>(iter: I) -> Self {
        let mut set = FamilySet::EMPTY;
        for family in iter {
            set.insert(family);
        }
        set
    }
}

impl std::fmt::Display for FamilySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for family in self.iter() {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(family.name())?;
            first = false;
        }
        Ok(())
    }
}

/// One answered survey line
///
/// Each scored line counts one point for its family. Fixed questions
/// (contact details etc.) are excluded from the tally even when their
/// selected option carries a family tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub question_id: i64,
    /// Family the selected option is tagged with, if any
    pub family: Option<Family>,
    /// True for questions outside the scoring flow
    pub fixed_question: bool,
}

impl SurveyAnswer {
    pub fn scored(question_id: i64, family: Family) -> Self {
        Self {
            question_id,
            family: Some(family),
            fixed_question: false,
        }
    }

    pub fn fixed(question_id: i64) -> Self {
        Self {
            question_id,
            family: None,
            fixed_question: true,
        }
    }
}

/// Complete per-family score record for one survey submission
///
/// Holds the raw tallied values, optional manual overrides from the
/// blending counter, and the precomputed per-tier scaled values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragranceScoreSet {
    /// Tallied answer counts per family (after long-survey normalization)
    pub raw: FamilyMap<f64>,
    /// Staff-entered overrides; any `Some` switches the whole set to
    /// manual mode
    pub manual: FamilyMap<Option<f64>>,
    /// Rescaled to the 100ml budget (target 20)
    pub scaled_100: FamilyMap<i64>,
    /// Rescaled to the 50ml budget (target 10)
    pub scaled_50: FamilyMap<i64>,
    /// Rescaled to the 30ml budget (target 6)
    pub scaled_30: FamilyMap<i64>,
}

impl FragranceScoreSet {
    /// Whether any manual override is present
    pub fn has_manual_override(&self) -> bool {
        self.manual.iter().any(|(_, v)| v.is_some())
    }

    /// Values the scaling pipeline should run on. In manual mode every
    /// family reads from the override map, missing entries as 0.
    pub fn effective_values(&self) -> FamilyMap<f64> {
        if self.has_manual_override() {
            self.manual.map(|_, v| v.unwrap_or(0.0))
        } else {
            self.raw
        }
    }

    /// Scaled values for a bottle tier
    pub fn scaled(&self, tier: BottleTier) -> &FamilyMap<i64> {
        match tier {
            BottleTier::Ml30 => &self.scaled_30,
            BottleTier::Ml50 => &self.scaled_50,
            BottleTier::Ml100 => &self.scaled_100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parse() {
        assert_eq!(Family::parse("Citrus"), Some(Family::Citrus));
        assert_eq!(Family::parse(" woody "), Some(Family::Woody));
        assert_eq!(Family::parse("musk"), None);
    }

    #[test]
    fn test_family_map_iteration_order() {
        let map = FamilyMap::from_fn(|f| f.index());
        let order: Vec<Family> = map.iter().map(|(f, _)| f).collect();
        assert_eq!(order, Family::ALL.to_vec());
    }

    #[test]
    fn test_family_map_total() {
        let map = FamilyMap {
            citrus: 4.0,
            fresh: 3.0,
            floral: 2.0,
            woody: 1.0,
            oriental: 0.0,
        };
        assert_eq!(map.total(), 10.0);
    }

    #[test]
    fn test_family_set_order_independent() {
        let a: FamilySet = [Family::Woody, Family::Citrus].into_iter().collect();
        let b: FamilySet = [Family::Citrus, Family::Woody].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(Family::Woody));
        assert!(!a.contains(Family::Floral));
    }

    #[test]
    fn test_family_set_display_canonical() {
        let set: FamilySet = [Family::Oriental, Family::Citrus].into_iter().collect();
        assert_eq!(set.to_string(), "Citrus+Oriental");
    }

    #[test]
    fn test_effective_values_manual_mode() {
        let mut scores = FragranceScoreSet::default();
        scores.raw.citrus = 7.0;
        scores.raw.floral = 3.0;
        assert!(!scores.has_manual_override());
        assert_eq!(scores.effective_values().citrus, 7.0);

        // A single override flips the entire set into manual mode and
        // missing overrides read as zero
        scores.manual.woody = Some(5.0);
        assert!(scores.has_manual_override());
        let effective = scores.effective_values();
        assert_eq!(effective.woody, 5.0);
        assert_eq!(effective.citrus, 0.0);
        assert_eq!(effective.floral, 0.0);
    }
}
