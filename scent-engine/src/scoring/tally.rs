//! Survey answer tally

use shared::models::{FamilyMap, SurveyAnswer};

/// Count answers per family
///
/// Each scored line contributes exactly one point. Fixed questions are
/// excluded even when their answer carries a family tag; untagged
/// answers contribute nothing.
pub fn tally_raw_scores(answers: &[SurveyAnswer]) -> FamilyMap<u32> {
    let mut totals = FamilyMap::<u32>::default();
    for answer in answers {
        if answer.fixed_question {
            continue;
        }
        if let Some(family) = answer.family {
            *totals.get_mut(family) += 1;
        }
    }
    totals
}

/// Tally and normalize for survey length
///
/// The extended survey doubles the number of scored questions, so its
/// tallies are halved to stay on the same scale as the short survey. The
/// cut-over is the total answer line count, fixed questions included.
pub fn normalized_raw_scores(answers: &[SurveyAnswer], long_survey_limit: usize) -> FamilyMap<f64> {
    let totals = tally_raw_scores(answers);
    let divisor = if answers.len() > long_survey_limit {
        2.0
    } else {
        1.0
    };
    totals.map(|_, &v| v as f64 / divisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Family;

    #[test]
    fn test_tally_counts_one_per_answer() {
        let answers = vec![
            SurveyAnswer::scored(1, Family::Citrus),
            SurveyAnswer::scored(2, Family::Citrus),
            SurveyAnswer::scored(3, Family::Woody),
        ];
        let totals = tally_raw_scores(&answers);
        assert_eq!(totals.citrus, 2);
        assert_eq!(totals.woody, 1);
        assert_eq!(totals.fresh, 0);
    }

    #[test]
    fn test_tally_skips_fixed_questions() {
        // A fixed question keeps its family tag but never scores
        let mut tagged_fixed = SurveyAnswer::fixed(3);
        tagged_fixed.family = Some(Family::Citrus);

        let answers = vec![
            SurveyAnswer::scored(1, Family::Citrus),
            SurveyAnswer::fixed(2),
            tagged_fixed,
            SurveyAnswer::scored(4, Family::Woody),
        ];
        let totals = tally_raw_scores(&answers);
        assert_eq!(totals.citrus, 1);
        assert_eq!(totals.woody, 1);
    }

    #[test]
    fn test_short_survey_not_halved() {
        let answers = vec![SurveyAnswer::scored(1, Family::Floral)];
        let scores = normalized_raw_scores(&answers, 27);
        assert_eq!(scores.floral, 1.0);
    }

    #[test]
    fn test_long_survey_halved() {
        // 28 answer lines crosses the limit, including the fixed one
        let mut answers: Vec<SurveyAnswer> = (0..26)
            .map(|i| SurveyAnswer::scored(i, Family::Fresh))
            .collect();
        answers.push(SurveyAnswer::fixed(100));
        answers.push(SurveyAnswer::scored(101, Family::Citrus));

        let scores = normalized_raw_scores(&answers, 27);
        assert_eq!(scores.fresh, 13.0);
        assert_eq!(scores.citrus, 0.5);
    }

    #[test]
    fn test_exactly_at_limit_not_halved() {
        let answers: Vec<SurveyAnswer> = (0..27)
            .map(|i| SurveyAnswer::scored(i, Family::Oriental))
            .collect();
        let scores = normalized_raw_scores(&answers, 27);
        assert_eq!(scores.oriental, 27.0);
    }
}
