//! Pure aggregation over scored task results.

use std::collections::BTreeMap;

use crate::domain::result::{HallucinationLabel, RunAggregates, Score, TaskResult};
use crate::domain::task::Domain;

/// Fold a run's results into its aggregates.
///
/// Skipped results are excluded from every accuracy computation, numerator
/// and denominator. Accuracy is `None` (not zero) when nothing was graded.
pub fn aggregate(results: &[TaskResult]) -> RunAggregates {
    let mut graded_count = 0usize;
    let mut skipped_count = 0usize;
    let mut correct_count = 0usize;
    let mut per_domain: BTreeMap<Domain, (usize, usize)> = BTreeMap::new();

    let mut hallucinated_count = 0usize;
    let mut refused_count = 0usize;
    let mut unclear_count = 0usize;

    for result in results {
        match result.score {
            Score::Skipped => skipped_count += 1,
            Score::Correct | Score::Incorrect => {
                graded_count += 1;
                let slot = per_domain.entry(result.domain).or_insert((0, 0));
                slot.1 += 1;
                if result.score == Score::Correct {
                    correct_count += 1;
                    slot.0 += 1;
                }
            }
        }

        match result.hallucination_label {
            Some(HallucinationLabel::HallucinationCandidate) => hallucinated_count += 1,
            Some(HallucinationLabel::RefusalOrCorrection) => refused_count += 1,
            Some(HallucinationLabel::Unclear) => unclear_count += 1,
            None => {}
        }
    }

    let accuracy = if graded_count > 0 {
        Some(correct_count as f64 / graded_count as f64)
    } else {
        None
    };

    let per_domain_accuracy = per_domain
        .into_iter()
        .map(|(domain, (correct, graded))| (domain, correct as f64 / graded as f64))
        .collect();

    RunAggregates {
        accuracy,
        graded_count,
        skipped_count,
        correct_count,
        per_domain_accuracy,
        hallucinated_count,
        refused_count,
        unclear_count,
    }
}
