//! Round two personalization.
//!
//! Turns round one answers into a 15-question round two deck weighted
//! toward the themes where the partners disagreed:
//!
//! 1. [`MismatchTally`] counts disagreements per theme
//! 2. [`AllocationSelector`] picks a branch by the number of mismatched themes
//!    and produces a [`ThemeAllocation`]
//! 3. [`QuestionSampler`] draws that many questions per theme and shuffles
//!
//! [`RoundTwoPersonalizer`] runs the whole pipeline.

mod adjacency;
mod allocation;
mod distributor;
mod sampler;
mod strategy;
mod tally;

pub use adjacency::AdjacencyGraph;
pub use allocation::{ThemeAllocation, DECK_SIZE, MAX_PER_THEME};
pub use distributor::{Distributor, BASELINE_PER_THEME, MAX_CORRECTION_STEPS};
pub use sampler::QuestionSampler;
pub use strategy::{AllocationPlan, AllocationSelector, AllocationStrategy};
pub use tally::MismatchTally;

use rand::Rng;
use tracing::info;

use crate::domain::quiz::{Answer, Question, QuestionCatalog};

/// A personalized round two deck and the plan that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTwoDeck {
    pub plan: AllocationPlan,
    pub questions: Vec<Question>,
}

/// Entry point for round two personalization.
pub struct RoundTwoPersonalizer;

impl RoundTwoPersonalizer {
    /// Tallies `answers`, selects an allocation and samples the deck.
    ///
    /// Callers pass only round one answers. Randomness comes entirely from
    /// `rng`, so a seeded generator reproduces the same deck.
    pub fn personalize<'a, I, R>(answers: I, catalog: &QuestionCatalog, rng: &mut R) -> RoundTwoDeck
    where
        I: IntoIterator<Item = &'a Answer>,
        R: Rng + ?Sized,
    {
        let tally = MismatchTally::from_answers(answers);
        let plan = AllocationSelector::select(&tally, rng);
        let questions = QuestionSampler::draw(&plan.allocation, catalog, rng);

        info!(
            mismatches = tally.total(),
            strategy = ?plan.strategy,
            questions = questions.len(),
            "Round two deck personalized"
        );

        RoundTwoDeck { plan, questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::{Choice, Theme};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn round_one_answers(catalog: &QuestionCatalog, mismatched: &[&str]) -> Vec<Answer> {
        catalog
            .round_one()
            .iter()
            .map(|q| {
                let two = if mismatched.contains(&q.id.as_str()) {
                    Choice::B
                } else {
                    Choice::A
                };
                Answer::resolved(q.id.clone(), q.theme, Choice::A, two)
            })
            .collect()
    }

    #[test]
    fn full_agreement_yields_balanced_deck() {
        let catalog = QuestionCatalog::bundled().unwrap();
        let answers = round_one_answers(&catalog, &[]);
        let mut rng = StdRng::seed_from_u64(11);

        let deck = RoundTwoPersonalizer::personalize(&answers, &catalog, &mut rng);

        assert_eq!(deck.plan.strategy, AllocationStrategy::Balanced);
        assert_eq!(deck.questions.len(), usize::from(DECK_SIZE));
        for (theme, count) in ThemeAllocation::balanced().iter() {
            let drawn = deck.questions.iter().filter(|q| q.theme == theme).count();
            assert_eq!(drawn, usize::from(count));
        }
    }

    #[test]
    fn single_conflict_mismatch_focuses_conflict() {
        let catalog = QuestionCatalog::bundled().unwrap();
        let conflict_id = catalog
            .round_one()
            .iter()
            .find(|q| q.theme == Theme::Conflict)
            .map(|q| q.id.as_str().to_string())
            .unwrap();
        let answers = round_one_answers(&catalog, &[conflict_id.as_str()]);
        let mut rng = StdRng::seed_from_u64(12);

        let deck = RoundTwoPersonalizer::personalize(&answers, &catalog, &mut rng);

        let conflict = deck.questions.iter().filter(|q| q.theme == Theme::Conflict).count();
        assert_eq!(conflict, 7);
        assert_eq!(deck.questions.len(), 15);
        let ids: HashSet<_> = deck.questions.iter().map(|q| &q.id).collect();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn seeded_rng_reproduces_deck() {
        let catalog = QuestionCatalog::bundled().unwrap();
        let every_other: Vec<String> = catalog
            .round_one()
            .iter()
            .step_by(2)
            .map(|q| q.id.as_str().to_string())
            .collect();
        let refs: Vec<&str> = every_other.iter().map(String::as_str).collect();
        let answers = round_one_answers(&catalog, &refs);

        let first =
            RoundTwoPersonalizer::personalize(&answers, &catalog, &mut StdRng::seed_from_u64(5));
        let second =
            RoundTwoPersonalizer::personalize(&answers, &catalog, &mut StdRng::seed_from_u64(5));

        assert_eq!(first, second);
    }
}
