//! Property-based tests for round two personalization.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use duet_quiz::domain::personalization::{
    AllocationSelector, AllocationStrategy, MismatchTally, QuestionSampler, RoundTwoPersonalizer,
    ThemeAllocation, DECK_SIZE, MAX_PER_THEME,
};
use duet_quiz::domain::quiz::{Answer, Choice, QuestionCatalog, Round, Theme, ThemeMap};

/// Strategy: mismatch counts per theme in canonical order.
fn counts_strategy() -> impl Strategy<Value = [u32; 6]> {
    prop::array::uniform6(0..=6u32)
}

fn tally(counts: [u32; 6]) -> MismatchTally {
    MismatchTally::from_counts(ThemeMap::from_fn(|theme| counts[theme.index()]))
}

proptest! {
    // 1. Every branch fills exactly one deck
    #[test]
    fn allocation_fills_deck(counts in counts_strategy(), seed in any::<u64>()) {
        let plan = AllocationSelector::select(&tally(counts), &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(plan.allocation.total(), DECK_SIZE, "counts={:?}", counts);
        prop_assert_eq!(plan.shortfall, 0);
    }

    // 2. No theme exceeds its pool cap
    #[test]
    fn allocation_respects_cap(counts in counts_strategy(), seed in any::<u64>()) {
        let plan = AllocationSelector::select(&tally(counts), &mut StdRng::seed_from_u64(seed));
        for (theme, count) in plan.allocation.iter() {
            prop_assert!(count <= MAX_PER_THEME, "{}={}", theme, count);
        }
    }

    // 3. The branch is chosen by the number of mismatched themes
    #[test]
    fn branch_follows_mismatched_theme_count(counts in counts_strategy(), seed in any::<u64>()) {
        let tally = tally(counts);
        let plan = AllocationSelector::select(&tally, &mut StdRng::seed_from_u64(seed));
        let mismatched = counts.iter().filter(|c| **c > 0).count();

        match mismatched {
            0 => {
                prop_assert_eq!(plan.strategy, AllocationStrategy::Balanced);
                prop_assert_eq!(plan.allocation, ThemeAllocation::balanced());
            }
            1 => prop_assert!(
                matches!(plan.strategy, AllocationStrategy::Focused { .. }),
                "{:?}",
                plan.strategy
            ),
            2 => prop_assert!(
                matches!(plan.strategy, AllocationStrategy::Paired { .. }),
                "{:?}",
                plan.strategy
            ),
            3..=5 => prop_assert_eq!(plan.strategy, AllocationStrategy::Proportional),
            _ => prop_assert_eq!(plan.strategy, AllocationStrategy::Greedy),
        }
    }

    // 4. Every mismatched theme appears in round two
    #[test]
    fn mismatched_themes_are_never_dropped(counts in counts_strategy(), seed in any::<u64>()) {
        let tally = tally(counts);
        let plan = AllocationSelector::select(&tally, &mut StdRng::seed_from_u64(seed));
        for theme in tally.mismatched_themes() {
            prop_assert!(plan.allocation.get(theme) > 0, "{} dropped", theme);
        }
    }

    // 5. A sampled deck matches its allocation with distinct round two questions
    #[test]
    fn sampled_deck_matches_allocation(counts in counts_strategy(), seed in any::<u64>()) {
        let catalog = QuestionCatalog::bundled().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = AllocationSelector::select(&tally(counts), &mut rng);
        let deck = QuestionSampler::draw(&plan.allocation, &catalog, &mut rng);

        prop_assert_eq!(deck.len(), usize::from(DECK_SIZE));
        let ids: HashSet<_> = deck.iter().map(|q| q.id.clone()).collect();
        prop_assert_eq!(ids.len(), deck.len());
        prop_assert!(deck.iter().all(|q| q.round == Round::Two));
        for theme in Theme::ALL {
            let drawn = deck.iter().filter(|q| q.theme == theme).count();
            prop_assert_eq!(drawn, usize::from(plan.allocation.get(theme)));
        }
    }

    // 6. Personalization from real answers is reproducible from a seed
    #[test]
    fn personalization_is_deterministic(
        disagree in prop::collection::vec(any::<bool>(), 15),
        seed in any::<u64>(),
    ) {
        let catalog = QuestionCatalog::bundled().unwrap();
        let answers: Vec<Answer> = catalog
            .round_one()
            .iter()
            .zip(disagree.iter())
            .map(|(q, flip)| {
                let two = if *flip { Choice::B } else { Choice::A };
                Answer::resolved(q.id.clone(), q.theme, Choice::A, two)
            })
            .collect();

        let first = RoundTwoPersonalizer::personalize(&answers, &catalog, &mut StdRng::seed_from_u64(seed));
        let second = RoundTwoPersonalizer::personalize(&answers, &catalog, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.questions.len(), usize::from(DECK_SIZE));
    }
}
