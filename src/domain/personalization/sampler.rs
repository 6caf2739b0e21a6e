//! Question sampling for a finalized allocation.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use super::ThemeAllocation;
use crate::domain::quiz::{Question, QuestionCatalog};

/// Draws round two questions according to an allocation.
pub struct QuestionSampler;

impl QuestionSampler {
    /// Samples `k` questions without replacement from each theme's pool,
    /// then shuffles the combined list so themes are interleaved.
    ///
    /// # Edge Cases
    /// - `k` larger than the pool: the whole pool is used and the shortfall
    ///   is logged; the deck comes back shorter than the allocation total
    pub fn draw<R: Rng + ?Sized>(
        allocation: &ThemeAllocation,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Vec<Question> {
        let mut deck = Vec::with_capacity(usize::from(allocation.total()));

        for (theme, count) in allocation.iter() {
            if count == 0 {
                continue;
            }
            let mut pool: Vec<&Question> = catalog.pool(theme).iter().collect();
            let wanted = usize::from(count);
            if wanted > pool.len() {
                warn!(
                    theme = %theme,
                    wanted,
                    available = pool.len(),
                    "Theme pool smaller than allocation; using the whole pool"
                );
            }
            pool.shuffle(rng);
            deck.extend(pool.into_iter().take(wanted).cloned());
        }

        deck.shuffle(rng);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::quiz::{Round, Theme};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog_with_pool_size(size: usize) -> QuestionCatalog {
        let mut questions = vec![Question {
            id: QuestionId::new("r1-01").unwrap(),
            theme: Theme::Conflict,
            text: "Warm-up".to_string(),
            option_a: "A".to_string(),
            option_b: "B".to_string(),
            round: Round::One,
            example: None,
        }];
        for theme in Theme::ALL {
            for i in 0..size {
                questions.push(Question {
                    id: QuestionId::new(format!("{}-{:02}", theme.key(), i)).unwrap(),
                    theme,
                    text: format!("{} question {}", theme.label(), i),
                    option_a: "A".to_string(),
                    option_b: "B".to_string(),
                    round: Round::Two,
                    example: None,
                });
            }
        }
        QuestionCatalog::new(questions).unwrap()
    }

    #[test]
    fn draw_matches_allocation_per_theme() {
        let catalog = catalog_with_pool_size(30);
        let allocation = ThemeAllocation::from_pairs(&[
            (Theme::Conflict, 7),
            (Theme::Support, 3),
            (Theme::Growth, 3),
            (Theme::Future, 2),
        ]);
        let mut rng = StdRng::seed_from_u64(1);

        let deck = QuestionSampler::draw(&allocation, &catalog, &mut rng);

        assert_eq!(deck.len(), 15);
        for (theme, count) in allocation.iter() {
            let drawn = deck.iter().filter(|q| q.theme == theme).count();
            assert_eq!(drawn, usize::from(count), "theme {}", theme);
        }
    }

    #[test]
    fn draw_has_no_duplicates() {
        let catalog = catalog_with_pool_size(30);
        let mut rng = StdRng::seed_from_u64(2);
        let deck = QuestionSampler::draw(&ThemeAllocation::balanced(), &catalog, &mut rng);

        let ids: HashSet<_> = deck.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn draw_only_uses_round_two_questions() {
        let catalog = catalog_with_pool_size(30);
        let mut rng = StdRng::seed_from_u64(3);
        let deck = QuestionSampler::draw(&ThemeAllocation::balanced(), &catalog, &mut rng);
        assert!(deck.iter().all(|q| q.round == Round::Two));
    }

    #[test]
    fn same_seed_gives_same_deck() {
        let catalog = catalog_with_pool_size(30);
        let allocation = ThemeAllocation::balanced();

        let first = QuestionSampler::draw(&allocation, &catalog, &mut StdRng::seed_from_u64(9));
        let second = QuestionSampler::draw(&allocation, &catalog, &mut StdRng::seed_from_u64(9));

        assert_eq!(first, second);
    }

    #[test]
    fn final_shuffle_interleaves_themes() {
        let catalog = catalog_with_pool_size(30);
        let allocation = ThemeAllocation::balanced();

        // Across a handful of seeds at least one deck must not be grouped by theme.
        let interleaved = (0..10).any(|seed| {
            let deck = QuestionSampler::draw(&allocation, &catalog, &mut StdRng::seed_from_u64(seed));
            deck.windows(2).any(|w| w[0].theme > w[1].theme)
        });
        assert!(interleaved);
    }

    #[test]
    fn oversized_allocation_returns_whole_pool() {
        let catalog = catalog_with_pool_size(4);
        let allocation = ThemeAllocation::from_pairs(&[(Theme::Intimacy, 9), (Theme::Future, 6)]);
        let mut rng = StdRng::seed_from_u64(4);

        let deck = QuestionSampler::draw(&allocation, &catalog, &mut rng);

        assert_eq!(deck.iter().filter(|q| q.theme == Theme::Intimacy).count(), 4);
        assert_eq!(deck.iter().filter(|q| q.theme == Theme::Future).count(), 4);
        assert_eq!(deck.len(), 8);
    }
}
