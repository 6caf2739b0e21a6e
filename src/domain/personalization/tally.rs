//! Theme mismatch tally.

use serde::{Deserialize, Serialize};

use crate::domain::quiz::{Answer, Theme, ThemeMap};

/// Per-theme count of round one answers where the partners disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MismatchTally(ThemeMap<u32>);

impl MismatchTally {
    /// Counts answers whose match flag is exactly `false`.
    ///
    /// Unresolved answers (`None`) and matches are ignored, so a partially
    /// answered round never inflates the tally.
    pub fn from_answers<'a, I>(answers: I) -> Self
    where
        I: IntoIterator<Item = &'a Answer>,
    {
        let mut counts = ThemeMap::splat(0u32);
        for answer in answers {
            if answer.is_mismatch() {
                counts[answer.theme] += 1;
            }
        }
        Self(counts)
    }

    /// Wraps precomputed counts.
    pub fn from_counts(counts: ThemeMap<u32>) -> Self {
        Self(counts)
    }

    /// Mismatch count for a theme.
    pub fn count(&self, theme: Theme) -> u32 {
        self.0[theme]
    }

    /// Underlying per-theme counts.
    pub fn counts(&self) -> &ThemeMap<u32> {
        &self.0
    }

    /// Themes with at least one mismatch, in canonical order.
    pub fn mismatched_themes(&self) -> Vec<Theme> {
        self.0
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(theme, _)| theme)
            .collect()
    }

    /// Total mismatches across all themes.
    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, count)| *count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::quiz::Choice;

    fn answer(id: &str, theme: Theme, one: Choice, two: Choice) -> Answer {
        Answer::resolved(QuestionId::new(id).unwrap(), theme, one, two)
    }

    #[test]
    fn empty_input_yields_all_zero() {
        let none: Vec<Answer> = Vec::new();
        let tally = MismatchTally::from_answers(&none);
        assert_eq!(tally.total(), 0);
        assert!(tally.mismatched_themes().is_empty());
    }

    #[test]
    fn counts_only_mismatches_per_theme() {
        let answers = vec![
            answer("q1", Theme::Conflict, Choice::A, Choice::B),
            answer("q2", Theme::Conflict, Choice::A, Choice::B),
            answer("q3", Theme::Conflict, Choice::A, Choice::A),
            answer("q4", Theme::Future, Choice::B, Choice::A),
            answer("q5", Theme::Growth, Choice::B, Choice::B),
        ];

        let tally = MismatchTally::from_answers(&answers);

        assert_eq!(tally.count(Theme::Conflict), 2);
        assert_eq!(tally.count(Theme::Future), 1);
        assert_eq!(tally.count(Theme::Growth), 0);
        assert_eq!(tally.count(Theme::Support), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.mismatched_themes(), vec![Theme::Conflict, Theme::Future]);
    }

    #[test]
    fn unresolved_answers_are_not_counted() {
        let pending = Answer::unanswered(QuestionId::new("q1").unwrap(), Theme::Intimacy);
        let tally = MismatchTally::from_answers(std::iter::once(&pending));
        assert_eq!(tally.count(Theme::Intimacy), 0);
    }

    #[test]
    fn mismatched_themes_follow_canonical_order() {
        let answers = vec![
            answer("q1", Theme::Growth, Choice::A, Choice::B),
            answer("q2", Theme::Support, Choice::A, Choice::B),
            answer("q3", Theme::DailyLife, Choice::B, Choice::A),
        ];
        let tally = MismatchTally::from_answers(&answers);
        assert_eq!(
            tally.mismatched_themes(),
            vec![Theme::Support, Theme::DailyLife, Theme::Growth]
        );
    }
}
