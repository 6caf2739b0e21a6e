//! Per-theme round two question counts.

use serde::{Deserialize, Serialize};

use crate::domain::quiz::{Theme, ThemeMap};

/// Number of questions in the round two deck.
pub const DECK_SIZE: u8 = 15;

/// Upper bound on any single theme's allocation (the round two pool size).
pub const MAX_PER_THEME: u8 = 30;

/// Number of round two questions to draw from each theme.
///
/// # Invariants
///
/// - every value is at most `MAX_PER_THEME`
/// - values produced by `AllocationSelector` sum to `DECK_SIZE`
///   (the one documented exception is surfaced as `AllocationPlan::shortfall`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeAllocation(ThemeMap<u8>);

impl ThemeAllocation {
    /// The fixed allocation used when round one produced no mismatches.
    pub fn balanced() -> Self {
        Self::from_pairs(&[
            (Theme::Conflict, 3),
            (Theme::Support, 3),
            (Theme::DailyLife, 2),
            (Theme::Intimacy, 3),
            (Theme::Future, 2),
            (Theme::Growth, 2),
        ])
    }

    /// Builds an allocation from explicit pairs; unlisted themes get 0.
    pub fn from_pairs(pairs: &[(Theme, u8)]) -> Self {
        let mut allocation = Self::default();
        for (theme, count) in pairs {
            allocation.set(*theme, *count);
        }
        allocation
    }

    /// Count for a theme.
    pub fn get(&self, theme: Theme) -> u8 {
        self.0[theme]
    }

    /// Sum over all themes.
    pub fn total(&self) -> u8 {
        self.0.iter().map(|(_, count)| *count).sum()
    }

    /// True when the allocation fills the deck exactly.
    pub fn is_complete(&self) -> bool {
        self.total() == DECK_SIZE
    }

    /// `(theme, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Theme, u8)> + '_ {
        self.0.iter().map(|(theme, count)| (theme, *count))
    }

    /// Themes with a non-zero count, in canonical order.
    pub fn active_themes(&self) -> Vec<Theme> {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(theme, _)| theme)
            .collect()
    }

    /// Per-theme counts.
    pub fn as_map(&self) -> &ThemeMap<u8> {
        &self.0
    }

    pub(crate) fn set(&mut self, theme: Theme, count: u8) {
        self.0[theme] = count.min(MAX_PER_THEME);
    }

    pub(crate) fn increment(&mut self, theme: Theme) -> bool {
        if self.0[theme] >= MAX_PER_THEME {
            return false;
        }
        self.0[theme] += 1;
        true
    }

    pub(crate) fn decrement(&mut self, theme: Theme) {
        self.0[theme] = self.0[theme].saturating_sub(1);
    }
}
