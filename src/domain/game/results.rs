//! Per-round agreement summaries.

use serde::{Deserialize, Serialize};

use super::Card;
use crate::domain::foundation::Percentage;
use crate::domain::quiz::{Round, Theme, ThemeMap};

/// Matched and answered counts for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeScore {
    pub matched: u32,
    pub total: u32,
}

impl ThemeScore {
    pub fn agreement(&self) -> Percentage {
        Percentage::from_ratio(self.matched, self.total)
    }

    pub fn mismatched(&self) -> u32 {
        self.total - self.matched
    }
}

/// Summary of a finished (or partially finished) round.
///
/// Only resolved cards are counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResults {
    pub round: Round,
    pub per_theme: ThemeMap<ThemeScore>,
    pub matched: u32,
    pub total: u32,
    pub agreement: Percentage,
    /// Theme with the highest agreement among themes that were played.
    pub strongest: Option<Theme>,
    /// Theme with the lowest agreement among themes that were played.
    pub weakest: Option<Theme>,
}

impl RoundResults {
    /// Summarizes the resolved cards of `round`.
    pub fn from_cards<'a, I>(round: Round, cards: I) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut per_theme: ThemeMap<ThemeScore> = ThemeMap::default();
        for card in cards {
            if card.round() != round {
                continue;
            }
            let Some(matched) = card.answer.matched() else {
                continue;
            };
            let score = &mut per_theme[card.theme()];
            score.total += 1;
            if matched {
                score.matched += 1;
            }
        }

        let matched = per_theme.iter().map(|(_, s)| s.matched).sum();
        let total = per_theme.iter().map(|(_, s)| s.total).sum();

        // Ties keep the earliest theme in canonical order.
        let mut strongest: Option<(Theme, Percentage)> = None;
        let mut weakest: Option<(Theme, Percentage)> = None;
        for (theme, score) in per_theme.iter().filter(|(_, s)| s.total > 0) {
            let agreement = score.agreement();
            if strongest.map_or(true, |(_, best)| agreement > best) {
                strongest = Some((theme, agreement));
            }
            if weakest.map_or(true, |(_, worst)| agreement < worst) {
                weakest = Some((theme, agreement));
            }
        }

        Self {
            round,
            per_theme,
            matched,
            total,
            agreement: Percentage::from_ratio(matched, total),
            strongest: strongest.map(|(theme, _)| theme),
            weakest: weakest.map(|(theme, _)| theme),
        }
    }

    /// Themes that produced at least one mismatch, in canonical order.
    pub fn themes_to_discuss(&self) -> Vec<Theme> {
        self.per_theme
            .iter()
            .filter(|(_, score)| score.mismatched() > 0)
            .map(|(theme, _)| theme)
            .collect()
    }
}
