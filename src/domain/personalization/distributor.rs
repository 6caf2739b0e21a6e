//! Proportional and greedy distribution for widely spread mismatches.

use tracing::{debug, warn};

use super::allocation::{ThemeAllocation, DECK_SIZE, MAX_PER_THEME};
use super::MismatchTally;
use crate::domain::quiz::Theme;

/// Minimum questions given to every mismatched theme before distribution.
pub const BASELINE_PER_THEME: u8 = 2;

/// Upper bound on correction steps; a correction never needs more than a
/// handful, so hitting this means the shortfall cannot be resolved.
pub const MAX_CORRECTION_STEPS: usize = 4 * DECK_SIZE as usize;

/// Distribution strategies for branches with three or more mismatched themes.
pub struct Distributor;

impl Distributor {
    /// Baseline plus proportional share, corrected to the deck size.
    ///
    /// Each mismatched theme gets `BASELINE_PER_THEME`, then the remaining
    /// slots are split by `round(remaining * count / total)` per theme. The
    /// independent roundings may drift from the target, which
    /// [`Distributor::correct`] repairs.
    ///
    /// Returns the allocation and any shortfall the correction could not fill.
    pub fn proportional(tally: &MismatchTally, mismatched: &[Theme]) -> (ThemeAllocation, u8) {
        let mut allocation = ThemeAllocation::default();
        let baseline_total = BASELINE_PER_THEME * mismatched.len() as u8;
        let remaining = DECK_SIZE.saturating_sub(baseline_total);
        let total_mismatches: u32 = mismatched.iter().map(|t| tally.count(*t)).sum();

        for theme in mismatched {
            let share = if total_mismatches == 0 {
                0
            } else {
                (f64::from(remaining) * f64::from(tally.count(*theme)) / f64::from(total_mismatches))
                    .round() as u8
            };
            allocation.set(*theme, BASELINE_PER_THEME + share);
        }

        debug!(
            remaining,
            total_mismatches,
            rounded_total = allocation.total(),
            "Proportional shares before correction"
        );

        let shortfall = Self::correct(&mut allocation, tally, mismatched);
        (allocation, shortfall)
    }

    /// Pulls the allocation total back to `DECK_SIZE`.
    ///
    /// - While over: decrement the theme holding the highest allocation.
    /// - While under: increment the mismatched theme below the cap with the
    ///   highest raw mismatch count.
    ///
    /// Ties go to the first theme in canonical order. The loop is bounded by
    /// `MAX_CORRECTION_STEPS`; an unfillable shortfall is returned and logged
    /// rather than forced.
    pub fn correct(
        allocation: &mut ThemeAllocation,
        tally: &MismatchTally,
        mismatched: &[Theme],
    ) -> u8 {
        let mut steps = 0;

        while allocation.total() > DECK_SIZE && steps < MAX_CORRECTION_STEPS {
            let Some(theme) = Self::highest_allocation(allocation) else {
                break;
            };
            allocation.decrement(theme);
            steps += 1;
        }

        while allocation.total() < DECK_SIZE && steps < MAX_CORRECTION_STEPS {
            let Some(theme) = Self::most_mismatched_below_cap(allocation, tally, mismatched) else {
                break;
            };
            allocation.increment(theme);
            steps += 1;
        }

        let total = allocation.total();
        if total != DECK_SIZE {
            warn!(
                total,
                target = DECK_SIZE,
                steps,
                "Allocation correction could not reach deck size"
            );
        }
        DECK_SIZE.saturating_sub(total)
    }

    /// Every theme gets the baseline; each leftover slot goes to the theme
    /// with the most mismatches per slot already allocated, recomputed after
    /// every increment.
    pub fn greedy(tally: &MismatchTally) -> ThemeAllocation {
        let mut allocation = ThemeAllocation::default();
        for theme in Theme::ALL {
            allocation.set(theme, BASELINE_PER_THEME);
        }

        let leftover = DECK_SIZE.saturating_sub(allocation.total());
        for _ in 0..leftover {
            let best = Self::best_ratio(&allocation, tally);
            allocation.increment(best);
            debug!(theme = %best, count = allocation.get(best), "Greedy slot assigned");
        }
        allocation
    }

    /// Theme maximizing `count / (allocation + 1)`.
    ///
    /// Compared by cross-multiplication so equal ratios tie exactly.
    fn best_ratio(allocation: &ThemeAllocation, tally: &MismatchTally) -> Theme {
        let mut best = Theme::ALL[0];
        for theme in Theme::ALL.into_iter().skip(1) {
            let candidate = u64::from(tally.count(theme)) * (u64::from(allocation.get(best)) + 1);
            let incumbent = u64::from(tally.count(best)) * (u64::from(allocation.get(theme)) + 1);
            if candidate > incumbent {
                best = theme;
            }
        }
        best
    }

    fn highest_allocation(allocation: &ThemeAllocation) -> Option<Theme> {
        let mut best: Option<(Theme, u8)> = None;
        for (theme, count) in allocation.iter() {
            if count == 0 {
                continue;
            }
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((theme, count));
            }
        }
        best.map(|(theme, _)| theme)
    }

    fn most_mismatched_below_cap(
        allocation: &ThemeAllocation,
        tally: &MismatchTally,
        mismatched: &[Theme],
    ) -> Option<Theme> {
        let mut best: Option<Theme> = None;
        for theme in Theme::ALL {
            if !mismatched.contains(&theme) || allocation.get(theme) >= MAX_PER_THEME {
                continue;
            }
            if best.map_or(true, |top| tally.count(theme) > tally.count(top)) {
                best = Some(theme);
            }
        }
        best
    }
}
