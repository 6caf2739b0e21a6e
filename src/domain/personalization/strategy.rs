//! Allocation strategy selection.
//!
//! The branch is chosen strictly by how many distinct themes produced at
//! least one mismatch in round one:
//!
//! | mismatched | strategy |
//! |---|---|
//! | 0 | [`AllocationStrategy::Balanced`] |
//! | 1 | [`AllocationStrategy::Focused`] |
//! | 2 | [`AllocationStrategy::Paired`] |
//! | 3–5 | [`AllocationStrategy::Proportional`] |
//! | 6 | [`AllocationStrategy::Greedy`] |

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::allocation::{ThemeAllocation, DECK_SIZE};
use super::{AdjacencyGraph, Distributor, MismatchTally};
use crate::domain::quiz::Theme;

/// Questions given to the only mismatched theme.
pub const FOCUS_PRIMARY: u8 = 7;
/// Questions given to each neighbour of the focused theme.
pub const FOCUS_NEIGHBOUR: u8 = 3;
/// Questions given to the randomly chosen distant theme.
pub const FOCUS_EXTRA: u8 = 2;
/// Questions given to each of two mismatched themes.
pub const PAIR_PRIMARY: u8 = 5;

/// Which branch produced an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// No mismatches: fixed balanced layout.
    Balanced,
    /// One mismatched theme, widened to its neighbours plus one distant theme.
    Focused {
        primary: Theme,
        extra: Option<Theme>,
    },
    /// Two mismatched themes sharing the remainder with their neighbours.
    Paired { first: Theme, second: Theme },
    /// Three to five mismatched themes: baseline plus proportional share.
    Proportional,
    /// All six themes mismatched: baseline plus greedy ratio slots.
    Greedy,
}

/// An allocation together with how it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub strategy: AllocationStrategy,
    pub allocation: ThemeAllocation,
    /// Slots the proportional correction could not place (normally 0).
    pub shortfall: u8,
}

/// Chooses and runs the allocation branch for a tally.
pub struct AllocationSelector;

impl AllocationSelector {
    /// Produces a per-theme allocation for round two.
    ///
    /// Only the `Focused` branch draws from `rng` (to pick the distant theme).
    pub fn select<R: Rng + ?Sized>(tally: &MismatchTally, rng: &mut R) -> AllocationPlan {
        let mismatched = tally.mismatched_themes();

        let plan = match mismatched.as_slice() {
            [] => AllocationPlan {
                strategy: AllocationStrategy::Balanced,
                allocation: ThemeAllocation::balanced(),
                shortfall: 0,
            },
            [primary] => Self::focused(*primary, rng),
            [first, second] => Self::paired(*first, *second),
            themes if themes.len() < Theme::COUNT => {
                let (allocation, shortfall) = Distributor::proportional(tally, themes);
                AllocationPlan {
                    strategy: AllocationStrategy::Proportional,
                    allocation,
                    shortfall,
                }
            }
            _ => AllocationPlan {
                strategy: AllocationStrategy::Greedy,
                allocation: Distributor::greedy(tally),
                shortfall: 0,
            },
        };

        debug!(
            mismatched_themes = mismatched.len(),
            strategy = ?plan.strategy,
            total = plan.allocation.total(),
            "Round two allocation selected"
        );
        plan
    }

    fn focused<R: Rng + ?Sized>(primary: Theme, rng: &mut R) -> AllocationPlan {
        let mut allocation = ThemeAllocation::default();
        allocation.set(primary, FOCUS_PRIMARY);
        for neighbour in AdjacencyGraph::neighbours(primary) {
            allocation.set(neighbour, FOCUS_NEIGHBOUR);
        }

        let extra = AdjacencyGraph::distant(primary).choose(rng).copied();
        match extra {
            Some(theme) => allocation.set(theme, FOCUS_EXTRA),
            None => allocation.set(primary, FOCUS_PRIMARY + FOCUS_EXTRA),
        }

        AllocationPlan {
            strategy: AllocationStrategy::Focused { primary, extra },
            allocation,
            shortfall: 0,
        }
    }

    /// Both primaries get `PAIR_PRIMARY`; their expanded neighbours split the
    /// rest at `ceil(remaining / n)` each, never granting more than is left.
    fn paired(first: Theme, second: Theme) -> AllocationPlan {
        let mut allocation = ThemeAllocation::default();
        allocation.set(first, PAIR_PRIMARY);
        allocation.set(second, PAIR_PRIMARY);

        let mut remaining = DECK_SIZE - 2 * PAIR_PRIMARY;
        let expanded = AdjacencyGraph::expand_pair(first, second);

        if !expanded.is_empty() {
            let n = expanded.len() as u8;
            let per_theme = (remaining + n - 1) / n;
            for theme in expanded {
                if remaining == 0 {
                    break;
                }
                let grant = per_theme.min(remaining);
                allocation.set(theme, grant);
                remaining -= grant;
            }
        }

        // Only reachable if the graph left no neighbours to expand into.
        let primaries = [first, second];
        let mut turn = 0;
        while remaining > 0 {
            allocation.increment(primaries[turn % 2]);
            remaining -= 1;
            turn += 1;
        }

        AllocationPlan {
            strategy: AllocationStrategy::Paired { first, second },
            allocation,
            shortfall: 0,
        }
    }
}
