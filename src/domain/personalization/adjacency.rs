//! Theme adjacency graph.
//!
//! Each theme names exactly two topically related themes. The relation is a
//! symmetric 6-cycle stored as directed pairs:
//!
//! ```text
//! conflict ─ support ─ intimacy ─ dailyLife ─ future ─ growth ─ (conflict)
//! ```

use crate::domain::quiz::Theme;

/// Static adjacency relation over the six themes.
pub struct AdjacencyGraph;

impl AdjacencyGraph {
    /// The two themes adjacent to `theme`.
    pub fn neighbours(theme: Theme) -> [Theme; 2] {
        match theme {
            Theme::Conflict => [Theme::Support, Theme::Growth],
            Theme::Support => [Theme::Conflict, Theme::Intimacy],
            Theme::Intimacy => [Theme::Support, Theme::DailyLife],
            Theme::DailyLife => [Theme::Intimacy, Theme::Future],
            Theme::Future => [Theme::DailyLife, Theme::Growth],
            Theme::Growth => [Theme::Future, Theme::Conflict],
        }
    }

    /// Themes that are neither `theme` nor one of its neighbours, in
    /// canonical order.
    pub fn distant(theme: Theme) -> Vec<Theme> {
        let neighbours = Self::neighbours(theme);
        Theme::ALL
            .into_iter()
            .filter(|t| *t != theme && !neighbours.contains(t))
            .collect()
    }

    /// Deduplicated union of the neighbours of `first` then `second`,
    /// excluding the two themes themselves. Insertion order is preserved.
    pub fn expand_pair(first: Theme, second: Theme) -> Vec<Theme> {
        let mut expanded = Vec::with_capacity(4);
        for theme in Self::neighbours(first)
            .into_iter()
            .chain(Self::neighbours(second))
        {
            if theme != first && theme != second && !expanded.contains(&theme) {
                expanded.push(theme);
            }
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_neighbours_are_support_and_growth() {
        assert_eq!(
            AdjacencyGraph::neighbours(Theme::Conflict),
            [Theme::Support, Theme::Growth]
        );
    }

    #[test]
    fn relation_is_symmetric_and_irreflexive() {
        for theme in Theme::ALL {
            for neighbour in AdjacencyGraph::neighbours(theme) {
                assert_ne!(neighbour, theme);
                assert!(
                    AdjacencyGraph::neighbours(neighbour).contains(&theme),
                    "{} lists {} but not vice versa",
                    theme,
                    neighbour
                );
            }
        }
    }

    #[test]
    fn every_theme_has_three_distant_themes() {
        for theme in Theme::ALL {
            let distant = AdjacencyGraph::distant(theme);
            assert_eq!(distant.len(), 3);
            assert!(!distant.contains(&theme));
        }
        assert_eq!(
            AdjacencyGraph::distant(Theme::Conflict),
            vec![Theme::DailyLife, Theme::Intimacy, Theme::Future]
        );
    }

    #[test]
    fn expand_pair_dedups_in_insertion_order() {
        assert_eq!(
            AdjacencyGraph::expand_pair(Theme::Conflict, Theme::Intimacy),
            vec![Theme::Support, Theme::Growth, Theme::DailyLife]
        );
    }

    #[test]
    fn expand_pair_excludes_primaries() {
        assert_eq!(
            AdjacencyGraph::expand_pair(Theme::Conflict, Theme::Support),
            vec![Theme::Growth, Theme::Intimacy]
        );
    }

    #[test]
    fn expand_pair_is_never_empty() {
        for first in Theme::ALL {
            for second in Theme::ALL {
                if first != second {
                    assert!(!AdjacencyGraph::expand_pair(first, second).is_empty());
                }
            }
        }
    }
}
