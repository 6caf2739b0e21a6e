//! Relationship themes and the enum-keyed `ThemeMap` record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the six fixed relationship topic categories.
///
/// The declaration order is the canonical iteration order used by every
/// tie-break in round two personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    Conflict,
    Support,
    DailyLife,
    Intimacy,
    Future,
    Growth,
}

impl Theme {
    /// Number of themes.
    pub const COUNT: usize = 6;

    /// All themes in canonical order.
    pub const ALL: [Theme; Theme::COUNT] = [
        Theme::Conflict,
        Theme::Support,
        Theme::DailyLife,
        Theme::Intimacy,
        Theme::Future,
        Theme::Growth,
    ];

    /// Position of this theme in canonical order.
    pub fn index(&self) -> usize {
        match self {
            Theme::Conflict => 0,
            Theme::Support => 1,
            Theme::DailyLife => 2,
            Theme::Intimacy => 3,
            Theme::Future => 4,
            Theme::Growth => 5,
        }
    }

    /// Wire/storage key (camelCase).
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Conflict => "conflict",
            Theme::Support => "support",
            Theme::DailyLife => "dailyLife",
            Theme::Intimacy => "intimacy",
            Theme::Future => "future",
            Theme::Growth => "growth",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Conflict => "Conflict",
            Theme::Support => "Support",
            Theme::DailyLife => "Daily Life",
            Theme::Intimacy => "Intimacy",
            Theme::Future => "Future",
            Theme::Growth => "Growth",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.key() == s)
            .ok_or_else(|| ValidationError::invalid_format("theme", format!("unknown theme '{}'", s)))
    }
}

/// Fixed-size record holding one value per theme.
///
/// Indexing is by `Theme`, so every theme always has an entry and iteration
/// is always in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeMap<T> {
    conflict: T,
    support: T,
    daily_life: T,
    intimacy: T,
    future: T,
    growth: T,
}

impl<T> ThemeMap<T> {
    /// Builds a map by evaluating `f` once per theme in canonical order.
    pub fn from_fn(mut f: impl FnMut(Theme) -> T) -> Self {
        Self {
            conflict: f(Theme::Conflict),
            support: f(Theme::Support),
            daily_life: f(Theme::DailyLife),
            intimacy: f(Theme::Intimacy),
            future: f(Theme::Future),
            growth: f(Theme::Growth),
        }
    }

    /// Iterates `(theme, &value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Theme, &T)> + '_ {
        Theme::ALL.into_iter().map(move |theme| (theme, &self[theme]))
    }

    /// Produces a new map by transforming every value.
    pub fn map<U>(&self, mut f: impl FnMut(Theme, &T) -> U) -> ThemeMap<U> {
        ThemeMap::from_fn(|theme| f(theme, &self[theme]))
    }
}

impl<T: Copy> ThemeMap<T> {
    /// Creates a map with the same value for every theme.
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value)
    }
}

impl<T> Index<Theme> for ThemeMap<T> {
    type Output = T;

    fn index(&self, theme: Theme) -> &T {
        match theme {
            Theme::Conflict => &self.conflict,
            Theme::Support => &self.support,
            Theme::DailyLife => &self.daily_life,
            Theme::Intimacy => &self.intimacy,
            Theme::Future => &self.future,
            Theme::Growth => &self.growth,
        }
    }
}

impl<T> IndexMut<Theme> for ThemeMap<T> {
    fn index_mut(&mut self, theme: Theme) -> &mut T {
        match theme {
            Theme::Conflict => &mut self.conflict,
            Theme::Support => &mut self.support,
            Theme::DailyLife => &mut self.daily_life,
            Theme::Intimacy => &mut self.intimacy,
            Theme::Future => &mut self.future,
            Theme::Growth => &mut self.growth,
        }
    }
}
