//! Checkout return handling.
//!
//! After the hosted checkout page finishes, the player is redirected back
//! with a query parameter (by default `payment`) describing the outcome.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome reported by the checkout redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutReturn {
    Completed,
    Cancelled,
}

impl CheckoutReturn {
    /// Parses the outcome from a return URL query string.
    ///
    /// Accepts the query with or without its leading `?`; values are
    /// percent-decoded. Returns `None` when the parameter is absent, carries
    /// an unrecognized value, appears with conflicting values, or the query
    /// is malformed.
    pub fn from_query(query: &str, success_param: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
            Ok(pairs) => pairs,
            Err(err) => {
                debug!(error = %err, "Ignoring malformed checkout query");
                return None;
            }
        };

        let mut outcome = None;
        for (_, value) in pairs.iter().filter(|(key, _)| key == success_param) {
            let parsed = Self::parse_outcome(value, success_param)?;
            if outcome.is_some_and(|seen| seen != parsed) {
                debug!(param = success_param, "Conflicting checkout outcomes");
                return None;
            }
            outcome = Some(parsed);
        }
        outcome
    }

    fn parse_outcome(value: &str, success_param: &str) -> Option<Self> {
        match value {
            "success" | "completed" => Some(CheckoutReturn::Completed),
            "cancelled" | "canceled" => Some(CheckoutReturn::Cancelled),
            other => {
                debug!(param = success_param, value = other, "Ignoring unknown checkout outcome");
                None
            }
        }
    }

    /// True when round two should be unlocked.
    pub fn unlocks_round_two(&self) -> bool {
        matches!(self, CheckoutReturn::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_completed() {
        assert_eq!(
            CheckoutReturn::from_query("?payment=success", "payment"),
            Some(CheckoutReturn::Completed)
        );
    }

    #[test]
    fn cancelled_is_recognized_in_either_spelling() {
        assert_eq!(
            CheckoutReturn::from_query("payment=cancelled", "payment"),
            Some(CheckoutReturn::Cancelled)
        );
        assert_eq!(
            CheckoutReturn::from_query("payment=canceled", "payment"),
            Some(CheckoutReturn::Cancelled)
        );
    }

    #[test]
    fn absent_parameter_is_none() {
        assert_eq!(CheckoutReturn::from_query("?room=abc", "payment"), None);
        assert_eq!(CheckoutReturn::from_query("", "payment"), None);
    }

    #[test]
    fn finds_parameter_among_others() {
        let outcome = CheckoutReturn::from_query("?room=abc&paid=success&x=1", "paid");
        assert_eq!(outcome, Some(CheckoutReturn::Completed));
        assert!(outcome.unwrap().unlocks_round_two());
    }

    #[test]
    fn unknown_value_is_none() {
        assert_eq!(CheckoutReturn::from_query("payment=maybe", "payment"), None);
    }

    #[test]
    fn percent_encoded_value_is_decoded() {
        assert_eq!(
            CheckoutReturn::from_query("?payment=succ%65ss", "payment"),
            Some(CheckoutReturn::Completed)
        );
        assert_eq!(
            CheckoutReturn::from_query("?room=a%26b&payment=canceled", "payment"),
            Some(CheckoutReturn::Cancelled)
        );
    }

    #[test]
    fn conflicting_repeated_parameter_is_none() {
        assert_eq!(
            CheckoutReturn::from_query("?payment=success&payment=cancelled", "payment"),
            None
        );
    }

    #[test]
    fn repeated_parameter_with_same_outcome_is_accepted() {
        assert_eq!(
            CheckoutReturn::from_query("?payment=success&payment=completed", "payment"),
            Some(CheckoutReturn::Completed)
        );
    }

    #[test]
    fn cancelled_does_not_unlock() {
        assert!(!CheckoutReturn::Cancelled.unlocks_round_two());
    }
}
