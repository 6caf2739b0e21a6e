//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::SessionId;

/// Payment configuration (hosted checkout link for round two)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Hosted checkout page for the one-time round two purchase
    #[serde(default)]
    pub checkout_url: String,

    /// Price shown to players, in cents
    #[serde(default = "default_price_cents")]
    pub price_cents: u32,

    /// Query parameter the checkout appends when redirecting back
    #[serde(default = "default_success_param")]
    pub success_param: String,
}

fn default_price_cents() -> u32 {
    499
}

fn default_success_param() -> String {
    "payment".to_string()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            checkout_url: String::new(),
            price_cents: default_price_cents(),
            success_param: default_success_param(),
        }
    }
}

impl PaymentConfig {
    /// Checkout link tagged with the session so the return can be matched up.
    pub fn checkout_link(&self, session_id: &SessionId) -> String {
        let separator = if self.checkout_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}client_reference_id={}",
            self.checkout_url, separator, session_id
        )
    }

    /// Price formatted for display, e.g. `$4.99`
    pub fn display_price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.checkout_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__CHECKOUT_URL"));
        }
        if !self.checkout_url.starts_with("https://") || self.checkout_url.len() <= "https://".len()
        {
            return Err(ValidationError::CheckoutUrlMustBeHttps);
        }
        if self.price_cents == 0 {
            return Err(ValidationError::InvalidPrice);
        }
        if self.success_param.is_empty()
            || self
                .success_param
                .chars()
                .any(|c| matches!(c, '&' | '=' | '?' | '#') || c.is_whitespace())
        {
            return Err(ValidationError::InvalidSuccessParam);
        }
        Ok(())
    }
}
