//! Paywall module - round two is gated behind a one-time checkout.

mod checkout;

pub use checkout::CheckoutReturn;
