//! Fixtures
//!
//! Declarative YAML descriptions of carts and promotion sets, parsed into
//! core types. Used by the integration tests and handy for demo callers;
//! the engine itself never reads YAML.

use thiserror::Error;

use crate::{cart::CartError, promotions::Promotion};

pub mod carts;
pub mod promotions;

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown ISO currency code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown payment method name.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Day-of-week index outside 0..=6 (0 = Sunday).
    #[error("invalid day of week: {0}")]
    InvalidWeekday(u8),

    /// A fixture cart violated the cart boundary contract.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Parse a promotion set from YAML.
///
/// Unrecognised applicability strings become
/// [`Scope::Unrecognized`](crate::promotions::Scope::Unrecognized) — the
/// promotion parses but never matches anything.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed or references an
/// unknown currency, payment method or weekday.
pub fn promotions_from_yaml(yaml: &str) -> Result<Vec<Promotion<'static>>, FixtureError> {
    let fixture: promotions::PromotionsFixture = serde_norway::from_str(yaml)?;

    fixture.into_promotions()
}

/// Parse a cart from YAML.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed, the currency is
/// unknown, or the cart violates the boundary contract.
pub fn cart_from_yaml(yaml: &str) -> Result<crate::cart::Cart<'static>, FixtureError> {
    let fixture: carts::CartFixture = serde_norway::from_str(yaml)?;

    fixture.into_cart()
}
