//! Pricing
//!
//! Minor-unit price arithmetic shared by the discount calculator and the
//! allocator. All currency math stays in `i64` minor units or [`Decimal`];
//! floats never touch an amount.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur during price arithmetic.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A minor-unit amount overflowed `i64`.
    #[error("minor unit amount is not representable")]
    MinorUnitsNotRepresentable,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculate the undiscounted total of one cart line: unit price times
/// quantity.
///
/// # Errors
///
/// Returns [`PricingError::MinorUnitsNotRepresentable`] if the multiplication
/// overflows.
pub fn line_subtotal<'a>(item: &LineItem<'a>) -> Result<Money<'a, Currency>, PricingError> {
    let minor = item
        .original_price()
        .to_minor_units()
        .checked_mul(i64::from(item.quantity()))
        .ok_or(PricingError::MinorUnitsNotRepresentable)?;

    Ok(Money::from_minor(minor, item.original_price().currency()))
}

/// Calculate the undiscounted subtotal of a set of cart lines.
///
/// An empty set totals to zero in the given currency.
///
/// # Errors
///
/// Returns a [`PricingError`] if a line total overflows or the currencies do
/// not line up.
pub fn subtotal<'a, 'i, I>(
    items: I,
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, PricingError>
where
    'a: 'i,
    I: IntoIterator<Item = &'i LineItem<'a>>,
{
    items
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(line_subtotal(item)?)?)
        })
}

/// Calculate a percentage of an amount in minor units, rounding midpoints
/// away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Build a money value from minor units, clamping negative amounts to zero.
#[must_use]
pub fn non_negative(minor: i64, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(minor.max(0), currency)
}
