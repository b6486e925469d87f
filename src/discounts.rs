//! Discount calculation
//!
//! Computes one aggregate discount amount per promotion from its eligible
//! line items. Cart-level gates (minimum purchase, minimum quantity, empty
//! eligible set) are evaluated here, once per promotion. Percentage rates are
//! always computed against pristine original prices, so a promotion's amount
//! does not depend on what earlier promotions already allocated.

use decimal_percentage::Percentage;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{self, PricingError},
    promotions::Promotion,
};

/// Fixed discounts with a minimum quantity at or above this threshold are
/// group pricing ("buy N, get the discount once per group") rather than
/// per-unit discounts.
pub const GROUP_PRICING_MIN_QUANTITY: u32 = 3;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// A promotion's fixed amount is in a different currency than the cart.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from price arithmetic.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// How a promotion discounts its eligible items.
#[derive(Clone, Copy, Debug)]
pub enum DiscountRate<'a> {
    /// A percentage of the eligible items' undiscounted subtotal
    /// (e.g. "10% off").
    Percent(Percentage),

    /// A fixed amount, applied per unit, or once per group of N when the
    /// promotion requires a minimum quantity of
    /// [`GROUP_PRICING_MIN_QUANTITY`] or more.
    Fixed(Money<'a, Currency>),
}

/// Sum the quantities of a set of eligible cart lines.
pub fn eligible_quantity(items: &[&LineItem<'_>]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity())).sum()
}

/// Compute the aggregate discount a promotion earns on its eligible items.
///
/// Returns zero money when any gate holds the promotion back: the cart
/// subtotal is below the promotion's minimum purchase, no items are eligible,
/// or the total eligible quantity is below the promotion's minimum. A zero
/// result means the promotion did not apply; it is not an error.
///
/// # Errors
///
/// Returns a [`DiscountError`] if a fixed amount is in a different currency
/// than the cart, or if the arithmetic is not representable.
pub fn promotion_discount<'a>(
    promotion: &Promotion<'a>,
    eligible: &[&LineItem<'a>],
    cart_subtotal: &Money<'a, Currency>,
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, DiscountError> {
    let conditions = promotion.conditions();

    if let Some(minimum) = &conditions.minimum_purchase {
        if cart_subtotal.to_minor_units() < minimum.to_minor_units() {
            return Ok(Money::from_minor(0, currency));
        }
    }

    if eligible.is_empty() {
        return Ok(Money::from_minor(0, currency));
    }

    let quantity = eligible_quantity(eligible);

    if let Some(minimum) = conditions.minimum_quantity {
        if minimum > 1 && quantity < u64::from(minimum) {
            return Ok(Money::from_minor(0, currency));
        }
    }

    let minor = match promotion.rate() {
        DiscountRate::Percent(percent) => {
            let subtotal = pricing::subtotal(eligible.iter().copied(), currency)?;

            pricing::percent_of_minor(percent, subtotal.to_minor_units())?
        }
        DiscountRate::Fixed(amount) => {
            if amount.currency() != currency {
                return Err(DiscountError::Money(MoneyError::CurrencyMismatch {
                    expected: currency.iso_alpha_code,
                    actual: amount.currency().iso_alpha_code,
                }));
            }

            let groups = match conditions.minimum_quantity {
                Some(minimum) if minimum >= GROUP_PRICING_MIN_QUANTITY => {
                    quantity / u64::from(minimum)
                }
                _ => quantity,
            };

            let groups =
                i64::try_from(groups).map_err(|_| PricingError::MinorUnitsNotRepresentable)?;

            amount
                .to_minor_units()
                .checked_mul(groups)
                .ok_or(PricingError::MinorUnitsNotRepresentable)?
        }
    };

    Ok(pricing::non_negative(minor, currency))
}
