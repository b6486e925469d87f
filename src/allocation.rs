//! Discount allocation
//!
//! Spreads a promotion's aggregate discount back across its eligible line
//! items, proportionally to quantity: every eligible unit carries the same
//! per-unit share. Working items are matched by sku, and each touched item
//! gains one [`AppliedPromotion`] record; the item's displayed price is
//! derived from those records, so successive promotions accumulate instead
//! of overwriting each other.

use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, DiscountRate, eligible_quantity},
    ids::{PromotionId, Sku},
    items::LineItem,
    pricing::PricingError,
    promotions::Promotion,
};

/// A discount record attached to a line item by the allocator.
///
/// Immutable once produced; the amount is the discount for one unit of the
/// item.
#[derive(Clone, Debug)]
pub struct AppliedPromotion<'a> {
    promotion: PromotionId,
    name: String,
    rate: DiscountRate<'a>,
    discount_per_unit: Money<'a, Currency>,
}

impl<'a> AppliedPromotion<'a> {
    /// Create a new record.
    pub fn new(
        promotion: PromotionId,
        name: impl Into<String>,
        rate: DiscountRate<'a>,
        discount_per_unit: Money<'a, Currency>,
    ) -> Self {
        Self {
            promotion,
            name: name.into(),
            rate,
            discount_per_unit,
        }
    }

    /// Return the identifier of the promotion that produced this record.
    pub fn promotion(&self) -> &PromotionId {
        &self.promotion
    }

    /// Return the name of the promotion that produced this record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a snapshot of the promotion's rate at allocation time.
    pub fn rate(&self) -> &DiscountRate<'a> {
        &self.rate
    }

    /// Return the discount for one unit of the item.
    pub fn discount_per_unit(&self) -> &Money<'a, Currency> {
        &self.discount_per_unit
    }
}

/// Spread `discount` across the items named by `eligible_skus`,
/// proportionally to quantity.
///
/// The per-unit share is `discount / total eligible quantity`, rounded to
/// minor units with midpoints away from zero; a sub-minor-unit remainder can
/// therefore make the allocated sum differ from the aggregate by at most one
/// minor unit per item. Cart totals are taken from the aggregate, not from
/// re-summing allocations.
///
/// Skus that are not present in `items` are skipped; a zero total eligible
/// quantity allocates nothing.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the per-unit share is not representable in
/// minor units.
pub fn allocate<'a>(
    promotion: &Promotion<'a>,
    discount: &Money<'a, Currency>,
    eligible_skus: &[Sku],
    items: &mut [LineItem<'a>],
) -> Result<(), DiscountError> {
    let index: FxHashMap<Sku, usize> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (item.sku().clone(), idx))
        .collect();

    let eligible: Vec<&LineItem<'a>> = eligible_skus
        .iter()
        .filter_map(|sku| index.get(sku).and_then(|&idx| items.get(idx)))
        .collect();

    let quantity = eligible_quantity(&eligible);

    if quantity == 0 {
        return Ok(());
    }

    let per_unit_minor = per_unit_share(discount.to_minor_units(), quantity)?;

    if per_unit_minor <= 0 {
        return Ok(());
    }

    let currency = discount.currency();

    for sku in eligible_skus {
        let Some(item) = index.get(sku).and_then(|&idx| items.get_mut(idx)) else {
            continue;
        };

        item.push_discount(AppliedPromotion::new(
            promotion.id().clone(),
            promotion.name(),
            *promotion.rate(),
            Money::from_minor(per_unit_minor, currency),
        ));
    }

    Ok(())
}

/// Divide an aggregate discount evenly across a quantity of units.
fn per_unit_share(discount_minor: i64, quantity: u64) -> Result<i64, PricingError> {
    let discount = Decimal::from_i64(discount_minor).ok_or(PricingError::MinorUnitsNotRepresentable)?;
    let quantity = Decimal::from_u64(quantity).ok_or(PricingError::MinorUnitsNotRepresentable)?;

    discount
        .checked_div(quantity)
        .ok_or(PricingError::MinorUnitsNotRepresentable)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::MinorUnitsNotRepresentable)
}
