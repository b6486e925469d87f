//! Pricing engine
//!
//! The single entry points every consumer calls: [`price_cart`] runs the full
//! pipeline (schedule filter, eligibility, discount calculation, allocation,
//! aggregation) over a cart, and [`preview_item_discounts`] estimates the
//! discounts one catalog item would get before it is in a cart.
//!
//! Promotions apply sequentially in input order and are not mutually
//! exclusive: an item matched by several promotions accumulates one
//! allocation record per promotion, each computed against the item's
//! original price.

use chrono::{DateTime, TimeZone};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    allocation::{self, AppliedPromotion},
    cart::Cart,
    discounts::{self, DiscountError, DiscountRate},
    ids::{CategoryId, ProductId, PromotionId, Sku},
    items::LineItem,
    pricing::{self, PricingError},
    promotions::{Promotion, active_promotions, conditions::PaymentMethod},
};

/// Errors surfaced by the pricing pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Errors from discount calculation or allocation.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Errors from price arithmetic.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The circumstances of one pricing request.
#[derive(Clone, Debug)]
pub struct PricingContext<Tz: TimeZone> {
    /// The current instant, already expressed in the business's local time
    /// zone. The engine never reads a clock.
    pub now: DateTime<Tz>,

    /// The payment method of the order, once known. Promotions restricted to
    /// specific methods do not fire while this is `None`.
    pub payment_method: Option<PaymentMethod>,
}

impl<Tz: TimeZone> PricingContext<Tz> {
    /// Create a context with no payment method chosen yet.
    pub fn new(now: DateTime<Tz>) -> Self {
        Self {
            now,
            payment_method: None,
        }
    }

    /// Set the payment method.
    #[must_use]
    pub fn with_payment(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }
}

/// One cart-level aggregate record per promotion that fired.
#[derive(Clone, Debug)]
pub struct PromotionSummary<'a> {
    /// Identifier of the promotion.
    pub promotion: PromotionId,

    /// Name of the promotion.
    pub name: String,

    /// Snapshot of the promotion's rate.
    pub rate: DiscountRate<'a>,

    /// Aggregate discount the promotion earned across the whole cart.
    pub amount: Money<'a, Currency>,
}

/// The output of one full pipeline run.
#[derive(Debug)]
pub struct CartReceipt<'a> {
    /// Working copies of the cart lines with accumulated discount records.
    pub items: Vec<LineItem<'a>>,

    /// One aggregate record per promotion that fired, in application order.
    pub promotions: Vec<PromotionSummary<'a>>,

    /// Undiscounted cart subtotal.
    pub subtotal: Money<'a, Currency>,

    /// Sum of all aggregate promotion discounts.
    pub total_discount: Money<'a, Currency>,

    /// Subtotal minus total discount, floored at zero.
    pub discounted_subtotal: Money<'a, Currency>,
}

/// Run the full pricing pipeline over a cart.
///
/// An empty cart short-circuits to a zero-discount receipt. Promotions that
/// compute a zero discount leave no trace in the output.
///
/// # Errors
///
/// Returns an [`EngineError`] only for contract violations or arithmetic
/// overflow; malformed promotion rules never error, they just don't apply.
pub fn price_cart<'a, Tz: TimeZone>(
    cart: &Cart<'a>,
    promotions: &[Promotion<'a>],
    ctx: &PricingContext<Tz>,
) -> Result<CartReceipt<'a>, EngineError> {
    let currency = cart.currency();
    let subtotal = cart.subtotal()?;

    if cart.is_empty() {
        return Ok(CartReceipt {
            items: Vec::new(),
            promotions: Vec::new(),
            subtotal,
            total_discount: Money::from_minor(0, currency),
            discounted_subtotal: subtotal,
        });
    }

    let mut working: Vec<LineItem<'a>> = cart.items().to_vec();
    let mut summaries: Vec<PromotionSummary<'a>> = Vec::new();
    let mut total_discount_minor = 0i64;

    for promotion in active_promotions(promotions, &ctx.now) {
        if !promotion.allows_payment(ctx.payment_method.as_ref()) {
            continue;
        }

        let (eligible_skus, discount) = {
            let eligible: Vec<&LineItem<'a>> = working
                .iter()
                .filter(|item| promotion.is_eligible(item))
                .collect();

            let skus: Vec<Sku> = eligible.iter().map(|item| item.sku().clone()).collect();

            (
                skus,
                discounts::promotion_discount(promotion, &eligible, &subtotal, currency)?,
            )
        };

        if discount.to_minor_units() <= 0 {
            continue;
        }

        allocation::allocate(promotion, &discount, &eligible_skus, &mut working)?;

        total_discount_minor = total_discount_minor.saturating_add(discount.to_minor_units());

        summaries.push(PromotionSummary {
            promotion: promotion.id().clone(),
            name: promotion.name().to_owned(),
            rate: *promotion.rate(),
            amount: discount,
        });
    }

    let discounted_subtotal = pricing::non_negative(
        subtotal.to_minor_units().saturating_sub(total_discount_minor),
        currency,
    );

    Ok(CartReceipt {
        items: working,
        promotions: summaries,
        subtotal,
        total_discount: Money::from_minor(total_discount_minor, currency),
        discounted_subtotal,
    })
}

/// Estimate the per-unit discounts one catalog item would get, before it is
/// in a cart.
///
/// Promotions whose conditions cannot be evaluated for a lone hypothetical
/// unit — a minimum purchase, a minimum quantity above one, or a
/// payment-method restriction — are excluded. The authoritative figure is
/// always recomputed by [`price_cart`] at cart-evaluation time.
///
/// # Errors
///
/// Returns an [`EngineError`] if percentage arithmetic is not representable.
pub fn preview_item_discounts<'a, Tz: TimeZone>(
    product: &ProductId,
    category: &CategoryId,
    price: &Money<'a, Currency>,
    promotions: &[Promotion<'a>],
    now: &DateTime<Tz>,
) -> Result<Vec<AppliedPromotion<'a>>, EngineError> {
    let mut records = Vec::new();

    for promotion in active_promotions(promotions, now) {
        let conditions = promotion.conditions();

        if conditions.minimum_purchase.is_some()
            || conditions.minimum_quantity.is_some_and(|minimum| minimum > 1)
            || conditions.restricts_payment()
        {
            continue;
        }

        if !promotion.scope().matches_ids(product, category) {
            continue;
        }

        let per_unit_minor = match promotion.rate() {
            DiscountRate::Percent(percent) => {
                pricing::percent_of_minor(percent, price.to_minor_units())?
            }
            DiscountRate::Fixed(amount) => amount.to_minor_units(),
        };

        if per_unit_minor <= 0 {
            continue;
        }

        records.push(AppliedPromotion::new(
            promotion.id().clone(),
            promotion.name(),
            *promotion.rate(),
            Money::from_minor(per_unit_minor, price.currency()),
        ));
    }

    Ok(records)
}
