//! Line items
//!
//! A [`LineItem`] is one product or variant entry in a cart. Its undiscounted
//! unit price is fixed when the item is constructed; discounts accumulate as
//! an ordered history of [`AppliedPromotion`] records and the current unit
//! price is always derived from that history, never stored. This makes
//! overlapping promotions additive against the original price by
//! construction.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    allocation::AppliedPromotion,
    ids::{CategoryId, ProductId, Sku, VariantId},
};

/// One product/variant entry in a cart, with quantity and pricing.
#[derive(Clone, Debug)]
pub struct LineItem<'a> {
    product: ProductId,
    variant: Option<VariantId>,
    category: CategoryId,
    sku: Sku,
    product_name: String,
    variant_name: Option<String>,
    quantity: u32,
    original_price: Money<'a, Currency>,
    applied: SmallVec<[AppliedPromotion<'a>; 2]>,
}

impl<'a> LineItem<'a> {
    /// Create a new line item with no variant and no discounts applied.
    pub fn new(
        product: ProductId,
        category: CategoryId,
        sku: Sku,
        product_name: impl Into<String>,
        quantity: u32,
        original_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            product,
            variant: None,
            category,
            sku,
            product_name: product_name.into(),
            variant_name: None,
            quantity,
            original_price,
            applied: SmallVec::new(),
        }
    }

    /// Attach a variant identity to the item.
    #[must_use]
    pub fn with_variant(mut self, variant: VariantId, variant_name: impl Into<String>) -> Self {
        self.variant = Some(variant);
        self.variant_name = Some(variant_name.into());
        self
    }

    /// Return the product identifier. Variants of the same product share it.
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Return the variant identifier, if the item is a variant.
    pub fn variant(&self) -> Option<&VariantId> {
        self.variant.as_ref()
    }

    /// Return the category identifier.
    pub fn category(&self) -> &CategoryId {
        &self.category
    }

    /// Return the stock-keeping unit. Unique within a cart.
    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Return the product display name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Return the variant display name, if any.
    pub fn variant_name(&self) -> Option<&str> {
        self.variant_name.as_deref()
    }

    /// Return the quantity of units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Return the undiscounted unit price, fixed at construction.
    pub fn original_price(&self) -> &Money<'a, Currency> {
        &self.original_price
    }

    /// Return the discount records applied to this item so far, in
    /// application order.
    pub fn applied_promotions(&self) -> &[AppliedPromotion<'a>] {
        &self.applied
    }

    /// Return the current unit price: the original price minus every
    /// per-unit discount in the history, floored at zero.
    pub fn unit_price(&self) -> Money<'a, Currency> {
        let discounted = self.applied.iter().fold(
            self.original_price.to_minor_units(),
            |minor, record| minor.saturating_sub(record.discount_per_unit().to_minor_units()),
        );

        Money::from_minor(discounted.max(0), self.original_price.currency())
    }

    /// Return the total per-unit discount accumulated on this item.
    pub fn unit_discount(&self) -> Money<'a, Currency> {
        let total = self
            .applied
            .iter()
            .fold(0i64, |minor, record| {
                minor.saturating_add(record.discount_per_unit().to_minor_units())
            });

        Money::from_minor(total, self.original_price.currency())
    }

    /// Record an allocated discount. Only the allocator produces records.
    pub(crate) fn push_discount(&mut self, record: AppliedPromotion<'a>) {
        self.applied.push(record);
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::IDR;

    use crate::{discounts::DiscountRate, ids::PromotionId};

    use super::*;

    fn item<'a>() -> LineItem<'a> {
        LineItem::new(
            ProductId::from("p1"),
            CategoryId::from("c1"),
            Sku::from("sku-1"),
            "Es Teh",
            2,
            Money::from_minor(10_000, IDR),
        )
    }

    fn record<'a>(id: &str, per_unit_minor: i64) -> AppliedPromotion<'a> {
        AppliedPromotion::new(
            PromotionId::from(id),
            "test promo",
            DiscountRate::Fixed(Money::from_minor(per_unit_minor, IDR)),
            Money::from_minor(per_unit_minor, IDR),
        )
    }

    #[test]
    fn unit_price_starts_at_original_price() {
        assert_eq!(item().unit_price(), Money::from_minor(10_000, IDR));
    }

    #[test]
    fn unit_price_subtracts_accumulated_discounts() {
        let mut item = item();
        item.push_discount(record("a", 1_000));
        item.push_discount(record("b", 500));

        assert_eq!(item.unit_price(), Money::from_minor(8_500, IDR));
        assert_eq!(item.unit_discount(), Money::from_minor(1_500, IDR));
        assert_eq!(item.applied_promotions().len(), 2);
    }

    #[test]
    fn unit_price_floors_at_zero() {
        let mut item = item();
        item.push_discount(record("a", 25_000));

        assert_eq!(item.unit_price(), Money::from_minor(0, IDR));
    }

    #[test]
    fn with_variant_sets_variant_identity() {
        let item = item().with_variant(VariantId::from("v1"), "Large");

        assert_eq!(item.variant(), Some(&VariantId::from("v1")));
        assert_eq!(item.variant_name(), Some("Large"));
    }
}
