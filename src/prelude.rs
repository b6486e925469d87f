//! Sconto prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    allocation::AppliedPromotion,
    cart::{Cart, CartError},
    discounts::{DiscountError, DiscountRate},
    engine::{
        CartReceipt, EngineError, PricingContext, PromotionSummary, preview_item_discounts,
        price_cart,
    },
    ids::{CategoryId, ProductId, PromotionId, Sku, VariantId},
    items::LineItem,
    pricing::PricingError,
    promotions::{
        Promotion, Scope, active_promotions,
        conditions::{Conditions, PaymentMethod},
    },
};
