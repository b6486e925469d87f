//! Sconto
//!
//! Sconto is a promotion evaluation and discount allocation engine for
//! point-of-sale carts: given the line items of a cart and a set of
//! promotion rules with temporal, payment and quantity conditions, it
//! decides which promotions apply, computes each promotion's aggregate
//! discount and spreads it back across the eligible items, producing a
//! per-item pricing breakdown and cart-level totals.
//!
//! The engine is a pure, synchronous computation over in-memory data. It
//! performs no I/O, never reads a clock, and never errors on malformed
//! promotion rules — those simply don't apply. See [`engine::price_cart`]
//! for the full pipeline and [`engine::preview_item_discounts`] for the
//! single-item catalog preview.

pub mod allocation;
pub mod cart;
pub mod discounts;
pub mod engine;
pub mod fixtures;
pub mod ids;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod promotions;
