//! Cart
//!
//! A [`Cart`] holds the line items of one order in a single currency. The
//! boundary contract lives here: currency consistency, positive quantities
//! and unique, non-blank skus are all checked at construction so that the
//! pricing pipeline never has to.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    ids::Sku,
    items::LineItem,
    pricing::{self, PricingError},
};

/// Errors related to cart construction or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item's currency differs from the cart currency (sku, item
    /// currency, cart currency).
    #[error("item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(Sku, &'static str, &'static str),

    /// An item has a zero quantity.
    #[error("item {0} has zero quantity")]
    ZeroQuantity(Sku),

    /// An item at the given position has a blank sku.
    #[error("item {0} has a blank sku")]
    BlankSku(usize),

    /// Two items share the same sku.
    #[error("duplicate sku {0}")]
    DuplicateSku(Sku),
}

/// The line items of one order, in a single currency.
#[derive(Debug)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if any item violates the boundary contract:
    /// mismatched currency, zero quantity, or a blank or duplicate sku.
    pub fn with_items(
        items: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items
            .iter()
            .enumerate()
            .try_for_each(|(position, item)| validate(item, position, currency))?;

        let mut seen: Vec<&Sku> = Vec::with_capacity(items.len());

        for item in &items {
            if seen.contains(&item.sku()) {
                return Err(CartError::DuplicateSku(item.sku().clone()));
            }

            seen.push(item.sku());
        }

        Ok(Cart { items, currency })
    }

    /// Add one item to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] under the same contract as
    /// [`Cart::with_items`].
    pub fn add_item(&mut self, item: LineItem<'a>) -> Result<(), CartError> {
        validate(&item, self.items.len(), self.currency)?;

        if self.items.iter().any(|existing| existing.sku() == item.sku()) {
            return Err(CartError::DuplicateSku(item.sku().clone()));
        }

        self.items.push(item);

        Ok(())
    }

    /// Calculate the undiscounted subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        pricing::subtotal(&self.items, self.currency)
    }

    /// Find an item by sku.
    pub fn find(&self, sku: &Sku) -> Option<&LineItem<'a>> {
        self.items.iter().find(|item| item.sku() == sku)
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Return the items in the cart.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn validate(
    item: &LineItem<'_>,
    position: usize,
    currency: &'static Currency,
) -> Result<(), CartError> {
    let item_currency = item.original_price().currency();

    if item_currency != currency {
        return Err(CartError::CurrencyMismatch(
            item.sku().clone(),
            item_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    if item.quantity() == 0 {
        return Err(CartError::ZeroQuantity(item.sku().clone()));
    }

    if item.sku().as_str().trim().is_empty() {
        return Err(CartError::BlankSku(position));
    }

    Ok(())
}
