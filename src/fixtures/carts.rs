//! Cart fixtures
//!
//! YAML shape for cart contents: one entry per line with catalog ids, a
//! unique sku, a quantity and a unit price in minor units.

use rusty_money::{Money, iso};
use serde::Deserialize;

use crate::{
    cart::Cart,
    fixtures::FixtureError,
    ids::{CategoryId, ProductId, Sku, VariantId},
    items::LineItem,
};

/// A cart as described in YAML.
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// ISO alpha code of the cart currency.
    pub currency: String,

    /// The cart lines.
    pub items: Vec<ItemFixture>,
}

/// One cart line as described in YAML.
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Product identifier.
    pub product: String,

    /// Variant identifier, if the line is a variant.
    #[serde(default)]
    pub variant: Option<String>,

    /// Category identifier.
    pub category: String,

    /// Stock-keeping unit, unique within the cart.
    pub sku: String,

    /// Product display name.
    pub name: String,

    /// Variant display name.
    #[serde(default)]
    pub variant_name: Option<String>,

    /// Number of units.
    pub quantity: u32,

    /// Undiscounted unit price in minor units.
    pub price: i64,
}

impl CartFixture {
    /// Build the core cart.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the currency is unknown or the cart
    /// violates the boundary contract.
    pub fn into_cart(self) -> Result<Cart<'static>, FixtureError> {
        let currency =
            iso::find(&self.currency).ok_or(FixtureError::UnknownCurrency(self.currency))?;

        let items: Vec<LineItem<'static>> = self
            .items
            .into_iter()
            .map(|item| item.into_line_item(currency))
            .collect();

        Ok(Cart::with_items(items, currency)?)
    }
}

impl ItemFixture {
    fn into_line_item(self, currency: &'static iso::Currency) -> LineItem<'static> {
        let mut item = LineItem::new(
            ProductId::from(self.product),
            CategoryId::from(self.category),
            Sku::from(self.sku),
            self.name,
            self.quantity,
            Money::from_minor(self.price, currency),
        );

        if let Some(variant) = self.variant {
            item = item.with_variant(
                VariantId::from(variant),
                self.variant_name.unwrap_or_default(),
            );
        }

        item
    }
}
