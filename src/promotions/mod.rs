//! Promotions
//!
//! A [`Promotion`] is a discount rule with a scope, a rate and activation
//! conditions. Promotions are owned and edited by external admin tooling;
//! this module treats them as read-only input and never errors on malformed
//! rules — an unrecognised scope or a missing target simply matches nothing.

use chrono::{DateTime, Datelike, TimeZone};

use crate::{
    discounts::DiscountRate,
    ids::{CategoryId, ProductId, PromotionId},
    items::LineItem,
    promotions::conditions::{Conditions, PaymentMethod},
};

pub mod conditions;

/// The set of items a promotion targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Every item in the cart.
    All,

    /// Items in one category. A missing target makes the promotion inert.
    Category(Option<CategoryId>),

    /// One product. Variants of the product share eligibility. A missing
    /// target makes the promotion inert.
    Product(Option<ProductId>),

    /// A scope kind this engine does not recognise. Never matches.
    Unrecognized,
}

impl Scope {
    /// Whether an item with the given product and category qualifies.
    pub fn matches_ids(&self, product: &ProductId, category: &CategoryId) -> bool {
        match self {
            Scope::All => true,
            Scope::Category(target) => target.as_ref() == Some(category),
            Scope::Product(target) => target.as_ref() == Some(product),
            Scope::Unrecognized => false,
        }
    }

    /// Whether the given line item qualifies.
    pub fn matches(&self, item: &LineItem<'_>) -> bool {
        self.matches_ids(item.product(), item.category())
    }
}

/// A discount rule with scope, rate and activation conditions.
#[derive(Clone, Debug)]
pub struct Promotion<'a> {
    id: PromotionId,
    name: String,
    description: Option<String>,
    rate: DiscountRate<'a>,
    scope: Scope,
    conditions: Conditions<'a>,
    active: bool,
}

impl<'a> Promotion<'a> {
    /// Create an active, unconditional promotion.
    pub fn new(
        id: PromotionId,
        name: impl Into<String>,
        rate: DiscountRate<'a>,
        scope: Scope,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            rate,
            scope,
            conditions: Conditions::default(),
            active: true,
        }
    }

    /// Attach activation conditions.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Conditions<'a>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the promotion inactive.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Return the promotion identifier.
    pub fn id(&self) -> &PromotionId {
        &self.id
    }

    /// Return the promotion name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Return the discount rate.
    pub fn rate(&self) -> &DiscountRate<'a> {
        &self.rate
    }

    /// Return the scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Return the activation conditions.
    pub fn conditions(&self) -> &Conditions<'a> {
        &self.conditions
    }

    /// Whether the admin flag marks this promotion active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the promotion is running at the given instant.
    ///
    /// `now` must already be expressed in the business's local time zone;
    /// both the calendar window and the weekday check read the civil date of
    /// this instant.
    pub fn is_active_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.active
            && self.conditions.in_window(now.date_naive())
            && self.conditions.runs_on(now.weekday())
    }

    /// Whether an order paid with the given method qualifies.
    pub fn allows_payment(&self, method: Option<&PaymentMethod>) -> bool {
        self.conditions.allows_payment(method)
    }

    /// Whether the given line item falls inside this promotion's scope.
    pub fn is_eligible(&self, item: &LineItem<'_>) -> bool {
        self.scope.matches(item)
    }
}

/// Select the promotions that are running at the given instant,
/// independent of cart contents.
///
/// Pure function of its inputs; calling it twice with the same arguments
/// returns the same set.
pub fn active_promotions<'p, 'a, Tz: TimeZone>(
    promotions: &'p [Promotion<'a>],
    now: &DateTime<Tz>,
) -> Vec<&'p Promotion<'a>> {
    promotions
        .iter()
        .filter(|promotion| promotion.is_active_at(now))
        .collect()
}
