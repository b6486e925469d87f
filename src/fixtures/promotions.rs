//! Promotion fixtures
//!
//! YAML shape mirroring the admin tooling's promotion records: string ids,
//! percent values in points (10 = 10%), fixed values and thresholds in minor
//! units, weekdays as 0..=6 with 0 = Sunday.

use chrono::{NaiveDate, Weekday};
use decimal_percentage::Percentage;
use rusty_money::{Money, iso};
use serde::Deserialize;

use crate::{
    discounts::DiscountRate,
    fixtures::FixtureError,
    ids::{CategoryId, ProductId, PromotionId},
    promotions::{
        Promotion, Scope,
        conditions::{Conditions, PaymentMethod},
    },
};

/// A promotion set as described in YAML.
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// ISO alpha code of the currency fixed amounts are denominated in.
    pub currency: String,

    /// The promotion records.
    pub promotions: Vec<PromotionFixture>,
}

/// One promotion record as described in YAML.
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Promotion identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Discount type: `percentage` or `fixed`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Percent points for `percentage`, minor units for `fixed`.
    pub value: f64,

    /// Scope: `all`, `category` or `product`. Anything else parses but
    /// never matches.
    pub applicability: String,

    /// Target category or product id; required for non-`all` scopes to ever
    /// match.
    #[serde(default)]
    pub target_id: Option<String>,

    /// Activation conditions.
    #[serde(default)]
    pub conditions: ConditionsFixture,

    /// Admin active flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Promotion conditions as described in YAML.
#[derive(Debug, Default, Deserialize)]
pub struct ConditionsFixture {
    /// Weekday indices, 0 = Sunday through 6 = Saturday.
    #[serde(default)]
    pub days_of_week: Option<Vec<u8>>,

    /// First valid day, inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last valid day, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Payment method names: `cash`, `card`, `qris`, `bank_transfer`.
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,

    /// Minimum cart subtotal in minor units.
    #[serde(default)]
    pub minimum_purchase: Option<i64>,

    /// Minimum eligible quantity.
    #[serde(default)]
    pub minimum_quantity: Option<u32>,
}

fn default_active() -> bool {
    true
}

impl PromotionsFixture {
    /// Build the core promotion list.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] for unknown currencies, payment methods or
    /// weekday indices.
    pub fn into_promotions(self) -> Result<Vec<Promotion<'static>>, FixtureError> {
        let currency =
            iso::find(&self.currency).ok_or(FixtureError::UnknownCurrency(self.currency))?;

        self.promotions
            .into_iter()
            .map(|fixture| fixture.into_promotion(currency))
            .collect()
    }
}

impl PromotionFixture {
    fn into_promotion(
        self,
        currency: &'static iso::Currency,
    ) -> Result<Promotion<'static>, FixtureError> {
        let rate = match self.kind.as_str() {
            "percentage" => DiscountRate::Percent(Percentage::from(self.value / 100.0)),
            "fixed" => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "fixture values are whole minor units"
                )]
                let minor = self.value as i64;

                DiscountRate::Fixed(Money::from_minor(minor, currency))
            }
            // An unknown type parses as fixed-zero: it can never produce a
            // positive discount, so it silently never applies.
            _ => DiscountRate::Fixed(Money::from_minor(0, currency)),
        };

        let scope = match self.applicability.as_str() {
            "all" => Scope::All,
            "category" => Scope::Category(self.target_id.map(CategoryId::from)),
            "product" => Scope::Product(self.target_id.map(ProductId::from)),
            _ => Scope::Unrecognized,
        };

        let conditions = self.conditions.into_conditions(currency)?;

        let mut promotion = Promotion::new(PromotionId::from(self.id), self.name, rate, scope)
            .with_conditions(conditions);

        if let Some(description) = self.description {
            promotion = promotion.with_description(description);
        }

        if !self.is_active {
            promotion = promotion.deactivated();
        }

        Ok(promotion)
    }
}

impl ConditionsFixture {
    fn into_conditions(
        self,
        currency: &'static iso::Currency,
    ) -> Result<Conditions<'static>, FixtureError> {
        let days_of_week = self
            .days_of_week
            .map(|days| days.into_iter().map(weekday_from_index).collect())
            .transpose()?;

        let payment_methods = self
            .payment_methods
            .map(|methods| {
                methods
                    .into_iter()
                    .map(|method| payment_method_from_name(&method))
                    .collect()
            })
            .transpose()?;

        Ok(Conditions {
            days_of_week,
            starts_on: self.start_date,
            ends_on: self.end_date,
            payment_methods,
            minimum_purchase: self
                .minimum_purchase
                .map(|minor| Money::from_minor(minor, currency)),
            minimum_quantity: self.minimum_quantity,
        })
    }
}

/// Map a 0 = Sunday weekday index to [`Weekday`].
fn weekday_from_index(index: u8) -> Result<Weekday, FixtureError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(FixtureError::InvalidWeekday(index)),
    }
}

fn payment_method_from_name(name: &str) -> Result<PaymentMethod, FixtureError> {
    match name {
        "cash" => Ok(PaymentMethod::Cash),
        "card" => Ok(PaymentMethod::Card),
        "qris" => Ok(PaymentMethod::Qris),
        "bank_transfer" => Ok(PaymentMethod::BankTransfer),
        _ => Err(FixtureError::UnknownPaymentMethod(name.to_owned())),
    }
}
