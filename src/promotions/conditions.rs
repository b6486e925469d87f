//! Promotion conditions
//!
//! Activation conditions attached to a promotion: calendar windows, weekday
//! sets, payment rails and purchase thresholds. All fields are optional; a
//! default [`Conditions`] is unconditional. An empty weekday or
//! payment-method set is treated the same as an unset one.

use chrono::{NaiveDate, Weekday};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

/// Payment rails accepted by the point of sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash at the till.
    Cash,
    /// Card terminal.
    Card,
    /// QRIS code scan.
    Qris,
    /// Bank transfer.
    BankTransfer,
}

/// Activation conditions for a promotion.
#[derive(Clone, Debug, Default)]
pub struct Conditions<'a> {
    /// Weekdays the promotion runs on. Unset or empty means every day.
    pub days_of_week: Option<SmallVec<[Weekday; 7]>>,

    /// First calendar day the promotion is valid, inclusive.
    pub starts_on: Option<NaiveDate>,

    /// Last calendar day the promotion is valid, inclusive.
    pub ends_on: Option<NaiveDate>,

    /// Payment methods the promotion is restricted to. Unset or empty means
    /// any method.
    pub payment_methods: Option<SmallVec<[PaymentMethod; 4]>>,

    /// Minimum undiscounted cart subtotal for the promotion to fire.
    pub minimum_purchase: Option<Money<'a, Currency>>,

    /// Minimum total eligible quantity for the promotion to fire. Values of
    /// three or more turn a fixed discount into group pricing.
    pub minimum_quantity: Option<u32>,
}

impl Conditions<'_> {
    /// Whether the given civil date falls inside the validity window.
    pub fn in_window(&self, date: NaiveDate) -> bool {
        self.starts_on.is_none_or(|start| date >= start)
            && self.ends_on.is_none_or(|end| date <= end)
    }

    /// Whether the given weekday is one the promotion runs on.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        match &self.days_of_week {
            Some(days) if !days.is_empty() => days.contains(&weekday),
            _ => true,
        }
    }

    /// Whether an order paid with the given method qualifies.
    ///
    /// A promotion restricted to specific methods fails closed when the
    /// method is not yet known.
    pub fn allows_payment(&self, method: Option<&PaymentMethod>) -> bool {
        match &self.payment_methods {
            Some(methods) if !methods.is_empty() => {
                method.is_some_and(|method| methods.contains(method))
            }
            _ => true,
        }
    }

    /// Whether this set of conditions restricts the payment method.
    pub fn restricts_payment(&self) -> bool {
        self.payment_methods
            .as_ref()
            .is_some_and(|methods| !methods.is_empty())
    }
}
