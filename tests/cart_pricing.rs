//! Integration tests for the full cart pricing pipeline.
//!
//! Reference arithmetic for the main scenario:
//!
//! Cart: one line, unit price Rp 10,000, quantity 2 → subtotal Rp 20,000.
//! Promotion: 10% off everything.
//!
//! - aggregate discount: 20,000 × 10% = 2,000
//! - per-unit allocation: 2,000 / 2 = 1,000
//! - unit price after discount: 10,000 − 1,000 = 9,000
//! - discounted subtotal: 20,000 − 2,000 = 18,000

use chrono::{DateTime, TimeZone, Utc};
use decimal_percentage::Percentage;
use rusty_money::{Money, iso::IDR};
use testresult::TestResult;

use sconto::prelude::*;
use sconto::promotions::conditions::Conditions;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn ctx() -> PricingContext<Utc> {
    PricingContext::new(noon())
}

fn line(sku: &str, product: &str, category: &str, price_minor: i64, quantity: u32) -> LineItem<'static> {
    LineItem::new(
        ProductId::from(product),
        CategoryId::from(category),
        Sku::from(sku),
        "item",
        quantity,
        Money::from_minor(price_minor, IDR),
    )
}

fn percent_all(id: &str, percent: f64) -> Promotion<'static> {
    Promotion::new(
        PromotionId::from(id),
        format!("{}% off", percent * 100.0),
        DiscountRate::Percent(Percentage::from(percent)),
        Scope::All,
    )
}

#[test]
fn percentage_scenario_allocates_per_unit() -> TestResult {
    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 10_000, 2)], IDR)?;
    let promotions = vec![percent_all("promo-1", 0.10)];

    let receipt = price_cart(&cart, &promotions, &ctx())?;

    assert_eq!(receipt.subtotal, Money::from_minor(20_000, IDR));
    assert_eq!(receipt.total_discount, Money::from_minor(2_000, IDR));
    assert_eq!(receipt.discounted_subtotal, Money::from_minor(18_000, IDR));

    let item = receipt.items.first();
    assert_eq!(
        item.map(LineItem::unit_price),
        Some(Money::from_minor(9_000, IDR))
    );
    assert_eq!(
        item.and_then(|i| i.applied_promotions().first())
            .map(|r| *r.discount_per_unit()),
        Some(Money::from_minor(1_000, IDR))
    );

    assert_eq!(receipt.promotions.len(), 1);
    assert_eq!(
        receipt.promotions.first().map(|s| s.amount),
        Some(Money::from_minor(2_000, IDR))
    );

    Ok(())
}

#[test]
fn minimum_purchase_gate_blocks_small_carts() -> TestResult {
    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 10_000, 3)], IDR)?;

    let promotions = vec![
        percent_all("promo-1", 0.10).with_conditions(Conditions {
            minimum_purchase: Some(Money::from_minor(50_000, IDR)),
            ..Conditions::default()
        }),
    ];

    // Subtotal 30,000 < 50,000 threshold: the promotion must not fire.
    let receipt = price_cart(&cart, &promotions, &ctx())?;

    assert!(receipt.promotions.is_empty());
    assert_eq!(receipt.total_discount, Money::from_minor(0, IDR));
    assert_eq!(receipt.discounted_subtotal, receipt.subtotal);

    Ok(())
}

#[test]
fn minimum_quantity_gate_pays_per_full_group() -> TestResult {
    let bulk = Promotion::new(
        PromotionId::from("bulk-3"),
        "buy 3 save 1000",
        DiscountRate::Fixed(Money::from_minor(1_000, IDR)),
        Scope::All,
    )
    .with_conditions(Conditions {
        minimum_quantity: Some(3),
        ..Conditions::default()
    });

    // Quantity 5: floor(5 / 3) = 1 group → discount 1,000.
    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 10_000, 5)], IDR)?;
    let receipt = price_cart(&cart, &[bulk.clone()], &ctx())?;

    assert_eq!(receipt.total_discount, Money::from_minor(1_000, IDR));

    // Quantity 2: below the minimum → no discount at all.
    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 10_000, 2)], IDR)?;
    let receipt = price_cart(&cart, &[bulk], &ctx())?;

    assert_eq!(receipt.total_discount, Money::from_minor(0, IDR));
    assert!(receipt.promotions.is_empty());

    Ok(())
}

#[test]
fn overlapping_promotions_accumulate_against_original_price() -> TestResult {
    // One line, price 10,000, quantity 2. Two promotions both match it:
    //
    // - 10% off the "food" category: aggregate 2,000, per unit 1,000
    // - 500 off per unit, all items:  aggregate 1,000, per unit 500
    //
    // Both are computed against the pristine price, so the final unit price
    // is 10,000 − 1,000 − 500 = 8,500.
    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 10_000, 2)], IDR)?;

    let category_percent = Promotion::new(
        PromotionId::from("cat-10"),
        "10% off food",
        DiscountRate::Percent(Percentage::from(0.10)),
        Scope::Category(Some(CategoryId::from("food"))),
    );

    let fixed_per_unit = Promotion::new(
        PromotionId::from("all-500"),
        "500 off per unit",
        DiscountRate::Fixed(Money::from_minor(500, IDR)),
        Scope::All,
    );

    let receipt = price_cart(&cart, &[category_percent, fixed_per_unit], &ctx())?;

    assert_eq!(receipt.total_discount, Money::from_minor(3_000, IDR));
    assert_eq!(receipt.discounted_subtotal, Money::from_minor(17_000, IDR));
    assert_eq!(receipt.promotions.len(), 2);

    let item = receipt.items.first();
    assert_eq!(
        item.map(|i| i.applied_promotions().len()),
        Some(2)
    );
    assert_eq!(
        item.map(LineItem::unit_price),
        Some(Money::from_minor(8_500, IDR))
    );

    Ok(())
}

#[test]
fn category_scoping_follows_the_target() -> TestResult {
    let promo = Promotion::new(
        PromotionId::from("cat-x"),
        "10% off category X",
        DiscountRate::Percent(Percentage::from(0.10)),
        Scope::Category(Some(CategoryId::from("X"))),
    );

    let in_scope = Cart::with_items(vec![line("sku-1", "p1", "X", 10_000, 1)], IDR)?;
    let receipt = price_cart(&in_scope, &[promo.clone()], &ctx())?;
    assert_eq!(receipt.total_discount, Money::from_minor(1_000, IDR));

    let out_of_scope = Cart::with_items(vec![line("sku-1", "p1", "Y", 10_000, 1)], IDR)?;
    let receipt = price_cart(&out_of_scope, &[promo], &ctx())?;
    assert_eq!(receipt.total_discount, Money::from_minor(0, IDR));

    Ok(())
}

#[test]
fn no_active_promotions_is_neutral() -> TestResult {
    let cart = Cart::with_items(
        vec![
            line("sku-1", "p1", "food", 10_000, 2),
            line("sku-2", "p2", "drinks", 8_000, 1),
        ],
        IDR,
    )?;

    let promotions = vec![percent_all("promo-1", 0.10).deactivated()];

    let receipt = price_cart(&cart, &promotions, &ctx())?;

    assert_eq!(receipt.total_discount, Money::from_minor(0, IDR));
    assert_eq!(receipt.discounted_subtotal, receipt.subtotal);
    assert!(
        receipt
            .items
            .iter()
            .all(|item| item.unit_price() == *item.original_price())
    );

    Ok(())
}

#[test]
fn prices_and_totals_never_go_negative() -> TestResult {
    // A fixed discount far larger than the unit price: the unit price floors
    // at zero and the discounted subtotal stays non-negative.
    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 1_000, 1)], IDR)?;

    let oversized = Promotion::new(
        PromotionId::from("huge"),
        "25000 off per unit",
        DiscountRate::Fixed(Money::from_minor(25_000, IDR)),
        Scope::All,
    );

    let receipt = price_cart(&cart, &[oversized], &ctx())?;

    assert_eq!(
        receipt.items.first().map(LineItem::unit_price),
        Some(Money::from_minor(0, IDR))
    );
    assert!(receipt.discounted_subtotal.gte(&Money::from_minor(0, IDR))?);
    assert!(receipt.discounted_subtotal.lte(&receipt.subtotal)?);

    Ok(())
}

#[test]
fn payment_restricted_promotion_needs_a_matching_method() -> TestResult {
    let qris_only = percent_all("qris-promo", 0.10).with_conditions(Conditions {
        payment_methods: Some(smallvec::smallvec![PaymentMethod::Qris]),
        ..Conditions::default()
    });

    let cart = Cart::with_items(vec![line("sku-1", "p1", "food", 10_000, 1)], IDR)?;

    // No payment method chosen yet: fails closed.
    let receipt = price_cart(&cart, std::slice::from_ref(&qris_only), &ctx())?;
    assert!(receipt.promotions.is_empty());

    // Paying by cash: still no match.
    let cash = ctx().with_payment(PaymentMethod::Cash);
    let receipt = price_cart(&cart, std::slice::from_ref(&qris_only), &cash)?;
    assert!(receipt.promotions.is_empty());

    // Paying by QRIS: fires.
    let qris = ctx().with_payment(PaymentMethod::Qris);
    let receipt = price_cart(&cart, &[qris_only], &qris)?;
    assert_eq!(receipt.total_discount, Money::from_minor(1_000, IDR));

    Ok(())
}

#[test]
fn fixture_cart_and_promotions_price_end_to_end() -> TestResult {
    let cart = sconto::fixtures::cart_from_yaml(
        r#"
currency: IDR
items:
  - product: p1
    category: food
    sku: sku-1
    name: Nasi Goreng
    quantity: 2
    price: 25000
  - product: p2
    category: drinks
    sku: sku-2
    name: Es Teh
    quantity: 3
    price: 8000
"#,
    )?;

    let promotions = sconto::fixtures::promotions_from_yaml(
        r#"
currency: IDR
promotions:
  - id: drinks-1000
    name: 1000 off drinks
    type: fixed
    value: 1000
    applicability: category
    target_id: drinks
"#,
    )?;

    // 1,000 off per unit × 3 drink units = 3,000 aggregate.
    let receipt = price_cart(&cart, &promotions, &ctx())?;

    assert_eq!(receipt.subtotal, Money::from_minor(74_000, IDR));
    assert_eq!(receipt.total_discount, Money::from_minor(3_000, IDR));
    assert_eq!(receipt.discounted_subtotal, Money::from_minor(71_000, IDR));

    let drinks = receipt.items.iter().find(|i| i.sku() == &Sku::from("sku-2"));
    assert_eq!(
        drinks.map(LineItem::unit_price),
        Some(Money::from_minor(7_000, IDR))
    );

    let food = receipt.items.iter().find(|i| i.sku() == &Sku::from("sku-1"));
    assert_eq!(food.map(|i| i.applied_promotions().len()), Some(0));

    Ok(())
}
