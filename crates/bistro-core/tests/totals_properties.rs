//! Property-based tests for the totals engine.
//!
//! Run with: `cargo test -p bistro-core --test totals_properties`

use bistro_core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a menu price (0.00 to 9999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate a tax rate between 0% and 30% with two decimals.
fn arb_rate() -> impl Strategy<Value = TaxRate> {
    (0u32..3_000u32).prop_map(TaxRate::from_bps)
}

/// Generate a discount that is sometimes larger than the line it discounts.
fn arb_discount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        (0i64..2_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (1i64..50i64, arb_price(), arb_rate(), arb_discount()).prop_map(
        |(quantity, price, rate, discount)| {
            LineItem::new("Menu item", quantity, price)
                .with_tax_rate(rate)
                .with_discount(discount)
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_item(), 0..20)
}

fn arb_policy() -> impl Strategy<Value = TotalsPolicy> {
    prop_oneof![
        Just(TotalsPolicy::PerItem),
        (arb_discount(), arb_rate())
            .prop_map(|(discount, rate)| TotalsPolicy::order_level(discount, rate)),
    ]
}

fn tolerance(items: usize) -> Decimal {
    dec!(0.01) * Decimal::from(items.max(1) as u64)
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn grand_total_balances(items in arb_items(), policy in arb_policy()) {
        let totals = compute_order_totals(&items, &policy).unwrap();
        let expected = totals.subtotal - totals.total_discount + totals.total_tax;

        prop_assert!((totals.grand_total - expected).abs() <= tolerance(items.len()));
    }

    #[test]
    fn rounded_totals_balance_exactly(items in arb_items(), policy in arb_policy()) {
        let cents = compute_order_totals(&items, &policy).unwrap().to_cents().unwrap();

        prop_assert_eq!(
            cents.grand_total,
            cents.subtotal - cents.total_discount + cents.total_tax
        );
    }

    #[test]
    fn monetary_fields_are_never_negative(items in arb_items(), policy in arb_policy()) {
        let totals = compute_order_totals(&items, &policy).unwrap();

        prop_assert!(totals.subtotal >= Decimal::ZERO);
        prop_assert!(totals.total_discount >= Decimal::ZERO);
        prop_assert!(totals.total_tax >= Decimal::ZERO);
        prop_assert!(totals.grand_total >= Decimal::ZERO);
        prop_assert!(totals.total_discount <= totals.subtotal);

        for line in &totals.lines {
            prop_assert!(line.net >= Decimal::ZERO);
            prop_assert!(line.tax >= Decimal::ZERO);
            prop_assert_eq!(line.total, line.net + line.tax);
        }
    }

    #[test]
    fn fully_discounted_lines_pay_no_tax(item in arb_item()) {
        let oversized = Decimal::from(item.quantity) * item.unit_price + dec!(1);
        let item = item.with_discount(oversized);
        let line = compute_line_item(&item).unwrap();

        prop_assert!(line.discount_clamped);
        prop_assert!(line.net.is_zero());
        prop_assert!(line.tax.is_zero());
        prop_assert!(line.total.is_zero());
    }

    #[test]
    fn identical_inputs_give_identical_output(items in arb_items(), policy in arb_policy()) {
        let first = compute_order_totals(&items, &policy).unwrap();
        let second = compute_order_totals(&items, &policy).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn more_quantity_never_lowers_totals(
        items in prop::collection::vec(arb_item(), 1..10),
        policy in arb_policy(),
        pick in any::<prop::sample::Index>(),
        extra in 1i64..20i64,
    ) {
        let before = compute_order_totals(&items, &policy).unwrap();

        let mut bumped = items.clone();
        bumped[pick.index(items.len())].quantity += extra;
        let after = compute_order_totals(&bumped, &policy).unwrap();

        prop_assert!(after.subtotal >= before.subtotal);
        prop_assert!(after.grand_total >= before.grand_total);
    }

    #[test]
    fn summary_sums_its_orders(orders in prop::collection::vec(arb_items(), 0..8)) {
        let cents: Vec<CentTotals> = orders
            .iter()
            .map(|items| compute_invoice_totals(items).unwrap().to_cents().unwrap())
            .collect();

        let summary = SalesSummary::from_orders(&cents).unwrap();

        prop_assert_eq!(summary.order_count, cents.len() as u64);
        prop_assert_eq!(summary.net_sales, cents.iter().map(|c| c.grand_total).sum::<Money>());
        prop_assert_eq!(summary.gross_sales, cents.iter().map(|c| c.subtotal).sum::<Money>());
        prop_assert_eq!(
            summary.net_sales,
            summary.gross_sales - summary.discounts + summary.taxes
        );
    }
}

// ── Edge Cases ──────────────────────────────────────────────────────────────

#[test]
fn empty_list_is_zero_in_both_modes() {
    for policy in [
        TotalsPolicy::PerItem,
        TotalsPolicy::order_level(Decimal::ZERO, TaxRate::from_percent(dec!(10))),
    ] {
        let totals = compute_order_totals(&[], &policy).unwrap();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total_discount, Decimal::ZERO);
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }
}

#[test]
fn json_request_round_trip_through_engine() {
    let json = r#"[
        { "description": "Catering tray", "quantity": 2, "unitPrice": "100",
          "taxRatePercent": "6", "discount": "20" }
    ]"#;
    let items: Vec<LineItem> = serde_json::from_str(json).unwrap();

    let cents = compute_invoice_totals(&items).unwrap().to_cents().unwrap();

    assert_eq!(cents.subtotal, Money::from_cents(20000));
    assert_eq!(cents.total_discount, Money::from_cents(2000));
    assert_eq!(cents.total_tax, Money::from_cents(1080));
    assert_eq!(cents.grand_total, Money::from_cents(19080));
}

#[test]
fn validation_error_names_the_row() {
    let items = vec![
        LineItem::new("Soup", 1, dec!(4.50)),
        LineItem::new("   ", 1, dec!(4.50)),
    ];

    let err = compute_invoice_totals(&items).unwrap_err();
    assert_eq!(err.to_string(), "Line item 1: description is required");
}
