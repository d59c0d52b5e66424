//! # Totals Engine
//!
//! Turns a list of line items into an order or invoice breakdown.
//!
//! ## Computation Order (fixed)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Per line item                                                          │
//! │                                                                         │
//! │  (1) gross = quantity × unit_price                                     │
//! │  (2) net   = gross − discount        clamped at 0, excess dropped      │
//! │  (3) tax   = net × tax_rate / 100    on the CLAMPED net                │
//! │  (4) total = net + tax                                                 │
//! │                                                                         │
//! │  Aggregate (full precision, no rounding)                               │
//! │                                                                         │
//! │  PerItem:    subtotal = Σ gross   discount = Σ applied                 │
//! │              tax      = Σ tax     grand    = Σ total                   │
//! │                                                                         │
//! │  OrderLevel: subtotal = Σ gross                                        │
//! │              discount = min(order_discount, subtotal)                  │
//! │              tax      = (subtotal − discount) × service_rate / 100     │
//! │              grand    = subtotal − discount + tax                      │
//! │                                                                         │
//! │  Balance check: |grand − (subtotal − discount + tax)| ≤ 0.01 × items   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens once, later, in [`OrderTotals::to_cents`].
//!
//! ## Usage
//! ```rust
//! use bistro_core::{compute_order_level_totals, LineItem, TaxRate};
//! use rust_decimal::Decimal;
//!
//! let items = vec![
//!     LineItem::new("Nasi goreng", 1, Decimal::new(50, 0)),
//!     LineItem::new("Teh ais", 3, Decimal::new(20, 0)),
//! ];
//! let totals = compute_order_level_totals(
//!     &items,
//!     Decimal::new(10, 0),
//!     TaxRate::from_percent(Decimal::new(10, 0)),
//! )
//! .unwrap();
//!
//! assert_eq!(totals.subtotal, Decimal::new(110, 0));
//! assert_eq!(totals.service_tax, Some(Decimal::new(10, 0)));
//! assert_eq!(totals.grand_total, Decimal::new(110, 0));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use crate::error::{CoreError, CoreResult};
use crate::types::{CalculationMode, LineItem, LineItemResult, OrderTotals, TaxRate, TotalsPolicy};
use crate::validation::{validate_line_item, validate_non_negative, validate_tax_rate};

// =============================================================================
// Line Items
// =============================================================================

/// Computes the breakdown of a single line item.
///
/// ## Errors
/// - `CoreError::Validation` if any field is out of range
/// - `CoreError::ArithmeticOverflow` for amounts beyond 28 significant digits
///
/// ## Example
/// ```rust
/// use bistro_core::{compute_line_item, LineItem, TaxRate};
/// use rust_decimal::Decimal;
///
/// let item = LineItem::new("Catering tray", 2, Decimal::new(100, 0))
///     .with_tax_rate(TaxRate::from_percent(Decimal::new(6, 0)))
///     .with_discount(Decimal::new(20, 0));
///
/// let line = compute_line_item(&item).unwrap();
/// assert_eq!(line.gross, Decimal::new(200, 0));
/// assert_eq!(line.net, Decimal::new(180, 0));
/// assert_eq!(line.tax, Decimal::new(108, 1));
/// assert_eq!(line.total, Decimal::new(1908, 1));
/// ```
pub fn compute_line_item(item: &LineItem) -> CoreResult<LineItemResult> {
    validate_line_item(item)?;

    let gross = gross_amount(item)?;

    let discount_clamped = item.discount > gross;
    let discount_applied = item.discount.min(gross);
    let net = gross - discount_applied;

    let tax = apply_rate(net, item.tax_rate, "line tax")?;
    let total = net
        .checked_add(tax)
        .ok_or_else(|| CoreError::overflow("line total"))?;

    if discount_clamped {
        debug!(
            description = %item.description,
            discount = %item.discount,
            gross = %gross,
            "Line discount exceeds gross amount, capped"
        );
    }

    Ok(LineItemResult {
        gross,
        discount_applied,
        discount_clamped,
        net,
        tax,
        total,
    })
}

// =============================================================================
// Orders & Invoices
// =============================================================================

/// Computes the aggregate totals for a list of items under a policy.
///
/// An empty list is valid and yields all-zero totals. The first invalid item
/// aborts the whole computation with `CoreError::InvalidLineItem`, carrying
/// its 0-based index.
pub fn compute_order_totals(items: &[LineItem], policy: &TotalsPolicy) -> CoreResult<OrderTotals> {
    debug!(items = items.len(), mode = ?policy.mode(), "Computing order totals");

    let totals = match policy {
        TotalsPolicy::PerItem => per_item_totals(items)?,
        TotalsPolicy::OrderLevel {
            order_discount,
            service_tax_rate,
        } => order_level_totals(items, *order_discount, *service_tax_rate)?,
    };

    check_balance(&totals)?;

    debug!(
        subtotal = %totals.subtotal,
        discount = %totals.total_discount,
        tax = %totals.total_tax,
        grand_total = %totals.grand_total,
        "Order totals computed"
    );

    Ok(totals)
}

/// Invoice convention: every item carries its own discount and tax rate.
pub fn compute_invoice_totals(items: &[LineItem]) -> CoreResult<OrderTotals> {
    compute_order_totals(items, &TotalsPolicy::PerItem)
}

/// Order convention: one discount, then a flat service tax on the remainder.
pub fn compute_order_level_totals(
    items: &[LineItem],
    order_discount: Decimal,
    service_tax_rate: TaxRate,
) -> CoreResult<OrderTotals> {
    compute_order_totals(items, &TotalsPolicy::order_level(order_discount, service_tax_rate))
}

fn per_item_totals(items: &[LineItem]) -> CoreResult<OrderTotals> {
    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;
    let mut grand_total = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        let line = compute_line_item(item).map_err(|e| e.at_line(index))?;

        subtotal = accumulate(subtotal, line.gross, "subtotal")?;
        total_discount = accumulate(total_discount, line.discount_applied, "total discount")?;
        total_tax = accumulate(total_tax, line.tax, "total tax")?;
        grand_total = accumulate(grand_total, line.total, "grand total")?;

        lines.push(line);
    }

    let clamped_lines = lines.iter().filter(|l| l.discount_clamped).count();
    if clamped_lines > 0 {
        warn!(clamped_lines, "Line discounts capped at their gross amounts");
    }

    Ok(OrderTotals {
        mode: CalculationMode::PerItem,
        item_count: items.len(),
        subtotal,
        total_discount,
        total_tax,
        service_tax: None,
        grand_total,
        discount_clamped: clamped_lines > 0,
        lines,
    })
}

fn order_level_totals(
    items: &[LineItem],
    order_discount: Decimal,
    service_tax_rate: TaxRate,
) -> CoreResult<OrderTotals> {
    validate_non_negative("order_discount", order_discount)?;
    validate_tax_rate("service_tax_rate", service_tax_rate)?;

    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        validate_line_item(item).map_err(|source| CoreError::InvalidLineItem { index, source })?;

        if !item.discount.is_zero() || !item.tax_rate.is_zero() {
            warn!(
                index,
                description = %item.description,
                "Per-item discount and tax are ignored in order-level mode"
            );
        }

        let gross = gross_amount(item)?;
        subtotal = accumulate(subtotal, gross, "subtotal")?;

        lines.push(LineItemResult {
            gross,
            discount_applied: Decimal::ZERO,
            discount_clamped: false,
            net: gross,
            tax: Decimal::ZERO,
            total: gross,
        });
    }

    let discount_clamped = order_discount > subtotal;
    let discount_applied = order_discount.min(subtotal);
    if discount_clamped {
        warn!(
            order_discount = %order_discount,
            subtotal = %subtotal,
            "Order discount exceeds subtotal, capped"
        );
    }

    let taxable = subtotal - discount_applied;
    let service_tax = apply_rate(taxable, service_tax_rate, "service tax")?;
    let grand_total = taxable
        .checked_add(service_tax)
        .ok_or_else(|| CoreError::overflow("grand total"))?;

    Ok(OrderTotals {
        mode: CalculationMode::OrderLevel,
        item_count: items.len(),
        subtotal,
        total_discount: discount_applied,
        total_tax: service_tax,
        service_tax: Some(service_tax),
        grand_total,
        discount_clamped,
        lines,
    })
}

// =============================================================================
// Arithmetic Helpers
// =============================================================================

fn gross_amount(item: &LineItem) -> CoreResult<Decimal> {
    Decimal::from(item.quantity)
        .checked_mul(item.unit_price)
        .ok_or_else(|| CoreError::overflow("gross amount"))
}

fn apply_rate(amount: Decimal, rate: TaxRate, context: &str) -> CoreResult<Decimal> {
    amount
        .checked_mul(rate.fraction())
        .ok_or_else(|| CoreError::overflow(context))
}

fn accumulate(acc: Decimal, value: Decimal, context: &str) -> CoreResult<Decimal> {
    acc.checked_add(value)
        .ok_or_else(|| CoreError::overflow(context))
}

/// Allowed drift: one cent per item, at least one cent.
fn balance_tolerance(item_count: usize) -> Decimal {
    Decimal::new(1, 2) * Decimal::from(item_count.max(1) as u64)
}

fn check_balance(totals: &OrderTotals) -> CoreResult<()> {
    let expected = totals
        .subtotal
        .checked_sub(totals.total_discount)
        .and_then(|d| d.checked_add(totals.total_tax))
        .ok_or_else(|| CoreError::overflow("balance check"))?;
    let tolerance = balance_tolerance(totals.item_count);

    if (totals.grand_total - expected).abs() > tolerance {
        error!(
            expected = %expected,
            actual = %totals.grand_total,
            tolerance = %tolerance,
            "Order totals out of balance"
        );
        return Err(CoreError::RoundingToleranceExceeded {
            expected,
            actual: totals.grand_total,
            tolerance,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
