//! # Domain Types
//!
//! Data that flows into and out of the totals engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │   INPUT                          OUTPUT                                 │
//! │  ┌─────────────────┐            ┌─────────────────┐                    │
//! │  │    LineItem     │──compute──►│ LineItemResult  │  (one per item)    │
//! │  │  ─────────────  │            │  gross / net    │                    │
//! │  │  description    │            │  tax / total    │                    │
//! │  │  quantity       │            └────────┬────────┘                    │
//! │  │  unit_price     │                     │ aggregate                   │
//! │  │  tax_rate       │            ┌────────▼────────┐   to_cents()      │
//! │  │  discount       │            │   OrderTotals   │─────────────┐      │
//! │  └─────────────────┘            │ (full precision)│             │      │
//! │  ┌─────────────────┐            └─────────────────┘    ┌────────▼────┐ │
//! │  │  TotalsPolicy   │                                   │ CentTotals  │ │
//! │  │  PerItem        │                                   │ (Money)     │ │
//! │  │  OrderLevel     │                                   └─────────────┘ │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every monetary input is a `Decimal`. JSON carries decimals as strings
//! (`"unitPrice": "12.50"`); integers are accepted too.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage (`6` = 6%, `8.25` = 8.25%).
///
/// ## Why a Percentage, Not Basis Points?
/// Back-office staff type rates the way they appear on tax notices. A
/// `Decimal` keeps rates like 6.125% exact; `from_bps` remains for callers
/// that store rates as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Creates a tax rate from basis points (825 = 8.25%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(bps as i64, 2))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the multiplier to apply to an amount (6% → 0.06).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced, quantified entry on an order or invoice.
///
/// Built transiently from form input or a menu lookup and passed once through
/// the engine. Never mutated after totals are computed: an edit rebuilds the
/// whole item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item or service name, non-empty.
    pub description: String,

    /// Whole units ordered, at least 1.
    #[ts(type = "number")]
    pub quantity: i64,

    /// Price of one unit, non-negative.
    #[ts(as = "String")]
    pub unit_price: Decimal,

    /// Per-item tax rate in percent. Only used in per-item mode.
    #[serde(default, rename = "taxRatePercent")]
    #[ts(as = "String")]
    pub tax_rate: TaxRate,

    /// Absolute discount on this line (not a percentage). Only used in
    /// per-item mode.
    #[serde(default)]
    #[ts(as = "String")]
    pub discount: Decimal,
}

impl LineItem {
    /// Creates an item with no tax and no discount.
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            tax_rate: TaxRate::zero(),
            discount: Decimal::ZERO,
        }
    }

    /// Sets the per-item tax rate.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Sets the per-item absolute discount.
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }
}

/// Full-precision breakdown of one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResult {
    /// quantity × unit price.
    #[ts(as = "String")]
    pub gross: Decimal,

    /// Discount actually subtracted, at most `gross`.
    #[ts(as = "String")]
    pub discount_applied: Decimal,

    /// True when the requested discount exceeded the gross amount.
    pub discount_clamped: bool,

    /// gross − discount_applied, never negative.
    #[ts(as = "String")]
    pub net: Decimal,

    /// Tax on the clamped net amount.
    #[ts(as = "String")]
    pub tax: Decimal,

    /// net + tax.
    #[ts(as = "String")]
    pub total: Decimal,
}

// =============================================================================
// Calculation Policy
// =============================================================================

/// How discounts and taxes are applied to a list of line items.
///
/// ## Two Conventions
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PerItem (invoices)                OrderLevel (orders)                  │
/// │  ──────────────────                ───────────────────                  │
/// │  each line: own discount, own tax  lines: price × qty only              │
/// │  totals = Σ per-line results       subtotal − one discount              │
/// │                                    + flat service tax on the remainder  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TotalsPolicy {
    /// Each line carries its own discount and tax rate.
    #[default]
    PerItem,

    /// One discount and one service tax rate for the whole order.
    OrderLevel {
        /// Absolute discount subtracted from the subtotal.
        #[serde(default)]
        #[ts(as = "String")]
        order_discount: Decimal,

        /// Service tax in percent, applied after the discount.
        #[serde(default)]
        #[ts(as = "String")]
        service_tax_rate: TaxRate,
    },
}

impl TotalsPolicy {
    /// Order-level policy with the given discount and service tax rate.
    pub fn order_level(order_discount: Decimal, service_tax_rate: TaxRate) -> Self {
        TotalsPolicy::OrderLevel {
            order_discount,
            service_tax_rate,
        }
    }

    /// The mode tag recorded on the resulting totals.
    pub fn mode(&self) -> CalculationMode {
        match self {
            TotalsPolicy::PerItem => CalculationMode::PerItem,
            TotalsPolicy::OrderLevel { .. } => CalculationMode::OrderLevel,
        }
    }
}

/// Which convention produced a set of totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    PerItem,
    OrderLevel,
}

// =============================================================================
// Order Totals
// =============================================================================

/// Full-precision aggregate for an order or invoice.
///
/// ## Invariant
/// `grand_total == subtotal - total_discount + total_tax`
///
/// `total_discount` is the discount actually applied after clamping, so the
/// invariant holds even when a discount was larger than what it discounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub mode: CalculationMode,

    #[ts(type = "number")]
    pub item_count: usize,

    /// Σ gross.
    #[ts(as = "String")]
    pub subtotal: Decimal,

    /// Discount actually applied.
    #[ts(as = "String")]
    pub total_discount: Decimal,

    /// Σ per-item tax, or the service tax in order-level mode.
    #[ts(as = "String")]
    pub total_tax: Decimal,

    /// Present only in order-level mode.
    #[ts(as = "Option<String>")]
    pub service_tax: Option<Decimal>,

    #[ts(as = "String")]
    pub grand_total: Decimal,

    /// True when any discount had to be capped.
    pub discount_clamped: bool,

    /// Per-line breakdown, in input order.
    pub lines: Vec<LineItemResult>,
}

impl OrderTotals {
    /// Rounds the aggregate once, to cents, for persistence and export.
    ///
    /// `grand_total` is derived from the rounded components so that a
    /// printed invoice always adds up. It can differ by a cent from rounding
    /// the full-precision grand total directly.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::{compute_invoice_totals, LineItem, TaxRate};
    /// use rust_decimal::Decimal;
    ///
    /// let items = vec![LineItem::new("Nasi lemak", 2, Decimal::new(100, 0))
    ///     .with_tax_rate(TaxRate::from_percent(Decimal::new(6, 0)))
    ///     .with_discount(Decimal::new(20, 0))];
    ///
    /// let cents = compute_invoice_totals(&items).unwrap().to_cents().unwrap();
    /// assert_eq!(cents.grand_total.cents(), 19080);
    /// ```
    pub fn to_cents(&self) -> CoreResult<CentTotals> {
        let subtotal = Money::from_decimal(self.subtotal)?;
        let total_discount = Money::from_decimal(self.total_discount)?;
        let total_tax = Money::from_decimal(self.total_tax)?;
        let service_tax = self.service_tax.map(Money::from_decimal).transpose()?;
        let grand_total = subtotal.checked_sub(total_discount)?.checked_add(total_tax)?;

        Ok(CentTotals {
            mode: self.mode,
            item_count: self.item_count,
            subtotal,
            total_discount,
            total_tax,
            service_tax,
            grand_total,
        })
    }
}

/// Totals rounded to cents, as attached to a persisted order or invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CentTotals {
    pub mode: CalculationMode,
    #[ts(type = "number")]
    pub item_count: usize,
    pub subtotal: Money,
    pub total_discount: Money,
    pub total_tax: Money,
    pub service_tax: Option<Money>,
    pub grand_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
