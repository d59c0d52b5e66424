//! # Sales Summary
//!
//! Dashboard statistics over finished orders and invoices.
//!
//! The dashboard never recomputes totals from line items. It folds the
//! cent-rounded [`CentTotals`] that were attached to each persisted record,
//! so the figures match what customers were actually charged.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Orders today                          Dashboard card                   │
//! │  ────────────                          ──────────────                   │
//! │  #1  subtotal 110.00  grand 110.00     Orders            2             │
//! │  #2  subtotal 200.00  grand 190.80 ──► Gross sales       310.00         │
//! │                                        Discounts          30.00         │
//! │                                        Taxes              20.80         │
//! │                                        Net sales         300.80         │
//! │                                        Avg. order        150.40         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::CentTotals;

/// Aggregated sales figures for a set of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Number of orders folded in.
    #[ts(type = "number")]
    pub order_count: u64,

    /// Σ subtotal (before discounts and taxes).
    pub gross_sales: Money,

    /// Σ discount applied.
    pub discounts: Money,

    /// Σ tax, per-item and service tax alike.
    pub taxes: Money,

    /// Σ grand total, what was actually charged.
    pub net_sales: Money,
}

impl SalesSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        SalesSummary::default()
    }

    /// Builds a summary over rounded totals.
    ///
    /// ## Errors
    /// `CoreError::ArithmeticOverflow` if any running sum leaves the i64 range.
    pub fn from_orders<'a, I>(orders: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a CentTotals>,
    {
        let mut summary = SalesSummary::new();
        for order in orders {
            summary.record(order)?;
        }
        Ok(summary)
    }

    /// Folds one more order into the summary.
    ///
    /// On overflow the summary is left unchanged.
    pub fn record(&mut self, order: &CentTotals) -> CoreResult<()> {
        let gross_sales = self.gross_sales.checked_add(order.subtotal)?;
        let discounts = self.discounts.checked_add(order.total_discount)?;
        let taxes = self.taxes.checked_add(order.total_tax)?;
        let net_sales = self.net_sales.checked_add(order.grand_total)?;

        self.order_count += 1;
        self.gross_sales = gross_sales;
        self.discounts = discounts;
        self.taxes = taxes;
        self.net_sales = net_sales;
        Ok(())
    }

    /// Net sales per order, rounded half away from zero. Zero with no orders.
    pub fn average_order_value(&self) -> Money {
        self.net_sales.average_over(self.order_count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::CalculationMode;

    fn order(subtotal: i64, discount: i64, tax: i64) -> CentTotals {
        CentTotals {
            mode: CalculationMode::PerItem,
            item_count: 1,
            subtotal: Money::from_cents(subtotal),
            total_discount: Money::from_cents(discount),
            total_tax: Money::from_cents(tax),
            service_tax: None,
            grand_total: Money::from_cents(subtotal - discount + tax),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = SalesSummary::from_orders(&Vec::<CentTotals>::new()).unwrap();
        assert_eq!(summary.order_count, 0);
        assert!(summary.net_sales.is_zero());
        assert_eq!(summary.average_order_value(), Money::zero());
    }

    #[test]
    fn test_summary_matches_dashboard_card() {
        let orders = vec![order(11000, 1000, 1000), order(20000, 2000, 1080)];
        let summary = SalesSummary::from_orders(&orders).unwrap();

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.gross_sales.cents(), 31000);
        assert_eq!(summary.discounts.cents(), 3000);
        assert_eq!(summary.taxes.cents(), 2080);
        assert_eq!(summary.net_sales.cents(), 30080);
        assert_eq!(summary.average_order_value().cents(), 15040);
    }

    #[test]
    fn test_record_and_collect_agree() {
        let orders = vec![order(999, 0, 60), order(1, 0, 0), order(500, 500, 0)];

        let mut incremental = SalesSummary::new();
        for o in &orders {
            incremental.record(o).unwrap();
        }
        let collected = SalesSummary::from_orders(orders.iter()).unwrap();

        assert_eq!(incremental, collected);
        assert_eq!(collected.net_sales.cents(), 1060);
        assert_eq!(collected.average_order_value().cents(), 353);
    }

    #[test]
    fn test_record_overflow_leaves_summary_unchanged() {
        let mut summary = SalesSummary::new();
        summary.record(&order(i64::MAX - 10, 0, 0)).unwrap();
        let before = summary.clone();

        let err = summary.record(&order(100, 0, 0)).unwrap_err();
        assert!(matches!(err, CoreError::ArithmeticOverflow { .. }));
        assert_eq!(summary, before);

        let err = SalesSummary::from_orders(&[order(i64::MAX, 0, 0), order(1, 0, 0)]).unwrap_err();
        assert!(matches!(err, CoreError::ArithmeticOverflow { .. }));
    }
}
