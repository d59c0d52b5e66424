//! Output formatting for the CLI.
//!
//! ```text
//! Catering tray                  2 x 100.00      190.80
//! -----------------------------------------------------
//! Subtotal                                       200.00
//! Discount                                       -20.00
//! Tax                                             10.80
//! TOTAL                                         $190.80
//! ```

use std::fmt::Write;

use anyhow::Result;
use bistro_core::{CalculationMode, Money};

use crate::commands::{SummaryReport, TotalsReport};

const WIDTH: usize = 53;

/// Receipt-style rendering of one order or invoice.
pub fn receipt(report: &TotalsReport, symbol: &str) -> Result<String> {
    let mut out = String::new();

    for (item, line) in report.items.iter().zip(&report.totals.lines) {
        let unit = Money::from_decimal(item.unit_price)?;
        let total = Money::from_decimal(line.total)?;
        let qty = format!("{} x {}", item.quantity, unit.format_with(""));
        writeln!(out, "{:<30.30} {:>10} {:>11}", item.description, qty, total.format_with(""))?;

        if line.discount_clamped {
            writeln!(out, "  (discount capped at line amount)")?;
        }
    }

    let cents = &report.cents;
    writeln!(out, "{}", "-".repeat(WIDTH))?;
    row(&mut out, "Subtotal", cents.subtotal.format_with(""))?;
    if !cents.total_discount.is_zero() {
        row(&mut out, "Discount", format!("-{}", cents.total_discount.format_with("")))?;
    }
    match cents.mode {
        CalculationMode::PerItem => row(&mut out, "Tax", cents.total_tax.format_with(""))?,
        CalculationMode::OrderLevel => row(
            &mut out,
            "Service tax",
            cents.service_tax.unwrap_or_default().format_with(""),
        )?,
    }
    row(&mut out, "TOTAL", cents.grand_total.format_with(symbol))?;

    Ok(out)
}

/// Dashboard card rendering of a sales summary.
pub fn summary_card(report: &SummaryReport, symbol: &str) -> Result<String> {
    let summary = &report.summary;
    let mut out = String::new();

    row(&mut out, "Orders", summary.order_count.to_string())?;
    row(&mut out, "Gross sales", summary.gross_sales.format_with(symbol))?;
    row(&mut out, "Discounts", summary.discounts.format_with(symbol))?;
    row(&mut out, "Taxes", summary.taxes.format_with(symbol))?;
    row(&mut out, "Net sales", summary.net_sales.format_with(symbol))?;
    row(&mut out, "Avg. order", report.average_order_value.format_with(symbol))?;

    Ok(out)
}

fn row(out: &mut String, label: &str, value: String) -> std::fmt::Result {
    writeln!(out, "{:<20}{:>width$}", label, value, width = WIDTH - 20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{summarize, totals_report, SummaryRequest};
    use bistro_core::{LineItem, TaxRate, TotalsPolicy};
    use rust_decimal_macros::dec;

    #[test]
    fn test_invoice_receipt() {
        let report = totals_report(
            vec![LineItem::new("Catering tray", 2, dec!(100))
                .with_tax_rate(TaxRate::from_percent(dec!(6)))
                .with_discount(dec!(20))],
            &TotalsPolicy::PerItem,
        )
        .unwrap();

        let text = receipt(&report, "$").unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Catering tray"));
        assert!(lines[0].ends_with("190.80"));
        assert!(lines[0].contains("2 x 100.00"));
        assert!(text.contains("-20.00"));
        assert!(lines.last().unwrap().starts_with("TOTAL"));
        assert!(lines.last().unwrap().ends_with("$190.80"));
    }

    #[test]
    fn test_order_receipt_shows_service_tax() {
        let report = totals_report(
            vec![
                LineItem::new("Nasi goreng", 1, dec!(50)),
                LineItem::new("Teh ais", 3, dec!(20)),
            ],
            &TotalsPolicy::order_level(dec!(10), TaxRate::from_percent(dec!(10))),
        )
        .unwrap();

        let text = receipt(&report, "RM ").unwrap();

        assert!(text.lines().any(|l| l.starts_with("Service tax") && l.ends_with("10.00")));
        assert!(text.lines().last().unwrap().ends_with("RM 110.00"));
    }

    #[test]
    fn test_clamped_line_is_annotated() {
        let report = totals_report(
            vec![LineItem::new("Birthday cake", 1, dec!(30)).with_discount(dec!(45))],
            &TotalsPolicy::PerItem,
        )
        .unwrap();

        assert!(receipt(&report, "$").unwrap().contains("discount capped"));
    }

    #[test]
    fn test_summary_card() {
        let report = summarize(SummaryRequest { orders: Vec::new() }).unwrap();
        let text = summary_card(&report, "$").unwrap();

        assert!(text.lines().next().unwrap().ends_with('0'));
        assert!(text.lines().last().unwrap().ends_with("$0.00"));
    }
}
