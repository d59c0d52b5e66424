//! Subcommand implementations.
//!
//! Each command reads a JSON request, hands plain data to `bistro-core`
//! and returns a report. Rendering lives in `output`.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use bistro_core::{
    compute_order_totals, CentTotals, LineItem, Money, OrderTotals, SalesSummary, TaxRate,
    TotalsPolicy,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// `{ "items": [...] }`, as posted by the order and invoice pages.
#[derive(Debug, Deserialize)]
pub struct ItemsRequest {
    pub items: Vec<LineItem>,
}

/// One order inside a summary batch. The policy defaults to per-item.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub policy: TotalsPolicy,
}

/// `{ "orders": [...] }` for the dashboard summary.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub orders: Vec<OrderRequest>,
}

/// Totals for one order or invoice, full precision and rounded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport {
    #[serde(skip)]
    pub items: Vec<LineItem>,
    pub totals: OrderTotals,
    pub cents: CentTotals,
}

/// Dashboard figures for a batch of orders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: SalesSummary,
    pub average_order_value: Money,
}

/// Per-item (invoice) totals.
pub fn invoice(file: &Path) -> Result<TotalsReport> {
    let request: ItemsRequest = read_json(file)?;
    totals_report(request.items, &TotalsPolicy::PerItem)
}

/// Order-level totals with one discount and a flat service tax.
pub fn order(file: &Path, discount: Decimal, service_tax_rate: TaxRate) -> Result<TotalsReport> {
    let request: ItemsRequest = read_json(file)?;
    totals_report(
        request.items,
        &TotalsPolicy::order_level(discount, service_tax_rate),
    )
}

/// Sales summary over a batch of orders.
pub fn summary(file: &Path) -> Result<SummaryReport> {
    let request: SummaryRequest = read_json(file)?;
    summarize(request)
}

pub fn summarize(request: SummaryRequest) -> Result<SummaryReport> {
    let mut summary = SalesSummary::new();

    for (index, order) in request.orders.into_iter().enumerate() {
        let report = totals_report(order.items, &order.policy)
            .with_context(|| format!("Order {index} could not be totalled"))?;
        summary
            .record(&report.cents)
            .with_context(|| format!("Order {index} does not fit in the summary"))?;
    }

    info!(orders = summary.order_count, net_sales = %summary.net_sales, "Summary computed");

    Ok(SummaryReport {
        average_order_value: summary.average_order_value(),
        summary,
    })
}

pub fn totals_report(items: Vec<LineItem>, policy: &TotalsPolicy) -> Result<TotalsReport> {
    let totals = compute_order_totals(&items, policy)?;
    let cents = totals.to_cents()?;

    debug!(mode = ?cents.mode, grand_total = %cents.grand_total, "Totals computed");

    Ok(TotalsReport {
        items,
        totals,
        cents,
    })
}

/// Reads and parses a JSON request. `-` reads standard input.
fn read_json<T: DeserializeOwned>(file: &Path) -> Result<T> {
    let raw = if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("Invalid request in {}", file.display()))
}
