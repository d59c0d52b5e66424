//! # bistro-core: Order & Invoice Totals for the Bistro Back Office
//!
//! Every order ticket, invoice and dashboard figure in the back office is
//! computed here, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Web pages / API routes / bistro-cli (hosts)             │   │
//! │  │    Orders ──► Invoices ──► Dashboard ──► PDF/Sheet export      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data (serde)                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  totals   │  │  summary  │  │ validation│  │   │
//! │  │   │ LineItem  │  │ per-item  │  │ dashboard │  │   rules   │  │   │
//! │  │   │ Totals    │  │ order-lvl │  │   stats   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, policies and totals
//! - [`totals`] - The totals engine
//! - [`summary`] - Dashboard sales statistics
//! - [`money`] - Integer-cent Money for rounded values
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **No I/O**: files, env vars and logging setup belong to the host
//! 3. **Exact Decimals**: full precision inside, rounded to cents once at export
//! 4. **Explicit Errors**: bad input is rejected with the offending line index
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::{compute_invoice_totals, LineItem, TaxRate};
//! use rust_decimal::Decimal;
//!
//! let items = vec![LineItem::new("Catering tray", 2, Decimal::new(100, 0))
//!     .with_tax_rate(TaxRate::from_percent(Decimal::new(6, 0)))
//!     .with_discount(Decimal::new(20, 0))];
//!
//! let totals = compute_invoice_totals(&items).unwrap();
//! assert_eq!(totals.grand_total, Decimal::new(1908, 1)); // 190.8
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod summary;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use summary::SalesSummary;
pub use totals::{
    compute_invoice_totals, compute_line_item, compute_order_level_totals, compute_order_totals,
};
pub use types::*;
