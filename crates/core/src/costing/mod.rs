//! Line-item costing for procurement documents.
//!
//! Every document total is derived the same way: per-item
//! `amount = quantity * unit_price`, a document subtotal, VAT on the subtotal,
//! and a VAT-inclusive total. Variation orders use signed items (add/omit) and
//! their subtotal may be negative.
//!
//! # Modules
//!
//! - `types` - Line item and totals types
//! - `service` - The costing calculations

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::{CostingService, default_vat_rate};
pub use types::{DocumentTotals, LineItem, VariationItem, VariationKind, decimal_or_zero};
