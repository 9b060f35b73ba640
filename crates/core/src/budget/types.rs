//! Budget reconciliation types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::DocumentStatus;

/// The status and total of one document, as seen by the aggregator.
///
/// `total_amount` is optional because a malformed document missing its total
/// is tolerated and counted as zero, not surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFinancials {
    /// Lifecycle status of the document.
    pub status: DocumentStatus,
    /// VAT-inclusive total, if present.
    pub total_amount: Option<Decimal>,
}

/// Per-type sums of approved document totals for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTotals {
    /// Σ total_amount over approved variation orders (signed; may be negative).
    pub variation_orders: Decimal,
    /// Σ total_amount over approved purchase orders.
    pub purchase_orders: Decimal,
    /// Σ total_amount over approved work contracts.
    pub work_contracts: Decimal,
}

/// Live budget figures for one project.
///
/// Derived values only; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// The project's declared initial budget.
    pub budget: Decimal,
    /// Σ approved VO totals (signed).
    pub approved_vo_total: Decimal,
    /// Σ approved PO totals.
    pub approved_po_total: Decimal,
    /// Σ approved WC totals.
    pub approved_wc_total: Decimal,
    /// `budget + approved_vo_total`.
    pub net_budget: Decimal,
    /// `approved_po_total + approved_wc_total`.
    pub total_used: Decimal,
    /// `net_budget - total_used`; may be negative.
    pub available_budget: Decimal,
    /// `total_used / net_budget * 100`, or 0 when `net_budget <= 0`.
    pub used_percentage: Decimal,
    /// `used_percentage > 100`.
    pub is_over_budget: bool,
}
