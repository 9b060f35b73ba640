//! Project budget reconciliation.
//!
//! A project's financial envelope is never written back to the project row;
//! it is re-derived on every observation from the declared budget and the set
//! of approved documents. Only `approved` documents contribute; draft,
//! pending, and rejected documents count for nothing.
//!
//! # Modules
//!
//! - `types` - Approved totals and the budget summary
//! - `service` - The `reconcile` reducer

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::BudgetService;
pub use types::{ApprovedTotals, BudgetSummary, DocumentFinancials};
