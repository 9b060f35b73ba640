//! The budget reconciliation reducer.

use rust_decimal::Decimal;

use crate::budget::types::{ApprovedTotals, BudgetSummary, DocumentFinancials};

/// Stateless budget reconciliation service.
pub struct BudgetService;

impl BudgetService {
    /// Sums the totals of approved documents, treating a missing total as
    /// zero. Draft, pending, and rejected documents contribute nothing.
    #[must_use]
    pub fn approved_total<I>(documents: I) -> Decimal
    where
        I: IntoIterator<Item = DocumentFinancials>,
    {
        documents
            .into_iter()
            .filter(|d| d.status.counts_toward_budget())
            .map(|d| d.total_amount.unwrap_or(Decimal::ZERO))
            .sum()
    }

    /// Computes the live budget figures for one project.
    ///
    /// ```text
    /// net_budget       = budget + approved_vo_total
    /// total_used       = approved_po_total + approved_wc_total
    /// available_budget = net_budget - total_used
    /// used_percentage  = net_budget > 0 ? total_used / net_budget * 100 : 0
    /// is_over_budget   = used_percentage > 100
    /// ```
    ///
    /// `net_budget <= 0` forces `used_percentage` to 0 rather than a division
    /// error or an unbounded ratio.
    #[must_use]
    pub fn reconcile(budget: Decimal, approved: &ApprovedTotals) -> BudgetSummary {
        let net_budget = budget + approved.variation_orders;
        let total_used = approved.purchase_orders + approved.work_contracts;
        let available_budget = net_budget - total_used;

        let used_percentage = if net_budget > Decimal::ZERO {
            total_used / net_budget * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        BudgetSummary {
            budget,
            approved_vo_total: approved.variation_orders,
            approved_po_total: approved.purchase_orders,
            approved_wc_total: approved.work_contracts,
            net_budget,
            total_used,
            available_budget,
            used_percentage,
            is_over_budget: used_percentage > Decimal::ONE_HUNDRED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::DocumentStatus;
    use rust_decimal_macros::dec;

    fn doc(status: DocumentStatus, total: Decimal) -> DocumentFinancials {
        DocumentFinancials {
            status,
            total_amount: Some(total),
        }
    }

    #[test]
    fn test_reconciliation_example() {
        // budget 1,000,000, vo -50,000, po 300,000, wc 400,000
        let summary = BudgetService::reconcile(
            dec!(1000000),
            &ApprovedTotals {
                variation_orders: dec!(-50000),
                purchase_orders: dec!(300000),
                work_contracts: dec!(400000),
            },
        );
        assert_eq!(summary.net_budget, dec!(950000));
        assert_eq!(summary.total_used, dec!(700000));
        assert_eq!(summary.available_budget, dec!(250000));
        // 700000 / 950000 * 100 ≈ 73.68%
        assert_eq!(summary.used_percentage.round_dp(2), dec!(73.68));
        assert!(!summary.is_over_budget);
    }

    #[test]
    fn test_over_budget_boundary() {
        let summary = BudgetService::reconcile(
            dec!(100000),
            &ApprovedTotals {
                variation_orders: Decimal::ZERO,
                purchase_orders: dec!(80000),
                work_contracts: dec!(30000),
            },
        );
        assert!(summary.is_over_budget);
        assert_eq!(summary.available_budget, dec!(-10000));
        assert!(summary.used_percentage > Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_exactly_full_budget_is_not_over() {
        let summary = BudgetService::reconcile(
            dec!(100000),
            &ApprovedTotals {
                variation_orders: Decimal::ZERO,
                purchase_orders: dec!(100000),
                work_contracts: Decimal::ZERO,
            },
        );
        assert_eq!(summary.used_percentage, Decimal::ONE_HUNDRED);
        assert!(!summary.is_over_budget);
        assert_eq!(summary.available_budget, Decimal::ZERO);
    }

    #[test]
    fn test_zero_net_budget_guard() {
        let summary = BudgetService::reconcile(
            Decimal::ZERO,
            &ApprovedTotals {
                variation_orders: Decimal::ZERO,
                purchase_orders: dec!(5000),
                work_contracts: Decimal::ZERO,
            },
        );
        assert_eq!(summary.used_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_negative_net_budget_guard() {
        // A deeply budget-reducing VO can push net below zero.
        let summary = BudgetService::reconcile(
            dec!(10000),
            &ApprovedTotals {
                variation_orders: dec!(-60000),
                purchase_orders: dec!(5000),
                work_contracts: Decimal::ZERO,
            },
        );
        assert_eq!(summary.net_budget, dec!(-50000));
        assert_eq!(summary.used_percentage, Decimal::ZERO);
        assert!(!summary.is_over_budget);
    }

    #[test]
    fn test_only_approved_documents_contribute() {
        let total = BudgetService::approved_total([
            doc(DocumentStatus::Approved, dec!(100)),
            doc(DocumentStatus::Draft, dec!(1000)),
            doc(DocumentStatus::Pending, dec!(1000)),
            doc(DocumentStatus::Rejected, dec!(1000)),
            doc(DocumentStatus::Approved, dec!(50)),
        ]);
        assert_eq!(total, dec!(150));
    }

    #[test]
    fn test_missing_total_counts_as_zero() {
        let total = BudgetService::approved_total([
            DocumentFinancials {
                status: DocumentStatus::Approved,
                total_amount: None,
            },
            doc(DocumentStatus::Approved, dec!(75)),
        ]);
        assert_eq!(total, dec!(75));
    }

    #[test]
    fn test_reconcile_is_pure() {
        let totals = ApprovedTotals {
            variation_orders: dec!(-1),
            purchase_orders: dec!(2),
            work_contracts: dec!(3),
        };
        assert_eq!(
            BudgetService::reconcile(dec!(10), &totals),
            BudgetService::reconcile(dec!(10), &totals)
        );
    }
}
