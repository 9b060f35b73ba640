//! Property-based tests for budget reconciliation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::budget::service::BudgetService;
use crate::budget::types::{ApprovedTotals, DocumentFinancials};
use crate::lifecycle::DocumentStatus;

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Draft),
        Just(DocumentStatus::Pending),
        Just(DocumentStatus::Approved),
        Just(DocumentStatus::Rejected),
    ]
}

fn arb_doc() -> impl Strategy<Value = DocumentFinancials> {
    (arb_status(), prop::option::of(arb_amount())).prop_map(|(status, total_amount)| {
        DocumentFinancials {
            status,
            total_amount,
        }
    })
}

fn arb_totals() -> impl Strategy<Value = ApprovedTotals> {
    (arb_amount(), arb_amount(), arb_amount()).prop_map(|(vo, po, wc)| ApprovedTotals {
        variation_orders: vo,
        purchase_orders: po,
        work_contracts: wc,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The four derived identities hold for any inputs.
    #[test]
    fn prop_reconcile_identities(budget in arb_amount(), totals in arb_totals()) {
        let s = BudgetService::reconcile(budget, &totals);
        prop_assert_eq!(s.net_budget, budget + totals.variation_orders);
        prop_assert_eq!(s.total_used, totals.purchase_orders + totals.work_contracts);
        prop_assert_eq!(s.available_budget, s.net_budget - s.total_used);
        prop_assert_eq!(s.is_over_budget, s.used_percentage > Decimal::ONE_HUNDRED);
    }

    /// used_percentage is zero exactly when net_budget is not positive.
    #[test]
    fn prop_zero_guard(budget in arb_amount(), totals in arb_totals()) {
        let s = BudgetService::reconcile(budget, &totals);
        if s.net_budget <= Decimal::ZERO {
            prop_assert_eq!(s.used_percentage, Decimal::ZERO);
        } else {
            prop_assert_eq!(
                s.used_percentage,
                s.total_used / s.net_budget * Decimal::ONE_HUNDRED
            );
        }
    }

    /// With a positive net budget, over-budget coincides with negative
    /// availability.
    #[test]
    fn prop_over_budget_means_negative_available(budget in arb_amount(), totals in arb_totals()) {
        let s = BudgetService::reconcile(budget, &totals);
        if s.net_budget > Decimal::ZERO {
            prop_assert_eq!(s.is_over_budget, s.available_budget < Decimal::ZERO);
        }
    }

    /// Non-approved documents never move the aggregate.
    #[test]
    fn prop_only_approved_contribute(docs in prop::collection::vec(arb_doc(), 0..20)) {
        let total = BudgetService::approved_total(docs.iter().copied());
        let approved_only = BudgetService::approved_total(
            docs.iter()
                .copied()
                .filter(|d| d.status == DocumentStatus::Approved),
        );
        prop_assert_eq!(total, approved_only);
    }

    /// Adding a non-approved document to any set leaves the total unchanged.
    #[test]
    fn prop_non_approved_is_identity(
        docs in prop::collection::vec(arb_doc(), 0..20),
        extra_total in prop::option::of(arb_amount()),
        status in prop_oneof![
            Just(DocumentStatus::Draft),
            Just(DocumentStatus::Pending),
            Just(DocumentStatus::Rejected),
        ],
    ) {
        let base = BudgetService::approved_total(docs.iter().copied());
        let mut extended = docs;
        extended.push(DocumentFinancials { status, total_amount: extra_total });
        prop_assert_eq!(BudgetService::approved_total(extended), base);
    }
}
