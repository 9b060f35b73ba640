//! Property-based tests for the costing service.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::costing::service::CostingService;
use crate::costing::types::{LineItem, VariationItem, VariationKind};

/// Strategy for small decimals (two fractional digits, either sign).
fn arb_decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_vat_rate() -> impl Strategy<Value = Decimal> {
    (0i64..30i64).prop_map(Decimal::from)
}

fn arb_kind() -> impl Strategy<Value = VariationKind> {
    prop_oneof![Just(VariationKind::Add), Just(VariationKind::Omit)]
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (arb_decimal(), arb_decimal(), "[a-z]{0,12}").prop_map(|(quantity, unit_price, description)| {
        LineItem {
            id: Uuid::new_v4(),
            description,
            quantity,
            unit: "ea".to_string(),
            unit_price,
            amount: Decimal::ZERO,
        }
    })
}

fn arb_variation_item() -> impl Strategy<Value = VariationItem> {
    (arb_decimal(), arb_decimal(), arb_kind()).prop_map(|(quantity, unit_price, kind)| {
        VariationItem {
            id: Uuid::new_v4(),
            description: String::new(),
            quantity,
            unit: "ea".to_string(),
            unit_price,
            amount: Decimal::ZERO,
            kind,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Recomputing totals from the same inputs yields identical results.
    #[test]
    fn prop_totals_idempotent(items in prop::collection::vec(arb_item(), 0..8), vat in arb_vat_rate()) {
        let first = CostingService::totals(&items, vat);
        let second = CostingService::totals(&items, vat);
        prop_assert_eq!(first, second);
    }

    /// Every normalized amount is exactly quantity * unit_price.
    #[test]
    fn prop_amount_is_product(mut items in prop::collection::vec(arb_item(), 0..8)) {
        CostingService::normalize_items(&mut items);
        for item in &items {
            prop_assert_eq!(item.amount, item.quantity * item.unit_price);
        }
    }

    /// Editing description or unit never changes the computed totals.
    #[test]
    fn prop_text_fields_do_not_affect_totals(
        mut items in prop::collection::vec(arb_item(), 1..8),
        vat in arb_vat_rate(),
        new_text in "[a-z]{1,16}",
    ) {
        let before = CostingService::totals(&items, vat);
        for item in &mut items {
            item.description.clone_from(&new_text);
            item.unit.clone_from(&new_text);
        }
        prop_assert_eq!(CostingService::totals(&items, vat), before);
    }

    /// total_amount always equals sub_total + vat_amount, and the VAT formula holds.
    #[test]
    fn prop_total_is_subtotal_plus_vat(items in prop::collection::vec(arb_item(), 0..8), vat in arb_vat_rate()) {
        let totals = CostingService::totals(&items, vat);
        prop_assert_eq!(totals.total_amount, totals.sub_total + totals.vat_amount);
        prop_assert_eq!(totals.vat_amount, totals.sub_total * vat / Decimal::ONE_HUNDRED);
    }

    /// A variation subtotal equals the signed sum of item products.
    #[test]
    fn prop_variation_subtotal_is_signed_sum(
        items in prop::collection::vec(arb_variation_item(), 0..8),
        vat in arb_vat_rate(),
    ) {
        let totals = CostingService::variation_totals(&items, vat);
        let expected: Decimal = items
            .iter()
            .map(|i| i.kind.sign() * i.quantity * i.unit_price)
            .sum();
        prop_assert_eq!(totals.sub_total, expected);
    }

    /// Flipping every item to omit negates the subtotal of an all-add order.
    #[test]
    fn prop_omit_mirrors_add(items in prop::collection::vec(arb_variation_item(), 0..8), vat in arb_vat_rate()) {
        let mut adds = items.clone();
        let mut omits = items;
        for i in &mut adds { i.kind = VariationKind::Add; }
        for i in &mut omits { i.kind = VariationKind::Omit; }
        let add_totals = CostingService::variation_totals(&adds, vat);
        let omit_totals = CostingService::variation_totals(&omits, vat);
        prop_assert_eq!(add_totals.sub_total, -omit_totals.sub_total);
    }
}
