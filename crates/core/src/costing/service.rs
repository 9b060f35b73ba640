//! Document costing calculations.
//!
//! Pure functions of the item list and VAT rate; no hidden state, so
//! recomputing from the same inputs always yields identical totals.

use rust_decimal::Decimal;

use crate::costing::types::{DocumentTotals, LineItem, VariationItem};

/// Default VAT rate as a whole-number percentage (7 means 7%).
#[must_use]
pub fn default_vat_rate() -> Decimal {
    Decimal::from(7)
}

/// Stateless costing service.
pub struct CostingService;

impl CostingService {
    /// Derived amount for one item: `quantity * unit_price`.
    ///
    /// No clamping: negative, zero, and fractional factors pass through.
    #[must_use]
    pub fn line_amount(quantity: Decimal, unit_price: Decimal) -> Decimal {
        quantity * unit_price
    }

    /// Recomputes every item's derived `amount` in place.
    ///
    /// Edits to `description` or `unit` never change `amount`; only the two
    /// numeric factors feed the product.
    pub fn normalize_items(items: &mut [LineItem]) {
        for item in items {
            item.amount = Self::line_amount(item.quantity, item.unit_price);
        }
    }

    /// Recomputes every variation item's derived `amount` in place.
    ///
    /// The stored amount stays unsigned; the add/omit sign is applied only
    /// when summing the subtotal.
    pub fn normalize_variation_items(items: &mut [VariationItem]) {
        for item in items {
            item.amount = Self::line_amount(item.quantity, item.unit_price);
        }
    }

    /// Totals for a purchase order or work contract.
    ///
    /// `sub_total = Σ amount`, `vat_amount = sub_total * vat_rate / 100`,
    /// `total_amount = sub_total + vat_amount`. Item amounts are re-derived
    /// from their factors, so a stale `amount` on input cannot leak into the
    /// totals.
    #[must_use]
    pub fn totals(items: &[LineItem], vat_rate: Decimal) -> DocumentTotals {
        let sub_total = items
            .iter()
            .map(|i| Self::line_amount(i.quantity, i.unit_price))
            .sum();
        Self::from_sub_total(sub_total, vat_rate)
    }

    /// Totals for a variation order with signed items.
    ///
    /// `sub_total = Σ (add ? amount : -amount)`; the subtotal, VAT, and total
    /// may all be negative for a net budget-reducing variation.
    #[must_use]
    pub fn variation_totals(items: &[VariationItem], vat_rate: Decimal) -> DocumentTotals {
        let sub_total = items
            .iter()
            .map(|i| i.kind.sign() * Self::line_amount(i.quantity, i.unit_price))
            .sum();
        Self::from_sub_total(sub_total, vat_rate)
    }

    fn from_sub_total(sub_total: Decimal, vat_rate: Decimal) -> DocumentTotals {
        let vat_amount = sub_total * vat_rate / Decimal::ONE_HUNDRED;
        DocumentTotals {
            sub_total,
            vat_amount,
            total_amount: sub_total + vat_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::types::VariationKind;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn item(quantity: Decimal, unit_price: Decimal) -> LineItem {
        LineItem {
            id: Uuid::new_v4(),
            description: "item".to_string(),
            quantity,
            unit: "ea".to_string(),
            unit_price,
            amount: Decimal::ZERO,
        }
    }

    fn variation(quantity: Decimal, unit_price: Decimal, kind: VariationKind) -> VariationItem {
        VariationItem {
            id: Uuid::new_v4(),
            description: "variation".to_string(),
            quantity,
            unit: "ea".to_string(),
            unit_price,
            amount: Decimal::ZERO,
            kind,
        }
    }

    #[test]
    fn test_po_subtotal_vat_total() {
        // [{qty:2,price:50},{qty:1,price:25}] -> 125 / 8.75 / 133.75 at 7%
        let items = vec![item(dec!(2), dec!(50)), item(dec!(1), dec!(25))];
        let totals = CostingService::totals(&items, dec!(7));
        assert_eq!(totals.sub_total, dec!(125));
        assert_eq!(totals.vat_amount, dec!(8.75));
        assert_eq!(totals.total_amount, dec!(133.75));
    }

    #[test]
    fn test_signed_vo_subtotal() {
        // [{amount:100,add},{amount:40,omit}] -> 60 / 4.2 / 64.2 at 7%
        let items = vec![
            variation(dec!(1), dec!(100), VariationKind::Add),
            variation(dec!(1), dec!(40), VariationKind::Omit),
        ];
        let totals = CostingService::variation_totals(&items, dec!(7));
        assert_eq!(totals.sub_total, dec!(60));
        assert_eq!(totals.vat_amount, dec!(4.2));
        assert_eq!(totals.total_amount, dec!(64.2));
    }

    #[test]
    fn test_all_omit_vo_is_negative() {
        let items = vec![variation(dec!(2), dec!(500), VariationKind::Omit)];
        let totals = CostingService::variation_totals(&items, dec!(7));
        assert_eq!(totals.sub_total, dec!(-1000));
        assert_eq!(totals.vat_amount, dec!(-70));
        assert_eq!(totals.total_amount, dec!(-1070));
    }

    #[test]
    fn test_normalize_recomputes_amounts() {
        let mut items = vec![item(dec!(3), dec!(1.5))];
        items[0].amount = dec!(999); // stale value must be overwritten
        CostingService::normalize_items(&mut items);
        assert_eq!(items[0].amount, dec!(4.5));
    }

    #[test]
    fn test_stale_amount_does_not_leak_into_totals() {
        let mut items = vec![item(dec!(2), dec!(10))];
        items[0].amount = dec!(12345);
        let totals = CostingService::totals(&items, dec!(7));
        assert_eq!(totals.sub_total, dec!(20));
    }

    #[test]
    fn test_fractional_and_negative_inputs_pass_through() {
        let items = vec![item(dec!(0.5), dec!(-8))];
        let totals = CostingService::totals(&items, dec!(0));
        assert_eq!(totals.sub_total, dec!(-4));
        assert_eq!(totals.vat_amount, Decimal::ZERO);
        assert_eq!(totals.total_amount, dec!(-4));
    }

    #[test]
    fn test_empty_items_zero_totals() {
        let totals = CostingService::totals(&[], dec!(7));
        assert_eq!(totals, crate::costing::types::DocumentTotals::ZERO);
    }

    #[test]
    fn test_costing_is_idempotent() {
        let items = vec![item(dec!(2), dec!(50)), item(dec!(7), dec!(3.33))];
        let first = CostingService::totals(&items, dec!(7));
        let second = CostingService::totals(&items, dec!(7));
        assert_eq!(first, second);
    }
}
