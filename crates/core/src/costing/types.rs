//! Costing domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A priced line item on a purchase order or work contract.
///
/// `amount` is derived from `quantity * unit_price` and is never editable on
/// its own; [`super::CostingService`] recomputes it on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifier, unique within the parent document.
    pub id: Uuid,
    /// Free-text description.
    pub description: String,
    /// Quantity; may be fractional, zero, or negative (no clamping).
    #[serde(deserialize_with = "decimal_or_zero")]
    pub quantity: Decimal,
    /// Unit of measure (free text, from the settings vocabulary).
    pub unit: String,
    /// Price per unit; may be zero.
    #[serde(deserialize_with = "decimal_or_zero")]
    pub unit_price: Decimal,
    /// Derived: `quantity * unit_price`.
    #[serde(default)]
    pub amount: Decimal,
}

/// Direction of a variation-order line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationKind {
    /// Increases the contracted cost.
    Add,
    /// Decreases the contracted cost.
    Omit,
}

impl VariationKind {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Omit => "omit",
        }
    }

    /// Sign applied to the item amount when summing a variation subtotal.
    #[must_use]
    pub const fn sign(self) -> Decimal {
        match self {
            Self::Add => Decimal::ONE,
            Self::Omit => Decimal::NEGATIVE_ONE,
        }
    }
}

/// A signed line item on a variation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationItem {
    /// Identifier, unique within the parent document.
    pub id: Uuid,
    /// Free-text description.
    pub description: String,
    /// Quantity; may be fractional, zero, or negative.
    #[serde(deserialize_with = "decimal_or_zero")]
    pub quantity: Decimal,
    /// Unit of measure.
    pub unit: String,
    /// Price per unit.
    #[serde(deserialize_with = "decimal_or_zero")]
    pub unit_price: Decimal,
    /// Derived: `quantity * unit_price` (unsigned; the sign lives in `kind`).
    #[serde(default)]
    pub amount: Decimal,
    /// Whether the item adds to or omits from the contracted cost.
    #[serde(rename = "type")]
    pub kind: VariationKind,
}

/// Subtotal, VAT, and VAT-inclusive total for a document.
///
/// These values are a frozen snapshot computed at save time; historical
/// totals are never recomputed when VAT defaults change later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of item amounts (signed for variation orders).
    pub sub_total: Decimal,
    /// `sub_total * vat_rate / 100`.
    pub vat_amount: Decimal,
    /// `sub_total + vat_amount`.
    pub total_amount: Decimal,
}

impl DocumentTotals {
    /// All-zero totals, used for documents with no items.
    pub const ZERO: Self = Self {
        sub_total: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        total_amount: Decimal::ZERO,
    };
}

/// Deserializes a numeric field, coercing anything non-numeric to zero.
///
/// Accepts JSON numbers and numeric strings; null, malformed strings, and
/// other shapes silently become 0 rather than propagating an error or NaN.
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => {
            Decimal::from_str_exact(&n.to_string()).unwrap_or(Decimal::ZERO)
        }
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "decimal_or_zero")]
        value: Decimal,
    }

    #[test]
    fn test_decimal_or_zero_accepts_numbers() {
        let p: Probe = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();
        assert_eq!(p.value, dec!(12.5));
    }

    #[test]
    fn test_decimal_or_zero_accepts_numeric_strings() {
        let p: Probe = serde_json::from_str(r#"{"value": " 7 "}"#).unwrap();
        assert_eq!(p.value, dec!(7));
    }

    #[test]
    fn test_decimal_or_zero_coerces_garbage() {
        let p: Probe = serde_json::from_str(r#"{"value": "abc"}"#).unwrap();
        assert_eq!(p.value, Decimal::ZERO);
        let p: Probe = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(p.value, Decimal::ZERO);
        let p: Probe = serde_json::from_str(r#"{"value": [1]}"#).unwrap();
        assert_eq!(p.value, Decimal::ZERO);
    }

    #[test]
    fn test_variation_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&VariationKind::Add).unwrap(),
            "\"add\""
        );
        assert_eq!(
            serde_json::to_string(&VariationKind::Omit).unwrap(),
            "\"omit\""
        );
    }

    #[test]
    fn test_variation_item_type_field_name() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "description": "Extra excavation",
            "quantity": 3,
            "unit": "m3",
            "unit_price": 500,
            "type": "omit"
        }"#;
        let item: VariationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, VariationKind::Omit);
        assert_eq!(item.amount, Decimal::ZERO); // derived later by the service
    }
}
