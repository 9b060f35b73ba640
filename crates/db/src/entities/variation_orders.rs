//! `SeaORM` Entity for the variation_orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::VariationItems;
use super::sea_orm_active_enums::DocumentStatus;

/// A variation order.
///
/// Same document-level shape as a purchase order, but a title and free-text
/// reason replace the vendor linkage, items are signed (add/omit), and the
/// totals may be negative for a net budget-reducing variation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "variation_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vo_number: String,
    pub project_id: Uuid,
    pub title: String,
    pub reason: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: VariationItems,
    pub sub_total: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
    pub status: DocumentStatus,
    pub created_by: Uuid,
    pub submitted_by: Option<Uuid>,
    pub submitted_at: Option<DateTimeWithTimeZone>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub rejected_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
