//! `SeaORM` Entity for the projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProjectStatus;

/// A project and its declared financial envelope.
///
/// `budget` is set once at creation and never mutated by approvals; all
/// variation-order impact is applied at computation time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub budget: Decimal,
    pub status: ProjectStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_orders::Entity")]
    PurchaseOrders,
    #[sea_orm(has_many = "super::work_contracts::Entity")]
    WorkContracts,
    #[sea_orm(has_many = "super::variation_orders::Entity")]
    VariationOrders,
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl Related<super::work_contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkContracts.def()
    }
}

impl Related<super::variation_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VariationOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
