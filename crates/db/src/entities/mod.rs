//! `SeaORM` entity definitions.
//!
//! Line items are embedded on their parent document as JSONB, mirroring the
//! always-read-together document shape of the source data; everything else is
//! a plain relational row.

pub mod projects;
pub mod purchase_orders;
pub mod sea_orm_active_enums;
pub mod system_settings;
pub mod users;
pub mod variation_orders;
pub mod vendors;
pub mod work_contracts;

use procura_core::costing::{LineItem, VariationItem};
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// JSONB wrapper for a document's line items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LineItems(pub Vec<LineItem>);

/// JSONB wrapper for a variation order's signed line items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct VariationItems(pub Vec<VariationItem>);

/// JSONB wrapper for vocabulary lists on the settings singleton.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);
