//! `SeaORM` Entity for the system_settings singleton.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::StringList;

/// Key of the single settings row.
pub const GLOBAL_CONFIG_ID: &str = "global_config";

/// Global configuration singleton: company letterhead info, LINE
/// credentials, document vocabularies, and approver signatures.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub company_tax_id: Option<String>,
    pub company_logo_url: Option<String>,
    pub line_token: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub vendor_categories: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub units: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub approver_signature_urls: StringList,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
