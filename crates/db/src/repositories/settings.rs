//! System settings repository.
//!
//! A single-row table read on demand; the row is created lazily with empty
//! defaults on first access.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

use crate::entities::system_settings::{self, GLOBAL_CONFIG_ID};
use crate::entities::StringList;

/// Writable subset of the settings row.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub company_tax_id: Option<String>,
    pub company_logo_url: Option<String>,
    pub line_token: Option<String>,
    pub vendor_categories: Vec<String>,
    pub units: Vec<String>,
    pub approver_signature_urls: Vec<String>,
}

/// Settings repository.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the settings singleton, creating an empty row if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self) -> Result<system_settings::Model, DbErr> {
        if let Some(model) = system_settings::Entity::find_by_id(GLOBAL_CONFIG_ID)
            .one(&self.db)
            .await?
        {
            return Ok(model);
        }

        let empty = system_settings::ActiveModel {
            id: Set(GLOBAL_CONFIG_ID.to_string()),
            company_name: Set(None),
            company_address: Set(None),
            company_phone: Set(None),
            company_tax_id: Set(None),
            company_logo_url: Set(None),
            line_token: Set(None),
            vendor_categories: Set(StringList::default()),
            units: Set(StringList::default()),
            approver_signature_urls: Set(StringList::default()),
            updated_at: Set(Utc::now().into()),
        };
        empty.insert(&self.db).await
    }

    /// Replaces the settings row with the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn update(&self, input: SettingsInput) -> Result<system_settings::Model, DbErr> {
        let existing = self.get().await?;
        let mut model: system_settings::ActiveModel = existing.into();
        model.company_name = Set(input.company_name);
        model.company_address = Set(input.company_address);
        model.company_phone = Set(input.company_phone);
        model.company_tax_id = Set(input.company_tax_id);
        model.company_logo_url = Set(input.company_logo_url);
        model.line_token = Set(input.line_token);
        model.vendor_categories = Set(StringList(input.vendor_categories));
        model.units = Set(StringList(input.units));
        model.approver_signature_urls = Set(StringList(input.approver_signature_urls));
        model.updated_at = Set(Utc::now().into());
        model.update(&self.db).await
    }
}
