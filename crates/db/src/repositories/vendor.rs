//! Vendor registry repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use procura_shared::types::PageRequest;

use crate::entities::{StringList, vendors};

/// Error types for vendor operations.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    /// Vendor not found.
    #[error("Vendor not found: {0}")]
    NotFound(Uuid),

    /// Validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a vendor.
#[derive(Debug, Clone, Default)]
pub struct VendorInput {
    pub name: String,
    pub tax_id: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub categories: Vec<String>,
}

/// Vendor repository.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a vendor, active by default.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name.
    pub async fn create(&self, input: VendorInput) -> Result<vendors::Model, VendorError> {
        if input.name.trim().is_empty() {
            return Err(VendorError::Validation("vendor name is required".into()));
        }

        let now = Utc::now().into();
        let model = vendors::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.trim().to_string()),
            tax_id: Set(input.tax_id),
            contact_name: Set(input.contact_name),
            phone: Set(input.phone),
            email: Set(input.email),
            address: Set(input.address),
            map_url: Set(input.map_url),
            categories: Set(StringList(input.categories)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Fetches one vendor.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist.
    pub async fn get(&self, id: Uuid) -> Result<vendors::Model, VendorError> {
        vendors::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(VendorError::NotFound(id))
    }

    /// Lists vendors, optionally restricted to active ones, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        active_only: bool,
        page: &PageRequest,
    ) -> Result<(Vec<vendors::Model>, u64), VendorError> {
        let mut query = vendors::Entity::find();
        if active_only {
            query = query.filter(vendors::Column::IsActive.eq(true));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(vendors::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok((data, total))
    }

    /// Updates a vendor's profile fields.
    ///
    /// Documents referencing this vendor keep their name snapshot; edits here
    /// only affect future documents.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist, or a validation error
    /// for an empty name.
    pub async fn update(&self, id: Uuid, input: VendorInput) -> Result<vendors::Model, VendorError> {
        if input.name.trim().is_empty() {
            return Err(VendorError::Validation("vendor name is required".into()));
        }

        let vendor = self.get(id).await?;
        let mut active: vendors::ActiveModel = vendor.into();
        active.name = Set(input.name.trim().to_string());
        active.tax_id = Set(input.tax_id);
        active.contact_name = Set(input.contact_name);
        active.phone = Set(input.phone);
        active.email = Set(input.email);
        active.address = Set(input.address);
        active.map_url = Set(input.map_url);
        active.categories = Set(StringList(input.categories));
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Activates or deactivates a vendor.
    ///
    /// Deactivation is a soft hide: existing documents are untouched, the
    /// vendor just stops being selectable for new ones.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<vendors::Model, VendorError> {
        let vendor = self.get(id).await?;
        let mut active: vendors::ActiveModel = vendor.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }
}
