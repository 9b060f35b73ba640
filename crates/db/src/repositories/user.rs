//! User registry repository.
//!
//! Roles live server side; the bearer token's role claim is advisory and the
//! approval guard always consults this table.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{
    purchase_orders, sea_orm_active_enums::UserRole, users, variation_orders, work_contracts,
};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// User exists but is deactivated.
    #[error("User is not active: {0}")]
    Inactive(Uuid),

    /// Validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// User is still named on documents and cannot be removed.
    #[error("User is referenced by existing documents: {0}")]
    Referenced(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
}

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or email.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        if input.display_name.trim().is_empty() {
            return Err(UserError::Validation("display name is required".into()));
        }
        if input.email.trim().is_empty() {
            return Err(UserError::Validation("email is required".into()));
        }

        let now = Utc::now().into();
        let model = users::ActiveModel {
            id: Set(Uuid::now_v7()),
            display_name: Set(input.display_name.trim().to_string()),
            email: Set(input.email.trim().to_lowercase()),
            role: Set(input.role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub async fn get(&self, id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Resolves the effective role of an active user.
    ///
    /// This is the lookup the document repositories use before an approval
    /// decision; a deactivated user has no effective role.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `Inactive` for a deactivated
    /// user.
    pub async fn effective_role(&self, id: Uuid) -> Result<UserRole, UserError> {
        let user = self.get(id).await?;
        if !user.is_active {
            return Err(UserError::Inactive(id));
        }
        Ok(user.role)
    }

    /// Lists all users ordered by display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, UserError> {
        Ok(users::Entity::find()
            .order_by_asc(users::Column::DisplayName)
            .all(&self.db)
            .await?)
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub async fn set_role(&self, id: Uuid, role: UserRole) -> Result<users::Model, UserError> {
        let user = self.get(id).await?;
        let mut active: users::ActiveModel = user.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Activates or deactivates a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<users::Model, UserError> {
        let user = self.get(id).await?;
        let mut active: users::ActiveModel = user.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Removes a user from the registry.
    ///
    /// A user named on any document as author, submitter, or approver cannot
    /// be removed; the audit trail wins. Deactivate instead to revoke access.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `Referenced` when documents
    /// still point at the user.
    pub async fn delete(&self, id: Uuid) -> Result<(), UserError> {
        self.get(id).await?;
        if self.is_referenced(id).await? {
            return Err(UserError::Referenced(id));
        }
        users::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, DbErr> {
        let pos = purchase_orders::Entity::find()
            .filter(
                Condition::any()
                    .add(purchase_orders::Column::CreatedBy.eq(id))
                    .add(purchase_orders::Column::SubmittedBy.eq(id))
                    .add(purchase_orders::Column::ApprovedBy.eq(id)),
            )
            .count(&self.db)
            .await?;
        if pos > 0 {
            return Ok(true);
        }

        let wcs = work_contracts::Entity::find()
            .filter(
                Condition::any()
                    .add(work_contracts::Column::CreatedBy.eq(id))
                    .add(work_contracts::Column::SubmittedBy.eq(id))
                    .add(work_contracts::Column::ApprovedBy.eq(id)),
            )
            .count(&self.db)
            .await?;
        if wcs > 0 {
            return Ok(true);
        }

        let vos = variation_orders::Entity::find()
            .filter(
                Condition::any()
                    .add(variation_orders::Column::CreatedBy.eq(id))
                    .add(variation_orders::Column::SubmittedBy.eq(id))
                    .add(variation_orders::Column::ApprovedBy.eq(id)),
            )
            .count(&self.db)
            .await?;
        Ok(vos > 0)
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, UserError> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await?)
    }
}
