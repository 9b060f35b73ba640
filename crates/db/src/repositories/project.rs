//! Project repository.
//!
//! Project administration itself is thin; projects exist here mainly as the
//! budget envelope that documents reference.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use procura_shared::types::PageRequest;

use crate::entities::{projects, sea_orm_active_enums::ProjectStatus};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    /// Validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name.
    pub name: String,
    /// Project code.
    pub code: String,
    /// Declared initial budget; set once, never rewritten by approvals.
    pub budget: Decimal,
}

/// Project repository.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or a negative budget.
    pub async fn create(&self, input: CreateProjectInput) -> Result<projects::Model, ProjectError> {
        if input.name.trim().is_empty() {
            return Err(ProjectError::Validation("project name is required".into()));
        }
        if input.budget < Decimal::ZERO {
            return Err(ProjectError::Validation(
                "project budget must not be negative".into(),
            ));
        }

        let now = Utc::now().into();
        let model = projects::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.trim().to_string()),
            code: Set(input.code.trim().to_string()),
            budget: Set(input.budget),
            status: Set(ProjectStatus::InProgress),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Fetches one project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn get(&self, id: Uuid) -> Result<projects::Model, ProjectError> {
        projects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// Lists projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        status: Option<ProjectStatus>,
        page: &PageRequest,
    ) -> Result<(Vec<projects::Model>, u64), ProjectError> {
        let mut query = projects::Entity::find();
        if let Some(status) = status {
            query = query.filter(projects::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(projects::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok((data, total))
    }

    /// Updates a project's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ProjectStatus,
    ) -> Result<projects::Model, ProjectError> {
        let project = self.get(id).await?;
        let mut active: projects::ActiveModel = project.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        Ok(active.update(&self.db).await?)
    }
}
