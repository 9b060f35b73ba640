//! Variation order repository.
//!
//! Variation orders carry signed items and may total negative; there is no
//! vendor linkage, a non-empty title is the submission requirement instead.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use procura_core::costing::{CostingService, VariationItem, default_vat_rate};
use procura_core::lifecycle::{LifecycleAction, LifecycleService, Role};
use procura_shared::types::PageRequest;

use crate::entities::sea_orm_active_enums::DocumentStatus;
use crate::entities::{VariationItems, projects, variation_orders};
use crate::repositories::{DocumentError, DocumentFilter};

/// Input for creating or editing a variation order.
#[derive(Debug, Clone)]
pub struct VariationOrderInput {
    pub vo_number: String,
    pub project_id: Uuid,
    pub title: String,
    pub reason: Option<String>,
    pub items: Vec<VariationItem>,
    pub vat_rate: Option<Decimal>,
}

impl VariationOrderInput {
    fn validate(&self, submit: bool) -> Result<(), DocumentError> {
        if self.vo_number.trim().is_empty() {
            return Err(DocumentError::Validation("vo number is required".into()));
        }
        if submit && self.title.trim().is_empty() {
            return Err(DocumentError::Validation(
                "a title is required to submit a variation order".into(),
            ));
        }
        Ok(())
    }
}

/// Variation order repository.
#[derive(Debug, Clone)]
pub struct VariationOrderRepository {
    db: DatabaseConnection,
}

impl VariationOrderRepository {
    /// Creates a new variation order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a variation order, as a draft or submitted directly.
    ///
    /// # Errors
    ///
    /// Returns validation or project errors; submitting without a title is
    /// rejected.
    pub async fn create(
        &self,
        input: VariationOrderInput,
        created_by: Uuid,
        submit: bool,
    ) -> Result<variation_orders::Model, DocumentError> {
        input.validate(submit)?;
        self.ensure_project_exists(input.project_id).await?;

        let mut items = input.items;
        CostingService::normalize_variation_items(&mut items);
        let vat_rate = input.vat_rate.unwrap_or_else(default_vat_rate);
        let totals = CostingService::variation_totals(&items, vat_rate);

        let now = Utc::now();
        let mut model = variation_orders::ActiveModel {
            id: Set(Uuid::now_v7()),
            vo_number: Set(input.vo_number.trim().to_string()),
            project_id: Set(input.project_id),
            title: Set(input.title.trim().to_string()),
            reason: Set(input.reason),
            items: Set(VariationItems(items)),
            sub_total: Set(totals.sub_total),
            vat_rate: Set(vat_rate),
            vat_amount: Set(totals.vat_amount),
            total_amount: Set(totals.total_amount),
            status: Set(DocumentStatus::Draft),
            created_by: Set(created_by),
            submitted_by: Set(None),
            submitted_at: Set(None),
            approved_by: Set(None),
            approved_at: Set(None),
            rejected_reason: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        if submit {
            let action = LifecycleService::submit(
                procura_core::lifecycle::DocumentStatus::Draft,
                created_by,
            )?;
            if let LifecycleAction::Submit {
                new_status,
                submitted_by,
                submitted_at,
            } = action
            {
                model.status = Set(new_status.into());
                model.submitted_by = Set(Some(submitted_by));
                model.submitted_at = Set(Some(submitted_at.into()));
            }
        }

        Ok(model.insert(&self.db).await?)
    }

    /// Fetches one variation order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the document does not exist.
    pub async fn get(&self, id: Uuid) -> Result<variation_orders::Model, DocumentError> {
        variation_orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Lists variation orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: DocumentFilter,
        page: &PageRequest,
    ) -> Result<(Vec<variation_orders::Model>, u64), DocumentError> {
        let mut query = variation_orders::Entity::find();
        if let Some(project_id) = filter.project_id {
            query = query.filter(variation_orders::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = filter.status {
            let status: DocumentStatus = status.into();
            query = query.filter(variation_orders::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(variation_orders::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok((data, total))
    }

    /// Edits a draft or rejected variation order, optionally resubmitting it.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` for pending or approved documents, plus the same
    /// validation errors as `create`.
    pub async fn update(
        &self,
        id: Uuid,
        input: VariationOrderInput,
        actor: Uuid,
        submit: bool,
    ) -> Result<variation_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        let current: procura_core::lifecycle::DocumentStatus = existing.status.clone().into();
        LifecycleService::ensure_editable(current)?;

        input.validate(submit)?;
        self.ensure_project_exists(input.project_id).await?;

        let mut items = input.items;
        CostingService::normalize_variation_items(&mut items);
        let vat_rate = input.vat_rate.unwrap_or_else(default_vat_rate);
        let totals = CostingService::variation_totals(&items, vat_rate);

        let action = if submit {
            LifecycleService::submit(current, actor)?
        } else {
            LifecycleService::save_draft(current)?
        };

        let mut model: variation_orders::ActiveModel = existing.into();
        model.vo_number = Set(input.vo_number.trim().to_string());
        model.project_id = Set(input.project_id);
        model.title = Set(input.title.trim().to_string());
        model.reason = Set(input.reason);
        model.items = Set(VariationItems(items));
        model.sub_total = Set(totals.sub_total);
        model.vat_rate = Set(vat_rate);
        model.vat_amount = Set(totals.vat_amount);
        model.total_amount = Set(totals.total_amount);
        model.status = Set(action.new_status().into());
        model.updated_at = Set(Utc::now().into());
        match action {
            LifecycleAction::Submit {
                submitted_by,
                submitted_at,
                ..
            } => {
                model.submitted_by = Set(Some(submitted_by));
                model.submitted_at = Set(Some(submitted_at.into()));
                model.rejected_reason = Set(None);
            }
            LifecycleAction::SaveDraft { .. } => {
                model.rejected_reason = Set(None);
            }
            _ => {}
        }

        Ok(model.update(&self.db).await?)
    }

    /// Submits a draft or rejected variation order for approval.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the document is draft or rejected,
    /// and a validation error if the title is empty.
    pub async fn submit(
        &self,
        id: Uuid,
        actor: Uuid,
    ) -> Result<variation_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        if existing.title.trim().is_empty() {
            return Err(DocumentError::Validation(
                "a title is required to submit a variation order".into(),
            ));
        }
        let action = LifecycleService::submit(existing.status.clone().into(), actor)?;

        let mut model: variation_orders::ActiveModel = existing.into();
        model.status = Set(action.new_status().into());
        model.updated_at = Set(Utc::now().into());
        if let LifecycleAction::Submit {
            submitted_by,
            submitted_at,
            ..
        } = action
        {
            model.submitted_by = Set(Some(submitted_by));
            model.submitted_at = Set(Some(submitted_at.into()));
            model.rejected_reason = Set(None);
        }
        Ok(model.update(&self.db).await?)
    }

    /// Approves a pending variation order.
    ///
    /// Approval is the moment its signed total starts adjusting the project's
    /// effective budget. Conditional on the row still being pending.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientRole` for non-approvers, `InvalidTransition` for
    /// non-pending documents, and `ConcurrentDecision` on a lost race.
    pub async fn approve(
        &self,
        id: Uuid,
        actor: Uuid,
        role: Role,
    ) -> Result<variation_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        let action = LifecycleService::approve(existing.status.into(), role, actor)?;

        let LifecycleAction::Approve {
            new_status,
            approved_by,
            approved_at,
        } = action
        else {
            return Err(DocumentError::ConcurrentDecision);
        };

        let update = variation_orders::ActiveModel {
            status: Set(new_status.into()),
            approved_by: Set(Some(approved_by)),
            approved_at: Set(Some(approved_at.into())),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let result = variation_orders::Entity::update_many()
            .set(update)
            .filter(variation_orders::Column::Id.eq(id))
            .filter(variation_orders::Column::Status.eq(DocumentStatus::Pending))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!(%id, "decision lost a concurrent race");
            return Err(DocumentError::ConcurrentDecision);
        }
        self.get(id).await
    }

    /// Rejects a pending variation order, with an optional reason.
    ///
    /// # Errors
    ///
    /// Same failure modes as `approve`.
    pub async fn reject(
        &self,
        id: Uuid,
        actor: Uuid,
        role: Role,
        reason: Option<String>,
    ) -> Result<variation_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        let action = LifecycleService::reject(existing.status.into(), role, actor, reason)?;

        let LifecycleAction::Reject {
            new_status, reason, ..
        } = action
        else {
            return Err(DocumentError::ConcurrentDecision);
        };

        let update = variation_orders::ActiveModel {
            status: Set(new_status.into()),
            rejected_reason: Set(reason),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let result = variation_orders::Entity::update_many()
            .set(update)
            .filter(variation_orders::Column::Id.eq(id))
            .filter(variation_orders::Column::Status.eq(DocumentStatus::Pending))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!(%id, "decision lost a concurrent race");
            return Err(DocumentError::ConcurrentDecision);
        }
        self.get(id).await
    }

    /// Deletes a draft or rejected variation order.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` for pending or approved documents.
    pub async fn delete(&self, id: Uuid) -> Result<(), DocumentError> {
        let existing = self.get(id).await?;
        LifecycleService::ensure_deletable(existing.status.into())?;
        variation_orders::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn ensure_project_exists(&self, project_id: Uuid) -> Result<(), DocumentError> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(DocumentError::ProjectNotFound(project_id))
    }
}
