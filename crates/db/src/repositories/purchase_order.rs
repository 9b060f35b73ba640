//! Purchase order repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use procura_core::costing::{CostingService, LineItem, default_vat_rate};
use procura_core::lifecycle::{LifecycleAction, LifecycleService, Role};
use procura_shared::types::PageRequest;

use crate::entities::sea_orm_active_enums::{DocumentScope, DocumentStatus};
use crate::entities::{LineItems, projects, purchase_orders, vendors};
use crate::repositories::{DocumentError, DocumentFilter};

/// Input for creating or editing a purchase order.
///
/// A draft may omit the vendor; submission requires one.
#[derive(Debug, Clone)]
pub struct PurchaseOrderInput {
    pub po_number: String,
    pub project_id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub scope: DocumentScope,
    pub items: Vec<LineItem>,
    pub vat_rate: Option<Decimal>,
}

/// Purchase order repository.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    db: DatabaseConnection,
}

impl PurchaseOrderRepository {
    /// Creates a new purchase order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a purchase order, as a draft or submitted directly.
    ///
    /// Totals are always recomputed server side from the item factors;
    /// client-sent amounts are discarded.
    ///
    /// # Errors
    ///
    /// Returns validation, project, or vendor errors; submitting without a
    /// vendor is rejected.
    pub async fn create(
        &self,
        input: PurchaseOrderInput,
        created_by: Uuid,
        submit: bool,
    ) -> Result<purchase_orders::Model, DocumentError> {
        if input.po_number.trim().is_empty() {
            return Err(DocumentError::Validation("po number is required".into()));
        }
        self.ensure_project_exists(input.project_id).await?;
        let (vendor_id, vendor_name) = self.resolve_vendor(input.vendor_id).await?;
        if submit && vendor_id.is_none() {
            return Err(DocumentError::Validation(
                "a vendor is required to submit a purchase order".into(),
            ));
        }

        let mut items = input.items;
        CostingService::normalize_items(&mut items);
        let vat_rate = input.vat_rate.unwrap_or_else(default_vat_rate);
        let totals = CostingService::totals(&items, vat_rate);

        let now = Utc::now();
        let mut model = purchase_orders::ActiveModel {
            id: Set(Uuid::now_v7()),
            po_number: Set(input.po_number.trim().to_string()),
            project_id: Set(input.project_id),
            vendor_id: Set(vendor_id),
            vendor_name: Set(vendor_name),
            scope: Set(input.scope),
            items: Set(LineItems(items)),
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

    /// Fetches one purchase order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the document does not exist.
    pub async fn get(&self, id: Uuid) -> Result<purchase_orders::Model, DocumentError> {
        purchase_orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Lists purchase orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: DocumentFilter,
        page: &PageRequest,
    ) -> Result<(Vec<purchase_orders::Model>, u64), DocumentError> {
        let mut query = purchase_orders::Entity::find();
        if let Some(project_id) = filter.project_id {
            query = query.filter(purchase_orders::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = filter.status {
            let status: DocumentStatus = status.into();
            query = query.filter(purchase_orders::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(purchase_orders::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok((data, total))
    }

    /// Edits a draft or rejected purchase order, optionally resubmitting it.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` for pending or approved documents, plus the same
    /// validation errors as `create`.
    pub async fn update(
        &self,
        id: Uuid,
        input: PurchaseOrderInput,
        actor: Uuid,
        submit: bool,
    ) -> Result<purchase_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        let current: procura_core::lifecycle::DocumentStatus = existing.status.clone().into();
        LifecycleService::ensure_editable(current)?;

        if input.po_number.trim().is_empty() {
            return Err(DocumentError::Validation("po number is required".into()));
        }
        self.ensure_project_exists(input.project_id).await?;
        let (vendor_id, vendor_name) = self.resolve_vendor(input.vendor_id).await?;
        if submit && vendor_id.is_none() {
            return Err(DocumentError::Validation(
                "a vendor is required to submit a purchase order".into(),
            ));
        }

        let mut items = input.items;
        CostingService::normalize_items(&mut items);
        let vat_rate = input.vat_rate.unwrap_or_else(default_vat_rate);
        let totals = CostingService::totals(&items, vat_rate);

        let action = if submit {
            LifecycleService::submit(current, actor)?
        } else {
            LifecycleService::save_draft(current)?
        };

        let mut model: purchase_orders::ActiveModel = existing.into();
        model.po_number = Set(input.po_number.trim().to_string());
        model.project_id = Set(input.project_id);
        model.vendor_id = Set(vendor_id);
        model.vendor_name = Set(vendor_name);
        model.scope = Set(input.scope);
        model.items = Set(LineItems(items));
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

    /// Submits a draft or rejected purchase order for approval.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the document is draft or rejected,
    /// and a validation error if no vendor is attached.
    pub async fn submit(
        &self,
        id: Uuid,
        actor: Uuid,
    ) -> Result<purchase_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        if existing.vendor_id.is_none() {
            return Err(DocumentError::Validation(
                "a vendor is required to submit a purchase order".into(),
            ));
        }
        let action = LifecycleService::submit(existing.status.clone().into(), actor)?;

        let mut model: purchase_orders::ActiveModel = existing.into();
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

    /// Approves a pending purchase order.
    ///
    /// The status write is conditional on the row still being pending, so two
    /// racing decisions produce exactly one winner; the loser gets
    /// `ConcurrentDecision`.
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
    ) -> Result<purchase_orders::Model, DocumentError> {
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

        let update = purchase_orders::ActiveModel {
            status: Set(new_status.into()),
            approved_by: Set(Some(approved_by)),
            approved_at: Set(Some(approved_at.into())),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let result = purchase_orders::Entity::update_many()
            .set(update)
            .filter(purchase_orders::Column::Id.eq(id))
            .filter(purchase_orders::Column::Status.eq(DocumentStatus::Pending))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!(%id, "decision lost a concurrent race");
            return Err(DocumentError::ConcurrentDecision);
        }
        self.get(id).await
    }

    /// Rejects a pending purchase order, with an optional reason.
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
    ) -> Result<purchase_orders::Model, DocumentError> {
        let existing = self.get(id).await?;
        let action = LifecycleService::reject(existing.status.into(), role, actor, reason)?;

        let LifecycleAction::Reject {
            new_status, reason, ..
        } = action
        else {
            return Err(DocumentError::ConcurrentDecision);
        };

        let update = purchase_orders::ActiveModel {
            status: Set(new_status.into()),
            rejected_reason: Set(reason),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let result = purchase_orders::Entity::update_many()
            .set(update)
            .filter(purchase_orders::Column::Id.eq(id))
            .filter(purchase_orders::Column::Status.eq(DocumentStatus::Pending))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            tracing::warn!(%id, "decision lost a concurrent race");
            return Err(DocumentError::ConcurrentDecision);
        }
        self.get(id).await
    }

    /// Deletes a draft or rejected purchase order.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` for pending or approved documents.
    pub async fn delete(&self, id: Uuid) -> Result<(), DocumentError> {
        let existing = self.get(id).await?;
        LifecycleService::ensure_deletable(existing.status.into())?;
        purchase_orders::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn ensure_project_exists(&self, project_id: Uuid) -> Result<(), DocumentError> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(DocumentError::ProjectNotFound(project_id))
    }

    /// Resolves the vendor reference into an id plus a name snapshot.
    ///
    /// The snapshot is copied at write time so later vendor edits or
    /// deactivation never rewrite document history.
    async fn resolve_vendor(
        &self,
        vendor_id: Option<Uuid>,
    ) -> Result<(Option<Uuid>, Option<String>), DocumentError> {
        let Some(vendor_id) = vendor_id else {
            return Ok((None, None));
        };
        let vendor = vendors::Entity::find_by_id(vendor_id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::VendorNotFound(vendor_id))?;
        if !vendor.is_active {
            return Err(DocumentError::VendorInactive(vendor_id));
        }
        Ok((Some(vendor.id), Some(vendor.name)))
    }
}
