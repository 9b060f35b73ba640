//! Budget reconciliation queries.
//!
//! Budget figures are never stored; every observation re-derives them from a
//! single snapshot of the document tables. Each request reads the three
//! tables once and reduces in memory, so one response is internally
//! consistent even while decisions land concurrently.

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use procura_core::budget::{ApprovedTotals, BudgetService, BudgetSummary, DocumentFinancials};

use crate::entities::sea_orm_active_enums::DocumentStatus;
use crate::entities::{projects, purchase_orders, variation_orders, work_contracts};

/// Error types for reconciliation queries.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One row of the cross-project budget report.
#[derive(Debug, Clone)]
pub struct ProjectBudgetRow {
    /// The project.
    pub project: projects::Model,
    /// Its reconciled budget figures.
    pub summary: BudgetSummary,
}

/// Read-side repository for budget reconciliation.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reconciles one project's budget from the current document snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` for an unknown project id.
    pub async fn project_budget(&self, project_id: Uuid) -> Result<BudgetSummary, ReconciliationError> {
        let project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ReconciliationError::ProjectNotFound(project_id))?;

        let approved = self.approved_totals(project_id).await?;
        Ok(BudgetService::reconcile(project.budget, &approved))
    }

    /// Reconciles every project for the cross-project report.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn budget_report(&self) -> Result<Vec<ProjectBudgetRow>, ReconciliationError> {
        let all = projects::Entity::find().all(&self.db).await?;
        let mut rows = Vec::with_capacity(all.len());
        for project in all {
            let approved = self.approved_totals(project.id).await?;
            let summary = BudgetService::reconcile(project.budget, &approved);
            rows.push(ProjectBudgetRow { project, summary });
        }
        Ok(rows)
    }

    async fn approved_totals(&self, project_id: Uuid) -> Result<ApprovedTotals, DbErr> {
        let vo = variation_orders::Entity::find()
            .select_only()
            .column(variation_orders::Column::Status)
            .column(variation_orders::Column::TotalAmount)
            .filter(variation_orders::Column::ProjectId.eq(project_id))
            .into_tuple::<(DocumentStatus, Decimal)>()
            .all(&self.db)
            .await?;
        let po = purchase_orders::Entity::find()
            .select_only()
            .column(purchase_orders::Column::Status)
            .column(purchase_orders::Column::TotalAmount)
            .filter(purchase_orders::Column::ProjectId.eq(project_id))
            .into_tuple::<(DocumentStatus, Decimal)>()
            .all(&self.db)
            .await?;
        let wc = work_contracts::Entity::find()
            .select_only()
            .column(work_contracts::Column::Status)
            .column(work_contracts::Column::TotalAmount)
            .filter(work_contracts::Column::ProjectId.eq(project_id))
            .into_tuple::<(DocumentStatus, Decimal)>()
            .all(&self.db)
            .await?;

        Ok(ApprovedTotals {
            variation_orders: BudgetService::approved_total(vo.into_iter().map(to_financials)),
            purchase_orders: BudgetService::approved_total(po.into_iter().map(to_financials)),
            work_contracts: BudgetService::approved_total(wc.into_iter().map(to_financials)),
        })
    }
}

fn to_financials((status, total_amount): (DocumentStatus, Decimal)) -> DocumentFinancials {
    DocumentFinancials {
        status: status.into(),
        total_amount: Some(total_amount),
    }
}
