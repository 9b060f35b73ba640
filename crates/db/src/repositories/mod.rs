//! Repository abstractions for data access.
//!
//! Document repositories are the enforcement point for the lifecycle: every
//! mutation is validated through `procura_core::lifecycle` before a row is
//! touched, and approve/reject use a conditional update so a concurrent
//! decision race has exactly one winner.

pub mod project;
pub mod purchase_order;
pub mod reconciliation;
pub mod settings;
pub mod user;
pub mod variation_order;
pub mod vendor;
pub mod work_contract;

pub use project::ProjectRepository;
pub use purchase_order::PurchaseOrderRepository;
pub use reconciliation::ReconciliationRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
pub use variation_order::VariationOrderRepository;
pub use vendor::VendorRepository;
pub use work_contract::WorkContractRepository;

use procura_core::lifecycle::{DocumentStatus, LifecycleError};
use sea_orm::DbErr;
use uuid::Uuid;

/// Error type shared by the three document repositories.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Referenced project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Referenced vendor does not exist.
    #[error("Vendor not found: {0}")]
    VendorNotFound(Uuid),

    /// Referenced vendor exists but is deactivated.
    #[error("Vendor is not active: {0}")]
    VendorInactive(Uuid),

    /// Required field missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lifecycle guard rejected the operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// A concurrent decision won the race on this document.
    #[error("Document was decided concurrently")]
    ConcurrentDecision,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DocumentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::ProjectNotFound(_) | Self::VendorNotFound(_) => 404,
            Self::Validation(_) | Self::VendorInactive(_) => 400,
            Self::Lifecycle(e) => e.status_code(),
            Self::ConcurrentDecision => 409,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            Self::VendorNotFound(_) => "VENDOR_NOT_FOUND",
            Self::VendorInactive(_) => "VENDOR_INACTIVE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Lifecycle(e) => e.error_code(),
            Self::ConcurrentDecision => "CONCURRENT_DECISION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// List filter shared by the document repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFilter {
    /// Restrict to one project.
    pub project_id: Option<Uuid>,
    /// Restrict to one lifecycle status.
    pub status: Option<DocumentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_core::lifecycle::Role;

    #[test]
    fn test_document_error_codes() {
        assert_eq!(DocumentError::NotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(DocumentError::ConcurrentDecision.status_code(), 409);
        assert_eq!(
            DocumentError::Validation("po number is required".into()).status_code(),
            400
        );
        assert_eq!(DocumentError::VendorInactive(Uuid::nil()).status_code(), 400);
    }

    #[test]
    fn test_lifecycle_errors_pass_through() {
        let err = DocumentError::from(LifecycleError::InsufficientRole {
            role: Role::Viewer,
            action: "approve",
        });
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "INSUFFICIENT_ROLE");
    }
}
