//! Lifecycle error types.

use thiserror::Error;

use crate::lifecycle::role::Role;
use crate::lifecycle::types::DocumentStatus;

/// Errors that can occur during lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: DocumentStatus,
        /// The attempted target status.
        to: DocumentStatus,
    },

    /// Attempted to edit a document that is not in an editable status.
    #[error("Cannot modify a {0} document")]
    NotEditable(DocumentStatus),

    /// Attempted to delete a document that is not in a deletable status.
    #[error("Cannot delete a {0} document")]
    NotDeletable(DocumentStatus),

    /// Actor's role does not permit approving or rejecting.
    #[error("Role {role} is not permitted to {action} documents")]
    InsufficientRole {
        /// The actor's role.
        role: Role,
        /// The attempted action ("approve" or "reject").
        action: &'static str,
    },
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::NotEditable(_) | Self::NotDeletable(_) => 400,
            Self::InsufficientRole { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::NotDeletable(_) => "NOT_DELETABLE",
            Self::InsufficientRole { .. } => "INSUFFICIENT_ROLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = LifecycleError::InvalidTransition {
            from: DocumentStatus::Approved,
            to: DocumentStatus::Pending,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("approved"));
        assert!(err.to_string().contains("pending"));
    }

    #[test]
    fn test_insufficient_role_error() {
        let err = LifecycleError::InsufficientRole {
            role: Role::Procurement,
            action: "approve",
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "INSUFFICIENT_ROLE");
        assert!(err.to_string().contains("procurement"));
    }

    #[test]
    fn test_not_editable_error() {
        let err = LifecycleError::NotEditable(DocumentStatus::Approved);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NOT_EDITABLE");
    }

    #[test]
    fn test_not_deletable_error() {
        let err = LifecycleError::NotDeletable(DocumentStatus::Pending);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NOT_DELETABLE");
    }
}
