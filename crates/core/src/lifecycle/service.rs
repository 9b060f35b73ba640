//! Document lifecycle state transitions.
//!
//! This is the single authoritative enforcement point for the approval
//! workflow: repositories call into these functions before mutating any row,
//! so a missing UI guard can never produce an illegal transition.

use chrono::Utc;
use uuid::Uuid;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::role::Role;
use crate::lifecycle::types::{DocumentStatus, LifecycleAction};

/// Stateless service for document lifecycle transitions.
pub struct LifecycleService;

impl LifecycleService {
    /// Save a document as a draft.
    ///
    /// Legal from Draft (plain save) and from Rejected (revert to draft).
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` from Pending or Approved.
    pub fn save_draft(current: DocumentStatus) -> Result<LifecycleAction, LifecycleError> {
        match current {
            DocumentStatus::Draft | DocumentStatus::Rejected => Ok(LifecycleAction::SaveDraft {
                new_status: DocumentStatus::Draft,
            }),
            DocumentStatus::Pending | DocumentStatus::Approved => {
                Err(LifecycleError::InvalidTransition {
                    from: current,
                    to: DocumentStatus::Draft,
                })
            }
        }
    }

    /// Submit a document for approval.
    ///
    /// Legal from Draft and Rejected (edit and resubmit). Required-field
    /// validation (vendor for PO/WC, title for VO) happens at the repository
    /// boundary before this is called.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` from Pending or Approved.
    pub fn submit(
        current: DocumentStatus,
        submitted_by: Uuid,
    ) -> Result<LifecycleAction, LifecycleError> {
        match current {
            DocumentStatus::Draft | DocumentStatus::Rejected => Ok(LifecycleAction::Submit {
                new_status: DocumentStatus::Pending,
                submitted_by,
                submitted_at: Utc::now(),
            }),
            DocumentStatus::Pending | DocumentStatus::Approved => {
                Err(LifecycleError::InvalidTransition {
                    from: current,
                    to: DocumentStatus::Pending,
                })
            }
        }
    }

    /// Approve a pending document.
    ///
    /// The role guard is evaluated first and fails closed: a non-approver
    /// never learns whether the transition itself would have been legal.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientRole` unless the actor is admin or pm, and
    /// `InvalidTransition` unless the document is Pending.
    pub fn approve(
        current: DocumentStatus,
        actor_role: Role,
        approved_by: Uuid,
    ) -> Result<LifecycleAction, LifecycleError> {
        if !actor_role.can_decide() {
            return Err(LifecycleError::InsufficientRole {
                role: actor_role,
                action: "approve",
            });
        }

        match current {
            DocumentStatus::Pending => Ok(LifecycleAction::Approve {
                new_status: DocumentStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: DocumentStatus::Approved,
            }),
        }
    }

    /// Reject a pending document.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientRole` unless the actor is admin or pm, and
    /// `InvalidTransition` unless the document is Pending.
    pub fn reject(
        current: DocumentStatus,
        actor_role: Role,
        rejected_by: Uuid,
        reason: Option<String>,
    ) -> Result<LifecycleAction, LifecycleError> {
        if !actor_role.can_decide() {
            return Err(LifecycleError::InsufficientRole {
                role: actor_role,
                action: "reject",
            });
        }

        match current {
            DocumentStatus::Pending => Ok(LifecycleAction::Reject {
                new_status: DocumentStatus::Rejected,
                rejected_by,
                rejected_at: Utc::now(),
                reason,
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: DocumentStatus::Rejected,
            }),
        }
    }

    /// Guard for editing a document's fields or items.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` unless the document is Draft or Rejected.
    pub fn ensure_editable(current: DocumentStatus) -> Result<(), LifecycleError> {
        if current.is_editable() {
            Ok(())
        } else {
            Err(LifecycleError::NotEditable(current))
        }
    }

    /// Guard for deleting a document.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` unless the document is Draft or Rejected.
    pub fn ensure_deletable(current: DocumentStatus) -> Result<(), LifecycleError> {
        if current.is_deletable() {
            Ok(())
        } else {
            Err(LifecycleError::NotDeletable(current))
        }
    }

    /// Check whether a status transition is valid, ignoring roles.
    #[must_use]
    pub const fn is_valid_transition(from: DocumentStatus, to: DocumentStatus) -> bool {
        matches!(
            (from, to),
            (DocumentStatus::Draft, DocumentStatus::Pending | DocumentStatus::Draft)
                | (
                    DocumentStatus::Rejected,
                    DocumentStatus::Pending | DocumentStatus::Draft
                )
                | (
                    DocumentStatus::Pending,
                    DocumentStatus::Approved | DocumentStatus::Rejected
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_from_draft() {
        let user = Uuid::new_v4();
        let action = LifecycleService::submit(DocumentStatus::Draft, user).unwrap();
        assert_eq!(action.new_status(), DocumentStatus::Pending);
        if let LifecycleAction::Submit { submitted_by, .. } = action {
            assert_eq!(submitted_by, user);
        } else {
            panic!("expected Submit action");
        }
    }

    #[test]
    fn test_resubmit_from_rejected() {
        let action = LifecycleService::submit(DocumentStatus::Rejected, Uuid::new_v4()).unwrap();
        assert_eq!(action.new_status(), DocumentStatus::Pending);
    }

    #[test]
    fn test_submit_from_pending_fails() {
        let result = LifecycleService::submit(DocumentStatus::Pending, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approved_cannot_return_to_pending() {
        let result = LifecycleService::submit(DocumentStatus::Approved, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition {
                from: DocumentStatus::Approved,
                to: DocumentStatus::Pending,
            })
        ));
    }

    #[test]
    fn test_approve_from_pending_as_pm() {
        let action =
            LifecycleService::approve(DocumentStatus::Pending, Role::Pm, Uuid::new_v4()).unwrap();
        assert_eq!(action.new_status(), DocumentStatus::Approved);
    }

    #[test]
    fn test_approve_from_pending_as_admin() {
        let action =
            LifecycleService::approve(DocumentStatus::Pending, Role::Admin, Uuid::new_v4())
                .unwrap();
        assert_eq!(action.new_status(), DocumentStatus::Approved);
    }

    #[test]
    fn test_approve_without_role_fails_closed() {
        for role in [Role::Viewer, Role::Procurement] {
            let result = LifecycleService::approve(DocumentStatus::Pending, role, Uuid::new_v4());
            assert!(matches!(
                result,
                Err(LifecycleError::InsufficientRole { action: "approve", .. })
            ));
        }
    }

    #[test]
    fn test_role_check_precedes_transition_check() {
        // Even on a non-pending document a non-approver sees the role error.
        let result = LifecycleService::approve(DocumentStatus::Draft, Role::Viewer, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(LifecycleError::InsufficientRole { .. })
        ));
    }

    #[test]
    fn test_approve_from_non_pending_fails() {
        let result = LifecycleService::approve(DocumentStatus::Draft, Role::Admin, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_from_pending() {
        let action = LifecycleService::reject(
            DocumentStatus::Pending,
            Role::Admin,
            Uuid::new_v4(),
            Some("over budget".to_string()),
        )
        .unwrap();
        assert_eq!(action.new_status(), DocumentStatus::Rejected);
    }

    #[test]
    fn test_reject_reason_is_optional() {
        let action =
            LifecycleService::reject(DocumentStatus::Pending, Role::Pm, Uuid::new_v4(), None)
                .unwrap();
        if let LifecycleAction::Reject { reason, .. } = action {
            assert!(reason.is_none());
        } else {
            panic!("expected Reject action");
        }
    }

    #[test]
    fn test_reject_without_role_fails() {
        let result = LifecycleService::reject(
            DocumentStatus::Pending,
            Role::Procurement,
            Uuid::new_v4(),
            None,
        );
        assert!(matches!(
            result,
            Err(LifecycleError::InsufficientRole { action: "reject", .. })
        ));
    }

    #[test]
    fn test_save_draft_reverts_rejected() {
        let action = LifecycleService::save_draft(DocumentStatus::Rejected).unwrap();
        assert_eq!(action.new_status(), DocumentStatus::Draft);
    }

    #[test]
    fn test_save_draft_on_approved_fails() {
        assert!(LifecycleService::save_draft(DocumentStatus::Approved).is_err());
    }

    #[test]
    fn test_editable_guard() {
        assert!(LifecycleService::ensure_editable(DocumentStatus::Draft).is_ok());
        assert!(LifecycleService::ensure_editable(DocumentStatus::Rejected).is_ok());
        assert!(matches!(
            LifecycleService::ensure_editable(DocumentStatus::Approved),
            Err(LifecycleError::NotEditable(DocumentStatus::Approved))
        ));
    }

    #[test]
    fn test_deletable_guard() {
        assert!(LifecycleService::ensure_deletable(DocumentStatus::Draft).is_ok());
        assert!(matches!(
            LifecycleService::ensure_deletable(DocumentStatus::Pending),
            Err(LifecycleError::NotDeletable(DocumentStatus::Pending))
        ));
        assert!(LifecycleService::ensure_deletable(DocumentStatus::Approved).is_err());
    }

    #[rstest::rstest]
    #[case(DocumentStatus::Draft, DocumentStatus::Pending, true)]
    #[case(DocumentStatus::Draft, DocumentStatus::Draft, true)]
    #[case(DocumentStatus::Rejected, DocumentStatus::Pending, true)]
    #[case(DocumentStatus::Rejected, DocumentStatus::Draft, true)]
    #[case(DocumentStatus::Pending, DocumentStatus::Approved, true)]
    #[case(DocumentStatus::Pending, DocumentStatus::Rejected, true)]
    #[case(DocumentStatus::Approved, DocumentStatus::Pending, false)]
    #[case(DocumentStatus::Approved, DocumentStatus::Draft, false)]
    #[case(DocumentStatus::Approved, DocumentStatus::Rejected, false)]
    #[case(DocumentStatus::Draft, DocumentStatus::Approved, false)]
    #[case(DocumentStatus::Draft, DocumentStatus::Rejected, false)]
    #[case(DocumentStatus::Rejected, DocumentStatus::Approved, false)]
    fn test_is_valid_transition_table(
        #[case] from: DocumentStatus,
        #[case] to: DocumentStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(LifecycleService::is_valid_transition(from, to), expected);
    }
}
