//! Property-based tests for the lifecycle service.

use proptest::prelude::*;
use uuid::Uuid;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::role::Role;
use crate::lifecycle::service::LifecycleService;
use crate::lifecycle::types::DocumentStatus;

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Draft),
        Just(DocumentStatus::Pending),
        Just(DocumentStatus::Approved),
        Just(DocumentStatus::Rejected),
    ]
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Viewer),
        Just(Role::Procurement),
        Just(Role::Pm),
        Just(Role::Admin),
    ]
}

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every successful transition appears in the valid-transition table.
    #[test]
    fn prop_successful_transitions_are_in_table(from in arb_status(), user in arb_uuid()) {
        if let Ok(action) = LifecycleService::submit(from, user) {
            prop_assert!(LifecycleService::is_valid_transition(from, action.new_status()));
        }
        if let Ok(action) = LifecycleService::approve(from, Role::Admin, user) {
            prop_assert!(LifecycleService::is_valid_transition(from, action.new_status()));
        }
        if let Ok(action) = LifecycleService::reject(from, Role::Admin, user, None) {
            prop_assert!(LifecycleService::is_valid_transition(from, action.new_status()));
        }
    }

    /// Approved documents admit no transition whatsoever.
    #[test]
    fn prop_approved_is_terminal(user in arb_uuid(), role in arb_role()) {
        prop_assert!(LifecycleService::submit(DocumentStatus::Approved, user).is_err());
        prop_assert!(LifecycleService::save_draft(DocumentStatus::Approved).is_err());
        prop_assert!(LifecycleService::approve(DocumentStatus::Approved, role, user).is_err());
        prop_assert!(LifecycleService::reject(DocumentStatus::Approved, role, user, None).is_err());
    }

    /// Roles below pm can never approve or reject, from any status.
    #[test]
    fn prop_non_approvers_always_fail_closed(from in arb_status(), user in arb_uuid()) {
        for role in [Role::Viewer, Role::Procurement] {
            prop_assert!(
                matches!(
                    LifecycleService::approve(from, role, user),
                    Err(LifecycleError::InsufficientRole { .. })
                ),
                "approve with role {:?} did not fail with InsufficientRole",
                role
            );
            prop_assert!(
                matches!(
                    LifecycleService::reject(from, role, user, None),
                    Err(LifecycleError::InsufficientRole { .. })
                ),
                "reject with role {:?} did not fail with InsufficientRole",
                role
            );
        }
    }

    /// Approve and reject succeed exactly when the document is pending and
    /// the actor can decide.
    #[test]
    fn prop_decision_requires_pending_and_role(from in arb_status(), role in arb_role(), user in arb_uuid()) {
        let expected = from == DocumentStatus::Pending && role.can_decide();
        prop_assert_eq!(LifecycleService::approve(from, role, user).is_ok(), expected);
        prop_assert_eq!(LifecycleService::reject(from, role, user, None).is_ok(), expected);
    }

    /// Editability and deletability coincide with draft/rejected.
    #[test]
    fn prop_edit_gate_matches_status(from in arb_status()) {
        let editable = matches!(from, DocumentStatus::Draft | DocumentStatus::Rejected);
        prop_assert_eq!(LifecycleService::ensure_editable(from).is_ok(), editable);
        prop_assert_eq!(LifecycleService::ensure_deletable(from).is_ok(), editable);
    }
}
