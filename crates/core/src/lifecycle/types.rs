//! Lifecycle domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Document status in the approval lifecycle.
///
/// Valid transitions:
/// - Draft → Pending (submit)
/// - Rejected → Pending (edit and resubmit)
/// - Rejected → Draft (edit and save as draft)
/// - Pending → Approved (approve, admin/pm only)
/// - Pending → Rejected (reject, admin/pm only)
///
/// Approved has no outbound transitions; approval is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being drafted; fully editable.
    Draft,
    /// Submitted and awaiting an approval decision.
    Pending,
    /// Approved; contributes to budget aggregates and is frozen.
    Approved,
    /// Rejected; editable again and may be resubmitted.
    Rejected,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the document's fields and items may be modified.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if the document may be deleted.
    ///
    /// Same gate as editing: pending and approved documents are retained.
    #[must_use]
    pub const fn is_deletable(self) -> bool {
        self.is_editable()
    }

    /// Returns true only for approved documents, the sole status that
    /// contributes to budget aggregates.
    #[must_use]
    pub const fn counts_toward_budget(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle action representing a validated transition with audit data.
#[derive(Debug, Clone)]
pub enum LifecycleAction {
    /// Save (or revert) a document as a draft.
    SaveDraft {
        /// The resulting status (Draft).
        new_status: DocumentStatus,
    },
    /// Submit a document for approval.
    Submit {
        /// The resulting status (Pending).
        new_status: DocumentStatus,
        /// The user who submitted the document.
        submitted_by: Uuid,
        /// When the document was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a pending document.
    Approve {
        /// The resulting status (Approved).
        new_status: DocumentStatus,
        /// The user who approved the document.
        approved_by: Uuid,
        /// When the document was approved.
        approved_at: DateTime<Utc>,
    },
    /// Reject a pending document.
    Reject {
        /// The resulting status (Rejected).
        new_status: DocumentStatus,
        /// The user who rejected the document.
        rejected_by: Uuid,
        /// When the document was rejected.
        rejected_at: DateTime<Utc>,
        /// Optional free-text reason recorded with the decision.
        reason: Option<String>,
    },
}

impl LifecycleAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> DocumentStatus {
        match self {
            Self::SaveDraft { new_status }
            | Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(DocumentStatus::Draft.as_str(), "draft");
        assert_eq!(DocumentStatus::Pending.as_str(), "pending");
        assert_eq!(DocumentStatus::Approved.as_str(), "approved");
        assert_eq!(DocumentStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            DocumentStatus::parse("draft"),
            Some(DocumentStatus::Draft)
        );
        assert_eq!(
            DocumentStatus::parse("APPROVED"),
            Some(DocumentStatus::Approved)
        );
        assert_eq!(DocumentStatus::parse("voided"), None);
    }

    #[test]
    fn test_editable_and_deletable() {
        assert!(DocumentStatus::Draft.is_editable());
        assert!(DocumentStatus::Rejected.is_editable());
        assert!(!DocumentStatus::Pending.is_editable());
        assert!(!DocumentStatus::Approved.is_editable());

        assert!(DocumentStatus::Draft.is_deletable());
        assert!(DocumentStatus::Rejected.is_deletable());
        assert!(!DocumentStatus::Pending.is_deletable());
        assert!(!DocumentStatus::Approved.is_deletable());
    }

    #[test]
    fn test_only_approved_counts_toward_budget() {
        assert!(DocumentStatus::Approved.counts_toward_budget());
        assert!(!DocumentStatus::Draft.counts_toward_budget());
        assert!(!DocumentStatus::Pending.counts_toward_budget());
        assert!(!DocumentStatus::Rejected.counts_toward_budget());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", DocumentStatus::Pending), "pending");
    }
}
