//! Database enum mappings.

use procura_core::lifecycle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Awaiting an approval decision.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved; frozen and counted in budget aggregates.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected; editable and resubmittable.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<lifecycle::DocumentStatus> for DocumentStatus {
    fn from(status: lifecycle::DocumentStatus) -> Self {
        match status {
            lifecycle::DocumentStatus::Draft => Self::Draft,
            lifecycle::DocumentStatus::Pending => Self::Pending,
            lifecycle::DocumentStatus::Approved => Self::Approved,
            lifecycle::DocumentStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<DocumentStatus> for lifecycle::DocumentStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Draft => Self::Draft,
            DocumentStatus::Pending => Self::Pending,
            DocumentStatus::Approved => Self::Approved,
            DocumentStatus::Rejected => Self::Rejected,
        }
    }
}

/// Partition tag separating in-budget documents from supplementary ones.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_scope")]
#[serde(rename_all = "lowercase")]
pub enum DocumentScope {
    /// Charged against the project budget.
    #[sea_orm(string_value = "project")]
    Project,
    /// Supplementary / out-of-budget.
    #[sea_orm(string_value = "extra")]
    Extra,
}

/// Project status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Actively running.
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Finished.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Paused.
    #[sea_orm(string_value = "on_hold")]
    OnHold,
}

/// User role.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Read-only.
    #[sea_orm(string_value = "viewer")]
    Viewer,
    /// Authors documents.
    #[sea_orm(string_value = "procurement")]
    Procurement,
    /// Project manager; approves and rejects.
    #[sea_orm(string_value = "pm")]
    Pm,
    /// Full administration.
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<lifecycle::Role> for UserRole {
    fn from(role: lifecycle::Role) -> Self {
        match role {
            lifecycle::Role::Viewer => Self::Viewer,
            lifecycle::Role::Procurement => Self::Procurement,
            lifecycle::Role::Pm => Self::Pm,
            lifecycle::Role::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for lifecycle::Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Viewer => Self::Viewer,
            UserRole::Procurement => Self::Procurement,
            UserRole::Pm => Self::Pm,
            UserRole::Admin => Self::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion_roundtrip() {
        for status in [
            lifecycle::DocumentStatus::Draft,
            lifecycle::DocumentStatus::Pending,
            lifecycle::DocumentStatus::Approved,
            lifecycle::DocumentStatus::Rejected,
        ] {
            let db: DocumentStatus = status.into();
            let back: lifecycle::DocumentStatus = db.into();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_role_conversion_roundtrip() {
        for role in [
            lifecycle::Role::Viewer,
            lifecycle::Role::Procurement,
            lifecycle::Role::Pm,
            lifecycle::Role::Admin,
        ] {
            let db: UserRole = role.into();
            let back: lifecycle::Role = db.into();
            assert_eq!(back, role);
        }
    }
}
