//! Document approval lifecycle for Procura.
//!
//! Purchase orders, work contracts, and variation orders all share one state
//! machine: draft → pending → approved/rejected, with rejected documents
//! editable and resubmittable. The approve/reject role guard is enforced
//! here, at the point of state mutation, and fails closed.
//!
//! # Modules
//!
//! - `types` - Document status and lifecycle action types
//! - `role` - Actor roles and the approval gate
//! - `error` - Lifecycle-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod role;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LifecycleError;
pub use role::Role;
pub use service::LifecycleService;
pub use types::{DocumentStatus, LifecycleAction};
