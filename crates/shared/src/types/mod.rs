//! Shared domain types.

pub mod id;
pub mod pagination;

pub use id::{ProjectId, PurchaseOrderId, UserId, VariationOrderId, VendorId, WorkContractId};
pub use pagination::{PageMeta, PageRequest, PageResponse};
