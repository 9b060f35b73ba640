//! Shared types, errors, and configuration for Procura.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT claims validation
//! - The outbound LINE notification client

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod notify;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use notify::{LineNotifyService, NotifyPayload};
