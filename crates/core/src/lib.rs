//! Core business logic for Procura.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `costing` - Line-item costing and VAT-inclusive document totals
//! - `lifecycle` - Document approval lifecycle state machine
//! - `budget` - Project budget reconciliation

pub mod budget;
pub mod costing;
pub mod lifecycle;
