//! Common types module for the suds back-office system.
//!
//! This module defines the core data types and structures shared across the
//! spreadsheet-backed persistence and workflow crates. It provides a
//! centralized location for domain entities, the result taxonomy surfaced to
//! callers, and the row schemas that form the wire contract with the remote
//! tabular store.

/// Expense ledger types for the outcome sheet.
pub mod expense;
/// Workflow history types including the station sequence.
pub mod history;
/// Machine resource types for station processing.
pub mod machine;
/// Order types and payment enums.
pub mod order;
/// Package catalog types.
pub mod package;
/// Named range identifiers for the remote store.
pub mod ranges;
/// The Success/Empty/Error result taxonomy.
pub mod result;
/// Header-zip row mapping between sheet rows and named records.
pub mod rows;

// Re-export all types for convenient access
pub use expense::*;
pub use history::*;
pub use machine::*;
pub use order::*;
pub use package::*;
pub use ranges::*;
pub use result::*;
pub use rows::*;
