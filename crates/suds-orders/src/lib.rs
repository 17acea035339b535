//! Repository layer over the remote tabular store.
//!
//! Each repository composes the retry executor, the transport service, and
//! the row mapper into typed operations. Every public operation returns a
//! [`DataResult`]: transport failures are retried to exhaustion and then
//! surfaced as `Error`, while a range that simply holds no matching rows is
//! `Empty`. No operation panics or throws past its own boundary.

use suds_types::DataResult;

/// Expense ledger repository over the outcome range.
pub mod expenses;
/// Workflow history repository.
pub mod history;
/// Machine inventory repository.
pub mod machines;
/// Order repository over the income range.
pub mod orders;
/// Read-only package catalog, summary, and remark lookups.
pub mod reference;

pub use expenses::ExpenseRepository;
pub use history::HistoryRepository;
pub use machines::MachineRepository;
pub use orders::OrderRepository;
pub use reference::ReferenceRepository;

/// Maps an exhausted retry budget to the caller-facing error value.
pub(crate) fn exhausted<T>(operation: &str, attempts: u32) -> DataResult<T> {
	DataResult::Error(format!("{} failed after {} attempts", operation, attempts))
}
