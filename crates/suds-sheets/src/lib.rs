//! Transport layer for the remote tabular store.
//!
//! This module provides the thin abstraction every repository is built on:
//! given a logical range identifier, fetch or write a rectangular block of
//! string cells. Backends are pluggable; the HTTP implementation talks to a
//! Sheets-style REST API, the in-memory implementation backs the test
//! suites.
//!
//! The transport makes no transactional promises. Concurrent writers may
//! race; serialization, where desired, is the caller's concern.

use async_trait::async_trait;
use thiserror::Error;

pub mod range;

/// Re-export implementations
pub mod implementations {
	pub mod http;
	pub mod memory;
}

/// Errors that can occur during transport operations.
#[derive(Debug, Error)]
pub enum SheetsError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error returned by the remote API as a non-success status.
	#[error("Remote API error ({status}): {message}")]
	Status { status: u16, message: String },
	/// Error that occurs while decoding a response payload.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs when the client is misconfigured.
	#[error("Configuration error: {0}")]
	Configuration(String),
	/// Error that occurs when a range identifier cannot be parsed.
	#[error("Invalid range: {0}")]
	InvalidRange(String),
}

/// Trait defining the low-level interface for tabular store backends.
///
/// Rows are ordered sequences of string cells. `get_values` returns an empty
/// sequence, not an error, when the range has no data.
#[async_trait]
pub trait SheetsInterface: Send + Sync {
	/// Fetches the rectangular block of cells addressed by `range`.
	async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError>;

	/// Appends rows after the existing content of `range` without
	/// overwriting. Callers supply complete rows in schema column order.
	async fn append_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), SheetsError>;

	/// Overwrites the contiguous rows addressed by `range`. Callers supply
	/// full replacement rows, not partial patches.
	async fn update_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), SheetsError>;
}

/// High-level handle over a transport backend.
///
/// Adds single-row conveniences and request logging on top of the raw
/// interface. Repositories share one service behind an `Arc`.
pub struct SheetsService {
	backend: Box<dyn SheetsInterface>,
}

impl SheetsService {
	/// Creates a new service over the given backend.
	pub fn new(backend: Box<dyn SheetsInterface>) -> Self {
		Self { backend }
	}

	/// Fetches all rows of a range. Empty ranges yield an empty vec.
	pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
		tracing::debug!(range, "fetching range");
		self.backend.get_values(range).await
	}

	/// Appends a single row to a range.
	pub async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), SheetsError> {
		tracing::debug!(range, "appending row");
		self.backend.append_values(range, vec![row]).await
	}

	/// Overwrites a single row addressed by `range`.
	pub async fn update_row(&self, range: &str, row: Vec<String>) -> Result<(), SheetsError> {
		tracing::debug!(range, "updating row");
		self.backend.update_values(range, vec![row]).await
	}
}
