//! Result taxonomy surfaced by every repository operation.
//!
//! Remote reads distinguish three outcomes: data came back, the call
//! succeeded but matched nothing, and the call failed after the retry budget
//! was exhausted. Callers must branch on all three; `Empty` is a valid
//! response, not a failure.

use serde::{Deserialize, Serialize};

/// Outcome of a repository operation against the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataResult<T> {
	/// The operation succeeded and produced data.
	Success(T),
	/// The operation succeeded but there was nothing to return.
	Empty,
	/// The operation failed after exhausting its retry budget.
	Error(String),
}

impl<T> DataResult<T> {
	/// Returns true for the `Success` variant.
	pub fn is_success(&self) -> bool {
		matches!(self, DataResult::Success(_))
	}

	/// Returns true for the `Empty` variant.
	pub fn is_empty(&self) -> bool {
		matches!(self, DataResult::Empty)
	}

	/// Returns true for the `Error` variant.
	pub fn is_error(&self) -> bool {
		matches!(self, DataResult::Error(_))
	}

	/// Converts to an `Option`, discarding the empty/error distinction.
	pub fn ok(self) -> Option<T> {
		match self {
			DataResult::Success(data) => Some(data),
			_ => None,
		}
	}

	/// Maps the success value, leaving `Empty` and `Error` untouched.
	pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DataResult<U> {
		match self {
			DataResult::Success(data) => DataResult::Success(f(data)),
			DataResult::Empty => DataResult::Empty,
			DataResult::Error(message) => DataResult::Error(message),
		}
	}
}

impl<T> From<Option<T>> for DataResult<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(data) => DataResult::Success(data),
			None => DataResult::Empty,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn map_preserves_non_success_variants() {
		let success: DataResult<i32> = DataResult::Success(2);
		assert_eq!(success.map(|n| n * 10), DataResult::Success(20));

		let empty: DataResult<i32> = DataResult::Empty;
		assert_eq!(empty.map(|n| n * 10), DataResult::Empty);

		let error: DataResult<i32> = DataResult::Error("boom".into());
		assert_eq!(error.map(|n| n * 10), DataResult::Error("boom".into()));
	}

	#[test]
	fn ok_collapses_empty_and_error() {
		assert_eq!(DataResult::Success(1).ok(), Some(1));
		assert_eq!(DataResult::<i32>::Empty.ok(), None);
		assert_eq!(DataResult::<i32>::Error("x".into()).ok(), None);
	}
}
