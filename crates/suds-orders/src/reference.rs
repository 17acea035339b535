//! Read-only reference lookups.
//!
//! The package catalog, the dashboard summary pairs, and the free-text
//! remark column are consumed for display and derivation only; nothing here
//! writes.

use std::sync::Arc;

use suds_retry::RetryPolicy;
use suds_sheets::SheetsService;
use suds_types::{
	map_rows, split_header, DataResult, PackageDefinition, NOTES_RANGE, REMARK_RANGE, SUMMARY_RANGE,
};

use crate::exhausted;

/// Read-only operations over the notes, summary, and remark ranges.
pub struct ReferenceRepository {
	sheets: Arc<SheetsService>,
	retry: RetryPolicy,
}

impl ReferenceRepository {
	/// Creates a repository over the given transport.
	pub fn new(sheets: Arc<SheetsService>, retry: RetryPolicy) -> Self {
		Self { sheets, retry }
	}

	/// Reads the package catalog.
	pub async fn read_packages(&self) -> DataResult<Vec<PackageDefinition>> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(NOTES_RANGE)).await else {
			return exhausted("read packages", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let packages: Vec<PackageDefinition> = map_rows(header, data)
			.iter()
			.map(PackageDefinition::from_record)
			.collect();
		if packages.is_empty() {
			return DataResult::Empty;
		}
		DataResult::Success(packages)
	}

	/// Finds one package by name, case-insensitively.
	pub async fn find_package(&self, name: &str) -> DataResult<PackageDefinition> {
		match self.read_packages().await {
			DataResult::Success(packages) => packages
				.into_iter()
				.find(|package| package.name.eq_ignore_ascii_case(name))
				.into(),
			DataResult::Empty => DataResult::Empty,
			DataResult::Error(message) => DataResult::Error(message),
		}
	}

	/// Reads the summary key/value pairs. The range has no header row; rows
	/// narrower than two cells read as empty values.
	pub async fn read_summary(&self) -> DataResult<Vec<(String, String)>> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(SUMMARY_RANGE)).await else {
			return exhausted("read summary", self.retry.attempts);
		};

		if rows.is_empty() {
			return DataResult::Empty;
		}
		let pairs = rows
			.into_iter()
			.map(|row| {
				let mut cells = row.into_iter();
				(
					cells.next().unwrap_or_default(),
					cells.next().unwrap_or_default(),
				)
			})
			.collect();
		DataResult::Success(pairs)
	}

	/// Reads the remark column, used to detect "other package" orders whose
	/// package lives in the free text instead of the catalog.
	pub async fn read_remarks(&self) -> DataResult<Vec<String>> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(REMARK_RANGE)).await else {
			return exhausted("read remarks", self.retry.attempts);
		};

		if rows.is_empty() {
			return DataResult::Empty;
		}
		let remarks = rows
			.into_iter()
			.map(|row| row.into_iter().next().unwrap_or_default())
			.collect();
		DataResult::Success(remarks)
	}
}
