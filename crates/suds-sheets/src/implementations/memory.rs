//! In-memory tabular store backend.
//!
//! Emulates the remote store's row semantics over plain vectors: open-ended
//! ranges, append-after-content, row-addressed updates, and the convention
//! that trailing empty cells and rows are omitted from responses. Primarily
//! backs the test suites.

use crate::range::RangeRef;
use crate::{SheetsError, SheetsInterface};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store implementation, one growable grid per sheet.
pub struct MemorySheets {
	sheets: Arc<RwLock<HashMap<String, Vec<Vec<String>>>>>,
}

impl MemorySheets {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self {
			sheets: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Seeds a whole sheet at once, replacing any existing content.
	pub async fn seed(&self, sheet: &str, rows: Vec<Vec<String>>) {
		let mut sheets = self.sheets.write().await;
		sheets.insert(sheet.to_string(), rows);
	}

	/// Returns a snapshot of a sheet's full grid.
	pub async fn snapshot(&self, sheet: &str) -> Vec<Vec<String>> {
		let sheets = self.sheets.read().await;
		sheets.get(sheet).cloned().unwrap_or_default()
	}
}

impl Default for MemorySheets {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl SheetsInterface for MemorySheets {
	async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
		let range = RangeRef::parse(range)?;
		let sheets = self.sheets.read().await;
		let Some(grid) = sheets.get(&range.sheet) else {
			return Ok(Vec::new());
		};

		let first = range.start_row.unwrap_or(1) - 1;
		let last = range.end_row.unwrap_or(grid.len()).min(grid.len());

		let mut rows: Vec<Vec<String>> = grid
			.iter()
			.skip(first)
			.take(last.saturating_sub(first))
			.map(|row| project(row, range.start_col, range.end_col))
			.collect();

		// The remote store omits trailing empty rows from responses.
		while rows.last().is_some_and(|row| row.is_empty()) {
			rows.pop();
		}
		Ok(rows)
	}

	async fn append_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), SheetsError> {
		let range = RangeRef::parse(range)?;
		let mut sheets = self.sheets.write().await;
		let grid = sheets.entry(range.sheet).or_default();
		for row in rows {
			let mut cells = vec![String::new(); range.start_col];
			cells.extend(row);
			grid.push(cells);
		}
		Ok(())
	}

	async fn update_values(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), SheetsError> {
		let range = RangeRef::parse(range)?;
		let start_row = range
			.start_row
			.ok_or_else(|| SheetsError::InvalidRange("update requires a row-bounded range".into()))?;

		let mut sheets = self.sheets.write().await;
		let grid = sheets.entry(range.sheet).or_default();

		for (offset, row) in rows.into_iter().enumerate() {
			let index = start_row - 1 + offset;
			if grid.len() <= index {
				grid.resize(index + 1, Vec::new());
			}
			let target = &mut grid[index];
			let width = range.start_col + row.len();
			if target.len() < width {
				target.resize(width, String::new());
			}
			for (col, cell) in row.into_iter().enumerate() {
				target[range.start_col + col] = cell;
			}
		}
		Ok(())
	}
}

/// Projects one stored row onto a column window, trimming trailing empties.
fn project(row: &[String], start_col: usize, end_col: usize) -> Vec<String> {
	let mut cells: Vec<String> = (start_col..=end_col)
		.map(|col| row.get(col).cloned().unwrap_or_default())
		.collect();
	while cells.last().is_some_and(|cell| cell.is_empty()) {
		cells.pop();
	}
	cells
}
