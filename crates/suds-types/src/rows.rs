//! Header-zip row mapping.
//!
//! The remote store returns rectangular blocks of strings. The first row of a
//! range is conventionally a header naming each column; data rows are zipped
//! against it positionally to produce named records. Mapping is total: a
//! short row or an absent column never errors, it defaults to the empty
//! string.

use std::collections::HashMap;

/// A single data row keyed by column name.
///
/// Lookups for columns the row does not carry return `""` so that mapping
/// code never has to branch on row width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
	columns: HashMap<String, String>,
}

impl RowRecord {
	/// Builds a record by zipping a header row with a data row.
	///
	/// Extra data cells beyond the header width are dropped; missing cells
	/// are simply absent and read back as `""`.
	pub fn from_row(header: &[String], row: &[String]) -> Self {
		let columns = header
			.iter()
			.zip(row.iter())
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect();
		Self { columns }
	}

	/// Returns the cell value for a column, or `""` when absent.
	pub fn get(&self, column: &str) -> &str {
		self.columns.get(column).map(String::as_str).unwrap_or("")
	}
}

/// Maps a header row plus data rows into named records.
pub fn map_rows(header: &[String], data: &[Vec<String>]) -> Vec<RowRecord> {
	data.iter()
		.map(|row| RowRecord::from_row(header, row))
		.collect()
}

/// Splits a raw range response into its header row and data rows.
///
/// Returns `None` when the range came back without any rows at all.
pub fn split_header(rows: &[Vec<String>]) -> Option<(&Vec<String>, &[Vec<String>])> {
	let (header, data) = rows.split_first()?;
	Some((header, data))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn strings(cells: &[&str]) -> Vec<String> {
		cells.iter().map(|c| c.to_string()).collect()
	}

	#[test]
	fn short_rows_default_to_empty_string() {
		let header = strings(&["id", "date", "name"]);
		let record = RowRecord::from_row(&header, &strings(&["7"]));
		assert_eq!(record.get("id"), "7");
		assert_eq!(record.get("date"), "");
		assert_eq!(record.get("name"), "");
	}

	#[test]
	fn unknown_column_defaults_to_empty_string() {
		let header = strings(&["id"]);
		let record = RowRecord::from_row(&header, &strings(&["7"]));
		assert_eq!(record.get("missing"), "");
	}

	#[test]
	fn extra_cells_beyond_header_are_dropped() {
		let header = strings(&["id"]);
		let record = RowRecord::from_row(&header, &strings(&["7", "stray"]));
		assert_eq!(record.get("id"), "7");
	}

	#[test]
	fn split_header_on_empty_range() {
		assert!(split_header(&[]).is_none());

		let rows = vec![strings(&["id", "date"])];
		let (header, data) = split_header(&rows).unwrap();
		assert_eq!(header, &strings(&["id", "date"]));
		assert!(data.is_empty());
	}
}
