//! Parsing of A1-notation range identifiers.
//!
//! Ranges look like `income!A1:N`, `income!A2:A`, or `income!A5:N5`: a sheet
//! name, a start cell, and an end cell whose row may be open-ended. The
//! in-memory backend needs the parsed form to emulate the remote store; the
//! HTTP backend passes the raw string through untouched.

use crate::SheetsError;

/// A parsed A1-notation range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
	/// Sheet (tab) name.
	pub sheet: String,
	/// Zero-based start column index.
	pub start_col: usize,
	/// One-based start row; `None` when unbounded.
	pub start_row: Option<usize>,
	/// Zero-based end column index, inclusive.
	pub end_col: usize,
	/// One-based end row, inclusive; `None` when open-ended.
	pub end_row: Option<usize>,
}

impl RangeRef {
	/// Parses an identifier of the form `sheet!A1:N5`.
	pub fn parse(range: &str) -> Result<Self, SheetsError> {
		let invalid = || SheetsError::InvalidRange(range.to_string());

		let (sheet, cells) = range.split_once('!').ok_or_else(invalid)?;
		if sheet.is_empty() {
			return Err(invalid());
		}
		let (start, end) = cells.split_once(':').ok_or_else(invalid)?;

		let (start_col, start_row) = parse_cell(start).ok_or_else(invalid)?;
		let (end_col, end_row) = parse_cell(end).ok_or_else(invalid)?;
		if end_col < start_col {
			return Err(invalid());
		}

		Ok(Self {
			sheet: sheet.to_string(),
			start_col,
			start_row,
			end_col,
			end_row,
		})
	}
}

/// Splits a cell reference like `A2` into column index and optional row.
fn parse_cell(cell: &str) -> Option<(usize, Option<usize>)> {
	let letters: String = cell.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
	let digits = &cell[letters.len()..];
	if letters.is_empty() {
		return None;
	}

	let mut col = 0usize;
	for c in letters.chars() {
		col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
	}

	let row = if digits.is_empty() {
		None
	} else {
		let row: usize = digits.parse().ok()?;
		if row == 0 {
			return None;
		}
		Some(row)
	};

	Some((col - 1, row))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_open_ended_column_range() {
		let range = RangeRef::parse("income!A1:N").unwrap();
		assert_eq!(range.sheet, "income");
		assert_eq!(range.start_col, 0);
		assert_eq!(range.start_row, Some(1));
		assert_eq!(range.end_col, 13);
		assert_eq!(range.end_row, None);
	}

	#[test]
	fn parses_single_column_range() {
		let range = RangeRef::parse("income!A2:A").unwrap();
		assert_eq!(range.start_col, 0);
		assert_eq!(range.end_col, 0);
		assert_eq!(range.start_row, Some(2));
		assert_eq!(range.end_row, None);
	}

	#[test]
	fn parses_bounded_single_row() {
		let range = RangeRef::parse("income!A5:N5").unwrap();
		assert_eq!(range.start_row, Some(5));
		assert_eq!(range.end_row, Some(5));
	}

	#[test]
	fn parses_multi_letter_columns() {
		let (col, row) = parse_cell("AB3").unwrap();
		assert_eq!(col, 27);
		assert_eq!(row, Some(3));
	}

	#[test]
	fn rejects_malformed_ranges() {
		assert!(RangeRef::parse("income").is_err());
		assert!(RangeRef::parse("!A1:N").is_err());
		assert!(RangeRef::parse("income!A1").is_err());
		assert!(RangeRef::parse("income!1:N").is_err());
		assert!(RangeRef::parse("income!N1:A").is_err());
		assert!(RangeRef::parse("income!A0:N").is_err());
	}
}
