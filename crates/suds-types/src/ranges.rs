//! Named range identifiers consumed by the repositories.
//!
//! These strings are the wire-level contract with the remote tabular store.
//! Changing any of them silently corrupts existing spreadsheets, so they are
//! kept in one place and never constructed ad hoc.

/// Summary key/value pairs (no header row).
pub const SUMMARY_RANGE: &str = "summary!A2:B";

/// Income/order rows including the header row.
pub const INCOME_RANGE: &str = "income!A1:N";

/// Package catalog including the header row.
pub const NOTES_RANGE: &str = "notes!A1:D";

/// Free-text remark column only, used for "other package" detection.
pub const REMARK_RANGE: &str = "income!I2:I";

/// Order-id column only, used to resolve the next identifier.
pub const ORDER_ID_RANGE: &str = "income!A2:A";

/// Outcome/expense rows including the header row.
pub const OUTCOME_RANGE: &str = "outcome!A1:F";

/// Workflow history rows including the header row.
pub const HISTORY_RANGE: &str = "history!A1:N";

/// Machine inventory rows including the header row.
pub const MACHINES_RANGE: &str = "machines!A1:E";

/// Builds the range addressing a single income data row.
///
/// `sheet_row` is the 1-based spreadsheet row number (the header is row 1).
pub fn income_row_range(sheet_row: usize) -> String {
	format!("income!A{}:N{}", sheet_row, sheet_row)
}

/// Builds the range addressing a single history data row.
pub fn history_row_range(sheet_row: usize) -> String {
	format!("history!A{}:N{}", sheet_row, sheet_row)
}

/// Builds the range addressing a single machine data row.
pub fn machine_row_range(sheet_row: usize) -> String {
	format!("machines!A{}:E{}", sheet_row, sheet_row)
}
