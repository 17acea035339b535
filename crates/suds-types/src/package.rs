//! Package catalog types.
//!
//! Packages are the price/duration catalog kept on the notes range. They are
//! read-only from this core's perspective and exist mainly to derive an
//! order's weight from its total price.

use serde::{Deserialize, Serialize};

use crate::order::cell_number;
use crate::rows::RowRecord;

/// Column order of the notes range.
pub const PACKAGE_COLUMNS: [&str; 4] = ["name", "price", "duration", "unit"];

/// One price/duration catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDefinition {
	pub name: String,
	/// Price per unit (per kilogram for weight-based packages).
	pub price: String,
	/// Turnaround duration, free text such as "2 days".
	pub duration: String,
	/// Pricing unit, e.g. "kg".
	pub unit: String,
}

impl PackageDefinition {
	/// Builds a package from a mapped notes-range record.
	pub fn from_record(record: &RowRecord) -> Self {
		Self {
			name: record.get("name").to_string(),
			price: record.get("price").to_string(),
			duration: record.get("duration").to_string(),
			unit: record.get("unit").to_string(),
		}
	}

	/// Derives the billed weight for a total price.
	///
	/// Floor division of the total by the per-unit price; zero when the
	/// per-unit price is zero or unparseable.
	pub fn weight_for(&self, total_price: i64) -> i64 {
		let per_unit = cell_number(&self.price);
		if per_unit == 0 {
			0
		} else {
			total_price / per_unit
		}
	}
}
