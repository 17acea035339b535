//! Machine resource types.
//!
//! A machine is a physical resource at one station. Availability is a plain
//! boolean cell flipped as a side effect of starting a station step; the
//! workflow crate also re-derives it from active history rows since the flag
//! alone is not a reliable source of truth.

use serde::{Deserialize, Serialize};

use crate::history::Station;
use crate::rows::RowRecord;

/// Column order of the machines range. Preserved exactly on write.
pub const MACHINE_COLUMNS: [&str; 5] = ["id", "station", "name", "code", "isAvailable"];

/// A physical resource at a station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
	pub id: String,
	/// Station cell, e.g. "washing". See [`Machine::station`].
	pub station: String,
	/// Display name shown when choosing a machine.
	pub name: String,
	/// Short machine code, also recorded on history rows.
	pub code: String,
	pub is_available: bool,
}

impl Machine {
	/// Builds a machine from a mapped machines-range record.
	pub fn from_record(record: &RowRecord) -> Self {
		Self {
			id: record.get("id").to_string(),
			station: record.get("station").to_string(),
			name: record.get("name").to_string(),
			code: record.get("code").to_string(),
			is_available: parse_available(record.get("isAvailable")),
		}
	}

	/// Serializes the machine to a full row in schema column order.
	pub fn to_row(&self) -> Vec<String> {
		let available = if self.is_available { "TRUE" } else { "FALSE" };
		vec![
			self.id.clone(),
			self.station.clone(),
			self.name.clone(),
			self.code.clone(),
			available.to_string(),
		]
	}

	/// The typed station this machine belongs to, when the cell parses.
	pub fn station(&self) -> Option<Station> {
		Station::from_cell(&self.station)
	}
}

/// Parses the isAvailable cell. Sheets renders booleans as "TRUE"/"FALSE";
/// anything other than a recognized truthy token reads as unavailable.
fn parse_available(cell: &str) -> bool {
	let cell = cell.trim();
	cell.eq_ignore_ascii_case("true") || cell == "1"
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rows::map_rows;

	fn machine_header() -> Vec<String> {
		MACHINE_COLUMNS.iter().map(|c| c.to_string()).collect()
	}

	#[test]
	fn availability_parsing() {
		assert!(parse_available("TRUE"));
		assert!(parse_available("true"));
		assert!(parse_available("1"));
		assert!(!parse_available("FALSE"));
		assert!(!parse_available(""));
		assert!(!parse_available("yes"));
	}

	#[test]
	fn row_round_trip() {
		let machine = Machine {
			id: "3".into(),
			station: "washing".into(),
			name: "Washer A".into(),
			code: "WA-01".into(),
			is_available: true,
		};
		let rows = vec![machine.to_row()];
		let mapped = map_rows(&machine_header(), &rows);
		assert_eq!(Machine::from_record(&mapped[0]), machine);
	}

	#[test]
	fn station_cell_resolves_to_typed_station() {
		let machine = Machine {
			station: "Drying".into(),
			..Default::default()
		};
		assert_eq!(machine.station(), Some(Station::Drying));
	}
}
