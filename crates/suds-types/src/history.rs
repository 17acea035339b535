//! Workflow history types.
//!
//! Each order owns exactly one history row that tracks its progress through
//! the physical stations. A station is considered started once its timestamp
//! cell is non-blank; stations complete in a strict left-to-right sequence,
//! so the order's current station is always the first one whose timestamp is
//! still empty. State is derived from the row on every read, never stored as
//! a separate field.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rows::RowRecord;

/// Column order of the history range. Preserved exactly on write.
pub const HISTORY_COLUMNS: [&str; 14] = [
	"orderId",
	"status",
	"washing_date",
	"washing_machine",
	"drying_date",
	"drying_machine",
	"ironing_date",
	"ironing_machine",
	"folding_date",
	"folding_machine",
	"packing_date",
	"packing_machine",
	"ready_date",
	"completed_date",
];

/// One stage of the order lifecycle.
///
/// `Pending` and `Completed` are the boundary states; the six stations in
/// between each carry a timestamp on the history row. The five physical
/// stations additionally record which machine was claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Station {
	Pending,
	Washing,
	Drying,
	Ironing,
	Folding,
	Packing,
	Ready,
	Completed,
}

impl Station {
	/// The six timestamped stations, in processing order.
	pub const PROCESS: [Station; 6] = [
		Station::Washing,
		Station::Drying,
		Station::Ironing,
		Station::Folding,
		Station::Packing,
		Station::Ready,
	];

	/// The next stage in the sequence. Terminal for `Completed`.
	pub fn next(&self) -> Option<Station> {
		match self {
			Station::Pending => Some(Station::Washing),
			Station::Washing => Some(Station::Drying),
			Station::Drying => Some(Station::Ironing),
			Station::Ironing => Some(Station::Folding),
			Station::Folding => Some(Station::Packing),
			Station::Packing => Some(Station::Ready),
			Station::Ready => Some(Station::Completed),
			Station::Completed => None,
		}
	}

	/// Display label, also used as the history status cell.
	pub fn label(&self) -> &'static str {
		match self {
			Station::Pending => "Pending",
			Station::Washing => "Washing",
			Station::Drying => "Drying",
			Station::Ironing => "Ironing",
			Station::Folding => "Folding",
			Station::Packing => "Packing",
			Station::Ready => "Ready",
			Station::Completed => "Completed",
		}
	}

	/// Parses a station cell case-insensitively.
	pub fn from_cell(cell: &str) -> Option<Station> {
		let cell = cell.trim();
		[
			Station::Pending,
			Station::Washing,
			Station::Drying,
			Station::Ironing,
			Station::Folding,
			Station::Packing,
			Station::Ready,
			Station::Completed,
		]
		.into_iter()
		.find(|station| cell.eq_ignore_ascii_case(station.label()))
	}

	/// Whether this station claims a machine when started.
	pub fn uses_machine(&self) -> bool {
		matches!(
			self,
			Station::Washing
				| Station::Drying
				| Station::Ironing
				| Station::Folding
				| Station::Packing
		)
	}
}

impl fmt::Display for Station {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

/// The per-station timestamp/machine projection of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
	pub order_id: String,
	/// Status label, kept in sync with the most recently started station.
	pub status: String,
	pub washing_date: String,
	pub washing_machine: String,
	pub drying_date: String,
	pub drying_machine: String,
	pub ironing_date: String,
	pub ironing_machine: String,
	pub folding_date: String,
	pub folding_machine: String,
	pub packing_date: String,
	pub packing_machine: String,
	pub ready_date: String,
	pub completed_date: String,
}

impl HistoryRecord {
	/// A fresh record for a newly appended order. All station fields start
	/// empty; the status label starts at `Pending`.
	pub fn new(order_id: impl Into<String>) -> Self {
		Self {
			order_id: order_id.into(),
			status: Station::Pending.label().to_string(),
			..Default::default()
		}
	}

	/// Builds a record from a mapped history row.
	pub fn from_record(record: &RowRecord) -> Self {
		Self {
			order_id: record.get("orderId").to_string(),
			status: record.get("status").to_string(),
			washing_date: record.get("washing_date").to_string(),
			washing_machine: record.get("washing_machine").to_string(),
			drying_date: record.get("drying_date").to_string(),
			drying_machine: record.get("drying_machine").to_string(),
			ironing_date: record.get("ironing_date").to_string(),
			ironing_machine: record.get("ironing_machine").to_string(),
			folding_date: record.get("folding_date").to_string(),
			folding_machine: record.get("folding_machine").to_string(),
			packing_date: record.get("packing_date").to_string(),
			packing_machine: record.get("packing_machine").to_string(),
			ready_date: record.get("ready_date").to_string(),
			completed_date: record.get("completed_date").to_string(),
		}
	}

	/// Serializes the record to a full history row in schema column order.
	pub fn to_row(&self) -> Vec<String> {
		vec![
			self.order_id.clone(),
			self.status.clone(),
			self.washing_date.clone(),
			self.washing_machine.clone(),
			self.drying_date.clone(),
			self.drying_machine.clone(),
			self.ironing_date.clone(),
			self.ironing_machine.clone(),
			self.folding_date.clone(),
			self.folding_machine.clone(),
			self.packing_date.clone(),
			self.packing_machine.clone(),
			self.ready_date.clone(),
			self.completed_date.clone(),
		]
	}

	/// Timestamp cell for a station. Empty string for `Pending`.
	pub fn station_date(&self, station: Station) -> &str {
		match station {
			Station::Pending => "",
			Station::Washing => &self.washing_date,
			Station::Drying => &self.drying_date,
			Station::Ironing => &self.ironing_date,
			Station::Folding => &self.folding_date,
			Station::Packing => &self.packing_date,
			Station::Ready => &self.ready_date,
			Station::Completed => &self.completed_date,
		}
	}

	/// Machine cell for a station, when that station claims one.
	pub fn station_machine(&self, station: Station) -> Option<&str> {
		match station {
			Station::Washing => Some(&self.washing_machine),
			Station::Drying => Some(&self.drying_machine),
			Station::Ironing => Some(&self.ironing_machine),
			Station::Folding => Some(&self.folding_machine),
			Station::Packing => Some(&self.packing_machine),
			_ => None,
		}
	}

	/// Writes a station's timestamp (and machine name when applicable) and
	/// advances the status label to the station.
	pub fn start_station(&mut self, station: Station, timestamp: &str, machine_name: &str) {
		match station {
			Station::Pending => return,
			Station::Washing => {
				self.washing_date = timestamp.to_string();
				self.washing_machine = machine_name.to_string();
			}
			Station::Drying => {
				self.drying_date = timestamp.to_string();
				self.drying_machine = machine_name.to_string();
			}
			Station::Ironing => {
				self.ironing_date = timestamp.to_string();
				self.ironing_machine = machine_name.to_string();
			}
			Station::Folding => {
				self.folding_date = timestamp.to_string();
				self.folding_machine = machine_name.to_string();
			}
			Station::Packing => {
				self.packing_date = timestamp.to_string();
				self.packing_machine = machine_name.to_string();
			}
			Station::Ready => self.ready_date = timestamp.to_string(),
			Station::Completed => self.completed_date = timestamp.to_string(),
		}
		self.status = station.label().to_string();
	}

	/// The first station in sequence whose timestamp is still blank, or
	/// `Completed` when every station has been started.
	pub fn current_station(&self) -> Station {
		if !self.completed_date.trim().is_empty() {
			return Station::Completed;
		}
		Station::PROCESS
			.into_iter()
			.find(|station| self.station_date(*station).trim().is_empty())
			.unwrap_or(Station::Completed)
	}

	/// The most recently started stage, `Pending` when nothing has run yet.
	pub fn last_started(&self) -> Station {
		match self.current_station() {
			Station::Washing => Station::Pending,
			Station::Completed if !self.completed_date.trim().is_empty() => Station::Completed,
			// All six timestamps set but not yet marked completed.
			Station::Completed => Station::Ready,
			current => Station::PROCESS
				.into_iter()
				.take_while(|station| *station != current)
				.last()
				.unwrap_or(Station::Pending),
		}
	}

	/// Display label of the last completed stage, used for grouping.
	pub fn group_status(&self) -> &'static str {
		self.last_started().label()
	}

	/// Whether the record has reached its terminal state. Only the
	/// completed timestamp is terminal; an order with every station started
	/// but not yet marked completed can still take the final transition.
	pub fn is_completed(&self) -> bool {
		!self.completed_date.trim().is_empty()
	}
}
