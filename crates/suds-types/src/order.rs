//! Order types for the laundry back-office.
//!
//! An order is one laundry job, stored as a single row of the income range.
//! Every field is kept as the raw cell string; numeric interpretation happens
//! at the point of use with parse-or-default semantics so one malformed row
//! can never abort an entire read.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rows::RowRecord;

/// Column order of the income range. This ordering is a compatibility
/// contract with existing spreadsheets and must be preserved exactly on
/// write.
pub const INCOME_COLUMNS: [&str; 12] = [
	"orderId",
	"date",
	"name",
	"weight",
	"priceKg",
	"totalPrice",
	"paidStatus",
	"packageName",
	"remark",
	"paymentMethod",
	"phoneNumber",
	"dueDate",
];

/// Represents one laundry job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique, numeric-looking, monotonically assigned identifier.
	pub order_id: String,
	/// Order date in the configured date format.
	pub date: String,
	/// Customer name.
	pub name: String,
	/// Weight in kilograms, derived from price and per-unit price.
	pub weight: String,
	/// Price per kilogram for the chosen package.
	pub price_kg: String,
	/// Total price of the job.
	pub total_price: String,
	/// Payment status cell, canonically "paid" or "unpaid".
	pub paid_status: String,
	/// Name of the package this job was booked under.
	pub package_name: String,
	/// Free-text remark.
	pub remark: String,
	/// Payment method cell, canonically "qris" or "cash".
	pub payment_method: String,
	/// Customer phone number.
	pub phone_number: String,
	/// Due date in the configured date format.
	pub due_date: String,
}

impl Order {
	/// Builds an order from a mapped income record.
	pub fn from_record(record: &RowRecord) -> Self {
		Self {
			order_id: record.get("orderId").to_string(),
			date: record.get("date").to_string(),
			name: record.get("name").to_string(),
			weight: record.get("weight").to_string(),
			price_kg: record.get("priceKg").to_string(),
			total_price: record.get("totalPrice").to_string(),
			paid_status: record.get("paidStatus").to_string(),
			package_name: record.get("packageName").to_string(),
			remark: record.get("remark").to_string(),
			payment_method: record.get("paymentMethod").to_string(),
			phone_number: record.get("phoneNumber").to_string(),
			due_date: record.get("dueDate").to_string(),
		}
	}

	/// Serializes the order to a full income row in schema column order.
	pub fn to_row(&self) -> Vec<String> {
		vec![
			self.order_id.clone(),
			self.date.clone(),
			self.name.clone(),
			self.weight.clone(),
			self.price_kg.clone(),
			self.total_price.clone(),
			self.paid_status.clone(),
			self.package_name.clone(),
			self.remark.clone(),
			self.payment_method.clone(),
			self.phone_number.clone(),
			self.due_date.clone(),
		]
	}

	/// Payment status with the empty cell defaulting to unpaid.
	pub fn payment_status(&self) -> PaymentStatus {
		PaymentStatus::from_cell(&self.paid_status)
	}

	/// Payment method, `None` when the cell holds neither known token.
	pub fn payment_method(&self) -> Option<PaymentMethod> {
		PaymentMethod::from_cell(&self.payment_method)
	}
}

/// Parses a cell as a non-negative integer, defaulting to zero.
///
/// The store keeps everything as user-entered text, so numeric cells are
/// parsed leniently at the point of use.
pub fn cell_number(cell: &str) -> i64 {
	cell.trim().parse().unwrap_or(0)
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
	Paid,
	Unpaid,
}

impl PaymentStatus {
	/// Parses the paidStatus cell. Matching is case-insensitive and the
	/// empty cell is treated as unpaid.
	pub fn from_cell(cell: &str) -> Self {
		if cell.trim().eq_ignore_ascii_case("paid") {
			PaymentStatus::Paid
		} else {
			PaymentStatus::Unpaid
		}
	}

	/// The canonical cell token for this status.
	pub fn as_cell(&self) -> &'static str {
		match self {
			PaymentStatus::Paid => "paid",
			PaymentStatus::Unpaid => "unpaid",
		}
	}
}

impl fmt::Display for PaymentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_cell())
	}
}

/// Payment method of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
	Qris,
	Cash,
}

impl PaymentMethod {
	/// Parses the paymentMethod cell case-insensitively.
	pub fn from_cell(cell: &str) -> Option<Self> {
		let cell = cell.trim();
		if cell.eq_ignore_ascii_case("qris") {
			Some(PaymentMethod::Qris)
		} else if cell.eq_ignore_ascii_case("cash") {
			Some(PaymentMethod::Cash)
		} else {
			None
		}
	}

	/// The canonical cell token for this method.
	pub fn as_cell(&self) -> &'static str {
		match self {
			PaymentMethod::Qris => "qris",
			PaymentMethod::Cash => "cash",
		}
	}
}

impl fmt::Display for PaymentMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_cell())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rows::map_rows;

	fn strings(cells: &[&str]) -> Vec<String> {
		cells.iter().map(|c| c.to_string()).collect()
	}

	fn income_header() -> Vec<String> {
		INCOME_COLUMNS.iter().map(|c| c.to_string()).collect()
	}

	#[test]
	fn row_round_trip() {
		let order = Order {
			order_id: "42".into(),
			date: "2025-07-01".into(),
			name: "Budi".into(),
			weight: "3".into(),
			price_kg: "7000".into(),
			total_price: "21000".into(),
			paid_status: "paid".into(),
			package_name: "Express".into(),
			remark: "no softener".into(),
			payment_method: "qris".into(),
			phone_number: "0812".into(),
			due_date: "2025-07-03".into(),
		};

		let rows = vec![order.to_row()];
		let records = map_rows(&income_header(), &rows);
		assert_eq!(Order::from_record(&records[0]), order);
	}

	#[test]
	fn short_row_maps_with_empty_defaults() {
		let rows = vec![strings(&["7", "2025-07-01"])];
		let records = map_rows(&income_header(), &rows);
		let order = Order::from_record(&records[0]);
		assert_eq!(order.order_id, "7");
		assert_eq!(order.date, "2025-07-01");
		assert_eq!(order.paid_status, "");
		assert_eq!(order.payment_status(), PaymentStatus::Unpaid);
	}

	#[test]
	fn payment_parsing_is_case_insensitive() {
		assert_eq!(PaymentStatus::from_cell("PAID"), PaymentStatus::Paid);
		assert_eq!(PaymentStatus::from_cell(""), PaymentStatus::Unpaid);
		assert_eq!(PaymentStatus::from_cell("partial"), PaymentStatus::Unpaid);
		assert_eq!(PaymentMethod::from_cell("QRIS"), Some(PaymentMethod::Qris));
		assert_eq!(PaymentMethod::from_cell("Cash"), Some(PaymentMethod::Cash));
		assert_eq!(PaymentMethod::from_cell("transfer"), None);
	}

	#[test]
	fn cell_number_defaults_to_zero() {
		assert_eq!(cell_number("21000"), 21000);
		assert_eq!(cell_number(" 7 "), 7);
		assert_eq!(cell_number(""), 0);
		assert_eq!(cell_number("n/a"), 0);
	}
}
