//! Expense ledger types for the outcome sheet.

use serde::{Deserialize, Serialize};

use crate::rows::RowRecord;

/// Column order of the outcome range. Preserved exactly on write.
pub const OUTCOME_COLUMNS: [&str; 6] = ["id", "date", "purpose", "price", "remark", "payment"];

/// One expense row of the outcome range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
	pub id: String,
	pub date: String,
	pub purpose: String,
	pub price: String,
	pub remark: String,
	pub payment: String,
}

impl ExpenseRecord {
	/// Builds an expense from a mapped outcome record.
	pub fn from_record(record: &RowRecord) -> Self {
		Self {
			id: record.get("id").to_string(),
			date: record.get("date").to_string(),
			purpose: record.get("purpose").to_string(),
			price: record.get("price").to_string(),
			remark: record.get("remark").to_string(),
			payment: record.get("payment").to_string(),
		}
	}

	/// Serializes the expense to a full outcome row in schema column order.
	pub fn to_row(&self) -> Vec<String> {
		vec![
			self.id.clone(),
			self.date.clone(),
			self.purpose.clone(),
			self.price.clone(),
			self.remark.clone(),
			self.payment.clone(),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rows::map_rows;

	#[test]
	fn row_round_trip() {
		let expense = ExpenseRecord {
			id: "2".into(),
			date: "2025-07-01".into(),
			purpose: "detergent restock".into(),
			price: "150000".into(),
			remark: "monthly".into(),
			payment: "cash".into(),
		};
		let header: Vec<String> = OUTCOME_COLUMNS.iter().map(|c| c.to_string()).collect();
		let mapped = map_rows(&header, &[expense.to_row()]);
		assert_eq!(ExpenseRecord::from_record(&mapped[0]), expense);
	}
}
