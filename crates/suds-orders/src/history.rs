//! Workflow history repository.
//!
//! One history row per order, joined by order id. Rows are created empty by
//! `OrderRepository::append` and mutated once per station transition with a
//! full replacement write.

use std::sync::Arc;

use suds_retry::RetryPolicy;
use suds_sheets::SheetsService;
use suds_types::{history_row_range, map_rows, split_header, DataResult, HistoryRecord, HISTORY_RANGE};

use crate::exhausted;

/// Typed operations over the history range.
pub struct HistoryRepository {
	sheets: Arc<SheetsService>,
	retry: RetryPolicy,
}

impl HistoryRepository {
	/// Creates a repository over the given transport.
	pub fn new(sheets: Arc<SheetsService>, retry: RetryPolicy) -> Self {
		Self { sheets, retry }
	}

	/// Reads every history record in the range.
	pub async fn read_all(&self) -> DataResult<Vec<HistoryRecord>> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(HISTORY_RANGE)).await else {
			return exhausted("read history", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let records: Vec<HistoryRecord> = map_rows(header, data)
			.iter()
			.map(HistoryRecord::from_record)
			.collect();
		if records.is_empty() {
			return DataResult::Empty;
		}
		DataResult::Success(records)
	}

	/// Looks up the history record for one order.
	pub async fn get_by_order(&self, order_id: &str) -> DataResult<HistoryRecord> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(HISTORY_RANGE)).await else {
			return exhausted("read history", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		map_rows(header, data)
			.iter()
			.map(HistoryRecord::from_record)
			.find(|record| record.order_id == order_id)
			.into()
	}

	/// Replaces an order's history row with the given record.
	///
	/// The target row is located by order id; `Empty` when the order has no
	/// history row.
	pub async fn update(&self, record: &HistoryRecord) -> DataResult<()> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(HISTORY_RANGE)).await else {
			return exhausted("read history for update", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let Some(index) = map_rows(header, data)
			.iter()
			.position(|row| row.get("orderId") == record.order_id)
		else {
			return DataResult::Empty;
		};

		let range = history_row_range(index + 2);
		let row = record.to_row();
		if self
			.retry
			.run(|| self.sheets.update_row(&range, row.clone()))
			.await
			.is_none()
		{
			return exhausted("update history", self.retry.attempts);
		}

		tracing::info!(order_id = %record.order_id, status = %record.status, "history updated");
		DataResult::Success(())
	}
}
