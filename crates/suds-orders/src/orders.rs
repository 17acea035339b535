//! Order repository over the income range.
//!
//! Orders live one-per-row on the income sheet. Reads fetch the full range,
//! map every row, apply exactly one query filter, and sort descending by
//! date. Writes are full-row: an update must re-write every column, so any
//! field the caller wants preserved is read first and merged in.

use std::sync::Arc;

use suds_query::{apply_filter, sort_recent, OrderFilter};
use suds_retry::RetryPolicy;
use suds_sheets::SheetsService;
use suds_types::{
	income_row_range, map_rows, split_header, DataResult, HistoryRecord, Order, HISTORY_RANGE,
	INCOME_RANGE, ORDER_ID_RANGE,
};

use crate::exhausted;

/// Typed operations over the income range.
pub struct OrderRepository {
	sheets: Arc<SheetsService>,
	retry: RetryPolicy,
	date_format: String,
}

impl OrderRepository {
	/// Creates a repository over the given transport.
	pub fn new(sheets: Arc<SheetsService>, retry: RetryPolicy, date_format: String) -> Self {
		Self {
			sheets,
			retry,
			date_format,
		}
	}

	/// Reads all orders, applies one filter, and sorts descending by date.
	///
	/// `today` is the wall-clock date string in the configured format,
	/// supplied by the caller. A post-filter empty list is `Empty`, which is
	/// a valid response distinct from a transport `Error`.
	pub async fn read_all(&self, filter: &OrderFilter, today: &str) -> DataResult<Vec<Order>> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(INCOME_RANGE)).await else {
			return exhausted("read orders", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let orders: Vec<Order> = map_rows(header, data)
			.iter()
			.map(Order::from_record)
			.collect();

		let mut orders = apply_filter(orders, filter, &self.date_format, today);
		if orders.is_empty() {
			return DataResult::Empty;
		}
		sort_recent(&mut orders, &self.date_format);
		DataResult::Success(orders)
	}

	/// Resolves the next order identifier.
	///
	/// Scans the id column for the maximum numeric value and returns it plus
	/// one, or `"0"` when the column has no rows. Non-numeric ids are
	/// ignored rather than crashing the computation.
	pub async fn next_order_id(&self) -> DataResult<String> {
		let Some(rows) = self
			.retry
			.run(|| self.sheets.get_values(ORDER_ID_RANGE))
			.await
		else {
			return exhausted("resolve next order id", self.retry.attempts);
		};

		let max = rows
			.iter()
			.filter_map(|row| row.first())
			.filter_map(|cell| cell.trim().parse::<i64>().ok())
			.max();

		DataResult::Success(match max {
			Some(max) => (max + 1).to_string(),
			None => "0".to_string(),
		})
	}

	/// Appends a new order as a full income row, plus its empty history row.
	///
	/// The id column is re-read immediately before writing so an id that was
	/// claimed since the caller resolved it is rejected instead of written
	/// twice. The window between that check and the append is still open;
	/// the store offers no way to close it entirely.
	pub async fn append(&self, order: &Order) -> DataResult<()> {
		let Some(rows) = self
			.retry
			.run(|| self.sheets.get_values(ORDER_ID_RANGE))
			.await
		else {
			return exhausted("validate order id", self.retry.attempts);
		};
		let taken = rows
			.iter()
			.filter_map(|row| row.first())
			.any(|cell| cell.trim() == order.order_id);
		if taken {
			return DataResult::Error(format!("order id {} already exists", order.order_id));
		}

		let row = order.to_row();
		if self
			.retry
			.run(|| self.sheets.append_row(INCOME_RANGE, row.clone()))
			.await
			.is_none()
		{
			return exhausted("append order", self.retry.attempts);
		}

		// The history row is created the moment the order exists. If this
		// write fails the income row has already landed; surface the error
		// so the caller can re-try the history side.
		let history_row = HistoryRecord::new(order.order_id.clone()).to_row();
		if self
			.retry
			.run(|| self.sheets.append_row(HISTORY_RANGE, history_row.clone()))
			.await
			.is_none()
		{
			tracing::warn!(
				order_id = %order.order_id,
				"order row appended but history row write exhausted its retries"
			);
			return exhausted("append order history", self.retry.attempts);
		}

		tracing::info!(order_id = %order.order_id, "order appended");
		DataResult::Success(())
	}

	/// Looks up a single order by id.
	///
	/// Both "the range has no data rows" and "no row matched" collapse into
	/// `Empty`; the log line distinguishes the cause for operators.
	pub async fn get_by_id(&self, id: &str) -> DataResult<Order> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(INCOME_RANGE)).await else {
			return exhausted("read order", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			tracing::debug!(id, "income range has no data rows");
			return DataResult::Empty;
		};

		match map_rows(header, data)
			.iter()
			.map(Order::from_record)
			.find(|order| order.order_id == id)
		{
			Some(order) => DataResult::Success(order),
			None => {
				tracing::debug!(id, "no income row matched id");
				DataResult::Empty
			}
		}
	}

	/// Updates an order in place as a full replacement row.
	///
	/// The target row is located by id. A blank date on the new order
	/// preserves the previously stored date; a non-blank date overwrites
	/// it. `Empty` when no row carries the id.
	pub async fn update(&self, order: &Order) -> DataResult<()> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(INCOME_RANGE)).await else {
			return exhausted("read orders for update", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let records = map_rows(header, data);
		let Some(index) = records
			.iter()
			.position(|record| record.get("orderId") == order.order_id)
		else {
			return DataResult::Empty;
		};

		let mut replacement = order.clone();
		if replacement.date.trim().is_empty() {
			replacement.date = records[index].get("date").to_string();
		}

		// Header is sheet row 1, so data row `index` sits at row index + 2.
		let range = income_row_range(index + 2);
		let row = replacement.to_row();
		if self
			.retry
			.run(|| self.sheets.update_row(&range, row.clone()))
			.await
			.is_none()
		{
			return exhausted("update order", self.retry.attempts);
		}

		tracing::info!(order_id = %order.order_id, "order updated");
		DataResult::Success(())
	}
}
