//! Expense ledger repository over the outcome range.
//!
//! Same shape as the order repository: full-range reads, id resolution by
//! column scan, append as a complete row.

use std::sync::Arc;

use suds_retry::RetryPolicy;
use suds_sheets::SheetsService;
use suds_types::{map_rows, split_header, DataResult, ExpenseRecord, OUTCOME_RANGE};

use crate::exhausted;

/// Typed operations over the outcome range.
pub struct ExpenseRepository {
	sheets: Arc<SheetsService>,
	retry: RetryPolicy,
}

impl ExpenseRepository {
	/// Creates a repository over the given transport.
	pub fn new(sheets: Arc<SheetsService>, retry: RetryPolicy) -> Self {
		Self { sheets, retry }
	}

	/// Reads all expense rows in sheet order.
	pub async fn read_all(&self) -> DataResult<Vec<ExpenseRecord>> {
		let Some(rows) = self.retry.run(|| self.sheets.get_values(OUTCOME_RANGE)).await else {
			return exhausted("read expenses", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let expenses: Vec<ExpenseRecord> = map_rows(header, data)
			.iter()
			.map(ExpenseRecord::from_record)
			.collect();
		if expenses.is_empty() {
			return DataResult::Empty;
		}
		DataResult::Success(expenses)
	}

	/// Resolves the next expense identifier by max-numeric-id scan, `"0"`
	/// for an empty ledger.
	pub async fn next_expense_id(&self) -> DataResult<String> {
		let result = self.read_all().await;
		match result {
			DataResult::Success(expenses) => {
				let max = expenses
					.iter()
					.filter_map(|expense| expense.id.trim().parse::<i64>().ok())
					.max();
				DataResult::Success(match max {
					Some(max) => (max + 1).to_string(),
					None => "0".to_string(),
				})
			}
			DataResult::Empty => DataResult::Success("0".to_string()),
			DataResult::Error(message) => DataResult::Error(message),
		}
	}

	/// Appends a new expense as a full outcome row.
	pub async fn append(&self, expense: &ExpenseRecord) -> DataResult<()> {
		let row = expense.to_row();
		if self
			.retry
			.run(|| self.sheets.append_row(OUTCOME_RANGE, row.clone()))
			.await
			.is_none()
		{
			return exhausted("append expense", self.retry.attempts);
		}
		tracing::info!(expense_id = %expense.id, "expense appended");
		DataResult::Success(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use suds_sheets::implementations::memory::MemorySheets;
	use suds_types::OUTCOME_COLUMNS;

	fn outcome_header() -> Vec<String> {
		OUTCOME_COLUMNS.iter().map(|c| c.to_string()).collect()
	}

	fn fast_retry() -> RetryPolicy {
		RetryPolicy {
			attempts: 2,
			initial_delay: std::time::Duration::from_millis(1),
			max_delay: std::time::Duration::from_millis(2),
			backoff_factor: 2.0,
		}
	}

	async fn repository_with(store: MemorySheets) -> (ExpenseRepository, Arc<SheetsService>) {
		let sheets = Arc::new(SheetsService::new(Box::new(store)));
		(
			ExpenseRepository::new(Arc::clone(&sheets), fast_retry()),
			sheets,
		)
	}

	fn expense(id: &str) -> ExpenseRecord {
		ExpenseRecord {
			id: id.into(),
			date: "2025-07-01".into(),
			purpose: "detergent".into(),
			price: "50000".into(),
			remark: String::new(),
			payment: "cash".into(),
		}
	}

	#[tokio::test]
	async fn next_id_over_empty_ledger_is_zero() {
		let (repository, _) = repository_with(MemorySheets::new()).await;
		assert_eq!(
			repository.next_expense_id().await,
			DataResult::Success("0".to_string())
		);
	}

	#[tokio::test]
	async fn append_then_read_back() {
		let store = MemorySheets::new();
		store.seed("outcome", vec![outcome_header()]).await;
		let (repository, _) = repository_with(store).await;

		assert_eq!(repository.append(&expense("0")).await, DataResult::Success(()));
		assert_eq!(repository.append(&expense("1")).await, DataResult::Success(()));

		let expenses = repository.read_all().await.ok().unwrap();
		assert_eq!(expenses.len(), 2);
		assert_eq!(expenses[1].purpose, "detergent");
		assert_eq!(
			repository.next_expense_id().await,
			DataResult::Success("2".to_string())
		);
	}
}
