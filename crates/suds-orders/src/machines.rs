//! Machine inventory repository.
//!
//! Machines are created and edited out of band; this repository reads them
//! for station displays and flips the availability flag as a side effect of
//! starting a station step.

use std::sync::Arc;

use suds_retry::RetryPolicy;
use suds_sheets::SheetsService;
use suds_types::{machine_row_range, map_rows, split_header, DataResult, Machine, Station, MACHINES_RANGE};

use crate::exhausted;

/// Typed operations over the machines range.
pub struct MachineRepository {
	sheets: Arc<SheetsService>,
	retry: RetryPolicy,
}

impl MachineRepository {
	/// Creates a repository over the given transport.
	pub fn new(sheets: Arc<SheetsService>, retry: RetryPolicy) -> Self {
		Self { sheets, retry }
	}

	async fn fetch(&self) -> DataResult<Vec<Machine>> {
		let Some(rows) = self
			.retry
			.run(|| self.sheets.get_values(MACHINES_RANGE))
			.await
		else {
			return exhausted("read machines", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let machines: Vec<Machine> = map_rows(header, data)
			.iter()
			.map(Machine::from_record)
			.collect();
		if machines.is_empty() {
			return DataResult::Empty;
		}
		DataResult::Success(machines)
	}

	/// Reads the full machine inventory.
	pub async fn read_all(&self) -> DataResult<Vec<Machine>> {
		self.fetch().await
	}

	/// Lists the machines at one station, optionally only available ones.
	///
	/// Callers present this set when a station step needs a machine chosen;
	/// the workflow engine never auto-selects.
	pub async fn list(&self, station: Station, only_available: bool) -> DataResult<Vec<Machine>> {
		match self.fetch().await {
			DataResult::Success(machines) => {
				let matching: Vec<Machine> = machines
					.into_iter()
					.filter(|machine| machine.station() == Some(station))
					.filter(|machine| !only_available || machine.is_available)
					.collect();
				if matching.is_empty() {
					DataResult::Empty
				} else {
					DataResult::Success(matching)
				}
			}
			DataResult::Empty => DataResult::Empty,
			DataResult::Error(message) => DataResult::Error(message),
		}
	}

	/// Looks up one machine by id.
	pub async fn get_by_id(&self, id: &str) -> DataResult<Machine> {
		match self.fetch().await {
			DataResult::Success(machines) => machines
				.into_iter()
				.find(|machine| machine.id == id)
				.into(),
			DataResult::Empty => DataResult::Empty,
			DataResult::Error(message) => DataResult::Error(message),
		}
	}

	/// Flips one machine's availability flag with a full replacement row.
	pub async fn set_availability(&self, id: &str, available: bool) -> DataResult<()> {
		let Some(rows) = self
			.retry
			.run(|| self.sheets.get_values(MACHINES_RANGE))
			.await
		else {
			return exhausted("read machines for update", self.retry.attempts);
		};

		let Some((header, data)) = split_header(&rows) else {
			return DataResult::Empty;
		};
		let records = map_rows(header, data);
		let Some(index) = records.iter().position(|record| record.get("id") == id) else {
			return DataResult::Empty;
		};

		let mut machine = Machine::from_record(&records[index]);
		machine.is_available = available;

		let range = machine_row_range(index + 2);
		let row = machine.to_row();
		if self
			.retry
			.run(|| self.sheets.update_row(&range, row.clone()))
			.await
			.is_none()
		{
			return exhausted("update machine availability", self.retry.attempts);
		}

		tracing::info!(machine_id = %id, available, "machine availability updated");
		DataResult::Success(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use suds_sheets::implementations::memory::MemorySheets;
	use suds_types::MACHINE_COLUMNS;

	fn machine_header() -> Vec<String> {
		MACHINE_COLUMNS.iter().map(|c| c.to_string()).collect()
	}

	fn machine_row(id: &str, station: &str, name: &str, available: &str) -> Vec<String> {
		vec![
			id.to_string(),
			station.to_string(),
			name.to_string(),
			format!("{}-01", name),
			available.to_string(),
		]
	}

	fn fast_retry() -> RetryPolicy {
		RetryPolicy {
			attempts: 2,
			initial_delay: std::time::Duration::from_millis(1),
			max_delay: std::time::Duration::from_millis(2),
			backoff_factor: 2.0,
		}
	}

	async fn repository_with(store: MemorySheets) -> (MachineRepository, Arc<SheetsService>) {
		let sheets = Arc::new(SheetsService::new(Box::new(store)));
		(
			MachineRepository::new(Arc::clone(&sheets), fast_retry()),
			sheets,
		)
	}

	#[tokio::test]
	async fn list_filters_by_station_and_availability() {
		let store = MemorySheets::new();
		store
			.seed(
				"machines",
				vec![
					machine_header(),
					machine_row("1", "washing", "Washer A", "TRUE"),
					machine_row("2", "washing", "Washer B", "FALSE"),
					machine_row("3", "drying", "Dryer A", "TRUE"),
				],
			)
			.await;
		let (repository, _) = repository_with(store).await;

		let available = repository.list(Station::Washing, true).await.ok().unwrap();
		assert_eq!(available.len(), 1);
		assert_eq!(available[0].name, "Washer A");

		let all_washing = repository.list(Station::Washing, false).await.ok().unwrap();
		assert_eq!(all_washing.len(), 2);
	}

	#[tokio::test]
	async fn set_availability_rewrites_the_flag() {
		let store = MemorySheets::new();
		store
			.seed(
				"machines",
				vec![
					machine_header(),
					machine_row("1", "washing", "Washer A", "TRUE"),
				],
			)
			.await;
		let (repository, sheets) = repository_with(store).await;

		assert_eq!(
			repository.set_availability("1", false).await,
			DataResult::Success(())
		);
		let rows = sheets.get_values("machines!A1:E").await.unwrap();
		assert_eq!(rows[1][4], "FALSE");

		let machine = repository.get_by_id("1").await.ok().unwrap();
		assert!(!machine.is_available);
	}

	#[tokio::test]
	async fn set_availability_of_unknown_machine_is_empty() {
		let store = MemorySheets::new();
		store.seed("machines", vec![machine_header()]).await;
		let (repository, _) = repository_with(store).await;
		assert_eq!(
			repository.set_availability("9", false).await,
			DataResult::Empty
		);
	}
}
