//! Station workflow engine.
//!
//! Advances an order through the physical laundry stations. State is never
//! stored: it is derived on every call from which timestamp cells of the
//! order's history row are populated. Starting a step writes the station's
//! timestamp and machine name as a full-row history update, then flips the
//! chosen machine's availability flag as a separate write. The two writes
//! are retried independently; when the second one fails after exhaustion the
//! history has advanced while the machine bookkeeping has not, and the
//! engine surfaces that partial success as [`WorkflowError::MachineFlagStale`]
//! so the caller can trigger [`StationWorkflowEngine::reconcile_availability`].

use std::collections::HashSet;
use thiserror::Error;

use suds_orders::{HistoryRepository, MachineRepository};
use suds_types::{DataResult, HistoryRecord, Machine, Station};

/// Errors that can occur while advancing an order through the stations.
#[derive(Debug, Error)]
pub enum WorkflowError {
	/// The order has no history row.
	#[error("Order {0} has no history record")]
	HistoryNotFound(String),
	/// The order already carries a completed timestamp; the terminal state
	/// has no outgoing transition.
	#[error("Order {0} is already completed")]
	AlreadyCompleted(String),
	/// The requested station is not the order's current station.
	#[error("Order {order_id}: current station is {current}, not {requested}")]
	StationMismatch {
		order_id: String,
		current: Station,
		requested: Station,
	},
	/// The station claims a machine but none was chosen. The engine never
	/// auto-selects.
	#[error("Station {0} requires an explicit machine choice")]
	MachineRequired(Station),
	/// No machine row carries the chosen id.
	#[error("Machine {0} not found")]
	UnknownMachine(String),
	/// The chosen machine is already flagged as in use.
	#[error("Machine {0} is not available")]
	MachineUnavailable(String),
	/// The history write succeeded but the machine availability write did
	/// not; machine state must be re-read or reconciled.
	#[error("Order {order_id} advanced but machine {machine_id} availability was not updated")]
	MachineFlagStale { order_id: String, machine_id: String },
	/// A remote read or write failed after exhausting its retries.
	#[error("Store error: {0}")]
	Store(String),
}

/// The order-processing state machine over the fixed station sequence.
pub struct StationWorkflowEngine {
	history: HistoryRepository,
	machines: MachineRepository,
}

impl StationWorkflowEngine {
	/// Creates an engine over the given repositories.
	pub fn new(history: HistoryRepository, machines: MachineRepository) -> Self {
		Self { history, machines }
	}

	/// The order's current station, derived from its history row.
	pub async fn current_station(&self, order_id: &str) -> Result<Station, WorkflowError> {
		Ok(self.record(order_id).await?.current_station())
	}

	/// The machines a caller must choose from to start a step at `station`.
	pub async fn available_machines(&self, station: Station) -> Result<Vec<Machine>, WorkflowError> {
		match self.machines.list(station, true).await {
			DataResult::Success(machines) => Ok(machines),
			DataResult::Empty => Ok(Vec::new()),
			DataResult::Error(message) => Err(WorkflowError::Store(message)),
		}
	}

	/// Starts the next station step for an order.
	///
	/// Validates that the order is not completed, that `station` is its
	/// current station, and that a machine was chosen when the station
	/// claims one. Writes the history row first; on success, marks the
	/// machine unavailable. Returns the advanced record.
	pub async fn start_step(
		&self,
		order_id: &str,
		station: Station,
		machine_id: Option<&str>,
		timestamp: &str,
	) -> Result<HistoryRecord, WorkflowError> {
		let mut record = self.record(order_id).await?;

		if record.is_completed() {
			return Err(WorkflowError::AlreadyCompleted(order_id.to_string()));
		}
		let current = record.current_station();
		if station != current {
			return Err(WorkflowError::StationMismatch {
				order_id: order_id.to_string(),
				current,
				requested: station,
			});
		}

		let machine = if station.uses_machine() {
			let id = machine_id.ok_or(WorkflowError::MachineRequired(station))?;
			let machine = match self.machines.get_by_id(id).await {
				DataResult::Success(machine) => machine,
				DataResult::Empty => return Err(WorkflowError::UnknownMachine(id.to_string())),
				DataResult::Error(message) => return Err(WorkflowError::Store(message)),
			};
			if !machine.is_available {
				return Err(WorkflowError::MachineUnavailable(id.to_string()));
			}
			Some(machine)
		} else {
			None
		};

		let machine_name = machine.as_ref().map(|m| m.name.as_str()).unwrap_or("");
		record.start_station(station, timestamp, machine_name);

		match self.history.update(&record).await {
			DataResult::Success(()) => {}
			DataResult::Empty => return Err(WorkflowError::HistoryNotFound(order_id.to_string())),
			DataResult::Error(message) => return Err(WorkflowError::Store(message)),
		}
		tracing::info!(order_id, station = %station, "station step started");

		if let Some(machine) = machine {
			match self.machines.set_availability(&machine.id, false).await {
				DataResult::Success(()) => {}
				DataResult::Empty | DataResult::Error(_) => {
					tracing::warn!(
						order_id,
						machine_id = %machine.id,
						"history advanced but machine availability write failed"
					);
					return Err(WorkflowError::MachineFlagStale {
						order_id: order_id.to_string(),
						machine_id: machine.id,
					});
				}
			}
		}

		Ok(record)
	}

	/// Re-derives every machine's availability from the set of active
	/// history rows naming it, and rewrites the flags that disagree.
	///
	/// A machine is in use while some non-completed order's most recently
	/// started station is the machine's station and names it; everything
	/// else is available. Returns the number of rows rewritten. This is the
	/// compensating pass for [`WorkflowError::MachineFlagStale`] and for the
	/// fact that finishing a station never flips the flag back by itself.
	pub async fn reconcile_availability(&self) -> Result<usize, WorkflowError> {
		let machines = match self.machines.read_all().await {
			DataResult::Success(machines) => machines,
			DataResult::Empty => return Ok(0),
			DataResult::Error(message) => return Err(WorkflowError::Store(message)),
		};
		let histories = match self.history.read_all().await {
			DataResult::Success(histories) => histories,
			DataResult::Empty => Vec::new(),
			DataResult::Error(message) => return Err(WorkflowError::Store(message)),
		};

		let busy: HashSet<(Station, String)> = histories
			.iter()
			.filter(|record| !record.is_completed())
			.filter_map(|record| {
				let station = record.last_started();
				if !station.uses_machine() {
					return None;
				}
				let name = record.station_machine(station)?.trim();
				if name.is_empty() {
					None
				} else {
					Some((station, name.to_string()))
				}
			})
			.collect();

		let mut rewritten = 0;
		for machine in machines {
			let Some(station) = machine.station() else {
				continue;
			};
			let desired = !busy.contains(&(station, machine.name.clone()));
			if machine.is_available != desired {
				match self.machines.set_availability(&machine.id, desired).await {
					DataResult::Success(()) => rewritten += 1,
					DataResult::Empty => {}
					DataResult::Error(message) => return Err(WorkflowError::Store(message)),
				}
			}
		}
		tracing::info!(rewritten, "machine availability reconciled");
		Ok(rewritten)
	}

	async fn record(&self, order_id: &str) -> Result<HistoryRecord, WorkflowError> {
		match self.history.get_by_order(order_id).await {
			DataResult::Success(record) => Ok(record),
			DataResult::Empty => Err(WorkflowError::HistoryNotFound(order_id.to_string())),
			DataResult::Error(message) => Err(WorkflowError::Store(message)),
		}
	}
}
