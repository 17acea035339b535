//! In-memory query operations over mapped order collections.
//!
//! Every function here is pure: the repository fetches and maps rows, then
//! hands the typed collection to exactly one of these filters before
//! returning it. Unparseable dates are excluded from date filters and sorted
//! to the tail of descending sorts; a malformed row degrades, it never
//! aborts a read.

use chrono::NaiveDate;
use std::cmp::Ordering;

use suds_types::{Order, PaymentMethod, PaymentStatus};

/// Default date format for order and due dates.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter selection applied by `OrderRepository::read_all`.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
	/// No filtering, everything the range holds.
	All,
	/// Orders whose date cell equals today's date string.
	Today,
	/// Orders whose parsed date lies within an inclusive range.
	RangeDate { start: String, end: String },
	/// Orders marked paid.
	Paid,
	/// Orders marked unpaid (the empty cell counts as unpaid).
	Unpaid,
	/// Orders paid via QRIS.
	Qris,
	/// Orders paid in cash.
	Cash,
}

/// Applies one filter to an already-mapped collection.
///
/// `today` is the wall-clock date string supplied by the caller in the same
/// format the sheet uses; it only matters for [`OrderFilter::Today`].
pub fn apply_filter(
	orders: Vec<Order>,
	filter: &OrderFilter,
	format: &str,
	today: &str,
) -> Vec<Order> {
	match filter {
		OrderFilter::All => orders,
		OrderFilter::Today => filter_today(&orders, today),
		OrderFilter::RangeDate { start, end } => filter_range_date(&orders, start, end, format),
		OrderFilter::Paid => filter_payment_status(&orders, PaymentStatus::Paid),
		OrderFilter::Unpaid => filter_payment_status(&orders, PaymentStatus::Unpaid),
		OrderFilter::Qris => filter_payment_method(&orders, PaymentMethod::Qris),
		OrderFilter::Cash => filter_payment_method(&orders, PaymentMethod::Cash),
	}
}

/// Keeps orders whose date parses and lies within `[start, end]` inclusive.
///
/// Orders with unparseable dates are excluded, not errored. An unparseable
/// bound excludes everything.
pub fn filter_range_date(orders: &[Order], start: &str, end: &str, format: &str) -> Vec<Order> {
	let Ok(start) = NaiveDate::parse_from_str(start, format) else {
		return Vec::new();
	};
	let Ok(end) = NaiveDate::parse_from_str(end, format) else {
		return Vec::new();
	};

	orders
		.iter()
		.filter(|order| {
			NaiveDate::parse_from_str(&order.date, format)
				.map(|date| start <= date && date <= end)
				.unwrap_or(false)
		})
		.cloned()
		.collect()
}

/// Keeps orders whose date cell equals today's date string exactly.
pub fn filter_today(orders: &[Order], today: &str) -> Vec<Order> {
	orders
		.iter()
		.filter(|order| order.date == today)
		.cloned()
		.collect()
}

/// Keeps orders with the given payment status. The empty cell reads as
/// unpaid, so unpaid selection also returns rows never marked at all.
pub fn filter_payment_status(orders: &[Order], status: PaymentStatus) -> Vec<Order> {
	orders
		.iter()
		.filter(|order| order.payment_status() == status)
		.cloned()
		.collect()
}

/// Keeps orders with the given payment method; rows with an unrecognized
/// method cell match nothing.
pub fn filter_payment_method(orders: &[Order], method: PaymentMethod) -> Vec<Order> {
	orders
		.iter()
		.filter(|order| order.payment_method() == Some(method))
		.cloned()
		.collect()
}

/// Sorts descending by parsed date; unparseable dates go last.
pub fn sort_recent(orders: &mut [Order], format: &str) {
	orders.sort_by(|a, b| {
		let a = NaiveDate::parse_from_str(&a.date, format).ok();
		let b = NaiveDate::parse_from_str(&b.date, format).ok();
		match (a, b) {
			(Some(a), Some(b)) => b.cmp(&a),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		}
	});
}

/// Sorts ascending by parsed date; unparseable dates go first.
pub fn sort_oldest(orders: &mut [Order], format: &str) {
	orders.sort_by(|a, b| {
		let a = NaiveDate::parse_from_str(&a.date, format).ok();
		let b = NaiveDate::parse_from_str(&b.date, format).ok();
		match (a, b) {
			(Some(a), Some(b)) => a.cmp(&b),
			(Some(_), None) => Ordering::Greater,
			(None, Some(_)) => Ordering::Less,
			(None, None) => Ordering::Equal,
		}
	});
}

/// One row of a date-grouped display list.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupedRow {
	/// Marker opening the group for one date string.
	Header(String),
	/// An order belonging to the preceding header's group.
	Entry(Order),
}

/// Partitions orders by exact date-string equality, in first-seen order,
/// emitting one header per group followed by its entries sorted descending
/// by id.
pub fn group_by_date(orders: &[Order]) -> Vec<GroupedRow> {
	let mut groups: Vec<(String, Vec<Order>)> = Vec::new();
	for order in orders {
		match groups.iter_mut().find(|(date, _)| *date == order.date) {
			Some((_, members)) => members.push(order.clone()),
			None => groups.push((order.date.clone(), vec![order.clone()])),
		}
	}

	let mut rows = Vec::new();
	for (date, mut members) in groups {
		members.sort_by(|a, b| compare_ids_desc(&a.order_id, &b.order_id));
		rows.push(GroupedRow::Header(date));
		rows.extend(members.into_iter().map(GroupedRow::Entry));
	}
	rows
}

/// Descending id comparison, numeric when both sides parse.
fn compare_ids_desc(a: &str, b: &str) -> Ordering {
	match (a.parse::<i64>(), b.parse::<i64>()) {
		(Ok(a), Ok(b)) => b.cmp(&a),
		_ => b.cmp(a),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn order(id: &str, date: &str) -> Order {
		Order {
			order_id: id.into(),
			date: date.into(),
			..Default::default()
		}
	}

	#[test]
	fn range_date_inclusive_bounds() {
		let orders = vec![order("1", "2024-06-15")];

		let june = filter_range_date(&orders, "2024-06-01", "2024-06-30", DEFAULT_DATE_FORMAT);
		assert_eq!(june.len(), 1);

		let july = filter_range_date(&orders, "2024-07-01", "2024-07-31", DEFAULT_DATE_FORMAT);
		assert!(july.is_empty());

		let exact = filter_range_date(&orders, "2024-06-15", "2024-06-15", DEFAULT_DATE_FORMAT);
		assert_eq!(exact.len(), 1);
	}

	#[test]
	fn range_date_excludes_unparseable_rows() {
		let orders = vec![order("1", "2024-06-15"), order("2", "soon")];
		let kept = filter_range_date(&orders, "2024-01-01", "2024-12-31", DEFAULT_DATE_FORMAT);
		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].order_id, "1");
	}

	#[test]
	fn today_filter_is_string_equality() {
		let orders = vec![order("1", "2024-06-15"), order("2", "2024-06-16")];
		let today = filter_today(&orders, "2024-06-15");
		assert_eq!(today.len(), 1);
		assert_eq!(today[0].order_id, "1");
	}

	#[test]
	fn empty_payment_cell_counts_as_unpaid() {
		let mut paid = order("1", "2024-06-15");
		paid.paid_status = "Paid".into();
		let blank = order("2", "2024-06-15");

		let unpaid = filter_payment_status(&[paid.clone(), blank.clone()], PaymentStatus::Unpaid);
		assert_eq!(unpaid.len(), 1);
		assert_eq!(unpaid[0].order_id, "2");

		let paid_only = filter_payment_status(&[paid, blank], PaymentStatus::Paid);
		assert_eq!(paid_only.len(), 1);
		assert_eq!(paid_only[0].order_id, "1");
	}

	#[test]
	fn filters_are_idempotent() {
		let orders = vec![
			order("1", "2024-06-15"),
			order("2", "2024-06-20"),
			order("3", "bad"),
		];
		let once = filter_range_date(&orders, "2024-06-01", "2024-06-30", DEFAULT_DATE_FORMAT);
		let twice = filter_range_date(&once, "2024-06-01", "2024-06-30", DEFAULT_DATE_FORMAT);
		assert_eq!(once, twice);
	}

	#[test]
	fn sort_recent_puts_unparseable_last() {
		let mut orders = vec![
			order("1", "2024-06-15"),
			order("2", "???"),
			order("3", "2024-06-20"),
		];
		sort_recent(&mut orders, DEFAULT_DATE_FORMAT);
		let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
		assert_eq!(ids, vec!["3", "1", "2"]);
	}

	#[test]
	fn sort_oldest_puts_unparseable_first() {
		let mut orders = vec![
			order("1", "2024-06-15"),
			order("2", "???"),
			order("3", "2024-06-10"),
		];
		sort_oldest(&mut orders, DEFAULT_DATE_FORMAT);
		let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
		assert_eq!(ids, vec!["2", "3", "1"]);
	}

	#[test]
	fn group_by_date_orders_entries_descending_by_id() {
		let orders = vec![order("O1", "01/07/2025"), order("O2", "01/07/2025")];
		let rows = group_by_date(&orders);
		assert_eq!(rows.len(), 3);
		assert_eq!(rows[0], GroupedRow::Header("01/07/2025".into()));
		assert!(matches!(&rows[1], GroupedRow::Entry(o) if o.order_id == "O2"));
		assert!(matches!(&rows[2], GroupedRow::Entry(o) if o.order_id == "O1"));
	}

	#[test]
	fn group_by_date_keeps_first_seen_group_order() {
		let orders = vec![
			order("5", "02/07/2025"),
			order("2", "01/07/2025"),
			order("10", "02/07/2025"),
		];
		let rows = group_by_date(&orders);
		assert_eq!(rows[0], GroupedRow::Header("02/07/2025".into()));
		// Numeric-aware descending: 10 before 5.
		assert!(matches!(&rows[1], GroupedRow::Entry(o) if o.order_id == "10"));
		assert!(matches!(&rows[2], GroupedRow::Entry(o) if o.order_id == "5"));
		assert_eq!(rows[3], GroupedRow::Header("01/07/2025".into()));
	}
}
