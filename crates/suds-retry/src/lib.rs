//! Bounded retry with exponential backoff.
//!
//! The remote tabular store has no transactional guarantees and fails
//! transiently, so every remote operation in the system runs through this
//! executor. A failed attempt waits for the current backoff delay, then the
//! delay is multiplied and capped; after the attempt budget is exhausted the
//! final failure is swallowed and the caller receives `None`, which it maps
//! to its own domain-level error.
//!
//! The backoff delay is a `tokio::time::sleep` suspension point, so an
//! in-flight retry loop is cancellable between attempts by dropping the
//! future. A domain-level "empty" result is a value, not a failure, and
//! therefore returns on the first attempt without retrying.

use std::future::Future;
use std::time::Duration;

/// Retry budget and backoff curve for a fallible operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
	/// Total number of tries, including the first.
	pub attempts: u32,
	/// Delay before the first retry.
	pub initial_delay: Duration,
	/// Upper bound applied to every delay.
	pub max_delay: Duration,
	/// Multiplier applied to the delay after each failed attempt.
	pub backoff_factor: f64,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			attempts: 3,
			initial_delay: Duration::from_millis(1000),
			max_delay: Duration::from_millis(5000),
			backoff_factor: 2.0,
		}
	}
}

impl RetryPolicy {
	/// Runs the operation under this policy.
	///
	/// Returns the first successful result, or `None` once every attempt has
	/// failed. The final attempt's error is logged and swallowed; callers
	/// are responsible for mapping `None` to a domain-level error.
	pub async fn run<T, E, Fut, Op>(&self, op: Op) -> Option<T>
	where
		Op: FnMut() -> Fut,
		Fut: Future<Output = Result<T, E>>,
		E: std::fmt::Display,
	{
		self.run_with_callback(op, |_| {}).await
	}

	/// Runs the operation, invoking `on_retry` with the 1-based number of
	/// each failed attempt that will be retried.
	pub async fn run_with_callback<T, E, Fut, Op, Cb>(&self, mut op: Op, mut on_retry: Cb) -> Option<T>
	where
		Op: FnMut() -> Fut,
		Fut: Future<Output = Result<T, E>>,
		E: std::fmt::Display,
		Cb: FnMut(u32),
	{
		let mut delay = self.initial_delay.min(self.max_delay);

		for attempt in 1..=self.attempts {
			match op().await {
				Ok(value) => return Some(value),
				Err(error) => {
					if attempt < self.attempts {
						tracing::warn!(
							attempt,
							attempts = self.attempts,
							delay_ms = delay.as_millis() as u64,
							"attempt failed, retrying: {}",
							error
						);
						on_retry(attempt);
						tokio::time::sleep(delay).await;
						delay = delay.mul_f64(self.backoff_factor).min(self.max_delay);
					} else {
						tracing::warn!(
							attempts = self.attempts,
							"giving up after final attempt: {}",
							error
						);
					}
				}
			}
		}

		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};
	use tokio::time::Instant;

	fn fast_policy(attempts: u32) -> RetryPolicy {
		RetryPolicy {
			attempts,
			initial_delay: Duration::from_millis(10),
			max_delay: Duration::from_millis(40),
			backoff_factor: 2.0,
		}
	}

	#[tokio::test]
	async fn success_on_first_attempt_runs_once() {
		let calls = AtomicU32::new(0);
		let result = fast_policy(3)
			.run(|| async {
				calls.fetch_add(1, Ordering::SeqCst);
				Ok::<_, String>(7)
			})
			.await;
		assert_eq!(result, Some(7));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn always_failing_runs_exactly_n_attempts() {
		let calls = AtomicU32::new(0);
		let result: Option<()> = fast_policy(3)
			.run(|| async {
				calls.fetch_add(1, Ordering::SeqCst);
				Err::<(), _>("down")
			})
			.await;
		assert_eq!(result, None);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn callback_sees_only_retried_attempts() {
		let mut seen = Vec::new();
		let result: Option<()> = fast_policy(4)
			.run_with_callback(
				|| async { Err::<(), _>("down") },
				|attempt| seen.push(attempt),
			)
			.await;
		assert_eq!(result, None);
		assert_eq!(seen, vec![1, 2, 3]);
	}

	#[tokio::test(start_paused = true)]
	async fn delays_grow_and_cap_at_max() {
		// 10ms + 20ms + 40ms (capped) for four attempts of a 2x curve.
		let start = Instant::now();
		let result: Option<()> = fast_policy(4).run(|| async { Err::<(), _>("down") }).await;
		assert_eq!(result, None);
		assert_eq!(start.elapsed(), Duration::from_millis(70));
	}

	#[tokio::test]
	async fn recovers_after_transient_failures() {
		let calls = AtomicU32::new(0);
		let result = fast_policy(3)
			.run(|| async {
				if calls.fetch_add(1, Ordering::SeqCst) < 2 {
					Err("down".to_string())
				} else {
					Ok(42)
				}
			})
			.await;
		assert_eq!(result, Some(42));
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[test]
	fn default_policy_matches_documented_values() {
		let policy = RetryPolicy::default();
		assert_eq!(policy.attempts, 3);
		assert_eq!(policy.initial_delay, Duration::from_millis(1000));
		assert_eq!(policy.max_delay, Duration::from_millis(5000));
		assert_eq!(policy.backoff_factor, 2.0);
	}
}
