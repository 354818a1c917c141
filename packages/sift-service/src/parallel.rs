//! Fan-out/fan-in over independent calls. Every call is spawned at once and the caller waits
//! for all of them; results are keyed by the caller's label rather than by position.

use std::fmt::Debug;

use tokio::task::JoinSet;

use crate::{BoxFuture, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMode {
	/// The first failed call fails the batch; calls still running are aborted.
	FailFast,
	/// A failed call yields `None` and is logged; the rest of the batch is unaffected.
	AllowFailures,
}

pub struct ParallelCall<K, T> {
	pub key: K,
	pub future: BoxFuture<'static, Result<T>>,
}
impl<K, T> ParallelCall<K, T> {
	pub fn new(key: K, future: BoxFuture<'static, Result<T>>) -> Self {
		Self { key, future }
	}
}

/// Runs `calls` concurrently and returns one `(key, outcome)` pair per call in submission
/// order. Under [`FailureMode::FailFast`] every outcome is `Some`.
pub async fn run_in_parallel<K, T>(
	calls: Vec<ParallelCall<K, T>>,
	mode: FailureMode,
) -> Result<Vec<(K, Option<T>)>>
where
	K: Copy + Debug + Send + 'static,
	T: Send + 'static,
{
	let mut slots: Vec<(K, Option<T>)> = calls.iter().map(|call| (call.key, None)).collect();
	let mut set = JoinSet::new();

	for (index, ParallelCall { key, future }) in calls.into_iter().enumerate() {
		set.spawn(async move { (index, key, future.await) });
	}

	while let Some(joined) = set.join_next().await {
		let (index, key, outcome) = match joined {
			Ok(done) => done,
			Err(err) => match mode {
				FailureMode::FailFast => {
					return Err(Error::Coordination {
						message: format!("Parallel call did not complete: {err}."),
					});
				},
				FailureMode::AllowFailures => {
					tracing::warn!(error = %err, "Parallel call did not complete.");

					continue;
				},
			},
		};

		match (outcome, mode) {
			(Ok(value), _) => slots[index].1 = Some(value),
			(Err(err), FailureMode::FailFast) => return Err(err),
			(Err(err), FailureMode::AllowFailures) => {
				tracing::warn!(call = ?key, error = %err, "Parallel call failed.");
			},
		}
	}

	Ok(slots)
}
