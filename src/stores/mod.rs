//! Application state. Each store pairs a plain state struct (all logic,
//! unit tested) with a `Copy` reactive handle whose actions are single
//! signal updates, so observers never see half-applied changes.

pub mod entity;
pub mod filter;
pub mod graph;
pub mod highlight;
pub mod linking;
pub mod map;
pub mod scale;
pub mod visualization;

use std::future::Future;

use leptos::prelude::*;
use log::{debug, error};

use crate::api::RequestTracker;
use crate::error::Result;

/// Run `fut` under a fresh request generation. Yields the value only if the
/// request is still the newest one for `tracker` and it succeeded; failures
/// are logged and leave prior state untouched.
pub(crate) async fn tracked<T, F>(tracker: RwSignal<RequestTracker>, what: &str, fut: F) -> Option<T>
where
	F: Future<Output = Result<T>>,
{
	let ticket = tracker.try_update(RequestTracker::begin)?;
	debug!("Fetching {what}");
	let result = fut.await;
	if tracker.try_update(|t| t.finish(ticket, &result)) != Some(true) {
		debug!("Discarding stale {what} response");
		return None;
	}
	match result {
		Ok(value) => Some(value),
		Err(e) => {
			error!("Failed to load {what}: {e}");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::FutureExt;
	use futures::channel::oneshot;
	use futures::executor::block_on;

	use super::*;
	use crate::api::FetchStatus;
	use crate::error::AppError;

	fn reply(rx: oneshot::Receiver<Result<i32>>) -> impl Future<Output = Result<i32>> {
		async move { rx.await.unwrap_or_else(|_| Err(AppError::Network("dropped".into()))) }
	}

	#[test]
	fn slower_older_request_is_not_applied() {
		let tracker = RwSignal::new(RequestTracker::default());
		let applied = RwSignal::new(0);
		let (tx1, rx1) = oneshot::channel();
		let (tx2, rx2) = oneshot::channel();
		let mut first = Box::pin(tracked(tracker, "first", reply(rx1)));
		let mut second = Box::pin(tracked(tracker, "second", reply(rx2)));

		// both requests start, in order, before either answers
		assert!(first.as_mut().now_or_never().is_none());
		assert!(second.as_mut().now_or_never().is_none());
		tx2.send(Ok(2)).unwrap();
		tx1.send(Ok(1)).unwrap();

		let (second, first) = block_on(async { futures::join!(second, first) });
		assert_eq!(first, None);
		assert_eq!(second, Some(2));
		for value in [second, first].into_iter().flatten() {
			applied.set(value);
		}
		assert_eq!(applied.get_untracked(), 2);
		assert_eq!(tracker.with_untracked(|t| t.status().clone()), FetchStatus::Success);
	}

	#[test]
	fn failed_request_leaves_previous_state() {
		let tracker = RwSignal::new(RequestTracker::default());
		let applied = RwSignal::new(1);
		let failing = async {
			Err::<i32, _>(AppError::Status {
				status: 500,
				url: "/api/graph-skeleton".into(),
			})
		};
		if let Some(value) = block_on(tracked(tracker, "skeleton", failing)) {
			applied.set(value);
		}
		assert_eq!(applied.get_untracked(), 1);
		assert!(matches!(
			tracker.with_untracked(|t| t.status().clone()),
			FetchStatus::Failed(msg) if msg.contains("500")
		));
	}
}
