//! Typed payloads exchanged with the backend and static assets.

pub mod airport;
pub mod entity;
pub mod geojson;
pub mod insight;

use log::warn;
use serde::de::DeserializeOwned;

/// Decode each record on its own so one bad entry never sinks the batch.
/// `null` entries are dropped silently; malformed ones are logged and dropped.
pub(crate) fn decode_records<T: DeserializeOwned>(
	what: &str,
	records: Vec<serde_json::Value>,
) -> Vec<T> {
	let total = records.len();
	let decoded: Vec<T> = records
		.into_iter()
		.filter(|r| !r.is_null())
		.filter_map(|r| match serde_json::from_value(r) {
			Ok(v) => Some(v),
			Err(e) => {
				warn!("Skipping malformed {what} record: {e}");
				None
			}
		})
		.collect();
	if decoded.len() < total {
		warn!("Decoded {} of {} {what} records", decoded.len(), total);
	}
	decoded
}
