//! Errors raised while talking to the backend or decoding static assets.

use thiserror::Error;

/// Failure of a single fetch or decode action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
	/// The request never produced a response.
	#[error("Network error: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("HTTP error! status: {status} ({url})")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Requested URL.
		url: String,
	},
	/// Payload was not the JSON shape we expected.
	#[error("(De)Serialization error: {0}")]
	Decode(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<gloo_net::Error> for AppError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
			other => AppError::Network(other.to_string()),
		}
	}
}

impl From<serde_json::Error> for AppError {
	fn from(err: serde_json::Error) -> Self {
		AppError::Decode(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_error_message_names_code_and_url() {
		let err = AppError::Status {
			status: 503,
			url: "/api/graph-skeleton".into(),
		};
		assert_eq!(
			err.to_string(),
			"HTTP error! status: 503 (/api/graph-skeleton)"
		);
	}

	#[test]
	fn json_errors_become_decode_errors() {
		let err: AppError = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
		assert!(matches!(err, AppError::Decode(_)));
	}
}
