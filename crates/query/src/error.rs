//! Error types for query execution.

use thiserror::Error;

/// Errors a [`QueryService`](crate::QueryService) call can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
	/// The call was cancelled before it completed.
	///
	/// Expected whenever a newer request supersedes this one; views never
	/// surface it.
	#[error("query aborted")]
	Aborted,

	/// The backend could not be reached or failed while answering.
	#[error("transport error: {0}")]
	Transport(String),

	/// The criteria cannot be turned into a valid query.
	#[error("invalid query: {0}")]
	Validation(String),
}

impl QueryError {
	/// Returns true for [`QueryError::Aborted`].
	pub fn is_aborted(&self) -> bool {
		matches!(self, Self::Aborted)
	}
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
