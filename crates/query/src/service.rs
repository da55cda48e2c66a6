//! The query service contract consumed by views.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{PageRange, PageResult, Result};

/// Answers page queries for criteria of type `C` with rows of type `R`.
///
/// Implementations must honor `cancel`: once it fires, the call should resolve
/// promptly with [`QueryError::Aborted`](crate::QueryError::Aborted). Timeouts
/// are the implementation's concern.
#[async_trait]
pub trait QueryService<C, R>: Send + Sync {
	/// Returns the rows of `range` matching `criteria`, plus the total match count.
	async fn query(&self, criteria: &C, range: PageRange, cancel: &CancellationToken) -> Result<PageResult<R>>;
}
