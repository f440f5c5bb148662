//! Repository layer for data access.
//!
//! Every operation receives the caller's [`RequestContext`] and is bounded
//! by its deadline; an expired deadline abandons the in-flight call and
//! surfaces as [`StorageError::Timeout`]. Nothing here retries.

pub mod entities;
mod memory;
mod user_repository;

use std::future::Future;

use domain::{RequestContext, StorageError};

pub use memory::MemoryUserStore;
pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Run `fut` until it completes or the request deadline passes.
pub(crate) async fn within_deadline<F>(
    ctx: &RequestContext,
    fut: F,
) -> Result<F::Output, StorageError>
where
    F: Future,
{
    let deadline = tokio::time::Instant::from_std(ctx.deadline());

    tokio::time::timeout_at(deadline, fut).await.map_err(|_| {
        tracing::warn!(
            request_id = %ctx.request_id(),
            timeout = ?ctx.timeout(),
            "Storage call abandoned at request deadline"
        );
        StorageError::Timeout(ctx.timeout())
    })
}
