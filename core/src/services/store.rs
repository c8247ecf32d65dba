//! Bounded store calls.
//!
//! Every durable store and cache call made by the services goes through
//! [`with_timeout`]. An elapsed deadline surfaces as an internal error, never
//! as an invalid token or a cache miss.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// Default upper bound for a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Run `call` with a deadline of `limit`
pub async fn with_timeout<T, F>(limit: Duration, operation: &'static str, call: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(DomainError::internal(format!(
                "{} timed out after {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}
