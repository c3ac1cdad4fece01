//! Request context carrying the authenticated account and correlation id.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;

/// Context for the current authenticated request.
///
/// Extracted by middleware and passed into service methods so that every
/// operation knows *who* is acting and under *which* correlation id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub account_id: i64,
    /// Correlation id assigned when the request entered the server.
    pub correlation_id: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: i64, correlation_id: String) -> Self {
        Self {
            account_id,
            correlation_id,
            request_time: Utc::now(),
        }
    }
}

/// Bound a service operation by the configured deadline.
///
/// An elapsed deadline surfaces as a timeout error rather than hanging
/// the caller on a stuck collaborator.
pub async fn with_timeout<T, F>(deadline: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout(format!(
            "{operation} did not complete within {}s",
            deadline.as_secs()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultkeep_core::error::ErrorKind;

    #[tokio::test]
    async fn timeout_elapses_into_timeout_error() {
        let err = with_timeout(Duration::from_millis(10), "sleepy op", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn fast_operations_pass_through() {
        let value = with_timeout(Duration::from_secs(1), "quick op", async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
