//! Binary object operations over the quota-tracked store.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::info;

use vaultkeep_core::result::AppResult;
use vaultkeep_storage::{ObjectStore, ObjectStream};

use crate::context::{RequestContext, with_timeout};

/// Upload, download, listing, and deletion of stored objects.
#[derive(Debug, Clone)]
pub struct ObjectService {
    /// Quota-tracked object store.
    store: Arc<ObjectStore>,
    /// Deadline applied to each store operation.
    operation_timeout: Duration,
}

impl ObjectService {
    /// Creates a new object service.
    pub fn new(store: Arc<ObjectStore>, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    /// Save a fully-buffered object under the calling account.
    pub async fn save(&self, ctx: &RequestContext, name: &str, data: Bytes) -> AppResult<()> {
        let size = data.len();
        with_timeout(
            self.operation_timeout,
            "object save",
            self.store.save(ctx.account_id, name, data),
        )
        .await?;

        info!(
            account_id = ctx.account_id,
            correlation_id = %ctx.correlation_id,
            name,
            bytes = size,
            "Object saved"
        );
        Ok(())
    }

    /// List the calling account's object names.
    pub async fn list(&self, ctx: &RequestContext) -> Vec<String> {
        self.store.list(ctx.account_id).await
    }

    /// Open a chunked stream over one stored object.
    pub async fn load(&self, ctx: &RequestContext, name: &str) -> AppResult<ObjectStream> {
        self.store.load(ctx.account_id, name).await
    }

    /// Delete one stored object.
    pub async fn delete(&self, ctx: &RequestContext, name: &str) -> AppResult<()> {
        with_timeout(
            self.operation_timeout,
            "object delete",
            self.store.delete(ctx.account_id, name),
        )
        .await?;

        info!(
            account_id = ctx.account_id,
            correlation_id = %ctx.correlation_id,
            name,
            "Object deleted"
        );
        Ok(())
    }

    /// Current byte usage for the calling account.
    pub async fn usage(&self, ctx: &RequestContext) -> u64 {
        self.store.usage(ctx.account_id).await
    }
}
