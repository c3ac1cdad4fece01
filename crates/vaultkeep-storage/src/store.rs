//! Local filesystem object store with per-account quota tracking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use futures::Stream;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::sync::RwLock;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use vaultkeep_core::config::storage::StorageConfig;
use vaultkeep_core::error::{AppError, ErrorKind};
use vaultkeep_core::result::AppResult;
use vaultkeep_entity::tier::SubscriptionTier;

/// Byte stream of an object's contents.
pub type ObjectStream = Pin<Box<dyn Stream<Item = AppResult<Bytes>> + Send + 'static>>;

/// Catalog and tier table guarded by the store's single lock.
#[derive(Debug, Default)]
struct CatalogState {
    /// Per-account map of object name to byte size.
    objects: HashMap<i64, HashMap<String, u64>>,
    /// Per-account subscription tier used for ceiling checks.
    tiers: HashMap<i64, SubscriptionTier>,
}

impl CatalogState {
    /// Total bytes currently occupied by the account's objects.
    fn usage(&self, account_id: i64) -> u64 {
        self.objects
            .get(&account_id)
            .map(|files| files.values().sum())
            .unwrap_or(0)
    }
}

/// Quota-tracked object store over a local filesystem root.
///
/// Layout: `<root>/<account_id>/<object_name>`, one flat directory per
/// account. The catalog and tier table are the only shared mutable state;
/// a reader/writer lock serializes all mutations. The quota check and the
/// filesystem write inside [`ObjectStore::save`] run under the write lock
/// as one critical section, so concurrent uploads for the same account
/// cannot jointly overshoot the ceiling.
#[derive(Debug)]
pub struct ObjectStore {
    /// Root directory for all stored objects.
    root: PathBuf,
    /// Chunk size used when streaming objects back.
    chunk_size: usize,
    /// Catalog + tier table.
    state: RwLock<CatalogState>,
    /// Once set, every operation becomes a success-shaped no-op.
    closed: AtomicBool,
}

impl ObjectStore {
    /// Open the store, creating the root directory if needed and seeding
    /// the catalog from the files already on disk.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;

        let objects = scan_root(&root).await?;
        let accounts = objects.len();
        info!(root = %root.display(), accounts, "Object store opened");

        Ok(Self {
            root,
            chunk_size: config.chunk_size_bytes,
            state: RwLock::new(CatalogState {
                objects,
                tiers: HashMap::new(),
            }),
            closed: AtomicBool::new(false),
        })
    }

    /// Save an object, enforcing the account's current tier ceiling.
    ///
    /// On `QuotaExceeded` neither the filesystem nor the catalog is
    /// touched. Re-saving an existing name overwrites the object and
    /// replaces its prior catalog entry.
    pub async fn save(&self, account_id: i64, name: &str, data: Bytes) -> AppResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(());
        }
        validate_object_name(name)?;

        let mut state = self.state.write().await;

        let tier = state.tiers.get(&account_id).copied().unwrap_or_default();
        let ceiling = tier.ceiling_bytes();
        let usage = state.usage(account_id);

        if usage + data.len() as u64 > ceiling {
            return Err(AppError::quota_exceeded(format!(
                "saving {} bytes would exceed the {tier} tier ceiling",
                data.len()
            )));
        }

        let dir = self.account_dir(account_id);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create account directory: {}", dir.display()),
                e,
            )
        })?;

        let path = dir.join(name);
        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write object: {name}"), e)
        })?;

        state
            .objects
            .entry(account_id)
            .or_default()
            .insert(name.to_string(), data.len() as u64);

        debug!(account_id, name, bytes = data.len(), "Saved object");
        Ok(())
    }

    /// List the account's stored object names, sorted.
    pub async fn list(&self, account_id: i64) -> Vec<String> {
        if self.closed.load(Ordering::Acquire) {
            return Vec::new();
        }

        let state = self.state.read().await;
        let mut names: Vec<String> = state
            .objects
            .get(&account_id)
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Stream an object's bytes back in `chunk_size` pieces.
    ///
    /// The catalog, not the filesystem, decides existence: a name absent
    /// from the catalog is `NotFound` even if a stray file exists.
    pub async fn load(&self, account_id: i64, name: &str) -> AppResult<ObjectStream> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(Box::pin(futures::stream::empty()));
        }

        {
            let state = self.state.read().await;
            let known = state
                .objects
                .get(&account_id)
                .is_some_and(|files| files.contains_key(name));
            if !known {
                return Err(AppError::not_found(format!("object not found: {name}")));
            }
        }

        let path = self.account_dir(account_id).join(name);
        let file = fs::File::open(&path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to open object: {name}"), e)
        })?;

        let stream = ReaderStream::with_capacity(file, self.chunk_size)
            .map(|chunk| chunk.map_err(AppError::from));
        Ok(Box::pin(stream))
    }

    /// Delete an object and its catalog entry.
    pub async fn delete(&self, account_id: i64, name: &str) -> AppResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut state = self.state.write().await;
        let known = state
            .objects
            .get(&account_id)
            .is_some_and(|files| files.contains_key(name));
        if !known {
            return Err(AppError::not_found(format!("object not found: {name}")));
        }

        let path = self.account_dir(account_id).join(name);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            // Catalog said it exists; a missing file is already the end state.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {name}"),
                    e,
                ));
            }
        }

        if let Some(files) = state.objects.get_mut(&account_id) {
            files.remove(name);
        }

        debug!(account_id, name, "Deleted object");
        Ok(())
    }

    /// Current byte usage for the account.
    pub async fn usage(&self, account_id: i64) -> u64 {
        if self.closed.load(Ordering::Acquire) {
            return 0;
        }
        self.state.read().await.usage(account_id)
    }

    /// Replace the whole tier table (startup seeding).
    pub async fn set_tiers(&self, tiers: HashMap<i64, SubscriptionTier>) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.state.write().await.tiers = tiers;
    }

    /// Update one account's tier (registration or plan change).
    pub async fn update_tier(&self, account_id: i64, tier: SubscriptionTier) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.state.write().await.tiers.insert(account_id, tier);
    }

    /// Close the store. Subsequent operations become success-shaped
    /// no-ops so in-flight shutdown races do not crash callers.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        info!("Object store closed");
    }

    fn account_dir(&self, account_id: i64) -> PathBuf {
        self.root.join(account_id.to_string())
    }
}

/// Reject names that would escape the account's flat directory.
fn validate_object_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::validation("object name must not be empty"));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(AppError::validation(format!("invalid object name: {name}")));
    }
    Ok(())
}

/// Seed the catalog from the storage root.
///
/// Each top-level directory whose name parses as an account id contributes
/// its files' sizes; unparseable directories, plain files at the root, and
/// nested subdirectories are ignored.
async fn scan_root(root: &Path) -> AppResult<HashMap<i64, HashMap<String, u64>>> {
    let mut catalog = HashMap::new();

    let mut entries = fs::read_dir(root).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to scan storage root: {}", root.display()),
            e,
        )
    })?;

    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        AppError::with_source(ErrorKind::Storage, "Failed to read storage root entry", e)
    })? {
        let file_type = entry.file_type().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to stat storage root entry", e)
        })?;
        if !file_type.is_dir() {
            continue;
        }

        let Ok(account_id) = entry.file_name().to_string_lossy().parse::<i64>() else {
            continue;
        };

        let mut files = HashMap::new();
        let mut objects = fs::read_dir(entry.path()).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to scan account directory", e)
        })?;

        while let Some(object) = objects.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read account entry", e)
        })? {
            let meta = object.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to stat object", e)
            })?;
            if meta.is_dir() {
                continue;
            }
            files.insert(object.file_name().to_string_lossy().to_string(), meta.len());
        }

        catalog.insert(account_id, files);
    }

    Ok(catalog)
}
