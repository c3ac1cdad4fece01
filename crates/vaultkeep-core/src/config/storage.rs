//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Local object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one sub-directory per account.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Chunk size in bytes for download data frames.
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: usize,
    /// Maximum accepted payload size of a single transfer frame.
    #[serde(default = "default_max_frame")]
    pub max_frame_bytes: usize,
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            chunk_size_bytes: default_chunk_size(),
            max_frame_bytes: default_max_frame(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root_path() -> String {
    "./data/objects".to_string()
}

fn default_chunk_size() -> usize {
    1024
}

fn default_max_frame() -> usize {
    1024 * 1024
}

fn default_max_upload() -> u64 {
    // Premium ceiling plus framing overhead headroom.
    1024 * 1024 * 1024 + 16 * 1024 * 1024
}
