use std::fs;
use std::path::{Path, PathBuf};

use marquee_core::SalesNode;
use serde::{Deserialize, Serialize};

pub const CACHE_VERSION: u32 = 1;
const CACHE_FILE: &str = "movie-sales.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    version: u32,
    data: SalesNode,
}

/// Single-entry disk cache for the fetched dataset.
///
/// Replace-on-write, no expiry: a cached dataset is served until it is
/// overwritten (`--refresh`) or the file is removed. The `version` field
/// invalidates blobs written by older cache formats.
#[derive(Debug, Clone)]
pub struct DiskCache {
    path: PathBuf,
}

impl DiskCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache location under the platform cache directory.
    pub fn default_location() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "marquee")?;
        Some(Self::new(dirs.cache_dir().join(CACHE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached dataset. An unreadable, unparsable or
    /// version-mismatched entry is treated as a miss.
    pub fn load(&self) -> Option<SalesNode> {
        let text = fs::read_to_string(&self.path).ok()?;
        let envelope: CacheEnvelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "discarding unparsable cache entry");
                return None;
            }
        };
        if envelope.version != CACHE_VERSION {
            tracing::debug!(
                found = envelope.version,
                expected = CACHE_VERSION,
                "discarding cache entry with stale version"
            );
            return None;
        }
        if marquee_core::validate_dataset(&envelope.data).is_err() {
            tracing::debug!(path = %self.path.display(), "discarding cache entry with invalid dataset");
            return None;
        }
        Some(envelope.data)
    }

    /// Replaces the cache entry with `data`.
    pub fn store(&self, data: &SalesNode) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let envelope = CacheEnvelope {
            version: CACHE_VERSION,
            data: data.clone(),
        };
        let text = serde_json::to_string(&envelope).map_err(std::io::Error::other)?;
        fs::write(&self.path, text)
    }
}
