//! Persistent catalog cache: one JSON mapping `catalog_id -> entry`, read whole
//! at startup and rewritten whole on flush. It is an optimization only: a
//! missing or corrupt file loads as empty and write failures are reported,
//! never fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::record::{CatalogEntry, CatalogRecord};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read catalog cache {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog cache {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize catalog cache: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write catalog cache {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default)]
pub struct CatalogCache {
    path: Option<PathBuf>,
    entries: BTreeMap<u32, CatalogEntry>,
    dirty: bool,
}

impl CatalogCache {
    /// Cache with no backing file; `flush` is a no-op.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the mapping at `path`. Any read or parse failure yields an empty cache
    /// that will still flush to `path`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => {
                debug!(path = %path.display(), entries = entries.len(), "catalog cache loaded");
                entries
            }
            Err(CacheError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no catalog cache yet, starting empty");
                BTreeMap::new()
            }
            Err(err) => {
                warn!("{err}; starting with an empty catalog cache");
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path),
            entries,
            dirty: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, catalog_id: u32) -> Option<&CatalogEntry> {
        self.entries.get(&catalog_id)
    }

    pub fn record(&self, catalog_id: u32) -> Option<CatalogRecord> {
        self.get(catalog_id).map(|entry| entry.to_record(catalog_id))
    }

    /// Merge `partial` into the entry for `catalog_id`, creating it if absent.
    pub fn put_merge(&mut self, catalog_id: u32, partial: CatalogEntry) {
        let entry = self.entries.entry(catalog_id).or_default();
        let before = entry.clone();
        entry.merge(partial);
        if *entry != before {
            self.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rewrite the whole mapping (temp file + rename). Skipped when nothing changed.
    pub fn flush(&mut self) -> Result<(), CacheError> {
        if !self.dirty {
            return Ok(());
        }
        let Some(path) = self.path.clone() else {
            self.dirty = false;
            return Ok(());
        };

        let payload = serde_json::to_string_pretty(&self.entries)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CacheError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, payload).map_err(|source| CacheError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| CacheError::Write {
            path: path.clone(),
            source,
        })?;

        self.dirty = false;
        info!(path = %path.display(), entries = self.entries.len(), "catalog cache flushed");
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<u32, CatalogEntry>, CacheError> {
    let raw = fs::read_to_string(path).map_err(|source| CacheError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CacheError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
