//! File-backed key/value store with a size quota.

use std::{
    collections::BTreeMap,
    fs, io, mem,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use spada_config::StorageSettings;
use tracing::{debug, error, warn};

use crate::{Decoded, Envelope, StorageError, decode_envelope};

/// Size limits of a store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreLimits {
    /// Hard cap in bytes.
    pub max_bytes: usize,
    /// Fraction of `max_bytes` from which writes report a warning.
    pub warning_ratio: f64,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self::from_settings(&StorageSettings::default())
    }
}

impl StoreLimits {
    /// Reads the limits from storage settings.
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self {
            max_bytes: settings.max_bytes,
            warning_ratio: settings.warning_ratio,
        }
    }

    /// Size from which writes report a warning.
    pub fn warning_bytes(&self) -> usize {
        (self.max_bytes as f64 * self.warning_ratio) as usize
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOutcome {
    /// Store size after the write.
    pub size: usize,
    /// Set when the store is at or above the warning threshold.
    pub warning: Option<String>,
}

/// Accounted size of one entry: UTF-16 code units of key and value, two bytes each.
pub fn entry_size(key: &str, value: &str) -> usize {
    (key.encode_utf16().count() + value.encode_utf16().count()) * 2
}

/// A JSON file of `key -> serialized string` entries.
///
/// Every mutation is written through to disk. An in-memory store has no file.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Backing file, if any.
    path: Option<PathBuf>,
    /// Entries.
    items: BTreeMap<String, String>,
    /// Size limits.
    limits: StoreLimits,
}

impl Store {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub fn open(path: &Path, limits: StoreLimits) -> Result<Self, StorageError> {
        let items = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StorageError::ParseFile {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StorageError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        debug!(path = %path.display(), entries = items.len(), "storage opened");
        Ok(Self {
            path: Some(path.to_path_buf()),
            items,
            limits,
        })
    }

    /// Opens the store described by the storage settings.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let path = settings.resolved_path().ok_or(StorageError::NoStoragePath)?;
        Self::open(&path, StoreLimits::from_settings(settings))
    }

    /// Creates a store that is never written to disk.
    pub fn in_memory(limits: StoreLimits) -> Self {
        Self {
            path: None,
            items: BTreeMap::new(),
            limits,
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Size limits.
    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Wraps `value` in an envelope and stores it under `key`.
    ///
    /// Fails with [`StorageError::QuotaExceeded`] when the store would grow past its hard
    /// cap; the store is unchanged in that case. A write that lands at or above the warning
    /// threshold succeeds with a warning.
    pub fn set_item<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<SetOutcome, StorageError> {
        let envelope = Envelope {
            value,
            timestamp: Utc::now().timestamp_millis(),
            version: None,
        };
        let serialized =
            serde_json::to_string(&envelope).map_err(|source| StorageError::Serialize {
                key: key.to_string(),
                source,
            })?;
        self.set_raw(key, serialized)
    }

    /// Stores an already serialized string under `key`, with the same quota rules as
    /// [`set_item`](Self::set_item).
    pub fn set_raw(&mut self, key: &str, serialized: String) -> Result<SetOutcome, StorageError> {
        let existing = self
            .items
            .get(key)
            .map_or(0, |value| entry_size(key, value));
        let projected = self.size() - existing + entry_size(key, &serialized);

        if projected > self.limits.max_bytes {
            error!(key, projected, max = self.limits.max_bytes, "storage quota exceeded");
            return Err(StorageError::QuotaExceeded {
                projected,
                max: self.limits.max_bytes,
            });
        }

        let previous = self.items.insert(key.to_string(), serialized);
        if let Err(e) = self.persist() {
            match previous {
                Some(previous) => self.items.insert(key.to_string(), previous),
                None => self.items.remove(key),
            };
            return Err(e);
        }

        let warning = (projected >= self.limits.warning_bytes()).then(|| {
            let percent = projected * 100 / self.limits.max_bytes.max(1);
            warn!(key, projected, percent, "storage nearly full");
            format!("Storage {percent}% full")
        });
        Ok(SetOutcome {
            size: projected,
            warning,
        })
    }

    /// Reads and decodes the value under `key`.
    ///
    /// Both wrapped and legacy values are accepted. Unparseable or mistyped values are
    /// logged and read as missing.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.get_decoded(key)? {
            Decoded::ParseError(message) => {
                error!(key, %message, "stored value is not valid JSON");
                return None;
            }
            decoded => decoded.into_value()?,
        };
        match serde_json::from_value(value) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(key, error = %e, "stored value has an unexpected shape");
                None
            }
        }
    }

    /// Classifies the raw value under `key`.
    pub fn get_decoded(&self, key: &str) -> Option<Decoded> {
        self.items.get(key).map(|raw| decode_envelope(raw))
    }

    /// Raw serialized string under `key`.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// The entry is kept when the file cannot be written.
    pub fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.items.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.items.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    /// Removes every entry, keeping them all when the file cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let previous = mem::take(&mut self.items);
        if let Err(e) = self.persist() {
            self.items = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Accounted size of all entries in bytes.
    pub fn size(&self) -> usize {
        self.items
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }

    /// Whether the store is at or above the warning threshold.
    pub fn is_full(&self) -> bool {
        self.size() >= self.limits.warning_bytes()
    }

    /// Writes the entries to the backing file, if any.
    fn persist(&self) -> Result<(), StorageError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        let write_err = |source: io::Error| StorageError::WriteFile {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content =
            serde_json::to_string_pretty(&self.items).map_err(|source| StorageError::Serialize {
                key: String::new(),
                source,
            })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)
    }
}
