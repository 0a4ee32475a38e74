//! The in-memory configuration store.
//!
//! A [`ConfigStore`] owns a mapping from lowercase key to raw string value,
//! an optional custom line validator, and the path of the file it was loaded
//! from.  All behavior — parsing, querying, mutation — lives on this one
//! type.
//!
//! Keys are case-normalized (lowercased) at every insertion and lookup
//! point, so `store.get_str("MySQL.Host", ...)` and
//! `store.get_str("mysql.host", ...)` address the same entry.
//!
//! The store is deliberately unsynchronized: every operation is synchronous
//! and concurrent mutation from multiple threads is undefined.  Callers who
//! need a shared handle opt into [`crate::sync::SharedStore`] instead.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::parse::{is_entry_line, split_entry, LineValidator};

/// Errors reported by [`ConfigStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has been disposed and can no longer be used.
    #[error("store has been disposed")]
    Disposed,

    /// The configuration file could not be opened or read.
    #[error("cannot read configuration file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key is already present in the store (load-time or
    /// [`ConfigStore::insert_new`]-time collision).  Carries the lowercased
    /// key.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// No entry exists for the key.
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// Outcome of a typed getter: the effective value plus whether the key was
/// present.
///
/// Typed getters never fail on a missing key.  They resolve to the
/// caller-supplied default and report the miss through [`found`], so callers
/// keep both the usable value and the signal that a fallback was taken:
///
/// ```rust
/// use flatconf_core::ConfigStore;
///
/// let store = ConfigStore::new("app.conf");
/// let port = store.get_int("mysql.port", 3306).unwrap();
/// assert_eq!(port.value, 3306);
/// assert!(!port.found, "nothing loaded yet, so the default was used");
/// ```
///
/// [`found`]: Lookup::found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<T> {
    /// The stored value, or the caller-supplied default when the key is
    /// absent.
    pub value: T,
    /// Whether the key was present in the store.
    pub found: bool,
}

impl<T> Lookup<T> {
    fn hit(value: T) -> Self {
        Self { value, found: true }
    }

    fn miss(value: T) -> Self {
        Self {
            value,
            found: false,
        }
    }
}

/// In-memory key-value configuration store backed by a flat `key=value`
/// text file.
///
/// # Examples
///
/// ```rust
/// use flatconf_core::ConfigStore;
///
/// let mut store = ConfigStore::new("app.conf");
/// store.set("mysql.host", "localhost").unwrap();
///
/// let host = store.get_str("MYSQL.HOST", "127.0.0.1").unwrap();
/// assert!(host.found);
/// assert_eq!(host.value, "localhost");
/// ```
///
/// # Lifecycle
///
/// A store is constructed empty and bound to a path ([`new`]), populated
/// with [`reload`], mutated through the CRUD operations, and terminally
/// released with [`dispose`].  Once disposed, every operation reports
/// [`StoreError::Disposed`]; the store cannot be revived.
///
/// [`new`]: ConfigStore::new
/// [`reload`]: ConfigStore::reload
/// [`dispose`]: ConfigStore::dispose
pub struct ConfigStore {
    /// `Some` while the store is live, `None` once disposed.
    entries: Option<HashMap<String, String>>,
    /// Custom line validator; `None` means the default rule applies.
    validator: Option<LineValidator>,
    /// The source file path last used to populate the store.
    path: PathBuf,
}

impl ConfigStore {
    /// Creates an empty store bound to `path`, using the default line rule.
    ///
    /// No I/O happens here; call [`reload`](ConfigStore::reload) to populate
    /// the store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Some(HashMap::new()),
            validator: None,
            path: path.into(),
        }
    }

    /// Creates an empty store bound to `path` with a custom line validator.
    ///
    /// The validator fully replaces the default rule: it alone decides which
    /// raw lines are parsed as entries.
    pub fn with_validator<F>(path: impl Into<PathBuf>, validator: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            entries: Some(HashMap::new()),
            validator: Some(Box::new(validator)),
            path: path.into(),
        }
    }

    /// Creates a store bound to `path` and performs the initial load.
    ///
    /// Convenience for [`new`](ConfigStore::new) followed by
    /// [`reload`](ConfigStore::reload).  On a load failure the partially
    /// filled store is dropped; callers who want to keep an empty-but-usable
    /// store after a failed load use the two-step path instead.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FileOpen`] when the path cannot be read and
    /// [`StoreError::DuplicateKey`] when the file repeats a key.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        store.reload()?;
        Ok(store)
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Clears all current entries, then re-reads the bound file line by line.
    ///
    /// Each line accepted by the validator is split on its first `=`; the
    /// lowercased left segment becomes the key and the remainder the value.
    /// A key already present (case-insensitively) aborts the load — entries
    /// read before the collision remain in the store, so a failed reload is
    /// not atomic.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disposed`] on a disposed store,
    /// [`StoreError::FileOpen`] when the file cannot be opened or read, and
    /// [`StoreError::DuplicateKey`] on a repeated key.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.clear()?;

        let file = File::open(&self.path).map_err(|source| StoreError::FileOpen {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut loaded = 0usize;
        for line in reader.lines() {
            let line = line.map_err(|source| StoreError::FileOpen {
                path: self.path.clone(),
                source,
            })?;
            if !self.accepts(&line) {
                continue;
            }

            let (key, value) = split_entry(&line);
            if self.entries_mut()?.contains_key(&key) {
                warn!(
                    "reload of {} aborted: duplicate key '{key}'",
                    self.path.display()
                );
                return Err(StoreError::DuplicateKey(key));
            }
            self.entries_mut()?.insert(key, value);
            loaded += 1;
        }

        debug!("loaded {loaded} entries from {}", self.path.display());
        Ok(())
    }

    /// Rebinds the store to `path` and reloads from it.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`reload`](ConfigStore::reload).
    pub fn set_path_and_reload(&mut self, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        if self.entries.is_none() {
            return Err(StoreError::Disposed);
        }
        self.path = path.into();
        self.reload()
    }

    // ── Typed getters ─────────────────────────────────────────────────────────

    /// Returns the string value for `key`, or `default` when the key is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disposed`] on a disposed store.  A missing key
    /// is not an error: it resolves the default with
    /// [`found`](Lookup::found) set to `false`.
    pub fn get_str(&self, key: &str, default: &str) -> Result<Lookup<String>, StoreError> {
        match self.entries()?.get(&key.to_lowercase()) {
            Some(value) => Ok(Lookup::hit(value.clone())),
            None => Ok(Lookup::miss(default.to_string())),
        }
    }

    /// Returns the value for `key` split by `sep`, or `default` split the
    /// same way when the key is absent.
    pub fn get_str_array(
        &self,
        key: &str,
        default: &str,
        sep: &str,
    ) -> Result<Lookup<Vec<String>>, StoreError> {
        match self.entries()?.get(&key.to_lowercase()) {
            Some(value) => Ok(Lookup::hit(split_list(value, sep))),
            None => Ok(Lookup::miss(split_list(default, sep))),
        }
    }

    /// Returns the integer value for `key`, or `default` when the key is
    /// absent.
    ///
    /// A stored value that is not a valid integer silently yields `0` — the
    /// parse never fails the call.  This leniency is part of the store's
    /// observable contract.
    pub fn get_int(&self, key: &str, default: i64) -> Result<Lookup<i64>, StoreError> {
        match self.entries()?.get(&key.to_lowercase()) {
            Some(value) => Ok(Lookup::hit(lenient_int(value))),
            None => Ok(Lookup::miss(default)),
        }
    }

    /// Returns the value for `key` split by `sep` with each element parsed
    /// as an integer, or `default` treated the same way when the key is
    /// absent.
    ///
    /// Each element that fails to parse yields `0`, per the same lenient
    /// rule as [`get_int`](ConfigStore::get_int).
    pub fn get_int_array(
        &self,
        key: &str,
        default: &str,
        sep: &str,
    ) -> Result<Lookup<Vec<i64>>, StoreError> {
        let ints = |raw: &str| raw.split(sep).map(lenient_int).collect();
        match self.entries()?.get(&key.to_lowercase()) {
            Some(value) => Ok(Lookup::hit(ints(value))),
            None => Ok(Lookup::miss(ints(default))),
        }
    }

    /// Returns the boolean value for `key`, or `default` when the key is
    /// absent.
    ///
    /// The stored value is `true` iff it equals `"true"` or `"1"` exactly;
    /// any other stored string (including `"yes"` or `"True"`) is `false`.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<Lookup<bool>, StoreError> {
        match self.entries()?.get(&key.to_lowercase()) {
            Some(value) => Ok(Lookup::hit(value == "true" || value == "1")),
            None => Ok(Lookup::miss(default)),
        }
    }

    // ── Mutators ──────────────────────────────────────────────────────────────

    /// Inserts `key` only if it is not already present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] when the lowercased key already
    /// exists; the map is left unchanged.
    pub fn insert_new(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let key = key.to_lowercase();
        let entries = self.entries_mut()?;
        if entries.contains_key(&key) {
            return Err(StoreError::DuplicateKey(key));
        }
        entries.insert(key, value.to_string());
        Ok(())
    }

    /// Unconditional upsert: inserts `key` or overwrites its current value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries_mut()?
            .insert(key.to_lowercase(), value.to_string());
        Ok(())
    }

    /// Removes the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] when no such entry exists.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let key = key.to_lowercase();
        match self.entries_mut()?.remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::KeyNotFound(key)),
        }
    }

    /// Removes all entries.  No-op when the store is already empty.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries_mut()?.clear();
        Ok(())
    }

    // ── Introspection ─────────────────────────────────────────────────────────

    /// Case-insensitive membership test.
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries()?.contains_key(&key.to_lowercase()))
    }

    /// Current entry count.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries()?.len())
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.entries()?.is_empty())
    }

    /// Returns a copy of every entry.
    ///
    /// This is a defensive copy, not the live map: mutating the returned
    /// map never affects the store.
    pub fn snapshot(&self) -> Result<HashMap<String, String>, StoreError> {
        Ok(self.entries()?.clone())
    }

    /// The currently bound source file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── Dispose ───────────────────────────────────────────────────────────────

    /// Releases the entry map and validator and clears the path.
    ///
    /// Terminal: every subsequent operation reports
    /// [`StoreError::Disposed`].  A disposed store cannot be revived except
    /// by constructing a new one.
    pub fn dispose(&mut self) {
        self.entries = None;
        self.validator = None;
        self.path = PathBuf::new();
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn accepts(&self, line: &str) -> bool {
        match &self.validator {
            Some(validator) => validator(line),
            None => is_entry_line(line),
        }
    }

    fn entries(&self) -> Result<&HashMap<String, String>, StoreError> {
        self.entries.as_ref().ok_or(StoreError::Disposed)
    }

    fn entries_mut(&mut self) -> Result<&mut HashMap<String, String>, StoreError> {
        self.entries.as_mut().ok_or(StoreError::Disposed)
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("entries", &self.entries.as_ref().map(HashMap::len))
            .field("custom_validator", &self.validator.is_some())
            .finish()
    }
}

/// Parses `raw` as an integer, yielding `0` on any parse failure.
fn lenient_int(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

fn split_list(raw: &str, sep: &str) -> Vec<String> {
    raw.split(sep).map(str::to_string).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
