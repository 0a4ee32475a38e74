//! # flatconf-core
//!
//! In-memory key-value configuration store loaded from a flat, line-oriented
//! text file using `key=value` syntax, with comment and blank-line skipping,
//! case-insensitive keys, pluggable line validation, and basic CRUD plus
//! typed accessors (string, integer, boolean, and delimiter-split arrays).
//!
//! This crate is a pure in-process library: it reads one file per store and
//! never writes back to it.
//!
//! # File format
//!
//! ```text
//! # database settings
//! mysql.host=localhost
//! mysql.port=3306
//!
//! welcome.message=tagline=fast and flat
//! feature.dark_mode=true
//! ```
//!
//! Under the default rule a line is an entry iff it does not start with `#`,
//! is non-empty, and contains `=`.  Only the first `=` separates key from
//! value, so values may contain further `=` characters.  Keys are lowercased
//! on insertion and lookup; duplicate keys in a file are a load error, not a
//! silent overwrite.  There is no escaping, quoting, or line continuation.
//!
//! # Quick start
//!
//! ```rust
//! use flatconf_core::ConfigStore;
//!
//! let mut store = ConfigStore::new("app.conf");
//! store.set("mysql.host", "localhost").unwrap();
//! store.set("mysql.port", "3306").unwrap();
//!
//! // Keys are case-insensitive.
//! let host = store.get_str("MYSQL.HOST", "127.0.0.1").unwrap();
//! assert_eq!(host.value, "localhost");
//!
//! // Missing keys resolve the caller's default and flag the miss.
//! let retries = store.get_int("mysql.retries", 3).unwrap();
//! assert_eq!(retries.value, 3);
//! assert!(!retries.found);
//! ```
//!
//! File-backed stores call [`ConfigStore::load`] (or
//! [`ConfigStore::new`] + [`ConfigStore::reload`]) instead of `set`.
//!
//! The crate defines:
//!
//! - **`parse`** – the line grammar: the default acceptance rule, the
//!   pluggable [`LineValidator`] predicate, and first-`=` splitting.
//!
//! - **`store`** – the [`ConfigStore`] itself: loading, typed getters,
//!   mutators, introspection, and the disposed terminal state.
//!
//! - **`sync`** – the opt-in [`SharedStore`] wrapper for callers who need
//!   one store shared across threads.  The plain store is unsynchronized by
//!   contract.

pub mod parse;
pub mod store;
pub mod sync;

// Re-export the most-used types at the crate root so callers can write
// `flatconf_core::ConfigStore` instead of `flatconf_core::store::config::ConfigStore`.
pub use parse::{is_entry_line, LineValidator};
pub use store::config::{ConfigStore, Lookup, StoreError};
pub use sync::shared::SharedStore;
