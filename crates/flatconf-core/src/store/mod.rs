//! The configuration store: construction, loading, typed access, and CRUD.

pub mod config;

pub use config::{ConfigStore, Lookup, StoreError};
