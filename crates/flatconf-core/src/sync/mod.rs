//! Opt-in synchronized access to a [`crate::ConfigStore`].

pub mod shared;

pub use shared::SharedStore;
