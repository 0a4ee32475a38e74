//! Line classification and splitting for the flat `key=value` file format.

pub mod line;

pub use line::{is_entry_line, split_entry, LineValidator};
