//! Raw text line handling: deciding which lines are entries and splitting
//! them into a key and a value.
//!
//! Grammar per accepted line:
//! ```text
//! key=value
//! ```
//! where `key` contains no `=` and `value` is everything after the *first*
//! `=` — so values may themselves contain `=` characters.  Under the default
//! rule, lines starting with `#` are comments and blank lines are skipped.
//! No escaping, quoting, or line continuation exists in this format.

/// Pluggable predicate deciding whether a raw text line should be parsed as
/// a configuration entry.
///
/// When a store carries a custom validator it fully replaces the default
/// rule ([`is_entry_line`]) — the two are never combined.
pub type LineValidator = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// The default line-acceptance rule.
///
/// A line is a configuration entry iff it does not start with `#`, is
/// non-empty, and contains the `=` character.
///
/// # Examples
///
/// ```rust
/// use flatconf_core::parse::is_entry_line;
///
/// assert!(is_entry_line("mysql.host=localhost"));
/// assert!(!is_entry_line("# a comment"));
/// assert!(!is_entry_line(""));
/// assert!(!is_entry_line("no delimiter here"));
/// ```
pub fn is_entry_line(line: &str) -> bool {
    !line.starts_with('#') && !line.is_empty() && line.contains('=')
}

/// Splits a raw line into its lowercased key and its value.
///
/// The split happens on the first `=` only; any further `=` characters stay
/// in the value.  A line without any `=` — reachable only through a custom
/// [`LineValidator`] that admits such lines — becomes a key with an empty
/// value.
pub fn split_entry(line: &str) -> (String, String) {
    match line.split_once('=') {
        Some((key, value)) => (key.to_lowercase(), value.to_string()),
        None => (line.to_lowercase(), String::new()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
