//! Identifier minting for custom sections
//!
//! New sections get an id derived from their title plus a uniqueness token.
//! The token source is injected so tests can use a deterministic counter
//! while an interactive session may prefer wall-clock tokens.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of candidate identifiers for newly added sections
pub trait IdMinter {
    /// Produce a fresh candidate id for a section titled `title`
    ///
    /// Consecutive calls on the same minter must never return the same value.
    fn mint(&mut self, title: &str) -> String;
}

/// Deterministic `<slug>-<n>` ids from a monotonic counter
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Create a counter starting at 1
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdMinter for SequentialIds {
    fn mint(&mut self, title: &str) -> String {
        self.next += 1;
        format!("{}-{}", slugify(title), self.next)
    }
}

/// `<slug>-<unix millis>` ids, bumped so they stay strictly increasing
#[derive(Debug, Clone, Default)]
pub struct ClockIds {
    last: u128,
}

impl ClockIds {
    /// Create a wall-clock minter
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdMinter for ClockIds {
    fn mint(&mut self, title: &str) -> String {
        // A clock before the epoch only loses the time component, not uniqueness
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.last = now.max(self.last + 1);
        format!("{}-{}", slugify(title), self.last)
    }
}

/// Normalise a title into an identifier fragment
///
/// Lowercases ASCII alphanumerics and collapses every other run of characters
/// into a single hyphen. An empty result becomes `"section"`.
///
/// # Examples
/// * `"Getting Started!"` -> `"getting-started"`
/// * `"  C++ / FFI  "` -> `"c-ffi"`
pub fn slugify(title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}
