//! Diff output types.

use crate::errors::ExError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for the nil side of a nil-vs-empty slice difference.
pub const NIL_SLICE: &str = "<nil slice>";
/// Placeholder for the nil side of a nil-vs-empty map difference.
pub const NIL_MAP: &str = "<nil map>";
/// Placeholder for a key present on only one side of a map.
pub const MISSING_KEY: &str = "<missing key>";
/// Placeholder on the actual side for an index only the expected slice has.
pub const MISSING_INDEX: &str = "<missing index>";
/// Placeholder on the expected side for an index only the actual slice has.
pub const UNWANTED_INDEX: &str = "<unwanted index>";

/// One point of divergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// Rendered traversal path; empty at the root
    pub path: String,
    pub want: String,
    pub got: String,
}

impl DiffEntry {
    pub fn new(path: impl Into<String>, want: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            want: want.into(),
            got: got.into(),
        }
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "  want: {}\n   got: {}", self.want, self.got);
        }
        write!(
            f,
            "  at {}\n    want: {}\n     got: {}",
            self.path, self.want, self.got
        )
    }
}

/// Ordered differences in traversal order. Empty means equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diff(Vec<DiffEntry>);

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, entry: DiffEntry) {
        self.0.push(entry);
    }

    /// Machine-readable form: a JSON array of `{path, want, got}` objects.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, ExError> {
        serde_json::to_string(self).map_err(|e| ExError::from(e).with_op("diff_to_json"))
    }
}

impl From<Vec<DiffEntry>> for Diff {
    fn from(entries: Vec<DiffEntry>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for Diff {
    type Item = DiffEntry;
    type IntoIter = std::vec::IntoIter<DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DiffEntry;
    type IntoIter = std::slice::Iter<'a, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Each entry on its own block, each block preceded by a newline, so the
/// text can be appended directly to a `...:` headline.
impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            writeln!(f)?;
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
