//! Source file discovery and ordering.
//!
//! A source file is a path paired with the numeric key found in its name.
//! Keys drive the merge order, the group boundaries and the output names.
//!
//! # Examples
//!
//! ```
//! use pdfvol::source::NumericKey;
//!
//! let key = NumericKey::extract("chapter_012_final_3.pdf");
//! assert_eq!(key.as_u64(), Some(12));
//! assert_eq!(key.padded(3), "012");
//! ```

pub mod scan;

pub use scan::{collect_sources, scan_folder};

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

/// Non-negative integer taken from the first run of digits in a file name.
///
/// The value is kept as its decimal digits without leading zeros, so keys of
/// any length compare correctly and never overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NumericKey {
    digits: String,
}

impl NumericKey {
    /// Extract the key from a file name.
    ///
    /// Only ASCII digits form a run. A name without digits yields zero.
    pub fn extract(name: &str) -> Self {
        DIGIT_RUN
            .find(name)
            .map(|run| Self::from_digits(run.as_str()))
            .unwrap_or_default()
    }

    fn from_digits(run: &str) -> Self {
        let trimmed = run.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Self {
            digits: digits.to_string(),
        }
    }

    /// The key as a `u64`, if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    /// Check whether the key is zero.
    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    /// Zero-pad the key to at least `width` digits.
    ///
    /// Longer keys are printed in full.
    pub fn padded(&self, width: usize) -> String {
        format!("{:0>width$}", self.digits)
    }
}

impl Default for NumericKey {
    fn default() -> Self {
        Self {
            digits: "0".to_string(),
        }
    }
}

impl From<u64> for NumericKey {
    fn from(value: u64) -> Self {
        Self {
            digits: value.to_string(),
        }
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NumericKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// A discovered source file and its sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,

    /// Key extracted from the file name.
    pub key: NumericKey,
}

impl SourceFile {
    /// Build a source file, deriving the key from the final path component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = NumericKey::extract(&file_name_of(&path));
        Self { path, key }
    }

    /// File name for display.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sort files ascending by key.
///
/// The sort is stable: files sharing a key keep their enumeration order.
pub fn sort_by_key(files: &mut [SourceFile]) {
    files.sort_by(|a, b| a.key.cmp(&b.key));
}
