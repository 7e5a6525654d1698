//! Renumbering of volume files.
//!
//! Files named `<prefix><digits><suffix>` get their number shifted by a
//! fixed offset. Renames are planned first, then performed in an order
//! where no target is still occupied by a file waiting its turn.
//!
//! # Examples
//!
//! ```
//! use pdfvol::rename::{RenamePattern, plan_renames};
//!
//! let pattern = RenamePattern::default();
//! let plan = plan_renames(["卷1.pdf", "卷2.pdf", "notes.txt"], &pattern, 2);
//! let targets: Vec<_> = plan.ops.iter().map(|op| op.to.as_str()).collect();
//! assert_eq!(targets, ["卷4.pdf", "卷3.pdf"]);
//! ```

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::config::{DEFAULT_EXTENSION, DEFAULT_VOLUME_PREFIX};
use crate::error::{PdfVolError, Result};

/// Literal prefix and suffix around the number of a volume file name.
#[derive(Debug, Clone)]
pub struct RenamePattern {
    prefix: String,
    suffix: String,
    regex: Regex,
    keep_width: bool,
}

impl RenamePattern {
    /// Compile a pattern matching `<prefix><digits><suffix>` exactly.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let suffix = suffix.into();
        let source = format!(
            "^{}([0-9]+){}$",
            regex::escape(&prefix),
            regex::escape(&suffix)
        );
        let regex = Regex::new(&source)
            .map_err(|e| PdfVolError::invalid_config(format!("Invalid rename pattern: {e}")))?;

        Ok(Self {
            prefix,
            suffix,
            regex,
            keep_width: false,
        })
    }

    /// Zero-pad new numbers to the digit count of the old ones.
    pub fn with_keep_width(mut self, keep_width: bool) -> Self {
        self.keep_width = keep_width;
        self
    }

    /// Whether new numbers keep the old digit count.
    pub fn keeps_width(&self) -> bool {
        self.keep_width
    }

    /// Text before the number.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text after the number.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The digits of `name`, if it matches.
    pub fn digits<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Build a file name around `number`, zero-padded to `width` digits.
    pub fn file_name(&self, number: u64, width: usize) -> String {
        format!("{}{number:0width$}{}", self.prefix, self.suffix)
    }
}

impl Default for RenamePattern {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME_PREFIX, format!(".{DEFAULT_EXTENSION}"))
            .expect("default rename pattern is valid")
    }
}

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOp {
    /// Current file name.
    pub from: String,

    /// New file name.
    pub to: String,

    /// Number before the shift.
    pub old: u64,

    /// Number after the shift.
    pub new: u64,
}

/// Renames to perform, in execution order, plus the names that could not
/// be shifted.
#[derive(Debug, Default)]
pub struct RenamePlan {
    /// Renames in the order they must run.
    pub ops: Vec<RenameOp>,

    /// Matching names whose number could not be shifted.
    pub rejected: Vec<PdfVolError>,
}

impl RenamePlan {
    /// Whether there is nothing to rename.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Plan the renames for `names` under `pattern`.
///
/// Names that do not match are ignored. A number that does not fit in a
/// `u64`, or whose shifted value would be negative or overflow, is rejected.
/// New numbers are written without padding, so `卷009.pdf` becomes
/// `卷11.pdf`. A pattern built [`with_keep_width`](RenamePattern::with_keep_width)
/// keeps the old digit count as a minimum width instead (`卷011.pdf`).
///
/// With a positive offset the plan runs from the highest number down; with
/// a negative offset from the lowest up.
pub fn plan_renames<I, S>(names: I, pattern: &RenamePattern, offset: i64) -> RenamePlan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut plan = RenamePlan::default();

    for name in names {
        let name = name.as_ref();
        let Some(digits) = pattern.digits(name) else {
            continue;
        };

        let Ok(old) = digits.parse::<u64>() else {
            plan.rejected.push(PdfVolError::rename_failed(
                name,
                "?",
                "number is too large",
            ));
            continue;
        };

        let width = if pattern.keeps_width() { digits.len() } else { 0 };
        match old.checked_add_signed(offset) {
            Some(new) => plan.ops.push(RenameOp {
                from: name.to_string(),
                to: pattern.file_name(new, width),
                old,
                new,
            }),
            None => plan.rejected.push(PdfVolError::rename_failed(
                name,
                "?",
                format!("{old} {offset:+} is out of range"),
            )),
        }
    }

    if offset > 0 {
        plan.ops
            .sort_by(|a, b| b.old.cmp(&a.old).then_with(|| b.from.cmp(&a.from)));
    } else {
        plan.ops
            .sort_by(|a, b| a.old.cmp(&b.old).then_with(|| a.from.cmp(&b.from)));
    }

    plan
}

/// List the names of the regular files in `folder`.
///
/// Names that are not valid UTF-8 cannot match a pattern and are skipped.
pub async fn list_names(folder: &Path) -> Result<Vec<String>> {
    if !tokio::fs::try_exists(folder).await? {
        return Err(PdfVolError::folder_not_found(folder.to_path_buf()));
    }

    let metadata = tokio::fs::metadata(folder).await?;
    if !metadata.is_dir() {
        return Err(PdfVolError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!(name = ?raw, "skipping non UTF-8 file name"),
        }
    }

    names.sort();
    Ok(names)
}

/// Outcome of executing a rename plan.
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Renames performed (or that would be, in a dry run).
    pub renamed: Vec<RenameOp>,

    /// Renames that failed.
    pub failed: Vec<PdfVolError>,
}

impl RenameReport {
    /// Turn a report with failures into an error.
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(PdfVolError::other(format!(
            "{} of {} rename(s) failed",
            self.failed.len(),
            self.failed.len() + self.renamed.len()
        )))
    }
}

/// Perform `ops` in order inside `folder`.
///
/// A rename onto an existing file is refused. Failures are collected and
/// the remaining renames still run. A dry run touches nothing but applies
/// the same collision check against the simulated folder state.
pub async fn execute_renames(folder: &Path, ops: &[RenameOp], dry_run: bool) -> RenameReport {
    let mut report = RenameReport::default();
    let mut vacated: HashSet<&str> = HashSet::new();
    let mut occupied: HashSet<&str> = HashSet::new();

    for op in ops {
        let from = folder.join(&op.from);
        let to = folder.join(&op.to);

        let on_disk = match tokio::fs::try_exists(&to).await {
            Ok(exists) => exists,
            Err(e) => {
                report
                    .failed
                    .push(PdfVolError::rename_failed(&op.from, &op.to, e.to_string()));
                continue;
            }
        };
        let taken = if dry_run {
            (on_disk && !vacated.contains(op.to.as_str())) || occupied.contains(op.to.as_str())
        } else {
            on_disk
        };

        if taken {
            tracing::warn!(from = %op.from, to = %op.to, "target already exists");
            report.failed.push(PdfVolError::rename_failed(
                &op.from,
                &op.to,
                "target already exists",
            ));
            continue;
        }

        if dry_run {
            vacated.insert(op.from.as_str());
            occupied.remove(op.from.as_str());
            occupied.insert(op.to.as_str());
            report.renamed.push(op.clone());
            continue;
        }

        match tokio::fs::rename(&from, &to).await {
            Ok(()) => {
                tracing::info!(from = %op.from, to = %op.to, "renamed");
                report.renamed.push(op.clone());
            }
            Err(e) => {
                tracing::warn!(from = %op.from, error = %e, "rename failed");
                report
                    .failed
                    .push(PdfVolError::rename_failed(&op.from, &op.to, e.to_string()));
            }
        }
    }

    report
}
