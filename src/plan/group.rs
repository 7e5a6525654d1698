//! Contiguous slices of the ordered file list.

use crate::error::{PdfVolError, Result};
use crate::source::{NumericKey, SourceFile};

/// A contiguous run of ordered source files merged into one document.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    /// 0-based position of the group in its batch.
    pub index: usize,

    /// 0-based position of the first file in the full ordered list.
    pub offset: usize,

    /// Files in merge order.
    pub files: &'a [SourceFile],
}

impl<'a> Group<'a> {
    /// Group covering `files`, which start at `offset` in the full list.
    pub fn new(index: usize, offset: usize, files: &'a [SourceFile]) -> Self {
        Self {
            index,
            offset,
            files,
        }
    }

    /// Number of files in the group.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the group has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Key of the first file (zero for an empty group).
    pub fn first_key(&self) -> NumericKey {
        self.files.first().map(|f| f.key.clone()).unwrap_or_default()
    }

    /// Key of the last file (zero for an empty group).
    pub fn last_key(&self) -> NumericKey {
        self.files.last().map(|f| f.key.clone()).unwrap_or_default()
    }

    /// 1-based position of the first file in the full list.
    pub fn first_position(&self) -> usize {
        self.offset + 1
    }

    /// 1-based position of the last file in the full list.
    pub fn last_position(&self) -> usize {
        self.offset + self.files.len().max(1)
    }
}

/// Split `files` into groups of `size`; the last group may be shorter.
///
/// `base_offset` is the position of `files[0]` in the full ordered list.
///
/// # Errors
///
/// Returns `InvalidConfig` when `size` is zero.
pub fn group_files(files: &[SourceFile], size: usize, base_offset: usize) -> Result<Vec<Group<'_>>> {
    if size == 0 {
        return Err(PdfVolError::invalid_config(
            "Group size must be greater than 0",
        ));
    }

    Ok(files
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| Group::new(index, base_offset + index * size, chunk))
        .collect())
}

/// Select `count` files starting at the 1-based position `start`.
///
/// A count past the end is clamped; `None` selects through the last file.
///
/// # Errors
///
/// - `NoFilesToMerge` when `files` is empty
/// - `IndexOutOfRange` when `start` is 0 or past the last file
/// - `InvalidConfig` when `count` is `Some(0)`
pub fn select_range(files: &[SourceFile], start: usize, count: Option<usize>) -> Result<Group<'_>> {
    if files.is_empty() {
        return Err(PdfVolError::NoFilesToMerge);
    }

    if start == 0 || start > files.len() {
        return Err(PdfVolError::index_out_of_range(start, files.len()));
    }

    if count == Some(0) {
        return Err(PdfVolError::invalid_config(
            "File count must be greater than 0",
        ));
    }

    let offset = start - 1;
    let end = match count {
        Some(count) => offset.saturating_add(count).min(files.len()),
        None => files.len(),
    };

    Ok(Group::new(0, offset, &files[offset..end]))
}
