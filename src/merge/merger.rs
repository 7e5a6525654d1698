//! Core PDF merging implementation.
//!
//! Sources are loaded one at a time and spliced into the first readable
//! document, so at most two documents are held in memory at once. A source
//! that cannot be loaded is skipped and reported in the result.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{PdfVolError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::utils::format_file_size;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Number of sources skipped because they failed to load.
    pub files_skipped: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Total size of merged input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// A source left out of the merge.
#[derive(Debug)]
pub struct SkippedSource {
    /// Path of the source.
    pub path: PathBuf,

    /// Why it was skipped.
    pub error: PdfVolError,
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in order.
    pub merged_files: Vec<PathBuf>,

    /// Sources that failed to load.
    pub skipped: Vec<SkippedSource>,
}

/// PDF merger that concatenates documents page by page.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate the pages of `sources`, in order, into one document.
    ///
    /// # Errors
    ///
    /// Returns `NoFilesToMerge` when `sources` is empty or no source could be
    /// loaded, and `MergeFailed` when a page tree cannot be spliced.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfvol::merge::Merger;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let sources = vec![PathBuf::from("a1.pdf"), PathBuf::from("a2.pdf")];
    /// let result = Merger::new().merge(&sources).await?;
    /// println!("{} pages", result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, sources: &[PathBuf]) -> Result<MergeResult> {
        if sources.is_empty() {
            return Err(PdfVolError::NoFilesToMerge);
        }

        let merge_start = Instant::now();
        let mut merged: Option<Document> = None;
        let mut merged_files = Vec::with_capacity(sources.len());
        let mut skipped = Vec::new();
        let mut input_size = 0;

        for path in sources {
            let loaded = match self.reader.load(path).await {
                Ok(loaded) => loaded,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping source");
                    skipped.push(SkippedSource {
                        path: path.clone(),
                        error,
                    });
                    continue;
                }
            };

            tracing::debug!(
                path = %path.display(),
                pages = loaded.page_count,
                load_ms = loaded.load_time.as_millis() as u64,
                "appending source"
            );

            let LoadedPdf {
                document,
                path,
                file_size,
                ..
            } = loaded;

            match merged {
                Some(ref mut base) => append_document(base, document)?,
                None => merged = Some(document),
            }

            input_size += file_size;
            merged_files.push(path);
        }

        let mut document = merged.ok_or(PdfVolError::NoFilesToMerge)?;

        if merged_files.len() > 1 {
            // Catalogs and page-tree roots of appended documents are orphaned.
            document.prune_objects();
            document.renumber_objects();
        }

        let statistics = MergeStatistics {
            files_merged: merged_files.len(),
            files_skipped: skipped.len(),
            total_pages: document.get_pages().len(),
            merge_time: merge_start.elapsed(),
            input_size,
        };

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
            skipped,
        })
    }
}

/// Move every object of `doc` into `base` and append its pages.
fn append_document(base: &mut Document, mut doc: Document) -> Result<()> {
    doc.renumber_objects_with(base.max_id + 1);
    base.max_id = doc.max_id;

    for page_id in doc.get_pages().into_values() {
        flatten_inherited(&mut doc, page_id)?;
    }
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    base.objects.extend(doc.objects);
    add_pages_to_tree(base, &page_ids)
}

/// Copy inherited page attributes onto the page itself.
///
/// Appended pages are re-parented under the base document's root, which
/// would otherwise lose attributes they inherited from their old ancestors.
fn flatten_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    let mut inherited = Vec::new();
    let mut depth = 0;
    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }

        let node = doc.get_dictionary(node_id)?;
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key, value);
    }

    // Anything still unset would otherwise be inherited from the new root.
    for key in missing {
        let fallback = match key {
            b"Rotate" => Some(Object::Integer(0)),
            b"Resources" => Some(Object::Dictionary(Dictionary::new())),
            b"CropBox" => page.get(b"MediaBox").ok().cloned(),
            _ => None,
        };
        if let Some(value) = fallback {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Append `page_ids` to the root page tree node of `merged`.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = merged
        .catalog()
        .map_err(|e| PdfVolError::merge_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|e| PdfVolError::merge_failed(format!("Failed to get pages reference: {e}")))?;

    for &page_id in page_ids {
        let page = merged
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfVolError::merge_failed(format!("Failed to get page object: {e}")))?;
        page.set("Parent", Object::Reference(pages_id));
    }

    let pages_dict = merged
        .get_dictionary_mut(pages_id)
        .map_err(|e| PdfVolError::merge_failed(format!("Failed to get pages object: {e}")))?;

    let kids = pages_dict
        .get_mut(b"Kids")
        .map_err(|_| PdfVolError::merge_failed("Pages dictionary missing Kids array"))?;

    if let Object::Array(kids_array) = kids {
        kids_array.extend(page_ids.iter().map(|&id| Object::Reference(id)));
    } else {
        return Err(PdfVolError::merge_failed("Kids is not an array"));
    }

    let current_count = pages_dict
        .get(b"Count")
        .and_then(Object::as_i64)
        .unwrap_or(0);
    pages_dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
