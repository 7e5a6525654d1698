//! PDF loading.
//!
//! Parsing runs on tokio's blocking pool; callers await one document at a
//! time, so sources are always read in merge order.
//!
//! # Examples
//!
//! ```no_run
//! use pdfvol::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("卷1.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfVolError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader that rejects documents without pages.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// - `EncryptedPdf` if the document needs a password
    /// - `FailedToLoadPdf` if the file cannot be read or parsed
    /// - `CorruptedPdf` if the document has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || load_blocking(path_buf)).await?
    }
}

fn load_blocking(path: PathBuf) -> Result<LoadedPdf> {
    let start = Instant::now();

    let document = Document::load(&path).map_err(|e| {
        let err_msg = e.to_string();
        if err_msg.contains("encrypt") || err_msg.contains("password") {
            PdfVolError::encrypted_pdf(path.clone())
        } else {
            PdfVolError::failed_to_load_pdf(path.clone(), err_msg)
        }
    })?;

    let page_count = document.get_pages().len();
    if page_count == 0 {
        return Err(PdfVolError::corrupted_pdf(path, "PDF has no pages"));
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(LoadedPdf {
        document,
        path,
        page_count,
        load_time: start.elapsed(),
        file_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use tempfile::TempDir;

    fn write_document(path: &Path, pages: usize) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<lopdf::Object> = (0..pages)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_load_valid_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a1.pdf");
        write_document(&path, 3);

        let loaded = PdfReader::new().load(&path).await.unwrap();
        assert_eq!(loaded.page_count, 3);
        assert_eq!(loaded.path, path);
        assert!(loaded.file_size > 0);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = PdfReader::new()
            .load(&dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdfVolError::FailedToLoadPdf { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_load_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfReader::new().load(&path).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_rejects_document_without_pages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.pdf");
        write_document(&path, 0);

        let err = PdfReader::new().load(&path).await.unwrap_err();
        assert!(matches!(err, PdfVolError::CorruptedPdf { .. }));
        assert!(err.is_recoverable());
    }
}
