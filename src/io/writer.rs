//! PDF writing and saving operations.
//!
//! Output documents are written to a sibling temp file and renamed into
//! place, so an interrupted run leaves either the previous file or no file,
//! never a truncated one. Atomic writes can be switched off.
//!
//! # Examples
//!
//! ```no_run
//! use pdfvol::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save_with_stats(&doc, Path::new("001-010.pdf")).await?;
//! println!("wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfVolError, Result};
use crate::utils::format_file_size;

const WRITE_BUFFER_SIZE: usize = 8192;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Errors
    ///
    /// - `FailedToCreateOutput` if the output (or temp) file cannot be created
    /// - `FailedToWrite` if serialization, flushing or the final rename fails
    pub async fn save_with_stats(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let doc = doc.clone();

        task::spawn_blocking(move || write_blocking(doc, path_buf, &options)).await?
    }
}

fn write_blocking(mut doc: Document, path: PathBuf, options: &WriteOptions) -> Result<WriteStatistics> {
    let start = Instant::now();

    if options.compress {
        doc.compress();
    }

    let write_path = if options.atomic {
        temp_path_for(&path)
    } else {
        path.clone()
    };

    let result = write_file(&mut doc, &write_path).and_then(|()| {
        if options.atomic {
            std::fs::rename(&write_path, &path).map_err(|e| PdfVolError::FailedToWrite {
                path: path.clone(),
                source: e,
            })?;
        }
        Ok(())
    });

    if result.is_err() && options.atomic {
        let _ = std::fs::remove_file(&write_path);
    }
    result?;

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    tracing::debug!(path = %path.display(), file_size, "wrote PDF");

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        compressed: options.compress,
    })
}

fn write_file(doc: &mut Document, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PdfVolError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = std::io::BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    doc.save_to(&mut writer)
        .map_err(|e| PdfVolError::FailedToWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    writer.flush().map_err(|e| PdfVolError::FailedToWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `out.pdf` is staged as `out.pdf.tmp` next to it.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
