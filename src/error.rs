//! Error types for pdfvol.
//!
//! Every fallible operation in the library returns [`PdfVolError`]. The
//! variants follow the way a run can go wrong:
//!
//! - **Input set**: the folder is missing or holds nothing to merge
//! - **Selection**: a start index or count outside the listed files
//! - **Per-file**: a source PDF that cannot be loaded, a rename that fails
//! - **Prompt input**: malformed numbers typed at the interactive prompt
//! - **Output**: the merged document cannot be created or written

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfvol operations.
pub type Result<T> = std::result::Result<T, PdfVolError>;

/// Main error type for pdfvol operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfVolError {
    /// Source folder does not exist.
    #[error("Folder not found: {}", path.display())]
    FolderNotFound {
        /// Folder that was requested.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// Failed to load a source PDF.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF loaded but has an unusable structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF is encrypted and cannot be merged.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Nothing left to merge.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// A 1-based index outside the listed files.
    #[error("Start index {index} is out of range (1-{len})")]
    IndexOutOfRange {
        /// Requested 1-based index.
        index: usize,
        /// Number of files available.
        len: usize,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge operation failed while splicing page trees.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// A single rename could not be performed.
    #[error("Failed to rename {from} to {to}: {reason}")]
    RenameFailed {
        /// Original file name.
        from: String,
        /// Intended file name.
        to: String,
        /// Reason for the failure.
        reason: String,
    },

    /// Malformed input typed at the interactive prompt.
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput {
        /// What the user typed.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfVolError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<glob::PatternError> for PdfVolError {
    fn from(err: glob::PatternError) -> Self {
        Self::invalid_config(format!("Invalid file pattern: {err}"))
    }
}

impl From<glob::GlobError> for PdfVolError {
    fn from(err: glob::GlobError) -> Self {
        Self::Io(err.into())
    }
}

impl From<tokio::task::JoinError> for PdfVolError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::other(format!("Background task failed: {err}"))
    }
}

impl PdfVolError {
    /// Create a FolderNotFound error.
    pub fn folder_not_found(path: PathBuf) -> Self {
        Self::FolderNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an IndexOutOfRange error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a RenameFailed error.
    pub fn rename_failed(
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::RenameFailed {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if the run can go on after this error.
    ///
    /// Per-file failures skip one file; everything else aborts the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::RenameFailed { .. }
                | Self::InvalidInput { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FolderNotFound { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::IndexOutOfRange { .. } => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::RenameFailed { .. } => 7,
            Self::InvalidInput { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
