//! PDF file I/O.
//!
//! [`PdfReader`] loads source documents and [`PdfWriter`] writes merged
//! output. Both hand the blocking lopdf work to tokio's blocking pool.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
