//! pdfvol - Merge numbered PDF files into volumes.
//!
//! The files of a folder are ordered by the first number in their names,
//! then concatenated either in groups of a fixed size or as one selection.
//! Output names derive from the numbers of the first and last file, from a
//! volume counter, or from text supplied by the user. A companion tool
//! shifts the number in volume file names.
//!
//! # Examples
//!
//! ## Planning a batch merge
//!
//! ```no_run
//! use pdfvol::config::{MergeConfig, NamingMode};
//! use pdfvol::plan::MergePlan;
//! use pdfvol::source::collect_sources;
//!
//! # fn example() -> pdfvol::Result<()> {
//! let config = MergeConfig::batch("scans", 10, NamingMode::Range);
//! let files = collect_sources(&config.folder, &config.extension)?;
//! let plan = MergePlan::from_config(&files, &config)?;
//!
//! for job in &plan.jobs {
//!     println!("{} <- {} file(s)", job.output_name, job.sources.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running it
//!
//! ```no_run
//! use pdfvol::config::{MergeConfig, NamingMode};
//! use pdfvol::merge::{ExecuteOptions, execute_plan};
//! use pdfvol::output::OutputFormatter;
//! use pdfvol::plan::MergePlan;
//! use pdfvol::source::collect_sources;
//!
//! # async fn example() -> pdfvol::Result<()> {
//! let config = MergeConfig::single("scans", 1, None, NamingMode::Volume);
//! let files = collect_sources(&config.folder, &config.extension)?;
//! let plan = MergePlan::from_config(&files, &config)?;
//!
//! let formatter = OutputFormatter::from_config(&config);
//! let summary = execute_plan(&plan, &config.folder, &ExecuteOptions::default(), &formatter).await?;
//! println!("{} of {} written", summary.succeeded, summary.total());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod io;
pub mod logging;
pub mod merge;
pub mod output;
pub mod plan;
pub mod rename;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use config::{MergeConfig, NamingMode, RenumberConfig};
pub use error::{PdfVolError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
