//! CLI argument parsing for pdfvol.
//!
//! Two binaries share this module: `pdfvol` merges numbered PDFs and
//! `pdfvol-renumber` shifts the number in volume file names. Both parse
//! into the configs of [`crate::config`].
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use pdfvol::cli::MergeCli;
//!
//! let cli = MergeCli::try_parse_from(["pdfvol", "-f", "scans", "-c", "10"]).unwrap();
//! let config = cli.to_config().unwrap();
//! assert_eq!(config.group_size, Some(10));
//! ```

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{
    DEFAULT_CUSTOM_PREFIX, DEFAULT_EXTENSION, DEFAULT_VOLUME_PREFIX, MergeConfig, NamingMode,
    RenumberConfig,
};
use crate::error::Result;

/// Merge numbered PDF files into volumes.
///
/// Files in the folder are ordered by the first number in their names and
/// concatenated, either in groups of a fixed size or as one selection.
/// Run without arguments for an interactive menu.
#[derive(Parser, Debug)]
#[command(name = "pdfvol")]
#[command(version)]
#[command(about = "Merge numbered PDF files into volumes", long_about = None)]
#[command(author)]
pub struct MergeCli {
    /// Folder containing the PDF files
    ///
    /// Merged files are written into the same folder.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "PDFVOL_FOLDER")]
    pub folder: PathBuf,

    /// Number of files per merged output (batch mode)
    ///
    /// Example:
    ///   pdfvol -c 10          # 001-010.pdf, 011-020.pdf, ...
    #[arg(short, long, value_name = "N")]
    pub count: Option<usize>,

    /// 1-based number of the first file to merge
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub start: usize,

    /// Number of files in a single merge (default: through the last file)
    #[arg(short, long, value_name = "N", conflicts_with = "count")]
    pub length: Option<usize>,

    /// Output naming mode
    ///
    /// - range: 001-010.pdf
    /// - volume: 卷1.pdf
    /// - custom: 合并版_001-010.pdf
    /// - default: merged_1-10.pdf (list positions)
    #[arg(short, long, value_name = "MODE", default_value = "range")]
    #[arg(value_parser = ["range", "volume", "custom", "default"], ignore_case = true)]
    pub naming: String,

    /// Volume number (first volume number in batch mode)
    #[arg(short, long, value_name = "N")]
    pub volume: Option<u64>,

    /// Output file name for a single merge
    ///
    /// The extension is appended when missing.
    #[arg(short, long, value_name = "NAME", conflicts_with = "count")]
    pub output: Option<String>,

    /// Prefix for custom naming
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_CUSTOM_PREFIX)]
    pub prefix: String,

    /// Prefix for volume naming
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_VOLUME_PREFIX)]
    pub volume_prefix: String,

    /// Extension of the source files
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub ext: String,

    /// Show what would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the merge plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Show per-output statistics
    #[arg(long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl MergeCli {
    /// Convert CLI arguments into a validated [`MergeConfig`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the naming mode is unknown or the
    /// resulting configuration fails validation.
    pub fn to_config(&self) -> Result<MergeConfig> {
        let naming_mode = NamingMode::from_str(&self.naming)?;

        let config = MergeConfig {
            folder: self.folder.clone(),
            extension: self.ext.trim_start_matches('.').to_string(),
            group_size: self.count,
            start_index: self.start,
            count: self.length,
            naming_mode,
            volume: self.volume,
            output_name: self.output.clone(),
            volume_prefix: self.volume_prefix.clone(),
            custom_prefix: self.prefix.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Shift the number in volume file names.
///
/// Every file named `<prefix><digits><suffix>` is renamed with its number
/// increased by the offset. Files are processed from the highest number
/// down so that no rename lands on a file that has not moved yet.
#[derive(Parser, Debug)]
#[command(name = "pdfvol-renumber")]
#[command(version)]
#[command(about = "Shift the number in volume file names", long_about = None)]
#[command(author)]
pub struct RenumberCli {
    /// Folder containing the files to rename
    #[arg(value_name = "DIR", default_value = ".")]
    pub folder: PathBuf,

    /// Literal text before the number
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_VOLUME_PREFIX)]
    pub prefix: String,

    /// Literal text after the number
    #[arg(long, value_name = "TEXT", default_value = ".pdf")]
    pub suffix: String,

    /// Amount added to each number (may be negative)
    #[arg(long, value_name = "N", default_value_t = 2, allow_negative_numbers = true)]
    pub offset: i64,

    /// Keep the zero-padding of the old numbers (卷009 -> 卷011)
    #[arg(long)]
    pub keep_width: bool,

    /// Show the renames without performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Show every rename as it happens
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl RenumberCli {
    /// Convert CLI arguments into a validated [`RenumberConfig`].
    pub fn to_config(&self) -> Result<RenumberConfig> {
        let config = RenumberConfig {
            folder: self.folder.clone(),
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            offset: self.offset,
            keep_width: self.keep_width,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Whether `pdfvol` was started without any arguments.
///
/// The program name itself does not count.
pub fn wants_interactive<I>(args: I) -> bool
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    args.into_iter().nth(1).is_none()
}
