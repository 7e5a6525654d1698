//! Configuration for pdfvol runs.
//!
//! Both the command line and the interactive prompts end up here: whatever
//! the source of the values, a merge is described by one [`MergeConfig`] and
//! a renumbering by one [`RenumberConfig`].

use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PdfVolError, Result};

/// Default prefix for `volume` naming and for the renumber pattern.
pub const DEFAULT_VOLUME_PREFIX: &str = "卷";

/// Default prefix for `custom` naming.
pub const DEFAULT_CUSTOM_PREFIX: &str = "合并版_";

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Default offset added by the renumber tool.
pub const DEFAULT_RENUMBER_OFFSET: i64 = 2;

/// Convention used to name merged output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// `001-010.pdf`, from the first and last keys of the group.
    #[default]
    Range,
    /// `卷3.pdf`, from a volume counter.
    Volume,
    /// `合并版_001-010.pdf`, a fixed prefix plus the key range.
    Custom,
    /// `merged_1-10.pdf`, from 1-based list positions.
    Default,
}

impl NamingMode {
    /// All modes, in menu order.
    pub const ALL: [NamingMode; 4] = [Self::Range, Self::Volume, Self::Custom, Self::Default];

    /// Lowercase name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Volume => "volume",
            Self::Custom => "custom",
            Self::Default => "default",
        }
    }
}

impl FromStr for NamingMode {
    type Err = PdfVolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "range" => Ok(Self::Range),
            "volume" => Ok(Self::Volume),
            "custom" => Ok(Self::Custom),
            "default" => Ok(Self::Default),
            _ => Err(PdfVolError::invalid_config(format!(
                "Invalid naming mode: {s}. Must be one of: range, volume, custom, default"
            ))),
        }
    }
}

/// Complete description of a merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Folder holding the source files; outputs are written here too.
    pub folder: PathBuf,

    /// Source file extension, without the dot.
    pub extension: String,

    /// Files per output document. `None` merges one selection.
    pub group_size: Option<usize>,

    /// 1-based position of the first file to merge.
    pub start_index: usize,

    /// Number of files in a single selection. `None` runs to the end.
    pub count: Option<usize>,

    /// Output naming convention.
    pub naming_mode: NamingMode,

    /// Volume number (first volume number in batch mode).
    pub volume: Option<u64>,

    /// Explicit output file name for a single selection.
    pub output_name: Option<String>,

    /// Prefix used by `volume` naming.
    pub volume_prefix: String,

    /// Prefix used by `custom` naming.
    pub custom_prefix: String,

    /// Show the plan without loading or writing anything.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the plan as JSON.
    pub json: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            group_size: None,
            start_index: 1,
            count: None,
            naming_mode: NamingMode::default(),
            volume: None,
            output_name: None,
            volume_prefix: DEFAULT_VOLUME_PREFIX.to_string(),
            custom_prefix: DEFAULT_CUSTOM_PREFIX.to_string(),
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
        }
    }
}

impl MergeConfig {
    /// Config for a batch merge of the whole folder.
    pub fn batch(folder: impl Into<PathBuf>, group_size: usize, naming_mode: NamingMode) -> Self {
        Self {
            folder: folder.into(),
            group_size: Some(group_size),
            naming_mode,
            ..Self::default()
        }
    }

    /// Config for one merge of `count` files starting at `start_index`.
    pub fn single(
        folder: impl Into<PathBuf>,
        start_index: usize,
        count: Option<usize>,
        naming_mode: NamingMode,
    ) -> Self {
        Self {
            folder: folder.into(),
            start_index,
            count,
            naming_mode,
            ..Self::default()
        }
    }

    /// Whether this run produces one document per group.
    pub fn is_batch(&self) -> bool {
        self.group_size.is_some()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - the group size, start index or count is zero
    /// - verbose and quiet are both enabled
    /// - an explicit output name is combined with grouping
    /// - the extension is empty
    pub fn validate(&self) -> Result<()> {
        if self.group_size == Some(0) {
            return Err(PdfVolError::invalid_config(
                "Group size must be greater than 0",
            ));
        }

        if self.start_index == 0 {
            return Err(PdfVolError::invalid_config(
                "Start index is 1-based and must be at least 1",
            ));
        }

        if self.count == Some(0) {
            return Err(PdfVolError::invalid_config(
                "File count must be greater than 0",
            ));
        }

        if self.verbose && self.quiet {
            return Err(PdfVolError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.is_batch() && self.output_name.is_some() {
            return Err(PdfVolError::invalid_config(
                "An explicit output name cannot be used when merging in groups",
            ));
        }

        if self.extension.trim_start_matches('.').is_empty() {
            return Err(PdfVolError::invalid_config("Extension cannot be empty"));
        }

        Ok(())
    }

    /// Check if status output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

/// Description of a renumbering run.
#[derive(Debug, Clone)]
pub struct RenumberConfig {
    /// Folder whose files are renamed in place.
    pub folder: PathBuf,

    /// Literal text before the number.
    pub prefix: String,

    /// Literal text after the number.
    pub suffix: String,

    /// Amount added to each number.
    pub offset: i64,

    /// Zero-pad new numbers to the old digit count.
    pub keep_width: bool,

    /// Show the renames without performing them.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Default for RenumberConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            prefix: DEFAULT_VOLUME_PREFIX.to_string(),
            suffix: format!(".{DEFAULT_EXTENSION}"),
            offset: DEFAULT_RENUMBER_OFFSET,
            keep_width: false,
            dry_run: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl RenumberConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.offset == 0 {
            return Err(PdfVolError::invalid_config("Offset must not be 0"));
        }

        if self.prefix.is_empty() && self.suffix.is_empty() {
            return Err(PdfVolError::invalid_config(
                "Prefix and suffix cannot both be empty",
            ));
        }

        if self.verbose && self.quiet {
            return Err(PdfVolError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        Ok(())
    }
}
