//! Output file naming.
//!
//! Names are a pure function of the group and, for volume naming, an
//! externally supplied counter.

use crate::config::{
    DEFAULT_CUSTOM_PREFIX, DEFAULT_EXTENSION, DEFAULT_VOLUME_PREFIX, MergeConfig, NamingMode,
};
use crate::error::{PdfVolError, Result};
use crate::plan::Group;

/// Minimum width of zero-padded keys in range names.
pub const KEY_WIDTH: usize = 3;

/// A naming mode plus the literals it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    /// Naming convention.
    pub mode: NamingMode,
    /// Prefix for `volume` names.
    pub volume_prefix: String,
    /// Prefix for `custom` names.
    pub custom_prefix: String,
    /// Extension of the produced file, without the dot.
    pub extension: String,
}

impl NamingScheme {
    /// Scheme with the stock prefixes.
    pub fn new(mode: NamingMode) -> Self {
        Self {
            mode,
            volume_prefix: DEFAULT_VOLUME_PREFIX.to_string(),
            custom_prefix: DEFAULT_CUSTOM_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Scheme described by a merge configuration.
    pub fn from_config(config: &MergeConfig) -> Self {
        Self {
            mode: config.naming_mode,
            volume_prefix: config.volume_prefix.clone(),
            custom_prefix: config.custom_prefix.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
        }
    }

    /// Name the output of `group`.
    ///
    /// `volume` is only read in `volume` mode and defaults to 1.
    pub fn name_for(&self, group: &Group<'_>, volume: Option<u64>) -> String {
        let ext = &self.extension;
        match self.mode {
            NamingMode::Range => format!("{}.{ext}", key_range(group)),
            NamingMode::Volume => {
                format!("{}{}.{ext}", self.volume_prefix, volume.unwrap_or(1))
            }
            NamingMode::Custom => format!("{}{}.{ext}", self.custom_prefix, key_range(group)),
            NamingMode::Default => format!(
                "merged_{}-{}.{ext}",
                group.first_position(),
                group.last_position()
            ),
        }
    }
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self::new(NamingMode::default())
    }
}

fn key_range(group: &Group<'_>) -> String {
    format!(
        "{}-{}",
        group.first_key().padded(KEY_WIDTH),
        group.last_key().padded(KEY_WIDTH)
    )
}

/// Normalize a user-supplied output name.
///
/// Surrounding whitespace is dropped and `.<extension>` is appended when the
/// name does not already end with it.
///
/// # Errors
///
/// Returns `InvalidConfig` for an empty name or one containing a path
/// separator; outputs always land in the source folder.
pub fn explicit_name(text: &str, extension: &str) -> Result<String> {
    let name = text.trim();
    if name.is_empty() {
        return Err(PdfVolError::invalid_config("Output name cannot be empty"));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(PdfVolError::invalid_config(format!(
            "Output name must be a plain file name: {name}"
        )));
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    if name.ends_with(&suffix) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{suffix}"))
    }
}
