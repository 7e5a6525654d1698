//! Merge planning.
//!
//! A [`MergePlan`] is the list of output documents a run will produce, each
//! with its ordered sources and its output name. Planning touches no PDF
//! data, so the same plan drives both dry runs and real merges.
//!
//! # Examples
//!
//! ```
//! use pdfvol::config::NamingMode;
//! use pdfvol::plan::{MergePlan, NamingScheme};
//! use pdfvol::source::SourceFile;
//!
//! let files: Vec<SourceFile> = ["a1.pdf", "a2.pdf", "a3.pdf"]
//!     .into_iter()
//!     .map(SourceFile::new)
//!     .collect();
//!
//! let plan = MergePlan::batch(&files, 1, 2, &NamingScheme::new(NamingMode::Range), 1).unwrap();
//! assert_eq!(plan.jobs[0].output_name, "001-002.pdf");
//! assert_eq!(plan.jobs[1].output_name, "003-003.pdf");
//! ```

pub mod group;
pub mod naming;

pub use group::{Group, group_files, select_range};
pub use naming::{KEY_WIDTH, NamingScheme, explicit_name};

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{MergeConfig, NamingMode};
use crate::error::{PdfVolError, Result};
use crate::source::SourceFile;

/// One output document: where it goes and what it is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeJob {
    /// File name of the output, relative to the source folder.
    pub output_name: String,

    /// Sources in merge order.
    pub sources: Vec<PathBuf>,

    /// 1-based position of the first source in the ordered listing.
    pub first_position: usize,

    /// 1-based position of the last source in the ordered listing.
    pub last_position: usize,

    /// Volume number, for volume naming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl MergeJob {
    fn from_group(group: &Group<'_>, output_name: String, volume: Option<u64>) -> Self {
        Self {
            output_name,
            sources: group.files.iter().map(|f| f.path.clone()).collect(),
            first_position: group.first_position(),
            last_position: group.last_position(),
            volume,
        }
    }
}

/// Ordered list of merge jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergePlan {
    /// Jobs in execution order.
    pub jobs: Vec<MergeJob>,
}

impl MergePlan {
    /// Plan one document per `size` files, from the 1-based `start` on.
    ///
    /// Group `i` gets volume number `first_volume + i`.
    ///
    /// # Errors
    ///
    /// - `NoFilesToMerge` when `files` is empty
    /// - `IndexOutOfRange` when `start` is outside the listing
    /// - `InvalidConfig` when `size` is zero
    pub fn batch(
        files: &[SourceFile],
        start: usize,
        size: usize,
        scheme: &NamingScheme,
        first_volume: u64,
    ) -> Result<Self> {
        let tail = select_range(files, start, None)?;
        let groups = group_files(tail.files, size, tail.offset)?;

        let jobs = groups
            .iter()
            .map(|group| {
                let volume = first_volume.saturating_add(group.index as u64);
                let name = scheme.name_for(group, Some(volume));
                MergeJob::from_group(group, name, volume_of(scheme, volume))
            })
            .collect();

        Ok(Self { jobs })
    }

    /// Plan a single document from `count` files at the 1-based `start`.
    ///
    /// An explicit `output_name` takes precedence over the naming scheme.
    pub fn single(
        files: &[SourceFile],
        start: usize,
        count: Option<usize>,
        scheme: &NamingScheme,
        volume: Option<u64>,
        output_name: Option<&str>,
    ) -> Result<Self> {
        let group = select_range(files, start, count)?;
        let volume = volume.unwrap_or(1);

        let name = match output_name {
            Some(text) => explicit_name(text, &scheme.extension)?,
            None => scheme.name_for(&group, Some(volume)),
        };

        Ok(Self {
            jobs: vec![MergeJob::from_group(
                &group,
                name,
                volume_of(scheme, volume),
            )],
        })
    }

    /// Plan the run described by `config`.
    pub fn from_config(files: &[SourceFile], config: &MergeConfig) -> Result<Self> {
        config.validate()?;
        let scheme = NamingScheme::from_config(config);

        match config.group_size {
            Some(size) => Self::batch(
                files,
                config.start_index,
                size,
                &scheme,
                config.volume.unwrap_or(1),
            ),
            None => Self::single(
                files,
                config.start_index,
                config.count,
                &scheme,
                config.volume,
                config.output_name.as_deref(),
            ),
        }
    }

    /// Number of output documents.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if the plan produces nothing.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Total number of source files across all jobs.
    pub fn total_sources(&self) -> usize {
        self.jobs.iter().map(|job| job.sources.len()).sum()
    }

    /// Render the plan as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| PdfVolError::other(format!("Failed to serialize plan: {err}")))
    }
}

fn volume_of(scheme: &NamingScheme, volume: u64) -> Option<u64> {
    (scheme.mode == NamingMode::Volume).then_some(volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<SourceFile> {
        names.iter().map(|n| SourceFile::new(*n)).collect()
    }

    #[test]
    fn test_batch_volume_numbers_follow_groups() {
        let files = files(&["c1.pdf", "c2.pdf", "c3.pdf", "c4.pdf", "c5.pdf"]);
        let scheme = NamingScheme::new(NamingMode::Volume);
        let plan = MergePlan::batch(&files, 1, 2, &scheme, 4).unwrap();

        let names: Vec<&str> = plan.jobs.iter().map(|j| j.output_name.as_str()).collect();
        assert_eq!(names, ["卷4.pdf", "卷5.pdf", "卷6.pdf"]);
        assert_eq!(plan.jobs[2].volume, Some(6));
        assert_eq!(plan.total_sources(), 5);
    }

    #[test]
    fn test_batch_from_later_start() {
        let files = files(&["c1.pdf", "c2.pdf", "c3.pdf", "c4.pdf", "c5.pdf"]);
        let scheme = NamingScheme::new(NamingMode::Default);
        let plan = MergePlan::batch(&files, 2, 3, &scheme, 1).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.jobs[0].output_name, "merged_2-4.pdf");
        assert_eq!(plan.jobs[1].output_name, "merged_5-5.pdf");
        assert_eq!(plan.jobs[0].volume, None);
    }

    #[test]
    fn test_batch_empty_listing() {
        let scheme = NamingScheme::default();
        assert!(matches!(
            MergePlan::batch(&[], 1, 2, &scheme, 1).unwrap_err(),
            PdfVolError::NoFilesToMerge
        ));
    }

    #[test]
    fn test_single_with_explicit_name() {
        let files = files(&["a1.pdf", "a2.pdf", "a3.pdf"]);
        let scheme = NamingScheme::default();
        let plan = MergePlan::single(&files, 2, None, &scheme, None, Some("全集")).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.jobs[0].output_name, "全集.pdf");
        assert_eq!(
            plan.jobs[0].sources,
            [PathBuf::from("a2.pdf"), PathBuf::from("a3.pdf")]
        );
    }

    #[test]
    fn test_single_out_of_range() {
        let files = files(&["a1.pdf"]);
        let scheme = NamingScheme::default();
        assert!(matches!(
            MergePlan::single(&files, 2, Some(1), &scheme, None, None).unwrap_err(),
            PdfVolError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn test_from_config_dispatches() {
        let files = files(&["a1.pdf", "a2.pdf", "a3.pdf"]);

        let config = MergeConfig::batch(".", 2, NamingMode::Range);
        assert_eq!(MergePlan::from_config(&files, &config).unwrap().len(), 2);

        let mut config = MergeConfig::single(".", 1, Some(2), NamingMode::Volume);
        config.volume = Some(7);
        let plan = MergePlan::from_config(&files, &config).unwrap();
        assert_eq!(plan.jobs[0].output_name, "卷7.pdf");
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let files = files(&["a1.pdf"]);
        let config = MergeConfig::batch(".", 0, NamingMode::Range);
        assert!(MergePlan::from_config(&files, &config).is_err());
    }

    #[test]
    fn test_to_json() {
        let files = files(&["a1.pdf", "a2.pdf"]);
        let plan = MergePlan::batch(&files, 1, 1, &NamingScheme::default(), 1).unwrap();
        let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

        assert_eq!(json["jobs"][1]["output_name"], "002-002.pdf");
        assert_eq!(json["jobs"][0]["first_position"], 1);
        assert!(json["jobs"][0].get("volume").is_none());
    }
}
