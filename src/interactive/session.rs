//! The menu-driven merge session.

use std::io::{BufRead, Write};

use crate::config::{MergeConfig, NamingMode};
use crate::error::{PdfVolError, Result};
use crate::interactive::Prompter;
use crate::merge::{BatchSummary, ExecuteOptions, execute_plan};
use crate::output::OutputFormatter;
use crate::plan::{MergePlan, select_range};
use crate::source::{SourceFile, collect_sources};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Merge in groups of a fixed size.
    Batch,
    /// Merge a chosen range of files.
    Range,
    /// Merge every file into one document.
    All,
    /// Leave the session.
    Quit,
}

impl MenuChoice {
    /// Parse a menu answer (`1`-`4`).
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(Self::Batch),
            "2" => Some(Self::Range),
            "3" => Some(Self::All),
            "4" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// An interactive session over the files of one folder.
///
/// The file listing is taken once when the session starts.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    base: MergeConfig,
    files: Vec<SourceFile>,
    formatter: OutputFormatter,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Scan `base.folder` and prepare a session.
    ///
    /// Folder, extension, prefixes and output flags of `base` carry over to
    /// every merge started from the menu.
    pub fn new(prompter: Prompter<R, W>, base: MergeConfig) -> Result<Self> {
        let files = collect_sources(&base.folder, &base.extension)?;
        let formatter = OutputFormatter::from_config(&base);
        Ok(Self::with_files(prompter, base, files, formatter))
    }

    /// Build a session over an already ordered listing.
    pub fn with_files(
        prompter: Prompter<R, W>,
        base: MergeConfig,
        files: Vec<SourceFile>,
        formatter: OutputFormatter,
    ) -> Self {
        Self {
            prompter,
            base,
            files,
            formatter,
        }
    }

    /// Give back the prompter.
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run the menu loop until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        self.prompter.say("=== pdfvol ===")?;
        self.prompter
            .say(&format!("Folder: {}", self.base.folder.display()))?;

        if self.files.is_empty() {
            self.prompter.say("No PDF files found in this folder.")?;
            return Ok(());
        }

        self.show_files()?;

        loop {
            match self.step().await {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(PdfVolError::Cancelled) => {
                    tracing::debug!("input ended, leaving session");
                    return Ok(());
                }
                Err(err) if err.is_recoverable() || is_selection_error(&err) => {
                    self.prompter.say(&format!("Error: {err}"))?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One pass through the menu. Returns `false` when the user quits.
    async fn step(&mut self) -> Result<bool> {
        self.prompter.say("")?;
        self.prompter.say(&"=".repeat(50))?;
        self.prompter.say("Choose an action:")?;
        self.prompter.say("1. Batch merge (fixed group size)")?;
        self.prompter.say("2. Merge a range")?;
        self.prompter.say("3. Merge everything")?;
        self.prompter.say("4. Quit")?;

        let answer = self.prompter.ask("\nYour choice (1-4): ")?;
        match MenuChoice::parse(&answer) {
            Some(MenuChoice::Batch) => self.batch().await?,
            Some(MenuChoice::Range) => self.range().await?,
            Some(MenuChoice::All) => self.all().await?,
            Some(MenuChoice::Quit) => {
                self.prompter.say("Bye!")?;
                return Ok(false);
            }
            None => self.prompter.say("Invalid choice, please try again")?,
        }
        Ok(true)
    }

    fn show_files(&mut self) -> Result<()> {
        self.prompter.say(&format!(
            "\nFound {} PDF file(s) in '{}':",
            self.files.len(),
            self.base.folder.display()
        ))?;
        for (i, file) in self.files.iter().enumerate() {
            self.prompter
                .say(&format!("{:3}. {}", i + 1, file.file_name()))?;
        }
        Ok(())
    }

    async fn batch(&mut self) -> Result<()> {
        let size: usize = self.prompter.ask_number("Files per group? ")?;
        let naming_mode = self.prompter.choose_naming_mode()?;

        let config = MergeConfig {
            group_size: Some(size),
            naming_mode,
            ..self.base.clone()
        };
        let plan = MergePlan::from_config(&self.files, &config)?;

        self.prompter
            .say(&format!("\nWill create {} merged file(s):", plan.len()))?;
        for (i, job) in plan.jobs.iter().enumerate() {
            self.prompter.say(&format!(
                "  Group {}: {} ({} file(s))",
                i + 1,
                job.output_name,
                job.sources.len()
            ))?;
        }

        self.confirm_and_run(&plan).await
    }

    async fn range(&mut self) -> Result<()> {
        let start: usize = self
            .prompter
            .ask_number(&format!("First file number (1-{}): ", self.files.len()))?;
        let count: usize = self.prompter.ask_number("Number of files to merge: ")?;
        select_range(&self.files, start, Some(count))?;

        let naming_mode = self.prompter.choose_naming_mode()?;
        let volume = self.ask_volume(naming_mode)?;

        let config = MergeConfig {
            start_index: start,
            count: Some(count),
            naming_mode,
            volume,
            ..self.base.clone()
        };
        let plan = MergePlan::from_config(&self.files, &config)?;
        self.preview_single(&plan)?;

        self.confirm_and_run(&plan).await
    }

    async fn all(&mut self) -> Result<()> {
        let naming_mode = self.prompter.choose_naming_mode()?;
        let volume = self.ask_volume(naming_mode)?;

        let config = MergeConfig {
            start_index: 1,
            count: None,
            naming_mode,
            volume,
            ..self.base.clone()
        };
        let plan = MergePlan::from_config(&self.files, &config)?;
        self.prompter.say(&format!(
            "\nWill merge all {} file(s) into:",
            self.files.len()
        ))?;
        self.preview_single(&plan)?;

        self.confirm_and_run(&plan).await
    }

    fn ask_volume(&mut self, naming_mode: NamingMode) -> Result<Option<u64>> {
        if naming_mode != NamingMode::Volume {
            return Ok(None);
        }
        self.prompter.ask_number("Volume number: ").map(Some)
    }

    fn preview_single(&mut self, plan: &MergePlan) -> Result<()> {
        for job in &plan.jobs {
            self.prompter
                .say(&format!("\nWill create file: {}", job.output_name))?;
        }
        Ok(())
    }

    async fn confirm_and_run(&mut self, plan: &MergePlan) -> Result<()> {
        if !self.prompter.confirm("\nProceed? (y/n): ")? {
            self.prompter.say("Cancelled")?;
            return Ok(());
        }

        let options = ExecuteOptions {
            dry_run: self.base.dry_run,
            ..ExecuteOptions::default()
        };
        let summary = execute_plan(plan, &self.base.folder, &options, &self.formatter).await?;
        self.report(&summary)
    }

    fn report(&mut self, summary: &BatchSummary) -> Result<()> {
        self.prompter.say(&format!(
            "\nDone: {}/{} file(s) created",
            summary.succeeded,
            summary.total()
        ))
    }
}

/// Errors caused by the numbers the user typed.
fn is_selection_error(err: &PdfVolError) -> bool {
    matches!(
        err,
        PdfVolError::IndexOutOfRange { .. }
            | PdfVolError::InvalidConfig { .. }
            | PdfVolError::NoFilesToMerge
            | PdfVolError::MergeFailed { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

    fn session(folder: &Path, names: &[&str], input: &str) -> TestSession {
        for name in names {
            fs::write(folder.join(name), b"not a pdf").unwrap();
        }
        let base = MergeConfig {
            folder: folder.to_path_buf(),
            dry_run: true,
            ..MergeConfig::default()
        };
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let files = collect_sources(folder, "pdf").unwrap();
        Session::with_files(prompter, base, files, OutputFormatter::quiet())
    }

    fn transcript(session: TestSession) -> String {
        String::from_utf8(session.into_prompter().into_inner().1).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Batch));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[tokio::test]
    async fn test_empty_folder_ends_session() {
        let dir = TempDir::new().unwrap();
        let mut s = session(dir.path(), &[], "");
        s.run().await.unwrap();
        assert!(transcript(s).contains("No PDF files found"));
    }

    #[tokio::test]
    async fn test_quit() {
        let dir = TempDir::new().unwrap();
        let mut s = session(dir.path(), &["a1.pdf"], "4\n");
        s.run().await.unwrap();
        let out = transcript(s);
        assert!(out.contains("  1. a1.pdf"));
        assert!(out.contains("Bye!"));
    }

    #[tokio::test]
    async fn test_batch_preview() {
        let dir = TempDir::new().unwrap();
        let names = ["a1.pdf", "a2.pdf", "a3.pdf"];
        let mut s = session(dir.path(), &names, "1\n2\n1\ny\n4\n");
        s.run().await.unwrap();

        let out = transcript(s);
        assert!(out.contains("Will create 2 merged file(s):"));
        assert!(out.contains("Group 1: 001-002.pdf (2 file(s))"));
        assert!(out.contains("Group 2: 003-003.pdf (1 file(s))"));
        assert!(out.contains("Done: 2/2 file(s) created"));
    }

    #[tokio::test]
    async fn test_range_with_volume() {
        let dir = TempDir::new().unwrap();
        let names = ["a1.pdf", "a2.pdf", "a3.pdf"];
        let mut s = session(dir.path(), &names, "2\n2\n2\n2\n7\nn\n4\n");
        s.run().await.unwrap();

        let out = transcript(s);
        assert!(out.contains("Will create file: 卷7.pdf"));
        assert!(out.contains("Cancelled"));
    }

    #[tokio::test]
    async fn test_malformed_number_returns_to_menu() {
        let dir = TempDir::new().unwrap();
        let mut s = session(dir.path(), &["a1.pdf"], "1\nten\n4\n");
        s.run().await.unwrap();

        let out = transcript(s);
        assert!(out.contains("Error: Invalid input 'ten'"));
        assert!(out.contains("Bye!"));
    }

    #[tokio::test]
    async fn test_out_of_range_start_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut s = session(dir.path(), &["a1.pdf", "a2.pdf"], "2\n5\n1\n4\n");
        s.run().await.unwrap();

        let out = transcript(s);
        assert!(out.contains("Error:"));
        assert!(!out.contains("Naming mode:"));
        assert!(out.contains("Bye!"));
    }

    #[tokio::test]
    async fn test_invalid_menu_choice_then_end_of_input() {
        let dir = TempDir::new().unwrap();
        let mut s = session(dir.path(), &["a1.pdf"], "9\n");
        s.run().await.unwrap();
        assert!(transcript(s).contains("Invalid choice"));
    }
}
