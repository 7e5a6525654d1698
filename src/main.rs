//! pdfvol - Merge numbered PDF files into volumes.
//!
//! Without arguments an interactive menu starts in the current directory.

use clap::Parser;
use std::io;
use std::process;

use pdfvol::cli::{MergeCli, wants_interactive};
use pdfvol::config::MergeConfig;
use pdfvol::error::PdfVolError;
use pdfvol::interactive::{Prompter, Session};
use pdfvol::logging::init_logging;
use pdfvol::merge::{ExecuteOptions, execute_plan};
use pdfvol::output::{OutputFormatter, display_file_list, display_plan};
use pdfvol::plan::MergePlan;
use pdfvol::source::collect_sources;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let result = if wants_interactive(std::env::args_os()) {
        run_interactive().await
    } else {
        run(MergeCli::parse()).await
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PdfVolError>()
        .map_or(1, PdfVolError::exit_code)
}

async fn run_interactive() -> anyhow::Result<()> {
    init_logging(false);

    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(prompter, MergeConfig::default())?;
    session.run().await?;
    Ok(())
}

/// Merge from command-line arguments.
async fn run(cli: MergeCli) -> anyhow::Result<()> {
    let config = cli.to_config()?;
    init_logging(config.verbose);

    let files = collect_sources(&config.folder, &config.extension)?;
    if files.is_empty() {
        return Err(PdfVolError::NoFilesToMerge.into());
    }

    let plan = MergePlan::from_config(&files, &config)?;

    // Nothing but the plan goes to stdout in JSON mode
    if config.json {
        println!("{}", plan.to_json()?);
        if config.dry_run {
            return Ok(());
        }
    }
    let formatter = OutputFormatter::from_config(&config);

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", pdfvol::NAME, pdfvol::VERSION));
    }

    display_file_list(&formatter, &config.folder, &files);
    display_plan(&formatter, &plan);

    if config.dry_run {
        formatter.blank_line();
        formatter.info("DRY RUN MODE - No files will be created");
    }

    let options = ExecuteOptions {
        dry_run: config.dry_run,
        ..ExecuteOptions::default()
    };
    let summary = execute_plan(&plan, &config.folder, &options, &formatter).await?;

    formatter.blank_line();
    if config.dry_run {
        formatter.success("Dry run completed successfully");
        formatter.info("  Run without --dry-run to create the merged PDF(s)");
    } else {
        formatter.success(&format!(
            "Done: {}/{} file(s) created",
            summary.succeeded,
            summary.total()
        ));
    }

    summary.into_result()?;
    Ok(())
}
