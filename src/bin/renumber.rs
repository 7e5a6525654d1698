//! pdfvol-renumber - Shift the number in volume file names.

use clap::Parser;
use std::process;

use pdfvol::cli::RenumberCli;
use pdfvol::error::PdfVolError;
use pdfvol::logging::init_logging;
use pdfvol::output::OutputFormatter;
use pdfvol::rename::{RenamePattern, execute_renames, list_names, plan_renames};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run(RenumberCli::parse()).await {
        eprintln!("Error: {err:#}");
        process::exit(
            err.downcast_ref::<PdfVolError>()
                .map_or(1, PdfVolError::exit_code),
        );
    }
}

async fn run(cli: RenumberCli) -> anyhow::Result<()> {
    let config = cli.to_config()?;
    init_logging(config.verbose);

    let formatter = OutputFormatter::from_renumber_config(&config);
    let pattern =
        RenamePattern::new(&config.prefix, &config.suffix)?.with_keep_width(config.keep_width);

    let names = list_names(&config.folder).await?;
    let plan = plan_renames(&names, &pattern, config.offset);

    if plan.is_empty() && plan.rejected.is_empty() {
        formatter.info(&format!(
            "No files matching '{}<number>{}' in '{}'",
            pattern.prefix(),
            pattern.suffix(),
            config.folder.display()
        ));
        return Ok(());
    }

    if config.dry_run {
        formatter.info("DRY RUN MODE - No files will be renamed");
        formatter.blank_line();
    }

    let mut report = execute_renames(&config.folder, &plan.ops, config.dry_run).await;

    for op in &report.renamed {
        if config.dry_run {
            formatter.info(&format!("Would rename {} -> {}", op.from, op.to));
        } else {
            formatter.success(&format!("Renamed {} -> {}", op.from, op.to));
        }
    }

    report.failed.extend(plan.rejected);
    for failure in &report.failed {
        formatter.error(&failure.to_string());
    }

    formatter.blank_line();
    formatter.info(&format!(
        "{} file(s) renamed, {} failed",
        report.renamed.len(),
        report.failed.len()
    ));

    report.into_result()?;
    Ok(())
}
