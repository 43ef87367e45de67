use crate::cli::ReportKind;
use serde::Serialize;
use std::io::Write;
use training_reports::config::ReportConfig;
use training_reports::error::AppError;
use training_reports::workflows::training::{
    completions_in_fiscal_year, count_completions, load_cleaned_roster, run_reports,
    scan_expirations, ExpirationStatus, FiscalYear,
};
use tracing::info;

pub(crate) fn run_generate(config: &ReportConfig) -> Result<(), AppError> {
    let run = run_reports(config)?;
    let fiscal_year = run.bundle.fiscal_year.fiscal_year();
    let expirations = &run.bundle.expirations;

    println!("Training reports");
    println!(
        "Roster: {} ({} trainings counted)",
        config.input_path.display(),
        run.bundle.counts.len()
    );
    println!(
        "Fiscal year {}: {} -> {}",
        fiscal_year.year(),
        fiscal_year.start(),
        fiscal_year.end()
    );
    println!(
        "Expirations as of {}: {} people flagged",
        expirations.reference_date(),
        expirations.entries().len()
    );
    for status in [ExpirationStatus::Expired, ExpirationStatus::ExpiresSoon] {
        println!("- {}: {}", status.label(), expirations.count(status));
    }

    println!("\nWritten");
    for report in &run.written {
        println!("- {} ({} bytes)", report.path.display(), report.bytes);
    }

    Ok(())
}

pub(crate) fn run_show(config: &ReportConfig, kind: ReportKind) -> Result<(), AppError> {
    let roster = load_cleaned_roster(config)?;
    let parameters = &config.parameters;
    info!(report = ?kind, "rendering report to stdout");

    match kind {
        ReportKind::Counts => print_json(&count_completions(&roster)),
        ReportKind::FiscalYear => {
            let fiscal_year = FiscalYear::new(parameters.fiscal_year)?;
            print_json(&completions_in_fiscal_year(
                &roster,
                &parameters.trainings,
                fiscal_year,
            ))
        }
        ReportKind::Expirations => {
            print_json(&scan_expirations(&roster, parameters.reference_date))
        }
    }
}

fn print_json<T: Serialize>(report: &T) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, report).map_err(std::io::Error::from)?;
    writeln!(handle)?;
    Ok(())
}
