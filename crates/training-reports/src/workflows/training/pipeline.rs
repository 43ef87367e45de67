use super::dedupe::dedupe;
use super::domain::CleanedPerson;
use super::report::ReportBundle;
use super::roster::RosterLoader;
use super::writer::{ReportWriter, WrittenReport};
use crate::config::ReportConfig;
use crate::error::AppError;
use tracing::info;

#[derive(Debug)]
pub struct ReportRun {
    pub bundle: ReportBundle,
    pub written: Vec<WrittenReport>,
}

/// Loads the configured roster and keeps each person's latest completions.
pub fn load_cleaned_roster(config: &ReportConfig) -> Result<Vec<CleanedPerson>, AppError> {
    let roster = RosterLoader::from_path(&config.input_path, config.format())?;
    let cleaned = dedupe(&roster);

    let dropped: usize = roster
        .iter()
        .zip(&cleaned)
        .map(|(person, cleaned)| person.completions.len() - cleaned.completions().len())
        .sum();
    info!(
        people = cleaned.len(),
        superseded_completions = dropped,
        "roster deduplicated"
    );

    Ok(cleaned)
}

/// Load, deduplicate, report and write, failing on the first error.
pub fn run_reports(config: &ReportConfig) -> Result<ReportRun, AppError> {
    let cleaned = load_cleaned_roster(config)?;
    let bundle = ReportBundle::generate(&cleaned, &config.parameters)?;
    let writer = ReportWriter::new(&config.output_dir);
    let written = writer.write_all(&bundle)?;

    info!(
        output_dir = %writer.output_dir().display(),
        files = written.len(),
        "training reports written"
    );

    Ok(ReportRun { bundle, written })
}
