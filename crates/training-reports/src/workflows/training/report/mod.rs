mod counts;
mod expiration;
mod fiscal_year;

pub use counts::{count_completions, TrainingCount, TrainingCounts};
pub use expiration::{
    scan_expirations, ExpirationEntry, ExpirationReport, ExpirationStatus, PersonExpirations,
    EXPIRY_WINDOW_DAYS,
};
pub use fiscal_year::{
    completions_in_fiscal_year, FiscalYear, FiscalYearCompletions, TrainingCompletions,
};

use super::domain::CleanedPerson;
use chrono::NaiveDate;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    FiscalYearOutOfRange { year: i32 },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::FiscalYearOutOfRange { year } => {
                write!(f, "fiscal year {year} is outside the supported calendar range")
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// Inputs for the fiscal-year and expiration reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParameters {
    pub trainings: Vec<String>,
    pub fiscal_year: i32,
    pub reference_date: NaiveDate,
}

/// The three reports computed over one cleaned roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBundle {
    pub counts: TrainingCounts,
    pub fiscal_year: FiscalYearCompletions,
    pub expirations: ExpirationReport,
}

impl ReportBundle {
    pub fn generate(
        roster: &[CleanedPerson],
        parameters: &ReportParameters,
    ) -> Result<Self, ReportError> {
        let fiscal_year = FiscalYear::new(parameters.fiscal_year)?;

        let counts = count_completions(roster);
        let fiscal_year = completions_in_fiscal_year(roster, &parameters.trainings, fiscal_year);
        let expirations = scan_expirations(roster, parameters.reference_date);

        info!(
            trainings = counts.len(),
            fiscal_year = parameters.fiscal_year,
            flagged_people = expirations.entries().len(),
            reference_date = %parameters.reference_date,
            "training reports generated"
        );

        Ok(Self {
            counts,
            fiscal_year,
            expirations,
        })
    }
}
