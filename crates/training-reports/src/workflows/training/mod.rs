mod dedupe;
pub mod domain;
mod pipeline;
pub mod report;
pub mod roster;
mod writer;

pub use dedupe::dedupe;
pub use domain::{CleanedPerson, Completion, MalformedDateError, Person};
pub use pipeline::{load_cleaned_roster, run_reports, ReportRun};
pub use report::{
    completions_in_fiscal_year, count_completions, scan_expirations, ExpirationEntry,
    ExpirationReport, ExpirationStatus, FiscalYear, FiscalYearCompletions, ReportBundle,
    ReportError, ReportParameters, TrainingCounts,
};
pub use roster::{RosterFormat, RosterLoadError, RosterLoader};
pub use writer::{
    ReportWriteError, ReportWriter, WrittenReport, COUNTS_FILE, EXPIRATIONS_FILE,
    FISCAL_YEAR_FILE,
};
