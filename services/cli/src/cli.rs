use crate::commands::{run_generate, run_show};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use training_reports::config::{AppConfig, ReportConfig};
use training_reports::error::AppError;
use training_reports::telemetry;
use training_reports::workflows::training::RosterFormat;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "training-reports",
    about = "Summarize training completions, fiscal-year attendance and expirations from a roster",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write all three reports as JSON files (default command)
    Generate(RunArgs),
    /// Print a single report to stdout
    Show {
        #[arg(value_enum)]
        report: ReportKind,
        #[command(flatten)]
        args: RunArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportKind {
    /// People per completed training
    Counts,
    /// Completions of the selected trainings within the fiscal year
    FiscalYear,
    /// Expired and soon-to-expire trainings per person
    Expirations,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Roster file to read (overrides APP_INPUT_PATH)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Roster format; inferred from the file extension when omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<RosterFormat>,
    /// Directory receiving the JSON reports (overrides APP_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Fiscal year n, covering 7/1/(n-1) through 6/30/n
    #[arg(long, allow_hyphen_values = true)]
    fiscal_year: Option<i32>,
    /// Reference date for the expiration report (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    reference_date: Option<NaiveDate>,
    /// Training to include in the fiscal-year report; repeat for several
    #[arg(long = "training")]
    trainings: Vec<String>,
}

impl RunArgs {
    fn apply(self, config: &mut ReportConfig) {
        let RunArgs {
            input,
            format,
            output_dir,
            fiscal_year,
            reference_date,
            trainings,
        } = self;

        if let Some(input) = input {
            config.input_path = input;
        }
        if let Some(format) = format {
            config.input_format = Some(format);
        }
        if let Some(output_dir) = output_dir {
            config.output_dir = output_dir;
        }
        if let Some(fiscal_year) = fiscal_year {
            config.parameters.fiscal_year = fiscal_year;
        }
        if let Some(reference_date) = reference_date {
            config.parameters.reference_date = reference_date;
        }
        if !trainings.is_empty() {
            config.parameters.trainings = trainings;
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_format(raw: &str) -> Result<RosterFormat, String> {
    raw.parse()
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "training reports starting");

    match cli
        .command
        .unwrap_or_else(|| Command::Generate(RunArgs::default()))
    {
        Command::Generate(args) => {
            args.apply(&mut config.reports);
            run_generate(&config.reports)
        }
        Command::Show { report, args } => {
            args.apply(&mut config.reports);
            run_show(&config.reports, report)
        }
    }
}
