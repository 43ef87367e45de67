use crate::workflows::training::{ReportParameters, RosterFormat};
use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "trainings.txt";
pub const DEFAULT_FISCAL_YEAR: i32 = 2024;
pub const DEFAULT_REFERENCE_DATE: &str = "2023-10-01";
pub const DEFAULT_TRAININGS: [&str; 3] = [
    "Electrical Safety for Labs",
    "X-Ray Safety",
    "Laboratory Safety Training",
];

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub reports: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let input_path = PathBuf::from(
            env::var("APP_INPUT_PATH").unwrap_or_else(|_| DEFAULT_INPUT_PATH.to_string()),
        );
        let input_format = match env::var("APP_INPUT_FORMAT") {
            Ok(raw) => Some(
                raw.parse::<RosterFormat>()
                    .map_err(|_| ConfigError::InvalidInputFormat { value: raw })?,
            ),
            Err(_) => None,
        };
        let output_dir =
            PathBuf::from(env::var("APP_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()));

        let fiscal_year = match env::var("APP_FISCAL_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidFiscalYear { value: raw })?,
            Err(_) => DEFAULT_FISCAL_YEAR,
        };
        let reference_date = parse_reference_date(
            &env::var("APP_REFERENCE_DATE").unwrap_or_else(|_| DEFAULT_REFERENCE_DATE.to_string()),
        )?;
        let trainings = match env::var("APP_TRAININGS") {
            Ok(raw) => parse_training_list(&raw),
            Err(_) => DEFAULT_TRAININGS.iter().map(|name| name.to_string()).collect(),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            reports: ReportConfig {
                input_path,
                input_format,
                output_dir,
                parameters: ReportParameters {
                    trainings,
                    fiscal_year,
                    reference_date,
                },
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the roster comes from, where reports go, and what they ask for.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    /// Explicit format; `None` infers it from `input_path`.
    pub input_format: Option<RosterFormat>,
    pub output_dir: PathBuf,
    pub parameters: ReportParameters,
}

impl ReportConfig {
    pub fn format(&self) -> RosterFormat {
        self.input_format.unwrap_or_else(|| RosterFormat::infer(&self.input_path))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub fn parse_reference_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|source| {
        ConfigError::InvalidReferenceDate {
            value: raw.to_string(),
            source,
        }
    })
}

fn parse_training_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFiscalYear {
        value: String,
    },
    InvalidReferenceDate {
        value: String,
        source: chrono::ParseError,
    },
    InvalidInputFormat {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFiscalYear { value } => {
                write!(f, "APP_FISCAL_YEAR must be an integer year, got '{value}'")
            }
            ConfigError::InvalidReferenceDate { value, .. } => {
                write!(f, "APP_REFERENCE_DATE must be YYYY-MM-DD, got '{value}'")
            }
            ConfigError::InvalidInputFormat { value } => {
                write!(f, "APP_INPUT_FORMAT must be json or csv, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidReferenceDate { source, .. } => Some(source),
            ConfigError::InvalidFiscalYear { .. } | ConfigError::InvalidInputFormat { .. } => None,
        }
    }
}
