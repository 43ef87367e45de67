mod csv_rows;
mod dates;
mod parser;

use super::domain::{MalformedDateError, Person};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Serialized shape of a roster input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterFormat {
    #[default]
    Json,
    Csv,
}

impl RosterFormat {
    /// Picks CSV for a `.csv` extension and JSON for everything else.
    pub fn infer(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for RosterFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unsupported roster format '{other}' (expected json or csv)")),
        }
    }
}

#[derive(Debug)]
pub enum RosterLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    MalformedDate {
        person: String,
        training: String,
        source: MalformedDateError,
    },
}

impl RosterLoadError {
    pub(crate) fn malformed(person: &str, training: &str, source: MalformedDateError) -> Self {
        Self::MalformedDate {
            person: person.to_string(),
            training: training.to_string(),
            source,
        }
    }
}

impl std::fmt::Display for RosterLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterLoadError::Io(err) => write!(f, "failed to read training roster: {}", err),
            RosterLoadError::Json(err) => write!(f, "invalid roster JSON: {}", err),
            RosterLoadError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterLoadError::MalformedDate {
                person,
                training,
                source,
            } => write!(
                f,
                "completion of '{}' by '{}' has a malformed date: {}",
                training, person, source
            ),
        }
    }
}

impl std::error::Error for RosterLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterLoadError::Io(err) => Some(err),
            RosterLoadError::Json(err) => Some(err),
            RosterLoadError::Csv(err) => Some(err),
            RosterLoadError::MalformedDate { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for RosterLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for RosterLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for RosterLoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterLoader;

impl RosterLoader {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        format: RosterFormat,
    ) -> Result<Vec<Person>, RosterLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let roster = Self::from_reader(std::io::BufReader::new(file), format)?;
        info!(
            path = %path.display(),
            format = format.label(),
            people = roster.len(),
            "training roster loaded"
        );
        Ok(roster)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: RosterFormat,
    ) -> Result<Vec<Person>, RosterLoadError> {
        match format {
            RosterFormat::Json => parser::parse_json(reader),
            RosterFormat::Csv => csv_rows::parse_csv(reader),
        }
    }
}
