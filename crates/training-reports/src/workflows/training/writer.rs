use super::report::ReportBundle;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COUNTS_FILE: &str = "countOfPeopleCompletedTrainings.json";
pub const FISCAL_YEAR_FILE: &str = "peopleCompletedTrainingsGivenYear.json";
pub const EXPIRATIONS_FILE: &str = "peopleCompletedExpiredTrainings.json";

#[derive(Debug)]
pub enum ReportWriteError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ReportWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWriteError::Io { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            ReportWriteError::Serialize { path, source } => {
                write!(f, "failed to serialize {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ReportWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportWriteError::Io { source, .. } => Some(source),
            ReportWriteError::Serialize { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Writes each report as a 2-space indented JSON document into one directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Stops at the first failure; files already written are left in place.
    pub fn write_all(&self, bundle: &ReportBundle) -> Result<Vec<WrittenReport>, ReportWriteError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportWriteError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        Ok(vec![
            self.write(COUNTS_FILE, &bundle.counts)?,
            self.write(FISCAL_YEAR_FILE, &bundle.fiscal_year)?,
            self.write(EXPIRATIONS_FILE, &bundle.expirations)?,
        ])
    }

    pub fn write<T: Serialize>(
        &self,
        file_name: &str,
        report: &T,
    ) -> Result<WrittenReport, ReportWriteError> {
        let path = self.output_dir.join(file_name);
        let body = match serde_json::to_string_pretty(report) {
            Ok(body) => body,
            Err(source) => return Err(ReportWriteError::Serialize { path, source }),
        };

        if let Err(source) = fs::write(&path, &body) {
            return Err(ReportWriteError::Io { path, source });
        }

        debug!(path = %path.display(), bytes = body.len(), "report written");
        Ok(WrittenReport {
            path,
            bytes: body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::training::{dedupe, Completion, Person, ReportParameters};
    use chrono::NaiveDate;

    #[test]
    fn write_fails_when_output_dir_is_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").expect("blocker written");

        let roster = dedupe(&[Person::new(
            "A",
            vec![Completion::new(
                "Safety",
                NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date"),
            )],
        )]);
        let bundle = ReportBundle::generate(
            &roster,
            &ReportParameters {
                trainings: vec!["Safety".to_string()],
                fiscal_year: 2023,
                reference_date: NaiveDate::from_ymd_opt(2023, 10, 1).expect("valid date"),
            },
        )
        .expect("bundle builds");

        let writer = ReportWriter::new(&blocker);
        assert_eq!(writer.output_dir(), blocker.as_path());
        let error = writer
            .write_all(&bundle)
            .expect_err("writing into a file path fails");
        assert!(matches!(error, ReportWriteError::Io { ref path, .. } if path == &blocker));
    }
}
