use super::super::domain::CleanedPerson;
use super::ReportError;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::warn;

/// Fiscal year `n`, running from July 1 of `n - 1` through June 30 of `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalYear {
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
}

impl FiscalYear {
    pub fn new(year: i32) -> Result<Self, ReportError> {
        let out_of_range = || ReportError::FiscalYearOutOfRange { year };
        let start = year
            .checked_sub(1)
            .and_then(|previous| NaiveDate::from_ymd_opt(previous, 7, 1))
            .ok_or_else(out_of_range)?;
        let end = NaiveDate::from_ymd_opt(year, 6, 30).ok_or_else(out_of_range)?;

        Ok(Self { year, start, end })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingCompletions {
    pub training_name: String,
    pub people: Vec<String>,
}

/// People who completed each requested training within a fiscal year.
///
/// Every requested training has an entry, possibly empty, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalYearCompletions {
    fiscal_year: FiscalYear,
    entries: Vec<TrainingCompletions>,
}

impl FiscalYearCompletions {
    pub fn fiscal_year(&self) -> FiscalYear {
        self.fiscal_year
    }

    pub fn entries(&self) -> &[TrainingCompletions] {
        &self.entries
    }

    pub fn people(&self, training_name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.training_name == training_name)
            .map(|entry| entry.people.as_slice())
    }
}

impl Serialize for FiscalYearCompletions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.training_name, &entry.people)?;
        }
        map.end()
    }
}

pub fn completions_in_fiscal_year<T: AsRef<str>>(
    roster: &[CleanedPerson],
    trainings: &[T],
    fiscal_year: FiscalYear,
) -> FiscalYearCompletions {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TrainingCompletions> = Vec::new();

    for training in trainings {
        let name = training.as_ref();
        if !positions.contains_key(name) {
            positions.insert(name, entries.len());
            entries.push(TrainingCompletions {
                training_name: name.to_string(),
                people: Vec::new(),
            });
        }
    }

    for person in roster {
        for completion in person.completions() {
            let Some(&index) = positions.get(completion.training_name.as_str()) else {
                continue;
            };
            if fiscal_year.contains(completion.timestamp) {
                entries[index].people.push(person.name.clone());
            }
        }
    }

    for entry in entries.iter().filter(|entry| entry.people.is_empty()) {
        warn!(
            training = %entry.training_name,
            fiscal_year = fiscal_year.year(),
            "no completions recorded in fiscal year"
        );
    }

    FiscalYearCompletions {
        fiscal_year,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::training::{dedupe, Completion, Person};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn fy(year: i32) -> FiscalYear {
        FiscalYear::new(year).expect("fiscal year in range")
    }

    #[test]
    fn fiscal_year_bounds_are_inclusive() {
        let year = fy(2024);
        assert_eq!(year.start(), date(2023, 7, 1));
        assert_eq!(year.end(), date(2024, 6, 30));
        assert!(year.contains(date(2023, 7, 1)));
        assert!(year.contains(date(2024, 6, 30)));
        assert!(!year.contains(date(2023, 6, 30)));
        assert!(!year.contains(date(2024, 7, 1)));
    }

    #[test]
    fn unrepresentable_fiscal_year_is_rejected() {
        assert!(matches!(
            FiscalYear::new(i32::MIN),
            Err(ReportError::FiscalYearOutOfRange { year: i32::MIN })
        ));
        assert!(FiscalYear::new(i32::MAX).is_err());
    }

    #[test]
    fn boundary_completions_are_filtered_per_training() {
        let roster = dedupe(&[
            Person::new("Start", vec![Completion::new("Lab", date(2023, 7, 1))]),
            Person::new("End", vec![Completion::new("Lab", date(2024, 6, 30))]),
            Person::new("Before", vec![Completion::new("Lab", date(2023, 6, 30))]),
            Person::new("After", vec![Completion::new("Lab", date(2024, 7, 1))]),
        ]);

        let result = completions_in_fiscal_year(&roster, &["Lab"], fy(2024));
        assert_eq!(
            result.people("Lab").expect("lab requested"),
            ["Start".to_string(), "End".to_string()]
        );
    }

    #[test]
    fn requested_trainings_without_matches_are_present_and_empty() {
        let roster = dedupe(&[Person::new(
            "B",
            vec![
                Completion::new("X-Ray Safety", date(2023, 8, 1)),
                Completion::new("Unrequested", date(2023, 8, 1)),
            ],
        )]);

        let result = completions_in_fiscal_year(
            &roster,
            &["X-Ray Safety", "Electrical Safety for Labs", "X-Ray Safety"],
            fy(2024),
        );

        assert_eq!(result.entries().len(), 2);
        assert_eq!(
            serde_json::to_string(&result).expect("serializes"),
            r#"{"X-Ray Safety":["B"],"Electrical Safety for Labs":[]}"#
        );
        assert!(result.people("Unrequested").is_none());
    }

    #[test]
    fn only_latest_completion_is_considered() {
        let roster = dedupe(&[Person::new(
            "A",
            vec![
                Completion::new("Lab", date(2023, 9, 1)),
                Completion::new("Lab", date(2024, 9, 1)),
            ],
        )]);

        let result = completions_in_fiscal_year(&roster, &["Lab"], fy(2024));
        assert_eq!(result.people("Lab").expect("lab requested").len(), 0);
    }
}
