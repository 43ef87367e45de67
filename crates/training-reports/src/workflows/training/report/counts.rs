use super::super::domain::CleanedPerson;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingCount {
    pub training_name: String,
    pub people: usize,
}

/// Number of people holding a completion of each training, keyed in order of
/// first appearance across the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingCounts {
    entries: Vec<TrainingCount>,
}

impl TrainingCounts {
    pub fn entries(&self) -> &[TrainingCount] {
        &self.entries
    }

    pub fn get(&self, training_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.training_name == training_name)
            .map(|entry| entry.people)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TrainingCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.training_name, &entry.people)?;
        }
        map.end()
    }
}

pub fn count_completions(roster: &[CleanedPerson]) -> TrainingCounts {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TrainingCount> = Vec::new();

    for person in roster {
        for completion in person.completions() {
            let name = completion.training_name.as_str();
            match positions.get(name) {
                Some(&index) => entries[index].people += 1,
                None => {
                    positions.insert(name, entries.len());
                    entries.push(TrainingCount {
                        training_name: name.to_string(),
                        people: 1,
                    });
                }
            }
        }
    }

    TrainingCounts { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::training::{dedupe, Completion, Person};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn counts_each_person_once_per_training() {
        let roster = dedupe(&[
            Person::new(
                "A",
                vec![
                    Completion::new("Safety", date(2023, 1, 1)),
                    Completion::new("Safety", date(2023, 6, 1)),
                    Completion::new("Lasers", date(2023, 2, 1)),
                ],
            ),
            Person::new("B", vec![Completion::new("Safety", date(2022, 5, 1))]),
            Person::new("C", Vec::new()),
        ]);

        let counts = count_completions(&roster);
        assert_eq!(counts.get("Safety"), Some(2));
        assert_eq!(counts.get("Lasers"), Some(1));
        assert_eq!(counts.get("Biosafety"), None);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let roster = dedupe(&[Person::new(
            "A",
            vec![
                Completion::new("Zeta", date(2023, 1, 1)),
                Completion::new("Alpha", date(2023, 1, 1)),
            ],
        )]);

        let json = serde_json::to_string(&count_completions(&roster)).expect("serializes");
        assert_eq!(json, r#"{"Zeta":1,"Alpha":1}"#);
    }

    #[test]
    fn empty_roster_yields_empty_counts() {
        let counts = count_completions(&[]);
        assert!(counts.is_empty());
        assert_eq!(serde_json::to_string(&counts).expect("serializes"), "{}");
    }
}
