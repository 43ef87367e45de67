use super::domain::{CleanedPerson, Completion, Person};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Collapses each person's completions to the most recent one per training.
///
/// A later completion replaces the stored one only when its timestamp is
/// strictly greater, so equal timestamps keep the first completion seen.
/// People sharing a name stay separate entries and are only warned about.
pub fn dedupe(roster: &[Person]) -> Vec<CleanedPerson> {
    for name in repeated_names(roster) {
        warn!(person = %name, "person listed more than once in roster");
    }
    roster.iter().map(latest_completions).collect()
}

/// Names appearing on more than one roster entry, in first-repeat order.
fn repeated_names(roster: &[Person]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for person in roster {
        let name = person.name.as_str();
        if !seen.insert(name) && !repeated.contains(&name) {
            repeated.push(name);
        }
    }
    repeated
}

fn latest_completions(person: &Person) -> CleanedPerson {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<Completion> = Vec::new();

    for completion in &person.completions {
        match slots.get(completion.training_name.as_str()) {
            Some(&index) => {
                if completion.timestamp > latest[index].timestamp {
                    latest[index] = completion.clone();
                }
            }
            None => {
                slots.insert(completion.training_name.as_str(), latest.len());
                latest.push(completion.clone());
            }
        }
    }

    CleanedPerson::from_parts(person.name.clone(), latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn keeps_latest_completion_per_training() {
        let person = Person::new(
            "A",
            vec![
                Completion::new("Safety", date(2023, 1, 1)),
                Completion::new("Safety", date(2023, 6, 1)),
                Completion::new("Safety", date(2023, 3, 1)),
            ],
        );

        let cleaned = dedupe(&[person]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].completions().len(), 1);
        assert_eq!(
            cleaned[0].completion("Safety").expect("safety kept").timestamp,
            date(2023, 6, 1)
        );
    }

    #[test]
    fn equal_timestamps_keep_first_seen() {
        let person = Person::new(
            "A",
            vec![
                Completion::new("Safety", date(2023, 6, 1)).expiring(date(2024, 6, 1)),
                Completion::new("Safety", date(2023, 6, 1)).expiring(date(2025, 6, 1)),
            ],
        );

        let cleaned = dedupe(&[person]);
        let kept = cleaned[0].completion("Safety").expect("safety kept");
        assert_eq!(kept.expires, Some(date(2024, 6, 1)));
    }

    #[test]
    fn replacement_keeps_the_winning_expiration() {
        let person = Person::new(
            "A",
            vec![
                Completion::new("Safety", date(2022, 1, 1)).expiring(date(2023, 1, 1)),
                Completion::new("Safety", date(2023, 1, 1)),
            ],
        );

        let cleaned = dedupe(&[person]);
        assert_eq!(
            cleaned[0].completion("Safety").expect("safety kept").expires,
            None
        );
    }

    #[test]
    fn preserves_roster_and_first_appearance_order() {
        let roster = vec![
            Person::new(
                "Zed",
                vec![
                    Completion::new("Beta", date(2023, 1, 1)),
                    Completion::new("Alpha", date(2023, 1, 1)),
                    Completion::new("Beta", date(2023, 2, 1)),
                ],
            ),
            Person::new("Amy", Vec::new()),
        ];

        let cleaned = dedupe(&roster);
        let names: Vec<_> = cleaned.iter().map(|person| person.name.as_str()).collect();
        assert_eq!(names, ["Zed", "Amy"]);

        let trainings: Vec<_> = cleaned[0]
            .completions()
            .iter()
            .map(|completion| completion.training_name.as_str())
            .collect();
        assert_eq!(trainings, ["Beta", "Alpha"]);
        assert!(cleaned[1].completions().is_empty());
    }

    #[test]
    fn repeated_names_are_reported_once_and_kept_apart() {
        let roster = vec![
            Person::new("Amy", vec![Completion::new("Lab", date(2023, 1, 1))]),
            Person::new("Bo", Vec::new()),
            Person::new("Amy", vec![Completion::new("Lab", date(2023, 5, 1))]),
            Person::new("Amy", Vec::new()),
        ];

        assert_eq!(repeated_names(&roster), ["Amy"]);
        assert!(repeated_names(&roster[..2]).is_empty());

        let cleaned = dedupe(&roster);
        assert_eq!(cleaned.len(), 4);
        assert_eq!(
            cleaned[2].completion("Lab").expect("lab kept").timestamp,
            date(2023, 5, 1)
        );
    }
}
