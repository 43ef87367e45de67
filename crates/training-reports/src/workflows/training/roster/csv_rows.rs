use super::super::domain::{Completion, Person};
use super::dates::{parse_date, parse_optional_date};
use super::RosterLoadError;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;

/// Reads one completion per row, grouping rows by person in order of first appearance.
pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Person>, RosterLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut people: Vec<Person> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in csv_reader.deserialize::<CompletionRow>() {
        let row = record?;
        let completion = row.completion()?;

        match positions.get(&row.person) {
            Some(&index) => people[index].completions.push(completion),
            None => {
                positions.insert(row.person.clone(), people.len());
                people.push(Person::new(row.person, vec![completion]));
            }
        }
    }

    Ok(people)
}

#[derive(Debug, Deserialize)]
struct CompletionRow {
    #[serde(rename = "Name")]
    person: String,
    #[serde(rename = "Training")]
    training: String,
    #[serde(rename = "Completed")]
    completed: String,
    #[serde(rename = "Expires", default, deserialize_with = "empty_string_as_none")]
    expires: Option<String>,
}

impl CompletionRow {
    fn completion(&self) -> Result<Completion, RosterLoadError> {
        let malformed = |error| RosterLoadError::malformed(&self.person, &self.training, error);
        let timestamp = parse_date(&self.completed).map_err(malformed)?;
        let expires = parse_optional_date(self.expires.as_deref()).map_err(malformed)?;

        Ok(Completion {
            training_name: self.training.clone(),
            timestamp,
            expires,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
