use super::super::domain::{Completion, Person};
use super::dates::{parse_date, parse_optional_date};
use super::RosterLoadError;
use serde::Deserialize;
use std::io::Read;

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<Person>, RosterLoadError> {
    let rows: Vec<PersonRow> = serde_json::from_reader(reader)?;
    rows.into_iter().map(PersonRow::into_person).collect()
}

#[derive(Debug, Deserialize)]
struct PersonRow {
    name: String,
    #[serde(default)]
    completions: Vec<CompletionRow>,
}

#[derive(Debug, Deserialize)]
struct CompletionRow {
    name: String,
    timestamp: String,
    #[serde(default)]
    expires: Option<String>,
}

impl PersonRow {
    fn into_person(self) -> Result<Person, RosterLoadError> {
        let PersonRow { name, completions } = self;
        let completions = completions
            .into_iter()
            .map(|row| row.into_completion(&name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Person::new(name, completions))
    }
}

impl CompletionRow {
    fn into_completion(self, person: &str) -> Result<Completion, RosterLoadError> {
        let timestamp = parse_date(&self.timestamp)
            .map_err(|error| RosterLoadError::malformed(person, &self.name, error))?;
        let expires = parse_optional_date(self.expires.as_deref())
            .map_err(|error| RosterLoadError::malformed(person, &self.name, error))?;

        Ok(Completion {
            training_name: self.name,
            timestamp,
            expires,
        })
    }
}
