use super::super::domain::{CleanedPerson, Completion};
use chrono::{Duration, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Length of the "expires soon" window after the reference date.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ExpirationStatus {
    #[serde(rename = "Expired")]
    Expired,
    #[serde(rename = "Expires Soon")]
    ExpiresSoon,
}

impl ExpirationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::ExpiresSoon => "Expires Soon",
        }
    }

    /// A training expiring on the reference date is still valid that day.
    fn classify(expires: NaiveDate, reference: NaiveDate) -> Option<Self> {
        if expires < reference {
            return Some(Self::Expired);
        }

        let within_window = reference
            .checked_add_signed(Duration::days(EXPIRY_WINDOW_DAYS))
            .map_or(true, |horizon| expires < horizon);

        within_window.then_some(Self::ExpiresSoon)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationEntry {
    pub training_name: String,
    pub status: ExpirationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonExpirations {
    pub person: String,
    pub trainings: Vec<ExpirationEntry>,
}

/// People holding expired or soon-to-expire trainings as of a reference date.
///
/// People with nothing to flag are left out entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationReport {
    reference_date: NaiveDate,
    entries: Vec<PersonExpirations>,
}

impl ExpirationReport {
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn entries(&self) -> &[PersonExpirations] {
        &self.entries
    }

    pub fn trainings_for(&self, person: &str) -> Option<&[ExpirationEntry]> {
        self.entries
            .iter()
            .find(|entry| entry.person == person)
            .map(|entry| entry.trainings.as_slice())
    }

    /// Flagged trainings with the given status, across all people.
    pub fn count(&self, status: ExpirationStatus) -> usize {
        self.entries
            .iter()
            .flat_map(|entry| &entry.trainings)
            .filter(|training| training.status == status)
            .count()
    }
}

impl Serialize for ExpirationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.person, &entry.trainings)?;
        }
        map.end()
    }
}

pub fn scan_expirations(roster: &[CleanedPerson], reference: NaiveDate) -> ExpirationReport {
    let entries = roster
        .iter()
        .filter_map(|person| {
            let trainings: Vec<ExpirationEntry> = person
                .completions()
                .iter()
                .filter_map(|completion| flag(completion, reference))
                .collect();

            (!trainings.is_empty()).then(|| PersonExpirations {
                person: person.name.clone(),
                trainings,
            })
        })
        .collect();

    ExpirationReport {
        reference_date: reference,
        entries,
    }
}

fn flag(completion: &Completion, reference: NaiveDate) -> Option<ExpirationEntry> {
    let expires = completion.expires?;
    ExpirationStatus::classify(expires, reference).map(|status| ExpirationEntry {
        training_name: completion.training_name.clone(),
        status,
    })
}
