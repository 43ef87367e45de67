use chrono::NaiveDate;
use std::fmt;

/// One completion of one training by one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub training_name: String,
    pub timestamp: NaiveDate,
    pub expires: Option<NaiveDate>,
}

impl Completion {
    pub fn new(training_name: impl Into<String>, timestamp: NaiveDate) -> Self {
        Self {
            training_name: training_name.into(),
            timestamp,
            expires: None,
        }
    }

    pub fn expiring(mut self, expires: NaiveDate) -> Self {
        self.expires = Some(expires);
        self
    }
}

/// A roster entry as loaded, with every completion in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub completions: Vec<Completion>,
}

impl Person {
    pub fn new(name: impl Into<String>, completions: Vec<Completion>) -> Self {
        Self {
            name: name.into(),
            completions,
        }
    }
}

/// A person holding at most one completion per training name, the most recent one.
///
/// Completions keep the order in which each training name first appeared for
/// the person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedPerson {
    pub name: String,
    completions: Vec<Completion>,
}

impl CleanedPerson {
    pub(crate) fn from_parts(name: String, completions: Vec<Completion>) -> Self {
        Self { name, completions }
    }

    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    pub fn completion(&self, training_name: &str) -> Option<&Completion> {
        self.completions
            .iter()
            .find(|completion| completion.training_name == training_name)
    }

    pub fn to_person(&self) -> Person {
        Person::new(self.name.clone(), self.completions.clone())
    }
}

/// A date string none of the supported formats accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDateError {
    pub value: String,
}

impl fmt::Display for MalformedDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized date '{}'", self.value)
    }
}

impl std::error::Error for MalformedDateError {}
