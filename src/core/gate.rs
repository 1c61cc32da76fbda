//! The rule chain that decides whether an assignment may be computed.
//!
//! Rules are checked in a fixed order and the first failure wins, so a
//! roster breaking several rules always reports the same one.

use crate::core::roster::Roster;
use crate::domain::model::{Bed, Person};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateViolation {
    #[error("Add at least two people")]
    TooFewPeople,

    #[error("Add at least two beds")]
    TooFewBeds,

    #[error("Make sure the number of people matches the number of spots")]
    SpotCountMismatch { people: usize, spots: u64 },

    #[error("Make sure every name is unique")]
    DuplicatePersonName { name: String },

    #[error("Make sure every bed label is unique")]
    DuplicateBedLabel { label: String },
}

/// A roster that passed the gate. The assignment engine only accepts this.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRoster<'a> {
    people: &'a [Person],
    beds: &'a [Bed],
}

impl<'a> ValidatedRoster<'a> {
    pub fn people(&self) -> &'a [Person] {
        self.people
    }

    pub fn beds(&self) -> &'a [Bed] {
        self.beds
    }
}

pub fn check(roster: &Roster) -> Result<ValidatedRoster<'_>, GateViolation> {
    let people = roster.people();
    let beds = roster.beds();

    if people.len() < 2 {
        return Err(GateViolation::TooFewPeople);
    }

    if beds.len() < 2 {
        return Err(GateViolation::TooFewBeds);
    }

    let spots = roster.total_spots();
    if spots != people.len() as u64 {
        return Err(GateViolation::SpotCountMismatch {
            people: people.len(),
            spots,
        });
    }

    if let Some(name) = first_duplicate(people.iter().map(|p| p.trimmed_name().to_string())) {
        return Err(GateViolation::DuplicatePersonName { name });
    }

    if let Some(label) = first_duplicate(roster.bed_labels()) {
        return Err(GateViolation::DuplicateBedLabel { label });
    }

    Ok(ValidatedRoster { people, beds })
}

/// The message shown next to a disabled decide action, if any.
pub fn error_message(roster: &Roster) -> Option<String> {
    check(roster).err().map(|violation| violation.to_string())
}

fn first_duplicate(values: impl IntoIterator<Item = String>) -> Option<String> {
    let mut seen = HashSet::new();
    values.into_iter().find(|value| !seen.insert(value.clone()))
}
