use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Smallest number of spots a bed can offer.
pub const MIN_CAPACITY: u32 = 1;

static COUCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)couch|sleeper").expect("couch pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name as the gate compares it.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedKind {
    Bed,
    Couch,
}

impl BedKind {
    pub fn from_label(label: &str) -> Self {
        if COUCH_PATTERN.is_match(label.trim()) {
            BedKind::Couch
        } else {
            BedKind::Bed
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            BedKind::Bed => "🛏️",
            BedKind::Couch => "🛋️",
        }
    }
}

/// A sleeping spot. `label` holds only what the user typed; the label used
/// for display and uniqueness is resolved against the bed's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bed {
    pub label: Option<String>,
    pub capacity: u32,
}

impl Bed {
    pub fn new(label: impl Into<String>, capacity: u32) -> Self {
        Self {
            label: Some(label.into()),
            capacity: capacity.max(MIN_CAPACITY),
        }
    }

    pub fn unlabelled(capacity: u32) -> Self {
        Self {
            label: None,
            capacity: capacity.max(MIN_CAPACITY),
        }
    }

    pub fn placeholder_label(position: usize) -> String {
        format!("Bed {}", position + 1)
    }

    /// Trimmed user label, or `Bed {position+1}` when blank.
    pub fn effective_label(&self, position: usize) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => Self::placeholder_label(position),
        }
    }

    pub fn kind(&self, position: usize) -> BedKind {
        BedKind::from_label(&self.effective_label(position))
    }
}

/// Normalises free-text capacity input: anything that is not a positive
/// integer becomes [`MIN_CAPACITY`].
pub fn normalize_capacity_input(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(value) if value >= MIN_CAPACITY => value,
        _ => MIN_CAPACITY,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub label: String,
    pub kind: BedKind,
    pub capacity: u32,
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub decided_at: DateTime<Utc>,
    pub beds: Vec<Placement>,
}

impl Assignment {
    pub fn total_people(&self) -> usize {
        self.beds.iter().map(|placement| placement.people.len()).sum()
    }

    pub fn bed_of(&self, name: &str) -> Option<&Placement> {
        self.beds
            .iter()
            .find(|placement| placement.people.iter().any(|p| p.name == name))
    }
}
