use crate::domain::ports::NameSource;
use rand::seq::IndexedRandom;
use rand::Rng;

pub const BED_LABELS: &[&str] = &[
    "Master Bed",
    "Guest Bed",
    "Queen Bed",
    "King Bed",
    "Double Bed",
    "Single Bed",
    "Top Bunk",
    "Bottom Bunk",
    "Trundle",
    "Couch",
    "Sofa Bed",
    "Sleeper Couch",
    "Air Mattress",
    "Futon",
    "Day Bed",
    "Camp Bed",
    "Hammock",
    "Floor Mattress",
    "Attic Bed",
    "Loft Bed",
    "Window Seat",
    "Lounge Couch",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Bailey", "Casey", "Dana", "Eden", "Finley", "Harper", "Indigo", "Jordan", "Kai",
    "Logan", "Morgan", "Noa", "Parker", "Quinn", "Riley", "Sage", "Taylor", "Wren", "Yael",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Brennan", "Castillo", "Dubois", "Eriksen", "Fujita", "Greene", "Haddad", "Ivanova",
    "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov", "Reyes",
    "Silva", "Tran", "Whitaker",
];

/// Draws default names from fixed word lists.
pub struct RandomNames<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomNames<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NameSource for RandomNames<R> {
    fn person_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Guest");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("");
        format!("{} {}", first, last).trim_end().to_string()
    }

    fn bed_label(&mut self) -> String {
        BED_LABELS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Bed")
            .to_string()
    }
}
