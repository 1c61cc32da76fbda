use crate::domain::model::{normalize_capacity_input, Bed, Person, MIN_CAPACITY};
use crate::domain::ports::NameSource;

/// Upper bound on the number of beds a roster accepts.
pub const MAX_BEDS: usize = 100;

const NAME_DRAW_ATTEMPTS: usize = 32;

/// The two editable lists of a session. Rows have no identity beyond their
/// position; removing a row shifts everything after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
    beds: Vec<Bed>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(people: Vec<Person>, beds: Vec<Bed>) -> Self {
        Self { people, beds }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn beds(&self) -> &[Bed] {
        &self.beds
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.beds.is_empty()
    }

    /// Sum of all bed capacities.
    pub fn total_spots(&self) -> u64 {
        self.beds.iter().map(|bed| u64::from(bed.capacity)).sum()
    }

    pub fn bed_labels(&self) -> Vec<String> {
        self.beds
            .iter()
            .enumerate()
            .map(|(position, bed)| bed.effective_label(position))
            .collect()
    }

    pub fn push_person(&mut self, person: Person) -> usize {
        self.people.push(person);
        self.people.len() - 1
    }

    pub fn push_bed(&mut self, bed: Bed) -> Option<usize> {
        if self.beds.len() >= MAX_BEDS {
            tracing::warn!("Bed limit of {} reached, not adding another", MAX_BEDS);
            return None;
        }
        self.beds.push(bed);
        Some(self.beds.len() - 1)
    }

    /// Appends a person named by `names`, redrawing names already taken.
    pub fn add_person<N: NameSource + ?Sized>(&mut self, names: &mut N) -> usize {
        let taken: Vec<&str> = self.people.iter().map(|p| p.name.as_str()).collect();
        let name = draw_unique(&taken, || names.person_name());
        tracing::debug!("Adding person '{}'", name);
        self.push_person(Person::new(name))
    }

    /// Appends a bed with capacity 1 labelled by `names`. Returns `None`
    /// once [`MAX_BEDS`] is reached.
    pub fn add_bed<N: NameSource + ?Sized>(&mut self, names: &mut N) -> Option<usize> {
        if self.beds.len() >= MAX_BEDS {
            tracing::warn!("Bed limit of {} reached, not adding another", MAX_BEDS);
            return None;
        }
        let labels = self.bed_labels();
        let taken: Vec<&str> = labels.iter().map(String::as_str).collect();
        let label = draw_unique(&taken, || names.bed_label());
        tracing::debug!("Adding bed '{}'", label);
        self.push_bed(Bed::new(label, MIN_CAPACITY))
    }

    pub fn remove_person(&mut self, index: usize) -> Option<Person> {
        (index < self.people.len()).then(|| self.people.remove(index))
    }

    pub fn remove_bed(&mut self, index: usize) -> Option<Bed> {
        (index < self.beds.len()).then(|| self.beds.remove(index))
    }

    pub fn rename_person(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.people.get_mut(index) {
            Some(person) => {
                person.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Sets the user label of a bed. A blank label falls back to the
    /// positional placeholder when read.
    pub fn set_bed_label(&mut self, index: usize, label: impl Into<String>) -> bool {
        match self.beds.get_mut(index) {
            Some(bed) => {
                bed.label = Some(label.into());
                true
            }
            None => false,
        }
    }

    pub fn set_bed_capacity(&mut self, index: usize, capacity: u32) -> bool {
        match self.beds.get_mut(index) {
            Some(bed) => {
                bed.capacity = capacity.max(MIN_CAPACITY);
                true
            }
            None => false,
        }
    }

    /// Free-text variant of [`Roster::set_bed_capacity`]; unparsable input
    /// becomes a capacity of 1.
    pub fn set_bed_capacity_input(&mut self, index: usize, input: &str) -> bool {
        self.set_bed_capacity(index, normalize_capacity_input(input))
    }

    pub fn clear(&mut self) {
        self.people.clear();
        self.beds.clear();
    }
}

fn draw_unique(taken: &[&str], mut draw: impl FnMut() -> String) -> String {
    let mut candidate = draw();
    for _ in 0..NAME_DRAW_ATTEMPTS {
        if !taken.contains(&candidate.as_str()) {
            return candidate;
        }
        candidate = draw();
    }

    // Name pool exhausted: number the last draw until it is free.
    let base = candidate;
    let mut suffix = 2;
    loop {
        let numbered = format!("{} {}", base, suffix);
        if !taken.contains(&numbered.as_str()) {
            return numbered;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedNames {
        people: Vec<&'static str>,
        beds: Vec<&'static str>,
    }

    impl NameSource for FixedNames {
        fn person_name(&mut self) -> String {
            let name = self.people.remove(0);
            self.people.push(name);
            name.to_string()
        }

        fn bed_label(&mut self) -> String {
            let label = self.beds.remove(0);
            self.beds.push(label);
            label.to_string()
        }
    }

    fn names() -> FixedNames {
        FixedNames {
            people: vec!["Alice", "Bob"],
            beds: vec!["Queen", "Couch"],
        }
    }

    #[test]
    fn test_add_rows_with_unique_default_names() {
        let mut roster = Roster::new();
        let mut names = names();

        assert_eq!(roster.add_person(&mut names), 0);
        assert_eq!(roster.add_person(&mut names), 1);
        assert_eq!(roster.people()[0].name, "Alice");
        assert_eq!(roster.people()[1].name, "Bob");

        assert_eq!(roster.add_bed(&mut names), Some(0));
        assert_eq!(roster.beds()[0], Bed::new("Queen", 1));
    }

    #[test]
    fn test_exhausted_name_pool_gets_numbered() {
        let mut roster = Roster::new();
        let mut names = FixedNames {
            people: vec!["Alice"],
            beds: vec!["Queen"],
        };

        roster.add_person(&mut names);
        roster.add_person(&mut names);
        roster.add_person(&mut names);

        let names: Vec<&str> = roster.people().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Alice 2", "Alice 3"]);
    }

    #[test]
    fn test_remove_shifts_later_rows() {
        let mut roster = Roster::from_parts(
            vec![Person::new("A"), Person::new("B"), Person::new("C")],
            vec![Bed::new("X", 1), Bed::new("Y", 2)],
        );

        assert_eq!(roster.remove_person(1), Some(Person::new("B")));
        assert_eq!(roster.people()[1].name, "C");
        assert_eq!(roster.remove_person(7), None);

        assert_eq!(roster.remove_bed(0), Some(Bed::new("X", 1)));
        assert_eq!(roster.beds()[0].effective_label(0), "Y");
    }

    #[test]
    fn test_updates_by_position() {
        let mut roster = Roster::from_parts(vec![Person::new("A")], vec![Bed::new("X", 1)]);

        assert!(roster.rename_person(0, "Alice"));
        assert!(!roster.rename_person(3, "Nobody"));
        assert_eq!(roster.people()[0].name, "Alice");

        assert!(roster.set_bed_label(0, "  "));
        assert_eq!(roster.bed_labels(), vec!["Bed 1".to_string()]);

        assert!(roster.set_bed_capacity_input(0, "4"));
        assert_eq!(roster.total_spots(), 4);
        assert!(roster.set_bed_capacity_input(0, ""));
        assert_eq!(roster.total_spots(), 1);
        assert!(roster.set_bed_capacity(0, 0));
        assert_eq!(roster.beds()[0].capacity, 1);
    }

    #[test]
    fn test_bed_limit() {
        let mut roster = Roster::new();
        let mut names = names();
        for _ in 0..MAX_BEDS {
            assert!(roster.add_bed(&mut names).is_some());
        }
        assert_eq!(roster.add_bed(&mut names), None);
        assert_eq!(roster.push_bed(Bed::unlabelled(1)), None);
        assert_eq!(roster.beds().len(), MAX_BEDS);
    }

    #[test]
    fn test_clear() {
        let mut roster = Roster::from_parts(vec![Person::new("A")], vec![Bed::new("X", 1)]);
        roster.clear();
        assert!(roster.is_empty());
        assert_eq!(roster.total_spots(), 0);
    }
}
