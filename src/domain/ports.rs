use crate::utils::error::Result;

/// Key/value storage for the few settings that outlive a session.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Seeds new rows with a default name. Uniqueness is the caller's concern.
pub trait NameSource {
    fn person_name(&mut self) -> String;
    fn bed_label(&mut self) -> String;
}
