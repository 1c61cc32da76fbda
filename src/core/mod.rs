pub mod engine;
pub mod gate;
pub mod roster;
pub mod session;

pub use crate::domain::model::{Assignment, Bed, Person, Placement};
pub use crate::domain::ports::{NameSource, PreferenceStore};
pub use crate::utils::error::Result;
