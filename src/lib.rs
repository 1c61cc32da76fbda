pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::names::RandomNames;
pub use crate::config::cli::{LocalStorage, MemoryStorage};
pub use crate::config::toml_config::PlanConfig;
pub use crate::core::gate::GateViolation;
pub use crate::core::roster::Roster;
pub use crate::core::session::{Decision, Phase, RevealTicket, Session};
pub use crate::domain::model::{Assignment, Bed, BedKind, Person, Placement};
pub use crate::utils::error::{PlannerError, Result};
