pub mod cli;
pub mod toml_config;

use crate::domain::model::{Bed, MIN_CAPACITY};
use crate::utils::error::{PlannerError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Parses `LABEL` or `LABEL=SLEEPS`. An empty label leaves the bed
/// unlabelled so it gets its positional placeholder.
pub fn parse_bed_arg(arg: &str) -> Result<Bed> {
    let (label, sleeps) = match arg.rsplit_once('=') {
        Some((label, sleeps)) => {
            let sleeps = sleeps.trim().parse::<u32>().map_err(|_| {
                PlannerError::InvalidConfigValueError {
                    field: "bed".to_string(),
                    value: arg.to_string(),
                    reason: "Sleeps must be a whole number".to_string(),
                }
            })?;
            (label, sleeps)
        }
        None => (arg, MIN_CAPACITY),
    };

    if sleeps < MIN_CAPACITY {
        return Err(PlannerError::InvalidConfigValueError {
            field: "bed".to_string(),
            value: arg.to_string(),
            reason: format!("Sleeps must be at least {}", MIN_CAPACITY),
        });
    }

    if label.trim().is_empty() {
        Ok(Bed::unlabelled(sleeps))
    } else {
        Ok(Bed::new(label, sleeps))
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "who-sleeps-where")]
#[command(about = "Randomly decide who sleeps in which bed")]
pub struct CliConfig {
    /// Path to a TOML plan file
    #[arg(short, long)]
    pub plan: Option<PathBuf>,

    /// Add a person (repeatable)
    #[arg(long = "person")]
    pub people: Vec<String>,

    /// Add a bed as LABEL or LABEL=SLEEPS (repeatable)
    #[arg(long = "bed")]
    pub beds: Vec<String>,

    /// Add this many people with generated names
    #[arg(long, default_value = "0")]
    pub random_people: usize,

    /// Add this many single beds with generated labels
    #[arg(long, default_value = "0")]
    pub random_beds: usize,

    /// Override the stored drumroll preference for this run
    #[arg(long)]
    pub drumroll: Option<bool>,

    /// Drumroll length in seconds
    #[arg(long)]
    pub drumroll_secs: Option<u64>,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory to write the assignment to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Export formats (csv, json)
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Preference file
    #[arg(long, default_value = ".who-sleeps-where.toml")]
    pub prefs: PathBuf,

    /// Persist the drumroll preference
    #[arg(long)]
    pub set_drumroll: Option<bool>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn parsed_beds(&self) -> Result<Vec<Bed>> {
        self.beds.iter().map(|arg| parse_bed_arg(arg)).collect()
    }

    /// Whether any flag adds people or beds, generated ones included.
    pub fn has_roster_input(&self) -> bool {
        !self.people.is_empty()
            || !self.beds.is_empty()
            || self.random_people > 0
            || self.random_beds > 0
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.parsed_beds()?;

        for (index, person) in self.people.iter().enumerate() {
            validation::validate_non_empty_string(&format!("person[{}]", index), person)?;
        }

        if let Some(path) = &self.output_path {
            validation::validate_path("output_path", path)?;
        }

        for format in &self.formats {
            validation::validate_one_of(
                "formats",
                format,
                &toml_config::SUPPORTED_FORMATS,
            )?;
        }

        if let Some(seconds) = self.drumroll_secs {
            validation::validate_range(
                "drumroll_secs",
                seconds,
                0,
                toml_config::MAX_DRUMROLL_SECONDS,
            )?;
        }

        Ok(())
    }
}
