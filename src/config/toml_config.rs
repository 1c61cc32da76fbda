use crate::core::roster::{Roster, MAX_BEDS};
use crate::domain::model::{Bed, Person, MIN_CAPACITY};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];

/// Longest drumroll a plan or flag may ask for.
pub const MAX_DRUMROLL_SECONDS: u64 = 60;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// A saved roster plus run options, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanConfig {
    pub plan: Option<PlanInfo>,
    #[serde(default)]
    pub people: Vec<PersonEntry>,
    #[serde(default)]
    pub beds: Vec<BedEntry>,
    pub drumroll: Option<DrumrollConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonEntry {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedEntry {
    pub label: Option<String>,
    pub sleeps: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrumrollConfig {
    pub enabled: Option<bool>,
    pub seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub formats: Vec<String>,
}

impl PlanConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a plan after substituting `${VAR}` with environment values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.beds.len() > MAX_BEDS {
            return Err(PlannerError::InvalidConfigValueError {
                field: "beds".to_string(),
                value: self.beds.len().to_string(),
                reason: format!("At most {} beds are supported", MAX_BEDS),
            });
        }

        for (index, bed) in self.beds.iter().enumerate() {
            if let Some(sleeps) = bed.sleeps {
                validation::validate_positive_number(
                    &format!("beds[{}].sleeps", index),
                    sleeps,
                    i64::from(MIN_CAPACITY),
                )?;
                validation::validate_range(
                    &format!("beds[{}].sleeps", index),
                    sleeps,
                    i64::from(MIN_CAPACITY),
                    i64::from(u32::MAX),
                )?;
            }
        }

        if let Some(seconds) = self.drumroll_seconds() {
            validation::validate_range("drumroll.seconds", seconds, 0, MAX_DRUMROLL_SECONDS)?;
        }

        if let Some(output) = &self.output {
            let path = validation::validate_required_field("output.path", &output.path)?;
            validation::validate_path("output.path", path)?;
            for format in &output.formats {
                validation::validate_one_of("output.formats", format, &SUPPORTED_FORMATS)?;
            }
        }

        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.plan.as_ref().map(|plan| plan.name.as_str())
    }

    pub fn drumroll_enabled(&self) -> Option<bool> {
        self.drumroll.as_ref().and_then(|d| d.enabled)
    }

    pub fn drumroll_seconds(&self) -> Option<u64> {
        self.drumroll.as_ref().and_then(|d| d.seconds)
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    /// Builds the roster described by the plan. Call after validation.
    pub fn to_roster(&self) -> Roster {
        let people = self
            .people
            .iter()
            .map(|entry| Person::new(entry.name.clone()))
            .collect();
        let beds = self
            .beds
            .iter()
            .map(|entry| {
                let capacity = entry
                    .sleeps
                    .and_then(|sleeps| u32::try_from(sleeps).ok())
                    .unwrap_or(MIN_CAPACITY);
                match &entry.label {
                    Some(label) => Bed::new(label.clone(), capacity),
                    None => Bed::unlabelled(capacity),
                }
            })
            .collect();
        Roster::from_parts(people, beds)
    }
}

impl Validate for PlanConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
