use crate::core::gate::GateViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML writing error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("Export error: {message}")]
    ExportError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Cannot decide yet: {0}")]
    GateRejected(#[from] GateViolation),

    #[error("Session is {state}, expected {expected}")]
    InvalidSessionState {
        state: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::GateRejected(_) | PlannerError::InvalidSessionState { .. } => {
                ErrorSeverity::Medium
            }
            PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::TomlParseError(_) => ErrorSeverity::High,
            PlannerError::IoError(_)
            | PlannerError::CsvError(_)
            | PlannerError::SerializationError(_)
            | PlannerError::ExportError { .. }
            | PlannerError::TomlWriteError(_) => ErrorSeverity::Critical,
        }
    }

    /// Exit code the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::GateRejected(violation) => violation.to_string(),
            PlannerError::IoError(e) => format!("Could not read or write a file: {}", e),
            PlannerError::TomlParseError(e) => format!("The plan file is not valid TOML: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::GateRejected(GateViolation::TooFewPeople) => {
                "Add people with --person or a [[people]] table"
            }
            PlannerError::GateRejected(GateViolation::TooFewBeds) => {
                "Add beds with --bed or a [[beds]] table"
            }
            PlannerError::GateRejected(GateViolation::SpotCountMismatch { .. }) => {
                "Adjust bed capacities so they add up to the number of people"
            }
            PlannerError::GateRejected(GateViolation::DuplicatePersonName { .. }) => {
                "Rename one of the people sharing a name"
            }
            PlannerError::GateRejected(GateViolation::DuplicateBedLabel { .. }) => {
                "Rename one of the beds sharing a label"
            }
            PlannerError::InvalidSessionState { .. } => "Reset the session and start again",
            PlannerError::TomlParseError(_)
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => "Check the plan file and command line flags",
            PlannerError::IoError(_) => "Check that the path exists and is writable",
            PlannerError::CsvError(_)
            | PlannerError::SerializationError(_)
            | PlannerError::ExportError { .. }
            | PlannerError::TomlWriteError(_) => "Check the output directory and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
