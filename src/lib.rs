use std::fmt;

pub mod calculator;
pub mod config;
pub mod countdown;
pub mod logging;
pub mod net;
pub mod stats;
pub mod table;
pub mod utils;

pub use calculator::{calculate, Acceleration, CalculationInputs, CalculationResult, Outcome};
pub use countdown::{Clock, Countdown, Projection, SystemClock, Tick};
pub use table::ExperienceTable;

/// Failure to obtain a usable experience table. Calculation stays disabled.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    Fetch(String),
    TooFewLines(usize),
    NoValidRows,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Fetch(reason) => write!(f, "Could not load experience data: {}", reason),
            DataError::TooFewLines(found) => write!(
                f,
                "Experience table needs a header and at least one row (found {} line(s))",
                found
            ),
            DataError::NoValidRows => write!(f, "Experience table contains no valid level rows"),
        }
    }
}

impl std::error::Error for DataError {}

/// Rejected form input. The user corrects the field and submits again.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    Malformed {
        field: &'static str,
        input: String,
    },
    NegativeExperience,
    TargetNotAboveCurrent {
        current: u32,
        target: u32,
    },
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{} is required", field),
            ValidationError::Malformed { field, input } => {
                write!(f, "{} must be a number, got '{}'", field, input)
            }
            ValidationError::NegativeExperience => {
                write!(f, "Current experience must be a non-negative number")
            }
            ValidationError::TargetNotAboveCurrent { current, target } => write!(
                f,
                "Target level ({}) must be higher than current level ({})",
                target, current
            ),
            ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must be between {} and {}, got {}",
                field, min, max, value
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors produced while turning inputs into an estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Validation(ValidationError),
    /// A level inside the requested range has no table entry.
    MissingLevelData {
        level: u32,
    },
    /// The derived duration was negative or not finite.
    Calculation {
        seconds: f64,
    },
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Validation(err) => write!(f, "{}", err),
            CalcError::MissingLevelData { level } => write!(
                f,
                "Experience for level {} is missing, check the experience table",
                level
            ),
            CalcError::Calculation { seconds } => write!(
                f,
                "Calculation produced an invalid duration ({} s), check the inputs",
                seconds
            ),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CalcError {
    fn from(err: ValidationError) -> Self {
        CalcError::Validation(err)
    }
}

/// A failed read against the counter service or the table resource.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    Request(String),
    Status(u16),
    Body(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Request(reason) => write!(f, "Request failed: {}", reason),
            NetworkError::Status(code) => write!(f, "Request failed: HTTP {}", code),
            NetworkError::Body(reason) => write!(f, "Unreadable response body: {}", reason),
        }
    }
}

impl std::error::Error for NetworkError {}
