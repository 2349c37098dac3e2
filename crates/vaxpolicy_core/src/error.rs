use crate::model::ParameterField;

/// Errors related to model parameter validation
#[derive(Debug, Clone, PartialEq, serde::Serialize, thiserror::Error)]
pub enum ParameterError {
    /// A value violates the domain constraint of its field
    #[error("invalid {field}: {value} (must be {constraint})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        constraint: Constraint,
    },

    /// A parameter name did not match any known field
    #[error("unknown parameter '{0}'")]
    UnknownField(String),

    /// The same field was overridden twice at one sweep point
    #[error("{0} cannot be swept against itself")]
    DuplicateField(&'static str),
}

/// The domain a parameter value must fall within
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Constraint {
    /// Closed interval [0, 1]
    UnitInterval,
    /// Half-open interval (0, 1]
    PositiveUnitInterval,
    /// Strictly greater than zero
    Positive,
    /// Not NaN or infinite
    Finite,
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::UnitInterval => write!(f, "within [0, 1]"),
            Constraint::PositiveUnitInterval => write!(f, "within (0, 1]"),
            Constraint::Positive => write!(f, "greater than 0"),
            Constraint::Finite => write!(f, "a finite number"),
        }
    }
}

impl ParameterError {
    pub(crate) fn out_of_range(field: ParameterField, value: f64, constraint: Constraint) -> Self {
        ParameterError::OutOfRange {
            field: field.name(),
            value,
            constraint,
        }
    }

    /// Name of the offending field, if the error concerns one
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            ParameterError::OutOfRange { field, .. } | ParameterError::DuplicateField(field) => {
                Some(field)
            }
            ParameterError::UnknownField(_) => None,
        }
    }
}

/// Errors from the analysis layer (sweeps and break-even search)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Both ends of a search interval recommend the same action
    #[error("no change in recommendation for {field} between {min} and {max}")]
    NoSignChange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Search bounds are reversed or empty
    #[error("invalid search interval [{min}, {max}]")]
    InvalidInterval { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, ParameterError>;
