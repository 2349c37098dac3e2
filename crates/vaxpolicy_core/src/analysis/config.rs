//! Configuration types for parameter sweep analysis.

use serde::{Deserialize, Serialize};

use crate::model::ParameterField;

/// The values a swept parameter takes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepValues {
    /// `steps` evenly spaced points from `min` to `max`, both inclusive
    Linspace { min: f64, max: f64, steps: usize },
    /// An explicit list, evaluated in the given order
    List { values: Vec<f64> },
}

impl SweepValues {
    pub fn linspace(min: f64, max: f64, steps: usize) -> Self {
        SweepValues::Linspace { min, max, steps }
    }

    pub fn list(values: impl Into<Vec<f64>>) -> Self {
        SweepValues::List {
            values: values.into(),
        }
    }

    /// Generate the sweep values
    pub fn values(&self) -> Vec<f64> {
        match self {
            SweepValues::Linspace { min, max, steps } => linspace(*min, *max, *steps),
            SweepValues::List { values } => values.clone(),
        }
    }

    /// Number of points in the sweep
    pub fn len(&self) -> usize {
        match self {
            SweepValues::Linspace { steps, .. } => *steps,
            SweepValues::List { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Evenly spaced values over a closed interval.
///
/// A single step yields just `min`; zero steps yields nothing.
pub fn linspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step_size = (max - min) / (steps - 1) as f64;
            (0..steps)
                .map(|i| {
                    // Pin the last point so rounding never overshoots `max`
                    if i == steps - 1 {
                        max
                    } else {
                        min + step_size * i as f64
                    }
                })
                .collect()
        }
    }
}

/// A field together with the values it is swept over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParameter {
    pub field: ParameterField,
    pub values: SweepValues,
}

impl SweepParameter {
    pub fn new(field: ParameterField, values: SweepValues) -> Self {
        Self { field, values }
    }

    pub fn linspace(field: ParameterField, min: f64, max: f64, steps: usize) -> Self {
        Self::new(field, SweepValues::linspace(min, max, steps))
    }

    pub fn list(field: ParameterField, values: impl Into<Vec<f64>>) -> Self {
        Self::new(field, SweepValues::list(values))
    }

    /// Get a descriptive label for display
    pub fn label(&self) -> &'static str {
        self.field.label()
    }
}
