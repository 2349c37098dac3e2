//! Break-even search for single-parameter decision thresholds
//!
//! Bisection over one field to find where the recommendation flips between
//! mandate and voluntary. This assumes the recommendation changes only once
//! inside the interval (true for adoption rates, efficacy and the cost
//! fields under the default model); with several crossings it returns one
//! of them.

use serde::{Deserialize, Serialize};

use crate::compare::evaluate;
use crate::error::AnalysisError;
use crate::model::{ModelParameters, ParameterField, Policy};

/// Search settings for [`find_break_even`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenConfig {
    /// Stop once the bracketing interval is narrower than this
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    100
}

impl Default for BreakEvenConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// Location of a recommendation change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    pub field: ParameterField,
    /// Midpoint of the final bracketing interval
    pub value: f64,
    /// Largest probed value that still recommends `below`
    pub lower: f64,
    /// Smallest probed value that recommends `above`
    pub upper: f64,
    /// Recommendation at the lower end of the search interval
    pub below: Policy,
    /// Recommendation at the upper end of the search interval
    pub above: Policy,
    pub iterations: usize,
    /// The interval shrank below the tolerance, or to two adjacent floats
    pub converged: bool,
}

fn decision_at(
    base: &ModelParameters,
    field: ParameterField,
    value: f64,
) -> Result<Policy, AnalysisError> {
    let params = base.try_with(field, value)?;
    Ok(evaluate(&params)?.recommended_action)
}

/// Find the value of `field` in `[min, max]` at which the recommended policy
/// changes.
///
/// Fails with [`AnalysisError::NoSignChange`] when both endpoints recommend
/// the same policy, and with [`AnalysisError::Parameter`] when an endpoint is
/// not a valid value for the field.
pub fn find_break_even(
    base: &ModelParameters,
    field: ParameterField,
    min: f64,
    max: f64,
    config: &BreakEvenConfig,
) -> Result<BreakEven, AnalysisError> {
    if min.partial_cmp(&max) != Some(std::cmp::Ordering::Less) {
        return Err(AnalysisError::InvalidInterval { min, max });
    }

    let below = decision_at(base, field, min)?;
    let above = decision_at(base, field, max)?;
    if below == above {
        return Err(AnalysisError::NoSignChange {
            field: field.name(),
            min,
            max,
        });
    }

    let mut low = min;
    let mut high = max;
    let mut iterations = 0;
    // Set once `low` and `high` are adjacent floats and cannot be split
    let mut exhausted = false;

    while iterations < config.max_iterations && (high - low) > config.tolerance {
        let mid = f64::midpoint(low, high);
        if mid <= low || mid >= high {
            exhausted = true;
            break;
        }
        iterations += 1;

        // Every value strictly inside a valid interval is valid for the field
        if decision_at(base, field, mid)? == below {
            low = mid;
        } else {
            high = mid;
        }
    }

    let converged = exhausted || (high - low) <= config.tolerance;
    tracing::debug!(
        field = %field,
        low,
        high,
        iterations,
        converged,
        "Break-even search finished"
    );

    Ok(BreakEven {
        field,
        value: f64::midpoint(low, high),
        lower: low,
        upper: high,
        below,
        above,
        iterations,
        converged,
    })
}
