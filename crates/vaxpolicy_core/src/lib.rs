//! Vaccine mandate utility model
//!
//! This crate compares the expected societal utility of a vaccine mandate
//! against voluntary vaccination. It provides:
//! - A death model for expected deaths at a given adoption rate
//! - A utility model with diminishing returns on lives saved and a signed-power
//!   risk transform
//! - A comparator that recommends one policy with an explicit tie-break
//! - One- and two-parameter sensitivity sweeps and break-even search
//!
//! Everything is a pure function of an explicit [`ModelParameters`] value.
//!
//! ```
//! use vaxpolicy_core::{ModelParameters, Policy, evaluate};
//!
//! let result = evaluate(&ModelParameters::default()).unwrap();
//! assert_eq!(result.recommended_action, Policy::Mandate);
//! assert!(result.difference > 700_000_000.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod compare;
pub mod error;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{grid_sweep, sweep};
pub use compare::{ComparisonResult, PolicyEvaluation, evaluate};
pub use error::{AnalysisError, ParameterError};
pub use model::{ModelParameters, ParameterField, Policy, TIE_BREAK_POLICY};
