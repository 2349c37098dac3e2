//! Parameter sweep sensitivity analysis module.
//!
//! Sweeps re-evaluate the mandate/voluntary comparison while varying one or
//! two fields of a base [`ModelParameters`](crate::model::ModelParameters):
//!
//! ```
//! use vaxpolicy_core::analysis::{SweepParameter, OneWayAnalysis, sweep};
//! use vaxpolicy_core::model::{ModelParameters, ParameterField, Policy};
//!
//! let base = ModelParameters::default();
//! let rows = sweep(&base, ParameterField::MandateAdoptionRate, &[0.65, 0.9]);
//! assert_eq!(rows[0].decision(), Some(Policy::Voluntary));
//! assert_eq!(rows[1].decision(), Some(Policy::Mandate));
//!
//! let efficacy = SweepParameter::linspace(ParameterField::VaccineEfficacy, 0.5, 0.95, 6);
//! let analysis = OneWayAnalysis::run(&base, &efficacy);
//! assert_eq!(analysis.rows.len(), 6);
//! ```
//!
//! Two-way sweeps produce row-major [`GridRow`]s that can be pivoted into a
//! [`SweepGrid`] for tabular display. [`find_break_even`] bisects a single
//! field to locate where the recommendation flips.

mod break_even;
mod config;
mod evaluator;
mod grid;

pub use break_even::{BreakEven, BreakEvenConfig, find_break_even};
pub use config::{SweepParameter, SweepValues, linspace};
pub use evaluator::{GridRow, OneWayAnalysis, SweepRow, TwoWayAnalysis, grid_sweep, sweep};
pub use grid::SweepGrid;
