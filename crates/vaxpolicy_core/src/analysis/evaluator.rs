//! Parameter sweep evaluator - re-runs the comparison with modified parameters.
//!
//! Every point starts from a copy of the base parameters with only the swept
//! field(s) overridden, so points are independent and may run in any order.
//! A point whose override is invalid is recorded as an error row and the
//! sweep carries on with the remaining points.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::compare::{ComparisonResult, evaluate};
use crate::error::ParameterError;
use crate::model::{ModelParameters, ParameterField, Policy};

use super::{SweepGrid, SweepParameter};

/// One point of a single-parameter sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub value: f64,
    pub result: Result<ComparisonResult, ParameterError>,
}

impl SweepRow {
    pub fn decision(&self) -> Option<Policy> {
        self.result.as_ref().ok().map(|r| r.recommended_action)
    }

    pub fn difference(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| r.difference)
    }
}

/// One cell of a two-parameter grid sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub value_a: f64,
    pub value_b: f64,
    pub result: Result<ComparisonResult, ParameterError>,
}

impl GridRow {
    pub fn decision(&self) -> Option<Policy> {
        self.result.as_ref().ok().map(|r| r.recommended_action)
    }

    pub fn difference(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| r.difference)
    }
}

/// Evaluate the base parameters with the given overrides applied.
///
/// Each field may appear once; a repeated field would silently replace the
/// value the row reports.
fn evaluate_point(
    base: &ModelParameters,
    overrides: &[(ParameterField, f64)],
) -> Result<ComparisonResult, ParameterError> {
    let mut params = *base;
    for (i, &(field, value)) in overrides.iter().enumerate() {
        if overrides[..i].iter().any(|&(seen, _)| seen == field) {
            return Err(ParameterError::DuplicateField(field.name()));
        }
        params = params.try_with(field, value)?;
    }
    evaluate(&params)
}

fn log_failure(
    field: ParameterField,
    value: f64,
    result: &Result<ComparisonResult, ParameterError>,
) {
    if let Err(e) = result {
        tracing::warn!(field = %field, value, error = %e, "Sweep point failed");
    }
}

/// Sweep one field over `values`, producing one row per value in input order.
pub fn sweep(base: &ModelParameters, field: ParameterField, values: &[f64]) -> Vec<SweepRow> {
    tracing::debug!(field = %field, points = values.len(), "Starting sweep");

    let run = |&value: &f64| {
        let result = evaluate_point(base, &[(field, value)]);
        log_failure(field, value, &result);
        SweepRow { value, result }
    };

    #[cfg(feature = "parallel")]
    let rows = values.par_iter().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let rows = values.iter().map(run).collect();

    rows
}

/// Sweep two fields over the cartesian product of their values.
///
/// Rows are in row-major order: `field_a` is the outer loop and `field_b`
/// varies fastest. Sweeping a field against itself yields
/// [`ParameterError::DuplicateField`] in every row.
pub fn grid_sweep(
    base: &ModelParameters,
    field_a: ParameterField,
    values_a: &[f64],
    field_b: ParameterField,
    values_b: &[f64],
) -> Vec<GridRow> {
    tracing::debug!(
        field_a = %field_a,
        field_b = %field_b,
        points = values_a.len() * values_b.len(),
        "Starting grid sweep"
    );

    let points: Vec<(f64, f64)> = values_a
        .iter()
        .flat_map(|&a| values_b.iter().map(move |&b| (a, b)))
        .collect();

    let run = |&(value_a, value_b): &(f64, f64)| {
        let result = evaluate_point(base, &[(field_a, value_a), (field_b, value_b)]);
        if let Err(e) = &result {
            tracing::warn!(
                field_a = %field_a,
                value_a,
                field_b = %field_b,
                value_b,
                error = %e,
                "Grid point failed"
            );
        }
        GridRow {
            value_a,
            value_b,
            result,
        }
    };

    #[cfg(feature = "parallel")]
    let rows = points.par_iter().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let rows = points.iter().map(run).collect();

    rows
}

/// A completed single-parameter sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneWayAnalysis {
    pub field: ParameterField,
    pub rows: Vec<SweepRow>,
}

impl OneWayAnalysis {
    pub fn run(base: &ModelParameters, parameter: &SweepParameter) -> Self {
        Self {
            field: parameter.field,
            rows: sweep(base, parameter.field, &parameter.values.values()),
        }
    }

    /// Number of rows that failed validation
    pub fn failed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.result.is_err()).count()
    }

    /// Values at which the recommendation differs from the previous row.
    /// Failed rows are skipped.
    pub fn decision_changes(&self) -> Vec<(f64, Policy)> {
        let mut changes = Vec::new();
        let mut previous: Option<Policy> = None;
        for row in &self.rows {
            if let Some(decision) = row.decision() {
                if previous.is_some_and(|p| p != decision) {
                    changes.push((row.value, decision));
                }
                previous = Some(decision);
            }
        }
        changes
    }
}

/// A completed two-parameter grid sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoWayAnalysis {
    pub field_a: ParameterField,
    pub values_a: Vec<f64>,
    pub field_b: ParameterField,
    pub values_b: Vec<f64>,
    pub rows: Vec<GridRow>,
}

impl TwoWayAnalysis {
    pub fn run(base: &ModelParameters, a: &SweepParameter, b: &SweepParameter) -> Self {
        let values_a = a.values.values();
        let values_b = b.values.values();
        let rows = grid_sweep(base, a.field, &values_a, b.field, &values_b);
        Self {
            field_a: a.field,
            values_a,
            field_b: b.field,
            values_b,
            rows,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        vec![self.values_a.len(), self.values_b.len()]
    }

    /// Pivot the rows into a grid of recommendations, `None` for failed cells.
    /// Rows index `field_a` values and columns index `field_b` values.
    pub fn decision_grid(&self) -> Option<SweepGrid<Option<Policy>>> {
        SweepGrid::from_data(
            self.shape(),
            self.rows.iter().map(GridRow::decision).collect(),
        )
    }

    /// Pivot the rows into a grid of utility differences
    pub fn difference_grid(&self) -> Option<SweepGrid<Option<f64>>> {
        SweepGrid::from_data(
            self.shape(),
            self.rows.iter().map(GridRow::difference).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_preserves_order() {
        let values = [0.95, 0.5, 0.8, 0.65];
        let rows = sweep(
            &ModelParameters::default(),
            ParameterField::VaccineEfficacy,
            &values,
        );
        assert_eq!(rows.len(), values.len());
        for (row, value) in rows.iter().zip(values) {
            assert_eq!(row.value, value);
            let result = row.result.as_ref().unwrap();
            assert!((result.mandate.outcome.lives_saved - 900.0 * value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sweep_records_invalid_rows_and_continues() {
        let rows = sweep(
            &ModelParameters::default(),
            ParameterField::MandateAdoptionRate,
            &[0.7, 1.2, 0.9],
        );
        assert!(rows[0].result.is_ok());
        let err = rows[1].result.as_ref().unwrap_err();
        assert_eq!(err.field(), Some("mandate_adoption_rate"));
        assert_eq!(rows[2].decision(), Some(Policy::Mandate));
    }

    #[test]
    fn test_sweep_empty_values() {
        let rows = sweep(
            &ModelParameters::default(),
            ParameterField::FreedomValue,
            &[],
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn test_grid_sweep_row_major() {
        let rows = grid_sweep(
            &ModelParameters::default(),
            ParameterField::EnforcementCost,
            &[50e6, 100e6],
            ParameterField::MandateAdoptionRate,
            &[0.7, 0.8, 0.9],
        );
        let coords: Vec<(f64, f64)> = rows.iter().map(|r| (r.value_a, r.value_b)).collect();
        assert_eq!(
            coords,
            vec![
                (50e6, 0.7),
                (50e6, 0.8),
                (50e6, 0.9),
                (100e6, 0.7),
                (100e6, 0.8),
                (100e6, 0.9),
            ]
        );
    }

    #[test]
    fn test_grid_sweep_applies_both_overrides() {
        let rows = grid_sweep(
            &ModelParameters::default(),
            ParameterField::FreedomValue,
            &[100e6],
            ParameterField::VaccineEfficacy,
            &[0.7],
        );
        let result = rows[0].result.as_ref().unwrap();
        assert_eq!(result.mandate.utility.freedom_utility, -100e6);
        assert!((result.mandate.outcome.lives_saved - 630.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_sweep_same_field_twice() {
        let rows = grid_sweep(
            &ModelParameters::default(),
            ParameterField::VaccineEfficacy,
            &[0.5, 0.9],
            ParameterField::VaccineEfficacy,
            &[0.7],
        );
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(
                row.result,
                Err(ParameterError::DuplicateField("vaccine_efficacy"))
            );
            assert_eq!(row.decision(), None);
        }
    }

    #[test]
    fn test_decision_changes() {
        let analysis = OneWayAnalysis::run(
            &ModelParameters::default(),
            &SweepParameter::linspace(ParameterField::MandateAdoptionRate, 0.65, 0.95, 5),
        );
        assert_eq!(analysis.failed_count(), 0);
        let changes = analysis.decision_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].1, Policy::Mandate);
        assert!((changes[0].0 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_decision_grid_with_failed_cell() {
        let a = SweepParameter::list(ParameterField::FreedomValue, [100e6, -1.0]);
        let b = SweepParameter::list(ParameterField::VaccineEfficacy, [0.7, 0.9]);
        let analysis = TwoWayAnalysis::run(&ModelParameters::default(), &a, &b);
        let grid = analysis.decision_grid().unwrap();
        assert_eq!(grid.shape(), &[2, 2]);
        assert!(grid.get(&[0, 0]).unwrap().is_some());
        assert_eq!(grid.row(1), Some(&[None, None][..]));
    }
}
