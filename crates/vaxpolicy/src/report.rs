//! Summary report: baseline decision plus the sensitivity tables
//!
//! [`ReportConfig`] lists which sweeps to run, [`Report::build`] runs them and
//! the `render_*` functions turn the results into plain-text tables.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use vaxpolicy_core::analysis::{
    BreakEven, BreakEvenConfig, OneWayAnalysis, SweepParameter, TwoWayAnalysis, find_break_even,
};
use vaxpolicy_core::model::{FieldKind, ParameterField};
use vaxpolicy_core::{ComparisonResult, ModelParameters, evaluate};

use crate::util::format::{
    format_compact_currency, format_currency, format_decision, format_field_value,
    format_row_error,
};

/// A two-parameter table: `rows` values down the side, `columns` across
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: SweepParameter,
    pub columns: SweepParameter,
}

/// A break-even search over one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenSpec {
    pub field: ParameterField,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub search: BreakEvenConfig,
}

/// Which analyses the report runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub one_way: Vec<SweepParameter>,
    pub two_way: Vec<GridSpec>,
    pub break_even: Vec<BreakEvenSpec>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            one_way: vec![
                SweepParameter::linspace(ParameterField::VaccineEfficacy, 0.5, 0.95, 6),
                SweepParameter::list(
                    ParameterField::FreedomValue,
                    [100e6, 200e6, 300e6, 400e6, 500e6],
                ),
                SweepParameter::linspace(ParameterField::MandateAdoptionRate, 0.65, 0.95, 5),
            ],
            two_way: vec![
                GridSpec {
                    rows: SweepParameter::list(
                        ParameterField::FreedomValue,
                        [100e6, 200e6, 300e6, 400e6],
                    ),
                    columns: SweepParameter::list(
                        ParameterField::VaccineEfficacy,
                        [0.7, 0.8, 0.9, 0.95],
                    ),
                },
                GridSpec {
                    rows: SweepParameter::list(
                        ParameterField::EnforcementCost,
                        [50e6, 100e6, 150e6, 200e6],
                    ),
                    columns: SweepParameter::list(
                        ParameterField::MandateAdoptionRate,
                        [0.7, 0.8, 0.9, 0.95],
                    ),
                },
            ],
            break_even: vec![BreakEvenSpec {
                field: ParameterField::MandateAdoptionRate,
                min: 0.6,
                max: 1.0,
                search: BreakEvenConfig::default(),
            }],
        }
    }
}

/// Outcome of one break-even search; a failed search keeps its message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakEvenEntry {
    pub field: ParameterField,
    pub min: f64,
    pub max: f64,
    pub result: Result<BreakEven, String>,
}

/// Everything the `report` command prints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub scenario: Option<String>,
    pub parameters: ModelParameters,
    pub baseline: ComparisonResult,
    pub one_way: Vec<OneWayAnalysis>,
    pub two_way: Vec<TwoWayAnalysis>,
    pub break_even: Vec<BreakEvenEntry>,
}

impl Report {
    /// Evaluate the baseline and run every configured analysis.
    ///
    /// Only an invalid baseline is an error. Sweep rows and break-even
    /// searches that fail are recorded in the report.
    pub fn build(
        scenario: Option<String>,
        params: &ModelParameters,
        config: &ReportConfig,
    ) -> color_eyre::Result<Self> {
        let baseline = evaluate(params)?;
        tracing::info!(
            decision = %baseline.recommended_action,
            difference = baseline.difference,
            "Baseline evaluated"
        );

        let one_way = config
            .one_way
            .iter()
            .map(|p| OneWayAnalysis::run(params, p))
            .collect();

        let two_way = config
            .two_way
            .iter()
            .map(|g| TwoWayAnalysis::run(params, &g.rows, &g.columns))
            .collect();

        let break_even = config
            .break_even
            .iter()
            .map(|spec| {
                let result =
                    find_break_even(params, spec.field, spec.min, spec.max, &spec.search)
                        .map_err(|e| e.to_string());
                if let Err(e) = &result {
                    tracing::warn!(field = %spec.field, error = %e, "Break-even search failed");
                }
                BreakEvenEntry {
                    field: spec.field,
                    min: spec.min,
                    max: spec.max,
                    result,
                }
            })
            .collect();

        Ok(Self {
            scenario,
            parameters: *params,
            baseline,
            one_way,
            two_way,
            break_even,
        })
    }
}

// ============================================================================
// Text rendering
// ============================================================================

/// Lay out rows as left-aligned columns separated by two spaces
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    };
    push_line(headers);
    for row in rows {
        push_line(row.as_slice());
    }
    out
}

fn axis_label(field: ParameterField, value: f64) -> String {
    match field.kind() {
        FieldKind::Currency => format_compact_currency(value),
        _ => format_field_value(field, value),
    }
}

/// Parameter listing, one `name: value` line per field
pub fn render_parameters(params: &ModelParameters) -> String {
    let mut out = String::new();
    for field in ParameterField::ALL {
        let _ = writeln!(
            out,
            "{}: {}",
            field.name(),
            format_field_value(field, field.get(params))
        );
    }
    out
}

/// Decision summary for a single evaluation
pub fn render_comparison(result: &ComparisonResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Policy recommendation: {}", result.recommended_action);
    let _ = writeln!(
        out,
        "Utility with mandate: {}",
        format_currency(result.mandate_utility)
    );
    let _ = writeln!(
        out,
        "Utility without mandate: {}",
        format_currency(result.voluntary_utility)
    );
    let _ = writeln!(
        out,
        "Utility difference: {}",
        format_currency(result.difference)
    );
    if result.is_tie() {
        let _ = writeln!(out, "(exact tie, resolved to {})", result.recommended_action);
    }
    if result.overflowed() {
        let _ = writeln!(
            out,
            "warning: utilities overflow at this risk aversion, decided on untransformed difference {}",
            format_currency(result.raw_difference)
        );
    }
    for evaluation in [&result.mandate, &result.voluntary] {
        if evaluation.utility.lives_clamped {
            let _ = writeln!(
                out,
                "warning: negative lives saved under {} treated as zero",
                evaluation.policy
            );
        }
    }
    out
}

pub fn render_one_way(analysis: &OneWayAnalysis) -> String {
    let headers = [
        "Parameter Value".to_string(),
        "Decision".to_string(),
        "Utility Difference".to_string(),
    ];
    let rows: Vec<Vec<String>> = analysis
        .rows
        .iter()
        .map(|row| {
            let value = format_field_value(analysis.field, row.value);
            match &row.result {
                Ok(result) => vec![
                    value,
                    result.recommended_action.to_string(),
                    format_currency(result.difference),
                ],
                Err(e) => vec![value, format_decision(None), format_row_error(e)],
            }
        })
        .collect();

    let mut out = format!("=== Sensitivity to {} ===\n", analysis.field.label());
    out.push_str(&render_table(&headers, &rows));
    out
}

/// Pivot table of recommendations: `field_a` down the side, `field_b` across
pub fn render_two_way(analysis: &TwoWayAnalysis) -> String {
    let mut out = format!(
        "=== Two-way Analysis: {} vs. {} ===\n",
        analysis.field_a.label(),
        analysis.field_b.label()
    );

    let Some(grid) = analysis.decision_grid() else {
        let _ = writeln!(out, "(empty grid)");
        return out;
    };

    let mut headers = vec![String::new()];
    headers.extend(
        analysis
            .values_b
            .iter()
            .map(|&v| axis_label(analysis.field_b, v)),
    );

    let rows: Vec<Vec<String>> = analysis
        .values_a
        .iter()
        .enumerate()
        .map(|(i, &value_a)| {
            let mut row = vec![axis_label(analysis.field_a, value_a)];
            if let Some(cells) = grid.row(i) {
                row.extend(cells.iter().map(|d| format_decision(*d)));
            }
            row
        })
        .collect();

    out.push_str(&render_table(&headers, &rows));
    out
}

pub fn render_break_even(entry: &BreakEvenEntry) -> String {
    let mut out = format!("=== Break-even: {} ===\n", entry.field.label());
    match &entry.result {
        Ok(found) => {
            let _ = writeln!(
                out,
                "{} below {}, {} above",
                found.below,
                format_field_value(entry.field, found.value),
                found.above
            );
            let _ = writeln!(
                out,
                "value: {} ({} iterations{})",
                found.value,
                found.iterations,
                if found.converged { "" } else { ", not converged" }
            );
        }
        Err(e) => {
            let _ = writeln!(out, "error: {e}");
        }
    }
    out
}

/// Render the full report as text
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    if let Some(name) = &report.scenario {
        let _ = writeln!(out, "Scenario: {name}\n");
    }

    out.push_str("=== Baseline Decision ===\n\nParameters:\n");
    out.push_str(&render_parameters(&report.parameters));
    out.push_str("\nDecision Results:\n");
    out.push_str(&render_comparison(&report.baseline));

    for analysis in &report.one_way {
        out.push('\n');
        out.push_str(&render_one_way(analysis));
    }
    for analysis in &report.two_way {
        out.push('\n');
        out.push_str(&render_two_way(analysis));
    }
    for entry in &report.break_even {
        out.push('\n');
        out.push_str(&render_break_even(entry));
    }
    out
}
