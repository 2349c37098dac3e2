//! Scenario files and command-line parameter overrides
//!
//! A scenario is a YAML document with an optional name, any subset of the
//! model parameters, and an optional report section:
//!
//! ```yaml
//! name: cheap enforcement
//! parameters:
//!   enforcement_cost: 50000000
//!   mandate_adoption: 0.85
//! ```
//!
//! Missing parameters take their baseline values.

use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};
use vaxpolicy_core::analysis::{SweepParameter, SweepValues};
use vaxpolicy_core::{ModelParameters, ParameterField};

use crate::report::ReportConfig;

/// Largest number of points a single linspace sweep may request
pub const MAX_SWEEP_STEPS: usize = 100_000;

fn check_steps(field: ParameterField, values: &SweepValues) -> Result<(), String> {
    match values {
        SweepValues::Linspace { steps, .. } if *steps > MAX_SWEEP_STEPS => Err(format!(
            "sweep over {field} asks for {steps} steps (at most {MAX_SWEEP_STEPS} allowed)"
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub name: Option<String>,
    pub parameters: ModelParameters,
    pub report: ReportConfig,
}

impl ScenarioFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Read and parse a scenario file. The parameters are not validated here.
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario = Self::from_yaml(&content)
            .wrap_err_with(|| format!("Failed to parse scenario file {}", path.display()))?;
        scenario
            .check_sweep_sizes()
            .map_err(|e| eyre!("Invalid scenario file {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), name = ?scenario.name, "Loaded scenario");
        Ok(scenario)
    }

    /// Reject report sweeps too large to evaluate
    pub fn check_sweep_sizes(&self) -> Result<(), String> {
        let report = &self.report;
        let grids = report.two_way.iter().flat_map(|g| [&g.rows, &g.columns]);
        for sweep in report.one_way.iter().chain(grids) {
            check_steps(sweep.field, &sweep.values)?;
        }
        Ok(())
    }

    /// Load `path` if given, otherwise start from the baseline scenario
    pub fn load_or_default(path: Option<&Path>) -> color_eyre::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> color_eyre::Result<()> {
        let yaml = self
            .to_yaml()
            .map_err(|e| eyre!("Failed to serialize scenario: {e}"))?;
        std::fs::write(path, yaml)
            .wrap_err_with(|| format!("Failed to write scenario file {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote scenario");
        Ok(())
    }
}

/// Parse a `field=value` override as given to `--set`
pub fn parse_override(s: &str) -> Result<(ParameterField, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field: ParameterField = name.parse().map_err(|e| format!("{e}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}' for {field}", value.trim()))?;
    Ok((field, value))
}

/// Parse a sweep definition as given on the command line.
///
/// `field=a,b,c` sweeps an explicit list; `field=min:max:steps` sweeps
/// `steps` evenly spaced values from `min` to `max` inclusive.
pub fn parse_sweep(s: &str) -> Result<SweepParameter, String> {
    let (name, spec) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUES, got '{s}'"))?;
    let field: ParameterField = name.parse().map_err(|e| format!("{e}"))?;
    let number = |part: &str| -> Result<f64, String> {
        part.trim()
            .parse()
            .map_err(|_| format!("invalid number '{}' for {field}", part.trim()))
    };

    let values = if spec.contains(':') {
        let parts: Vec<&str> = spec.split(':').collect();
        let &[min, max, steps] = parts.as_slice() else {
            return Err(format!("expected MIN:MAX:STEPS, got '{spec}'"));
        };
        let steps: usize = steps
            .trim()
            .parse()
            .map_err(|_| format!("invalid step count '{}'", steps.trim()))?;
        let values = SweepValues::linspace(number(min)?, number(max)?, steps);
        check_steps(field, &values)?;
        values
    } else {
        let values = spec.split(',').map(number).collect::<Result<Vec<_>, _>>()?;
        SweepValues::list(values)
    };

    if values.is_empty() {
        return Err(format!("sweep over {field} has no values"));
    }
    Ok(SweepParameter::new(field, values))
}

/// Apply overrides in order, rejecting any value outside its field's domain
pub fn apply_overrides(
    mut params: ModelParameters,
    overrides: &[(ParameterField, f64)],
) -> color_eyre::Result<ModelParameters> {
    for &(field, value) in overrides {
        params = params
            .try_with(field, value)
            .wrap_err("Invalid --set override")?;
        tracing::debug!(field = %field, value, "Applied override");
    }
    Ok(params)
}
