//! Model parameters and field addressing
//!
//! `ModelParameters` is the single configuration value passed through every
//! evaluation. `ParameterField` names each field so sweeps can override one
//! value at a time without touching the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Constraint, ParameterError, Result};

/// Scalar inputs to the utility model
///
/// Missing fields fall back to the documented baseline when deserializing,
/// so a scenario file only needs the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Deaths expected with no vaccination at all
    pub baseline_deaths: f64,
    /// Fractional reduction in death risk for vaccinated individuals
    pub vaccine_efficacy: f64,
    /// Share of the population vaccinating without a mandate
    #[serde(alias = "voluntary_adoption")]
    pub voluntary_adoption_rate: f64,
    /// Share of the population vaccinating under a mandate
    #[serde(alias = "mandate_adoption")]
    pub mandate_adoption_rate: f64,
    /// Dollar value per (diminishing-return adjusted) life saved
    pub value_of_life: f64,
    /// Exponent applied to lives saved before valuing them
    pub diminishing_factor: f64,
    /// Societal cost of lost freedom of choice under a mandate
    pub freedom_value: f64,
    /// Cost of executing and policing a mandate
    pub enforcement_cost: f64,
    /// Exponent of the signed-power risk transform (1.0 is risk-neutral)
    pub risk_aversion: f64,
}

impl ModelParameters {
    pub const BASELINE: ModelParameters = ModelParameters {
        baseline_deaths: 1_000.0,
        vaccine_efficacy: 0.9,
        voluntary_adoption_rate: 0.6,
        mandate_adoption_rate: 0.9,
        value_of_life: 10_000_000.0,
        diminishing_factor: 0.9,
        freedom_value: 400_000_000.0,
        enforcement_cost: 150_000_000.0,
        risk_aversion: 1.0,
    };

    /// Check every field against its domain constraint.
    ///
    /// Fields are checked in declaration order and the first violation is
    /// returned, so the error always names a single offending field.
    pub fn validate(&self) -> Result<()> {
        for field in ParameterField::ALL {
            field.check(field.get(self))?;
        }
        Ok(())
    }

    /// Return a copy with one field replaced. The receiver is left untouched.
    #[must_use]
    pub fn with(mut self, field: ParameterField, value: f64) -> Self {
        *field.slot(&mut self) = value;
        self
    }

    /// Like [`ModelParameters::with`], but validates the new value first.
    pub fn try_with(self, field: ParameterField, value: f64) -> Result<Self> {
        field.check(value)?;
        Ok(self.with(field, value))
    }

    pub fn adoption_rate(&self, policy: super::Policy) -> f64 {
        match policy {
            super::Policy::Mandate => self.mandate_adoption_rate,
            super::Policy::Voluntary => self.voluntary_adoption_rate,
        }
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// How a field's value should be read (and displayed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// A fraction in [0, 1]
    Rate,
    /// A dollar amount
    Currency,
    /// A count of people
    Count,
    /// A dimensionless exponent
    Exponent,
}

/// Identifies a single field of [`ModelParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    BaselineDeaths,
    VaccineEfficacy,
    VoluntaryAdoptionRate,
    MandateAdoptionRate,
    ValueOfLife,
    DiminishingFactor,
    FreedomValue,
    EnforcementCost,
    RiskAversion,
}

impl ParameterField {
    pub const ALL: [ParameterField; 9] = [
        ParameterField::BaselineDeaths,
        ParameterField::VaccineEfficacy,
        ParameterField::VoluntaryAdoptionRate,
        ParameterField::MandateAdoptionRate,
        ParameterField::ValueOfLife,
        ParameterField::DiminishingFactor,
        ParameterField::FreedomValue,
        ParameterField::EnforcementCost,
        ParameterField::RiskAversion,
    ];

    /// Canonical snake_case name, matching the serialized field name
    pub fn name(self) -> &'static str {
        match self {
            ParameterField::BaselineDeaths => "baseline_deaths",
            ParameterField::VaccineEfficacy => "vaccine_efficacy",
            ParameterField::VoluntaryAdoptionRate => "voluntary_adoption_rate",
            ParameterField::MandateAdoptionRate => "mandate_adoption_rate",
            ParameterField::ValueOfLife => "value_of_life",
            ParameterField::DiminishingFactor => "diminishing_factor",
            ParameterField::FreedomValue => "freedom_value",
            ParameterField::EnforcementCost => "enforcement_cost",
            ParameterField::RiskAversion => "risk_aversion",
        }
    }

    /// Human-readable label for table headings
    pub fn label(self) -> &'static str {
        match self {
            ParameterField::BaselineDeaths => "Baseline Deaths",
            ParameterField::VaccineEfficacy => "Vaccine Efficacy",
            ParameterField::VoluntaryAdoptionRate => "Voluntary Adoption Rate",
            ParameterField::MandateAdoptionRate => "Mandate Adoption Rate",
            ParameterField::ValueOfLife => "Value of Life",
            ParameterField::DiminishingFactor => "Diminishing Factor",
            ParameterField::FreedomValue => "Freedom Value",
            ParameterField::EnforcementCost => "Enforcement Cost",
            ParameterField::RiskAversion => "Risk Aversion",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ParameterField::VaccineEfficacy
            | ParameterField::VoluntaryAdoptionRate
            | ParameterField::MandateAdoptionRate => FieldKind::Rate,
            ParameterField::ValueOfLife
            | ParameterField::FreedomValue
            | ParameterField::EnforcementCost => FieldKind::Currency,
            ParameterField::BaselineDeaths => FieldKind::Count,
            ParameterField::DiminishingFactor | ParameterField::RiskAversion => {
                FieldKind::Exponent
            }
        }
    }

    pub fn constraint(self) -> Constraint {
        match self {
            ParameterField::VaccineEfficacy
            | ParameterField::VoluntaryAdoptionRate
            | ParameterField::MandateAdoptionRate => Constraint::UnitInterval,
            ParameterField::DiminishingFactor => Constraint::PositiveUnitInterval,
            ParameterField::BaselineDeaths
            | ParameterField::ValueOfLife
            | ParameterField::FreedomValue
            | ParameterField::EnforcementCost
            | ParameterField::RiskAversion => Constraint::Positive,
        }
    }

    /// Validate a candidate value for this field
    pub fn check(self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ParameterError::out_of_range(self, value, Constraint::Finite));
        }
        let constraint = self.constraint();
        let ok = match constraint {
            Constraint::UnitInterval => (0.0..=1.0).contains(&value),
            Constraint::PositiveUnitInterval => value > 0.0 && value <= 1.0,
            Constraint::Positive => value > 0.0,
            Constraint::Finite => true,
        };
        if ok {
            Ok(())
        } else {
            Err(ParameterError::out_of_range(self, value, constraint))
        }
    }

    pub fn get(self, params: &ModelParameters) -> f64 {
        match self {
            ParameterField::BaselineDeaths => params.baseline_deaths,
            ParameterField::VaccineEfficacy => params.vaccine_efficacy,
            ParameterField::VoluntaryAdoptionRate => params.voluntary_adoption_rate,
            ParameterField::MandateAdoptionRate => params.mandate_adoption_rate,
            ParameterField::ValueOfLife => params.value_of_life,
            ParameterField::DiminishingFactor => params.diminishing_factor,
            ParameterField::FreedomValue => params.freedom_value,
            ParameterField::EnforcementCost => params.enforcement_cost,
            ParameterField::RiskAversion => params.risk_aversion,
        }
    }

    fn slot(self, params: &mut ModelParameters) -> &mut f64 {
        match self {
            ParameterField::BaselineDeaths => &mut params.baseline_deaths,
            ParameterField::VaccineEfficacy => &mut params.vaccine_efficacy,
            ParameterField::VoluntaryAdoptionRate => &mut params.voluntary_adoption_rate,
            ParameterField::MandateAdoptionRate => &mut params.mandate_adoption_rate,
            ParameterField::ValueOfLife => &mut params.value_of_life,
            ParameterField::DiminishingFactor => &mut params.diminishing_factor,
            ParameterField::FreedomValue => &mut params.freedom_value,
            ParameterField::EnforcementCost => &mut params.enforcement_cost,
            ParameterField::RiskAversion => &mut params.risk_aversion,
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterField {
    type Err = ParameterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        // Short names kept for scenario files written against the older key set
        match normalized.as_str() {
            "voluntary_adoption" => return Ok(ParameterField::VoluntaryAdoptionRate),
            "mandate_adoption" => return Ok(ParameterField::MandateAdoptionRate),
            _ => {}
        }
        ParameterField::ALL
            .into_iter()
            .find(|field| field.name() == normalized)
            .ok_or_else(|| ParameterError::UnknownField(s.to_string()))
    }
}
