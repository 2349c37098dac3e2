use serde::{Deserialize, Serialize};

use crate::error::{Constraint, ParameterError, Result};

use super::ParameterField;

/// Expected deaths for one adoption rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Deaths among vaccinated individuals (risk reduced by efficacy)
    pub deaths_vaccinated: f64,
    /// Deaths among unvaccinated individuals (no reduction)
    pub deaths_unvaccinated: f64,
    pub total_deaths: f64,
    /// Deaths avoided relative to the fully unvaccinated baseline
    pub lives_saved: f64,
}

impl Outcome {
    /// Compute expected deaths for a population where `adoption_rate` of
    /// people are vaccinated.
    ///
    /// Rejects rates or efficacies outside [0, 1] since the results would be
    /// physically meaningless (negative deaths, more lives saved than lost).
    pub fn compute(
        baseline_deaths: f64,
        adoption_rate: f64,
        vaccine_efficacy: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&adoption_rate) {
            return Err(ParameterError::OutOfRange {
                field: "adoption_rate",
                value: adoption_rate,
                constraint: Constraint::UnitInterval,
            });
        }
        ParameterField::VaccineEfficacy.check(vaccine_efficacy)?;
        ParameterField::BaselineDeaths.check(baseline_deaths)?;

        let deaths_vaccinated = baseline_deaths * adoption_rate * (1.0 - vaccine_efficacy);
        let deaths_unvaccinated = baseline_deaths * (1.0 - adoption_rate);
        let total_deaths = deaths_vaccinated + deaths_unvaccinated;

        // Equal to `baseline_deaths - total_deaths`, but the subtraction can
        // round below zero when nothing is saved
        let lives_saved = baseline_deaths * adoption_rate * vaccine_efficacy;

        Ok(Self {
            deaths_vaccinated,
            deaths_unvaccinated,
            total_deaths,
            lives_saved,
        })
    }
}
