//! Mandate vs. voluntary comparison
//!
//! Evaluates both policies against one parameter set and recommends the one
//! with higher final utility.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{ModelParameters, Outcome, Policy, TIE_BREAK_POLICY, UtilityResult};

/// Death outcome and utility breakdown for one policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyEvaluation {
    pub policy: Policy,
    pub adoption_rate: f64,
    pub outcome: Outcome,
    pub utility: UtilityResult,
}

impl PolicyEvaluation {
    /// Run the death model and utility model for a single policy
    pub fn compute(params: &ModelParameters, policy: Policy) -> Result<Self> {
        let adoption_rate = params.adoption_rate(policy);
        let outcome = Outcome::compute(
            params.baseline_deaths,
            adoption_rate,
            params.vaccine_efficacy,
        )?;
        let utility = UtilityResult::compute(outcome.lives_saved, params, policy);
        Ok(Self {
            policy,
            adoption_rate,
            outcome,
            utility,
        })
    }
}

/// Result of comparing both policies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub mandate_utility: f64,
    pub voluntary_utility: f64,
    /// `mandate_utility - voluntary_utility`
    pub difference: f64,
    /// Difference of the untransformed utilities. The risk transform is
    /// strictly increasing, so this carries the same ordering and stays
    /// finite when large exponents overflow the final utilities.
    pub raw_difference: f64,
    pub recommended_action: Policy,
    pub mandate: PolicyEvaluation,
    pub voluntary: PolicyEvaluation,
}

impl ComparisonResult {
    /// True when the utilities were exactly equal and the tie-break decided
    pub fn is_tie(&self) -> bool {
        self.raw_difference == 0.0
    }

    /// True when the risk transform pushed a final utility past the range of
    /// `f64`. The recommendation is still valid but `difference` is not.
    pub fn overflowed(&self) -> bool {
        !(self.mandate_utility.is_finite() && self.voluntary_utility.is_finite())
    }
}

/// Pick the recommended policy from a utility difference.
///
/// [`evaluate`] passes the untransformed difference, which orders the two
/// policies the same way as the final utilities.
///
/// Positive favours the mandate, negative favours voluntary adoption, and an
/// exact tie resolves to [`TIE_BREAK_POLICY`].
pub fn decide(difference: f64) -> Policy {
    if difference > 0.0 {
        Policy::Mandate
    } else if difference < 0.0 {
        Policy::Voluntary
    } else {
        TIE_BREAK_POLICY
    }
}

/// Evaluate both policies and recommend one.
///
/// Parameters are validated up front so an invalid value is reported by field
/// name rather than surfacing as a NaN deep in the calculation.
pub fn evaluate(params: &ModelParameters) -> Result<ComparisonResult> {
    params.validate()?;

    let mandate = PolicyEvaluation::compute(params, Policy::Mandate)?;
    let voluntary = PolicyEvaluation::compute(params, Policy::Voluntary)?;

    let mandate_utility = mandate.utility.final_utility;
    let voluntary_utility = voluntary.utility.final_utility;
    let raw_difference = mandate.utility.raw_utility - voluntary.utility.raw_utility;

    let result = ComparisonResult {
        mandate_utility,
        voluntary_utility,
        difference: mandate_utility - voluntary_utility,
        raw_difference,
        recommended_action: decide(raw_difference),
        mandate,
        voluntary,
    };

    if result.overflowed() {
        tracing::warn!(
            risk_aversion = params.risk_aversion,
            mandate_utility,
            voluntary_utility,
            "Final utility overflowed, deciding on untransformed utilities"
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterField;

    #[test]
    fn test_decide() {
        assert_eq!(decide(1.0), Policy::Mandate);
        assert_eq!(decide(-1.0), Policy::Voluntary);
        assert_eq!(decide(0.0), TIE_BREAK_POLICY);
        assert_eq!(decide(-0.0), TIE_BREAK_POLICY);
    }

    #[test]
    fn test_zero_efficacy_favours_voluntary() {
        // No lives are saved, so the mandate only carries its costs
        let params = ModelParameters::default().with(ParameterField::VaccineEfficacy, 0.0);
        let result = evaluate(&params).unwrap();
        assert!(result.voluntary_utility.abs() < 1.0);
        assert!((result.mandate_utility + 550_000_000.0).abs() < 1.0);
        assert_eq!(result.recommended_action, Policy::Voluntary);
        assert!(!result.is_tie());
    }

    #[test]
    fn test_evaluate_rejects_invalid_parameters() {
        let params = ModelParameters::default().with(ParameterField::VoluntaryAdoptionRate, 1.5);
        let err = evaluate(&params).unwrap_err();
        assert_eq!(err.field(), Some("voluntary_adoption_rate"));
    }

    #[test]
    fn test_extreme_risk_aversion_keeps_decision() {
        let params = ModelParameters::default().with(ParameterField::RiskAversion, 40.0);
        let result = evaluate(&params).unwrap();

        assert!(result.overflowed());
        assert_eq!(result.mandate_utility, f64::INFINITY);
        assert!(result.raw_difference.is_finite());
        assert_eq!(result.recommended_action, Policy::Mandate);
        assert!(!result.is_tie());
    }

    #[test]
    fn test_moderate_risk_aversion_matches_final_difference() {
        let params = ModelParameters::default().with(ParameterField::RiskAversion, 2.0);
        let result = evaluate(&params).unwrap();

        assert!(!result.overflowed());
        assert!(result.difference > 0.0);
        assert_eq!(decide(result.difference), result.recommended_action);
    }

    #[test]
    fn test_breakdown_is_exposed() {
        let result = evaluate(&ModelParameters::default()).unwrap();
        assert_eq!(result.mandate.adoption_rate, 0.9);
        assert_eq!(result.voluntary.adoption_rate, 0.6);
        assert!((result.mandate.outcome.lives_saved - 810.0).abs() < 1e-9);
        assert!((result.voluntary.outcome.lives_saved - 540.0).abs() < 1e-9);
        assert_eq!(result.mandate_utility, result.mandate.utility.final_utility);
    }
}
