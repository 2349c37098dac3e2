//! Property tests over the valid parameter space
//!
//! These tests verify that:
//! - Death counts are non-negative and never exceed the baseline
//! - Lives saved grow with adoption rate and with efficacy
//! - The risk transform never flips the sign of a utility
//! - Evaluation and sweeps are deterministic and order-preserving

use proptest::prelude::*;

use crate::analysis::sweep;
use crate::compare::{decide, evaluate};
use crate::model::{
    ModelParameters, Outcome, ParameterField, Policy, UtilityResult, risk_transform,
};

fn unit() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

fn params_strategy() -> impl Strategy<Value = ModelParameters> {
    let deaths_and_rates = (1.0..1_000_000.0f64, unit(), unit(), unit());
    // Risk aversion reaches past the point where final utilities overflow
    let values = (1.0..1e8f64, 0.01..=1.0f64, 1.0..1e10f64, 1.0..1e10f64, 0.1..60.0f64);
    (deaths_and_rates, values).prop_map(|(d, v)| ModelParameters {
        baseline_deaths: d.0,
        vaccine_efficacy: d.1,
        voluntary_adoption_rate: d.2,
        mandate_adoption_rate: d.3,
        value_of_life: v.0,
        diminishing_factor: v.1,
        freedom_value: v.2,
        enforcement_cost: v.3,
        risk_aversion: v.4,
    })
}

proptest! {
    /// Property: deaths are bounded by zero and the no-vaccination baseline.
    #[test]
    fn deaths_are_bounded(baseline in 1.0..1e7f64, rate in unit(), efficacy in unit()) {
        let outcome = Outcome::compute(baseline, rate, efficacy).unwrap();
        let slack = baseline * 1e-12;

        prop_assert!(outcome.deaths_vaccinated >= 0.0);
        prop_assert!(outcome.deaths_unvaccinated >= 0.0);
        prop_assert!(outcome.total_deaths >= 0.0);
        prop_assert!(outcome.total_deaths <= baseline + slack);
        prop_assert!(outcome.lives_saved >= 0.0);
    }

    /// Property: more adoption never saves fewer lives.
    #[test]
    fn lives_saved_monotonic_in_adoption(
        baseline in 1.0..1e7f64,
        a in unit(),
        b in unit(),
        efficacy in unit(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let saved_low = Outcome::compute(baseline, low, efficacy).unwrap().lives_saved;
        let saved_high = Outcome::compute(baseline, high, efficacy).unwrap().lives_saved;
        prop_assert!(saved_high >= saved_low);
    }

    /// Property: a better vaccine never saves fewer lives.
    #[test]
    fn lives_saved_monotonic_in_efficacy(
        baseline in 1.0..1e7f64,
        rate in unit(),
        a in unit(),
        b in unit(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let saved_low = Outcome::compute(baseline, rate, low).unwrap().lives_saved;
        let saved_high = Outcome::compute(baseline, rate, high).unwrap().lives_saved;
        prop_assert!(saved_high >= saved_low);
    }

    /// Property: zero efficacy saves nobody regardless of adoption.
    #[test]
    fn useless_vaccine_saves_nobody(baseline in 1.0..1e7f64, rate in unit()) {
        let outcome = Outcome::compute(baseline, rate, 0.0).unwrap();
        prop_assert_eq!(outcome.lives_saved, 0.0);
    }

    /// Property: valid parameters never trip the negative-lives clamp.
    #[test]
    fn valid_parameters_never_clamp(params in params_strategy()) {
        let result = evaluate(&params).unwrap();
        prop_assert!(!result.mandate.utility.lives_clamped);
        prop_assert!(!result.voluntary.utility.lives_clamped);
    }

    /// Property: the risk transform preserves sign for any positive exponent.
    #[test]
    fn risk_transform_preserves_sign(raw in -1e12..1e12f64, r in 0.01..5.0f64) {
        let transformed = risk_transform(raw, r);
        if raw > 0.0 {
            prop_assert!(transformed > 0.0);
        } else if raw < 0.0 {
            prop_assert!(transformed < 0.0);
        } else {
            prop_assert_eq!(transformed, 0.0);
        }
    }

    /// Property: final utility has the sign of raw utility for both policies.
    #[test]
    fn final_utility_sign_matches_raw(params in params_strategy()) {
        for policy in [Policy::Mandate, Policy::Voluntary] {
            let lives = Outcome::compute(
                params.baseline_deaths,
                params.adoption_rate(policy),
                params.vaccine_efficacy,
            )
            .unwrap()
            .lives_saved;
            let utility = UtilityResult::compute(lives, &params, policy);
            prop_assert!(!utility.final_utility.is_nan());
            // Large exponents may underflow tiny magnitudes to zero
            if utility.final_utility != 0.0 {
                prop_assert_eq!(
                    utility.final_utility > 0.0,
                    utility.raw_utility > 0.0,
                    "raw={} final={}",
                    utility.raw_utility,
                    utility.final_utility
                );
            }
        }
    }

    /// Property: evaluating the same parameters twice gives identical results.
    #[test]
    fn evaluate_is_idempotent(params in params_strategy()) {
        // Compared through Debug since an overflowed difference is NaN
        let first = evaluate(&params).unwrap();
        let second = evaluate(&params).unwrap();
        prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    /// Property: the recommendation follows the untransformed difference,
    /// and agrees with the final difference whenever that is finite and nonzero.
    #[test]
    fn decision_follows_difference(params in params_strategy()) {
        let result = evaluate(&params).unwrap();
        if result.raw_difference > 0.0 {
            prop_assert_eq!(result.recommended_action, Policy::Mandate);
        } else {
            prop_assert_eq!(result.recommended_action, Policy::Voluntary);
        }
        if result.difference.is_finite() && result.difference != 0.0 {
            prop_assert_eq!(decide(result.difference), result.recommended_action);
        }
    }

    /// Property: the i-th sweep row carries the i-th input value.
    #[test]
    fn sweep_preserves_order(values in proptest::collection::vec(unit(), 0..20)) {
        let rows = sweep(&ModelParameters::default(), ParameterField::VaccineEfficacy, &values);
        prop_assert_eq!(rows.len(), values.len());
        for (row, value) in rows.iter().zip(&values) {
            prop_assert_eq!(row.value, *value);
            prop_assert!(row.result.is_ok());
        }
    }
}

#[test]
fn test_perfect_vaccine_full_adoption() {
    let outcome = Outcome::compute(1_000.0, 1.0, 1.0).unwrap();
    assert_eq!(outcome.total_deaths, 0.0);
    assert_eq!(outcome.lives_saved, 1_000.0);
}
