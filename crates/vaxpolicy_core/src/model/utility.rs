use serde::{Deserialize, Serialize};

use super::{ModelParameters, Policy};

/// Utility breakdown for one policy action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityResult {
    /// Value of lives saved after diminishing returns
    pub life_utility: f64,
    /// Lost freedom of choice (zero without a mandate)
    pub freedom_utility: f64,
    /// Cost of enforcing compliance (zero without a mandate)
    pub enforcement_utility: f64,
    /// Sum of the three components
    pub raw_utility: f64,
    /// `raw_utility` after the risk transform
    pub final_utility: f64,
    /// Set when negative lives saved were clamped to zero
    pub lives_clamped: bool,
}

impl UtilityResult {
    pub fn compute(lives_saved: f64, params: &ModelParameters, policy: Policy) -> Self {
        // A fractional power of a negative base is undefined. Valid parameters
        // never produce negative lives saved, but clamp rather than yield NaN.
        let (effective_lives, lives_clamped) = if lives_saved < 0.0 {
            tracing::warn!(lives_saved, %policy, "negative lives saved clamped to zero");
            (0.0, true)
        } else {
            (lives_saved, false)
        };

        let life_utility = effective_lives.powf(params.diminishing_factor) * params.value_of_life;
        let (freedom_utility, enforcement_utility) = if policy.is_mandate() {
            (-params.freedom_value, -params.enforcement_cost)
        } else {
            (0.0, 0.0)
        };

        let raw_utility = life_utility + freedom_utility + enforcement_utility;

        Self {
            life_utility,
            freedom_utility,
            enforcement_utility,
            raw_utility,
            final_utility: risk_transform(raw_utility, params.risk_aversion),
            lives_clamped,
        }
    }
}

/// Signed-power transform: reshapes magnitude by `risk_aversion` while
/// preserving sign. Values above 1 amplify extremes, below 1 flatten them.
pub fn risk_transform(raw_utility: f64, risk_aversion: f64) -> f64 {
    if raw_utility >= 0.0 {
        raw_utility.powf(risk_aversion)
    } else {
        -(-raw_utility).powf(risk_aversion)
    }
}
