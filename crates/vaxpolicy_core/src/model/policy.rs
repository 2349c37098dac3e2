use std::fmt;

use serde::{Deserialize, Serialize};

/// The two policy actions being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    Mandate,
    Voluntary,
}

/// Recommendation when both policies yield exactly the same utility.
///
/// Voluntary is the lower-intervention action, so it wins ties.
pub const TIE_BREAK_POLICY: Policy = Policy::Voluntary;

impl Policy {
    pub fn is_mandate(self) -> bool {
        matches!(self, Policy::Mandate)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Mandate => write!(f, "Mandate"),
            Policy::Voluntary => write!(f, "Voluntary"),
        }
    }
}
