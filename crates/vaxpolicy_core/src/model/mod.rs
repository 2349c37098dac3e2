mod outcome;
mod parameters;
mod policy;
mod utility;

pub use outcome::Outcome;
pub use parameters::{FieldKind, ModelParameters, ParameterField};
pub use policy::{Policy, TIE_BREAK_POLICY};
pub use utility::{UtilityResult, risk_transform};
