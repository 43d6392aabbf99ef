//! The login form engine and its state.

mod auto_clear;
mod engine;
mod general_error;
mod values;

pub use auto_clear::AutoClear;
pub use engine::{LoginForm, LoginFormBuilder, Missing, Set, SubmitOutcome};
pub use general_error::GeneralError;
pub use values::{FormValues, Touched};
