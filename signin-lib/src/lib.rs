//! Login form engine
//!
//! Field validation, derived feedback state and submission gating for a
//! sign-in form. Authentication, notifications and navigation are supplied
//! by the host application through the traits in [`auth`], [`notify`] and
//! [`navigation`].

pub mod auth;
pub mod config;
pub mod error;
pub mod form;
pub mod navigation;
pub mod notify;
pub mod validation;

pub use config::LoginFormConfig;
pub use form::{LoginForm, SubmitOutcome};
