//! Error types

mod auth;
mod form;
mod schema;
mod submit;

pub use auth::*;
pub use form::*;
pub use schema::*;
pub use submit::*;
