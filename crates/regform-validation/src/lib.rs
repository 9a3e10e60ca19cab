//! regform Validation
//!
//! Pure Rust validation rules for the registration form: email, country,
//! postal code, password and confirm-password.
//! Used by both server-side validation and the WASM client-side bindings.
//!
//! Every validator takes [`FieldState`] snapshots (the value plus the
//! constraint flags the browser, or [`FieldConstraints`], computed for it)
//! and returns `Ok(())` or the message to show next to the field.

pub mod config;
pub mod constraints;
pub mod country;
pub mod error;
pub mod field;
pub mod form;
pub mod template;
pub mod validators;

// Re-export the public surface
pub use config::{CountryConfig, FieldConfig, FormConfig};
pub use constraints::{FieldConstraints, InputKind};
pub use country::{Country, CountryMatch, CountryName, CountryRegistry};
pub use error::Error;
pub use field::FieldState;
pub use form::{Field, FieldError, FormInput, FormSchema, RegistrationForm, SUBMIT_SUCCESS_MESSAGE};
pub use template::{compile_template, PostCodePattern};
pub use validators::*;
