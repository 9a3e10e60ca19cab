//! Construction-time errors
//!
//! Validation failures are plain messages (see [`crate::ValidationResult`]);
//! this type only covers bad registry data and bad configuration.

use thiserror::Error;

use crate::form::Field;

#[derive(Debug, Error)]
pub enum Error {
    #[error("country name must not be blank")]
    BlankCountryName,

    #[error("country registry must contain at least one country")]
    EmptyRegistry,

    #[error("duplicate country name: {0}")]
    DuplicateCountry(String),

    #[error("invalid pattern for {field} field: {source}")]
    InvalidPattern {
        field: Field,
        #[source]
        source: regex::Error,
    },
}
