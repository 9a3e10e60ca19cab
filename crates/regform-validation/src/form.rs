//! Registration form orchestration
//!
//! Live input runs one field's validator at a time; submission runs all of
//! them in [`Field::SUBMIT_ORDER`] and stops at the first failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{FieldConfig, FormConfig};
use crate::constraints::{FieldConstraints, InputKind};
use crate::country::{Country, CountryRegistry};
use crate::error::Error;
use crate::field::FieldState;
use crate::validators::{
    validate_confirm_password, validate_country, validate_email, validate_password,
    validate_postal_code, ValidationResult,
};

/// Shown once every field passes on submit
pub const SUBMIT_SUCCESS_MESSAGE: &str = "🙌 High Five! Great job! 🙌";

/// The five registration form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Email,
    Country,
    PostalCode,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Order in which fields are checked on submit
    pub const SUBMIT_ORDER: [Field; 5] = [
        Field::Email,
        Field::Country,
        Field::PostalCode,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Id of the form control
    pub fn id(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Country => "country",
            Field::PostalCode => "postal-code",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm-password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The first failing field of a submission
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Snapshots of all five fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub email: FieldState,
    pub country: FieldState,
    pub postal_code: FieldState,
    pub password: FieldState,
    pub confirm_password: FieldState,
}

impl RegistrationForm {
    pub fn state(&self, field: Field) -> &FieldState {
        match field {
            Field::Email => &self.email,
            Field::Country => &self.country,
            Field::PostalCode => &self.postal_code,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Runs the validator of a single field, as on live input
    ///
    /// Dependent fields are not re-checked: editing the country does not
    /// re-validate the postal code.
    pub fn validate_field(&self, field: Field, registry: &CountryRegistry) -> ValidationResult {
        match field {
            Field::Email => validate_email(&self.email),
            Field::Country => validate_country(&self.country, registry),
            Field::PostalCode => validate_postal_code(&self.postal_code, &self.country, registry),
            Field::Password => validate_password(&self.password),
            Field::ConfirmPassword => validate_confirm_password(&self.confirm_password, &self.password),
        }
    }

    /// Validates every field in submit order, stopping at the first failure
    pub fn submit(&self, registry: &CountryRegistry) -> Result<(), FieldError> {
        for field in Field::SUBMIT_ORDER {
            if let Err(message) = self.validate_field(field, registry) {
                tracing::debug!(field = field.id(), %message, "submission blocked");
                return Err(FieldError { field, message });
            }
        }

        tracing::debug!("all registration fields valid");
        Ok(())
    }

    /// Every failing field, in submit order
    pub fn errors(&self, registry: &CountryRegistry) -> Vec<FieldError> {
        Field::SUBMIT_ORDER
            .into_iter()
            .filter_map(|field| {
                self.validate_field(field, registry)
                    .err()
                    .map(|message| FieldError { field, message })
            })
            .collect()
    }
}

/// Raw values as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub email: String,
    pub country: String,
    pub postal_code: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormInput {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Country => &self.country,
            Field::PostalCode => &self.postal_code,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }
}

/// Country registry plus the constraint attributes of every field
#[derive(Debug, Clone)]
pub struct FormSchema {
    registry: CountryRegistry,
    email: FieldConstraints,
    country: FieldConstraints,
    postal_code: FieldConstraints,
    password: FieldConstraints,
    confirm_password: FieldConstraints,
}

impl FormSchema {
    pub fn from_config(config: &FormConfig) -> Result<Self, Error> {
        let countries = config
            .countries
            .iter()
            .map(|entry| Country::new(entry.name.as_str(), &entry.template))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            registry: CountryRegistry::new(countries)?,
            email: constraints_for(Field::Email, InputKind::Email, &config.email)?,
            country: constraints_for(Field::Country, InputKind::Text, &config.country)?,
            postal_code: constraints_for(Field::PostalCode, InputKind::Text, &config.postal_code)?,
            password: constraints_for(Field::Password, InputKind::Password, &config.password)?,
            confirm_password: constraints_for(
                Field::ConfirmPassword,
                InputKind::Password,
                &config.confirm_password,
            )?,
        })
    }

    pub fn registry(&self) -> &CountryRegistry {
        &self.registry
    }

    pub fn constraints(&self, field: Field) -> &FieldConstraints {
        match field {
            Field::Email => &self.email,
            Field::Country => &self.country,
            Field::PostalCode => &self.postal_code,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Evaluates the built-in constraints of every field
    pub fn snapshot(&self, input: &FormInput) -> RegistrationForm {
        RegistrationForm {
            email: self.email.evaluate(&input.email),
            country: self.country.evaluate(&input.country),
            postal_code: self.postal_code.evaluate(&input.postal_code),
            password: self.password.evaluate(&input.password),
            confirm_password: self.confirm_password.evaluate(&input.confirm_password),
        }
    }

    pub fn validate_field(&self, input: &FormInput, field: Field) -> ValidationResult {
        self.snapshot(input).validate_field(field, &self.registry)
    }

    pub fn submit(&self, input: &FormInput) -> Result<(), FieldError> {
        self.snapshot(input).submit(&self.registry)
    }

    pub fn errors(&self, input: &FormInput) -> Vec<FieldError> {
        self.snapshot(input).errors(&self.registry)
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        // The default config only holds seed countries and literal patterns
        Self::from_config(&FormConfig::default()).expect("default form config is valid")
    }
}

fn constraints_for(field: Field, kind: InputKind, config: &FieldConfig) -> Result<FieldConstraints, Error> {
    let mut constraints = FieldConstraints::new(kind).with_required(config.required);
    if let Some(min_length) = config.min_length {
        constraints = constraints.with_min_length(min_length);
    }
    if let Some(pattern) = &config.pattern {
        constraints = constraints
            .with_pattern(pattern)
            .map_err(|source| Error::InvalidPattern { field, source })?;
    }
    if let Some(title) = &config.title {
        constraints = constraints.with_title(title.as_str());
    }
    Ok(constraints)
}
