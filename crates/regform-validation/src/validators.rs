//! Field validators
//!
//! Each validator is a pure function of the field snapshots it needs.
//! The first applicable rule wins; `Ok(())` means the field is valid.

use crate::country::CountryRegistry;
use crate::field::FieldState;

/// `Ok(())` when valid, otherwise the message to show for the field
pub type ValidationResult = Result<(), String>;

/// Email field: missing, too short, then not an email address
pub fn validate_email(state: &FieldState) -> ValidationResult {
    if state.is_missing {
        return Err("You need to enter an email address.".to_string());
    }
    if state.is_too_short {
        return Err(format!("Email should be at least {} characters.", state.min_length));
    }
    if state.type_mismatch {
        return Err(format!("{} is not a valid email address.", state.value));
    }
    Ok(())
}

/// Country field: the value must name exactly one registered country
///
/// Partial or ambiguous text is answered with the candidate names so the
/// user can complete it.
pub fn validate_country(state: &FieldState, registry: &CountryRegistry) -> ValidationResult {
    if state.is_missing {
        return Err("You need to enter a country.".to_string());
    }
    match registry.resolve(&state.value).message(&state.value) {
        Some(message) => Err(message),
        None => Ok(()),
    }
}

/// Postal code field, checked against the format of the selected country
pub fn validate_postal_code(
    state: &FieldState,
    country: &FieldState,
    registry: &CountryRegistry,
) -> ValidationResult {
    if state.is_missing {
        return Err("You need to enter a post code.".to_string());
    }
    if validate_country(country, registry).is_err() {
        return Err("You must first enter a valid country.".to_string());
    }

    let Some(found) = registry.resolve(&country.value).exact() else {
        return Err("You must first enter a valid country.".to_string());
    };
    if !found.accepts_post_code(&state.value) {
        return Err(found.post_code_error().to_string());
    }
    Ok(())
}

/// Password field: missing, too short, then the pattern hint
pub fn validate_password(state: &FieldState) -> ValidationResult {
    if state.is_missing {
        return Err("You need to enter a password.".to_string());
    }
    if state.is_too_short {
        return Err(format!("Password should be at least {} characters.", state.min_length));
    }
    if state.pattern_mismatch {
        return Err(state.title.clone());
    }
    Ok(())
}

/// Confirm-password field
///
/// A mismatch is reported before the password's own validity, so the user
/// always learns the two values differ.
pub fn validate_confirm_password(state: &FieldState, password: &FieldState) -> ValidationResult {
    if state.is_missing {
        return Err("You need to confirm your password.".to_string());
    }
    if state.value != password.value {
        return Err("Passwords do not match.".to_string());
    }
    if validate_password(password).is_err() {
        return Err("You must first enter a valid password.".to_string());
    }
    Ok(())
}
