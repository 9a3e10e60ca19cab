//! regform Validation WASM
//!
//! WebAssembly bindings for the registration form validators.
//! The page reads each input's `value` and `validity`, passes them in as
//! plain objects, and shows whatever message comes back.

use regform_validation as core;
use regform_validation::{CountryRegistry, FieldState, RegistrationForm};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Submission outcome returned to JavaScript
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub valid: bool,
    /// Id of the first failing field, if any
    pub field: Option<String>,
    pub message: String,
}

fn field_state(state: JsValue) -> Result<FieldState, JsValue> {
    serde_wasm_bindgen::from_value(state)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse field state: {}", e)))
}

fn registry() -> &'static CountryRegistry {
    CountryRegistry::builtin()
}

/// Validate the email field
///
/// # Example (JavaScript)
/// ```javascript
/// const message = validateEmail({
///     value: email.value,
///     isMissing: email.validity.valueMissing,
///     isTooShort: email.validity.tooShort,
///     typeMismatch: email.validity.typeMismatch,
///     minLength: email.minLength,
/// });
/// email.setCustomValidity(message ?? '');
/// ```
#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email_js(state: JsValue) -> Result<Option<String>, JsValue> {
    Ok(core::validate_email(&field_state(state)?).err())
}

/// Validate the country field against the built-in registry
#[wasm_bindgen(js_name = validateCountry)]
pub fn validate_country_js(state: JsValue) -> Result<Option<String>, JsValue> {
    Ok(core::validate_country(&field_state(state)?, registry()).err())
}

/// Validate the postal code field; needs the country field's state too
#[wasm_bindgen(js_name = validatePostalCode)]
pub fn validate_postal_code_js(state: JsValue, country: JsValue) -> Result<Option<String>, JsValue> {
    let state = field_state(state)?;
    let country = field_state(country)?;
    Ok(core::validate_postal_code(&state, &country, registry()).err())
}

#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password_js(state: JsValue) -> Result<Option<String>, JsValue> {
    Ok(core::validate_password(&field_state(state)?).err())
}

/// Validate the confirm-password field; needs the password field's state too
#[wasm_bindgen(js_name = validateConfirmPassword)]
pub fn validate_confirm_password_js(state: JsValue, password: JsValue) -> Result<Option<String>, JsValue> {
    let state = field_state(state)?;
    let password = field_state(password)?;
    Ok(core::validate_confirm_password(&state, &password).err())
}

/// Validate all five fields in submit order
///
/// `states` is `{ email, country, postalCode, password, confirmPassword }`
/// with one field state object each. Only the first failure is reported.
#[wasm_bindgen(js_name = submitForm)]
pub fn submit_form_js(states: JsValue) -> Result<JsValue, JsValue> {
    let form: RegistrationForm = serde_wasm_bindgen::from_value(states)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form: {}", e)))?;

    Ok(serde_wasm_bindgen::to_value(&submit_outcome(&form))?)
}

fn submit_outcome(form: &RegistrationForm) -> SubmitOutcome {
    match form.submit(registry()) {
        Ok(()) => SubmitOutcome {
            valid: true,
            field: None,
            message: core::SUBMIT_SUCCESS_MESSAGE.to_string(),
        },
        Err(err) => {
            web_sys::console::debug_1(&JsValue::from_str(&err.to_string()));
            SubmitOutcome {
                valid: false,
                field: Some(err.field.id().to_string()),
                message: err.message,
            }
        }
    }
}

/// Postal code template of an exactly named country, e.g. `"NNNNN-NNN"`
#[wasm_bindgen(js_name = postCodeFormat)]
pub fn post_code_format_js(country: &str) -> Option<String> {
    registry()
        .find(country)
        .map(|found| found.post_code_template().to_string())
}
