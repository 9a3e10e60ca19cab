//! Built-in constraint checks
//!
//! Computes the same flags a browser puts on an input's `ValidityState`
//! (`valueMissing`, `tooShort`, `typeMismatch`, `patternMismatch`), for
//! callers that only have raw values: server-side re-validation, tests,
//! and WASM callers outside a form element.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::field::FieldState;

// "Valid e-mail address" production from the HTML standard
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Input type of the form control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
}

/// The HTML constraint attributes of one input
#[derive(Debug, Clone, Default)]
pub struct FieldConstraints {
    pub kind: InputKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pattern: Option<Regex>,
    pub title: String,
}

impl FieldConstraints {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the `pattern` attribute; it must match the whole value
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(&format!("^(?:{})$", pattern))?);
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Value sanitization applied by the input type
    ///
    /// Line breaks never survive a single-line input; email inputs also
    /// drop leading and trailing whitespace.
    pub fn sanitize(&self, raw: &str) -> String {
        let value: String = raw.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        match self.kind {
            InputKind::Email => value
                .trim_matches(|c: char| c.is_ascii_whitespace())
                .to_string(),
            InputKind::Text | InputKind::Password => value,
        }
    }

    /// Builds the field snapshot for a raw value
    pub fn evaluate(&self, raw: &str) -> FieldState {
        let value = self.sanitize(raw);
        let empty = value.is_empty();
        let is_too_short = !empty
            && self
                .min_length
                .is_some_and(|min| value.encode_utf16().count() < min);
        let type_mismatch = !empty && self.kind == InputKind::Email && !is_valid_email(&value);
        let pattern_mismatch = !empty
            && self
                .pattern
                .as_ref()
                .is_some_and(|pattern| !pattern.is_match(&value));

        FieldState {
            is_missing: self.required && empty,
            is_too_short,
            type_mismatch,
            pattern_mismatch,
            min_length: self
                .min_length
                .map_or(-1, |min| i32::try_from(min).unwrap_or(i32::MAX)),
            title: self.title.clone(),
            value,
        }
    }
}

/// Validates an email address the way `<input type="email">` does
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user@localhost"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn test_missing_only_when_required() {
        let optional = FieldConstraints::new(InputKind::Text);
        assert!(!optional.evaluate("").is_missing);

        let required = FieldConstraints::new(InputKind::Text).with_required(true);
        assert!(required.evaluate("").is_missing);
        assert!(!required.evaluate("x").is_missing);
    }

    #[test]
    fn test_too_short_ignores_empty_values() {
        let constraints = FieldConstraints::new(InputKind::Password).with_min_length(8);
        assert!(!constraints.evaluate("").is_too_short);
        assert!(constraints.evaluate("1234567").is_too_short);
        assert!(!constraints.evaluate("12345678").is_too_short);
        assert_eq!(constraints.evaluate("x").min_length, 8);
    }

    #[test]
    fn test_min_length_absent_reports_minus_one() {
        let state = FieldConstraints::new(InputKind::Text).evaluate("Brazil");
        assert_eq!(state.min_length, -1);
        assert!(!state.is_too_short);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let constraints = FieldConstraints::new(InputKind::Text).with_min_length(4);
        // Two astral characters are four UTF-16 code units
        assert!(!constraints.evaluate("😀😀").is_too_short);
        assert!(constraints.evaluate("éé").is_too_short);
    }

    #[test]
    fn test_email_type_mismatch_and_sanitizing() {
        let constraints = FieldConstraints::new(InputKind::Email).with_required(true);

        let state = constraints.evaluate("  a@b.com \n");
        assert_eq!(state.value, "a@b.com");
        assert!(!state.type_mismatch);

        assert!(constraints.evaluate("not-an-email").type_mismatch);
        assert!(!constraints.evaluate("").type_mismatch);
    }

    #[test]
    fn test_text_keeps_inner_whitespace() {
        let constraints = FieldConstraints::new(InputKind::Text);
        assert_eq!(constraints.evaluate(" AZ 1000\r\n").value, " AZ 1000");
    }

    #[test]
    fn test_pattern_must_match_whole_value() {
        let constraints = FieldConstraints::new(InputKind::Password)
            .with_pattern(r"\S*[0-9]\S*")
            .unwrap()
            .with_title("Needs a digit");

        assert!(!constraints.evaluate("secret1").pattern_mismatch);
        assert!(constraints.evaluate("secret").pattern_mismatch);
        assert!(constraints.evaluate("secret 1").pattern_mismatch);
        assert!(!constraints.evaluate("").pattern_mismatch);
        assert_eq!(constraints.evaluate("secret").title, "Needs a digit");
    }

    #[test]
    fn test_alternation_is_anchored_as_a_group() {
        let constraints = FieldConstraints::new(InputKind::Text)
            .with_pattern("a|b")
            .unwrap();
        assert!(!constraints.evaluate("a").pattern_mismatch);
        assert!(constraints.evaluate("ab").pattern_mismatch);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FieldConstraints::new(InputKind::Text).with_pattern("(").is_err());
    }
}
