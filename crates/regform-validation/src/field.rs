//! Field state snapshots

use serde::{Deserialize, Serialize};

/// Snapshot of one input: its current value and the constraint flags the
/// browser (or [`crate::FieldConstraints`]) computed for it
///
/// Keys are camelCase on the wire so a JS `ValidityState` maps onto it
/// directly:
///
/// ```
/// use regform_validation::FieldState;
///
/// let state: FieldState = serde_json::from_str(
///     r#"{ "value": "ab", "isTooShort": true, "minLength": 3 }"#,
/// ).unwrap();
/// assert!(state.is_too_short);
/// assert!(!state.is_missing);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldState {
    pub value: String,
    pub is_missing: bool,
    pub is_too_short: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    /// `-1` when the input has no minimum length, as `HTMLInputElement.minLength`
    pub min_length: i32,
    /// Hint text shown when the value does not match the field's pattern
    pub title: String,
}

impl FieldState {
    /// A state with the given value and no constraint violations
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// A required field left empty
    pub fn missing() -> Self {
        Self {
            is_missing: true,
            ..Self::default()
        }
    }

    pub fn with_too_short(mut self, min_length: i32) -> Self {
        self.is_too_short = true;
        self.min_length = min_length;
        self
    }

    pub fn with_type_mismatch(mut self) -> Self {
        self.type_mismatch = true;
        self
    }

    pub fn with_pattern_mismatch(mut self, title: impl Into<String>) -> Self {
        self.pattern_mismatch = true;
        self.title = title.into();
        self
    }

    /// True when none of the constraint flags is set
    pub fn satisfies_constraints(&self) -> bool {
        !(self.is_missing || self.is_too_short || self.type_mismatch || self.pattern_mismatch)
    }
}
