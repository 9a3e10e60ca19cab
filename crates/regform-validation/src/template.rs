//! Postal code templates
//!
//! A template is a string where `N` stands for one digit, `C` for one letter
//! and every other character for itself, e.g. `"CC NNNN"` for Azerbaijan.

use regex::{Regex, RegexBuilder};
use std::fmt;

/// Compiled postal code matcher for one template
#[derive(Clone)]
pub struct PostCodePattern {
    template: String,
    regex: Option<Regex>,
}

impl PostCodePattern {
    /// The template this pattern was compiled from
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Tests the whole value against the template (letters case-insensitive)
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(value))
    }

    /// Message shown when a value does not fit the template
    pub fn error_message(&self) -> String {
        format!("Must be in format of {}", self.template)
    }
}

impl fmt::Debug for PostCodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostCodePattern")
            .field("template", &self.template)
            .field("pattern", &self.regex.as_ref().map(Regex::as_str))
            .finish()
    }
}

/// Translates a template into an anchored regular expression source
///
/// Literal characters are escaped, so separators like `.` or `+` only
/// ever match themselves.
fn template_to_regex(template: &str) -> String {
    let mut pattern = String::with_capacity(template.len() * 6 + 2);
    pattern.push('^');
    for character in template.chars() {
        match character {
            'N' => pattern.push_str("[0-9]"),
            // ASCII only: Unicode case folding would add the Kelvin sign and long s
            'C' => pattern.push_str("(?-u:[a-zA-Z])"),
            literal => pattern.push_str(&regex::escape(&literal.to_string())),
        }
    }
    pattern.push('$');
    pattern
}

/// Compiles a postal code template into a matcher
///
/// There is no error path: a template that cannot be compiled produces a
/// matcher that rejects every value.
pub fn compile_template(template: &str) -> PostCodePattern {
    let source = template_to_regex(template);
    let regex = match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(template, error = %err, "postal code template does not compile, rejecting all values");
            None
        }
    };

    PostCodePattern {
        template: template.to_string(),
        regex,
    }
}
