// File: src/config.rs
// Purpose: Form configuration parsing from regform.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::country::SEED_COUNTRIES;

/// Form configuration
///
/// A field table present in the file replaces that field's defaults as a
/// whole; omitted tables keep them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_email")]
    pub email: FieldConfig,

    #[serde(default)]
    pub country: FieldConfig,

    #[serde(default)]
    pub postal_code: FieldConfig,

    #[serde(default = "default_password")]
    pub password: FieldConfig,

    #[serde(default)]
    pub confirm_password: FieldConfig,

    /// Country registry entries, in display order
    #[serde(default = "default_countries")]
    pub countries: Vec<CountryConfig>,
}

/// Constraint attributes of one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_true")]
    pub required: bool,

    #[serde(default)]
    pub min_length: Option<usize>,

    /// Pattern the whole value must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Hint shown when the pattern does not match
    #[serde(default)]
    pub title: Option<String>,
}

/// One country and its postal code template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryConfig {
    pub name: String,
    pub template: String,
}

// Default values
fn default_true() -> bool {
    true
}

fn default_email() -> FieldConfig {
    FieldConfig {
        min_length: Some(3),
        ..FieldConfig::default()
    }
}

fn default_password() -> FieldConfig {
    FieldConfig {
        min_length: Some(8),
        pattern: Some(r"\S*[0-9]\S*".to_string()),
        title: Some("Password must contain at least one digit and no spaces.".to_string()),
        ..FieldConfig::default()
    }
}

fn default_countries() -> Vec<CountryConfig> {
    SEED_COUNTRIES
        .iter()
        .map(|(name, template)| CountryConfig {
            name: name.to_string(),
            template: template.to_string(),
        })
        .collect()
}

// Default implementations
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            required: true,
            min_length: None,
            pattern: None,
            title: None,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            country: FieldConfig::default(),
            postal_code: FieldConfig::default(),
            password: default_password(),
            confirm_password: FieldConfig::default(),
            countries: default_countries(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            tracing::debug!(?path, "no form config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./regform.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("regform.toml")
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormConfig = toml::from_str(content)?;
        Ok(config)
    }
}
