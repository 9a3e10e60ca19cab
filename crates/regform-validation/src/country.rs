//! Country registry
//!
//! A fixed, ordered list of countries with their postal code formats.
//! Lookups are case-insensitive substring matches against the country
//! name, resolved into a [`CountryMatch`] before any message is built.

use nutype::nutype;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::error::Error;
use crate::template::{compile_template, PostCodePattern};

/// Countries known to the registration form, in display order
pub static SEED_COUNTRIES: &[(&str, &str)] = &[
    ("Afghanistan", "NNNN"),
    ("Andorra", "CCNNN"),
    ("Azerbaijan", "CC NNNN"),
    ("Brazil", "NNNNN-NNN"),
];

static BUILTIN: Lazy<CountryRegistry> = Lazy::new(|| {
    let countries = SEED_COUNTRIES
        .iter()
        .map(|(name, template)| Country::new(*name, template))
        .collect::<Result<Vec<_>, _>>()
        .expect("seed country names are not blank");
    CountryRegistry::new(countries).expect("seed countries are unique")
});

/// Country name, trimmed and never blank
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct CountryName(String);

/// A country and its postal code format
#[derive(Debug, Clone)]
pub struct Country {
    name: CountryName,
    post_code: PostCodePattern,
    post_code_error: String,
}

impl Country {
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self, Error> {
        let name = CountryName::try_new(name.into()).map_err(|_| Error::BlankCountryName)?;
        let post_code = compile_template(template);
        let post_code_error = post_code.error_message();

        Ok(Self {
            name,
            post_code,
            post_code_error,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn post_code_template(&self) -> &str {
        self.post_code.template()
    }

    pub fn post_code_pattern(&self) -> &PostCodePattern {
        &self.post_code
    }

    /// "Must be in format of {template}"
    pub fn post_code_error(&self) -> &str {
        &self.post_code_error
    }

    pub fn accepts_post_code(&self, value: &str) -> bool {
        self.post_code.is_match(value)
    }

    /// Case-insensitive name equality
    pub fn is_named(&self, name: &str) -> bool {
        self.name().to_lowercase() == name.to_lowercase()
    }

    fn name_contains_lowercase(&self, needle: &str) -> bool {
        self.name().to_lowercase().contains(needle)
    }
}

/// Outcome of looking up the text typed into the country field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryMatch<'a> {
    /// Exactly one country contains the text and its name equals the text
    Exact(&'a Country),
    /// Exactly one country contains the text, but the name is longer
    Partial(&'a Country),
    /// Several countries contain the text, in registry order
    Ambiguous(Vec<&'a Country>),
    NotFound,
}

impl<'a> CountryMatch<'a> {
    /// The resolved country, only for an exact match
    pub fn exact(&self) -> Option<&'a Country> {
        match self {
            CountryMatch::Exact(country) => Some(*country),
            _ => None,
        }
    }

    /// Message for the country field, `None` when the match is exact
    ///
    /// Ambiguous lookups list every candidate on its own line; a partial
    /// lookup suggests the single completion.
    pub fn message(&self, query: &str) -> Option<String> {
        match self {
            CountryMatch::Exact(_) => None,
            CountryMatch::Partial(country) => Some(country.name().to_string()),
            CountryMatch::Ambiguous(countries) => Some(
                countries
                    .iter()
                    .map(|country| country.name())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            CountryMatch::NotFound => Some(format!("Country {} not found.", query)),
        }
    }
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.post_code_template() == other.post_code_template()
    }
}

impl Eq for Country {}

/// Ordered, non-empty set of countries with case-insensitively unique names
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    countries: Vec<Country>,
}

impl CountryRegistry {
    pub fn new(countries: Vec<Country>) -> Result<Self, Error> {
        if countries.is_empty() {
            return Err(Error::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(countries.len());
        for country in &countries {
            if !seen.insert(country.name().to_lowercase()) {
                return Err(Error::DuplicateCountry(country.name().to_string()));
            }
        }

        tracing::trace!(count = countries.len(), "country registry ready");
        Ok(Self { countries })
    }

    /// Shared registry built from [`SEED_COUNTRIES`]
    pub fn builtin() -> &'static CountryRegistry {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Never true for a registry built through `new`
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    /// Countries whose name contains `query`, ignoring case, in registry order
    pub fn matching(&self, query: &str) -> Vec<&Country> {
        let needle = query.to_lowercase();
        self.countries
            .iter()
            .filter(|country| country.name_contains_lowercase(&needle))
            .collect()
    }

    /// Country whose name equals `name`, ignoring case
    pub fn find(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.is_named(name))
    }

    /// Resolves country field text into a [`CountryMatch`]
    pub fn resolve(&self, query: &str) -> CountryMatch<'_> {
        let mut matches = self.matching(query);
        match matches.len() {
            0 => CountryMatch::NotFound,
            1 => {
                let country = matches.remove(0);
                if country.is_named(query) {
                    CountryMatch::Exact(country)
                } else {
                    CountryMatch::Partial(country)
                }
            }
            _ => CountryMatch::Ambiguous(matches),
        }
    }
}

impl Default for CountryRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl<'a> IntoIterator for &'a CountryRegistry {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(countries: &[&'a Country]) -> Vec<&'a str> {
        countries.iter().map(|country| country.name()).collect()
    }

    #[test]
    fn test_builtin_registry_order() {
        let registry = CountryRegistry::builtin();
        let all: Vec<&str> = registry.iter().map(Country::name).collect();
        assert_eq!(all, vec!["Afghanistan", "Andorra", "Azerbaijan", "Brazil"]);
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_seed_templates_accept_their_shape() {
        let registry = CountryRegistry::builtin();
        let samples = ["1234", "AD100", "AZ 1000", "01310-100"];
        for (country, sample) in registry.iter().zip(samples) {
            assert!(country.accepts_post_code(sample), "{} should accept {}", country.name(), sample);
            assert!(!country.accepts_post_code(""), "{} should reject empty", country.name());
        }
    }

    #[test]
    fn test_post_code_error() {
        let brazil = CountryRegistry::builtin().find("brazil").unwrap();
        assert_eq!(brazil.post_code_error(), "Must be in format of NNNNN-NNN");
        assert_eq!(brazil.post_code_template(), "NNNNN-NNN");
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let registry = CountryRegistry::builtin();
        assert_eq!(names(&registry.matching("and")), vec!["Andorra"]);
        assert_eq!(names(&registry.matching("AN")), vec!["Afghanistan", "Andorra", "Azerbaijan"]);
        assert_eq!(
            names(&registry.matching("a")),
            vec!["Afghanistan", "Andorra", "Azerbaijan", "Brazil"]
        );
        assert!(registry.matching("Mars").is_empty());
    }

    #[test]
    fn test_resolve_outcomes() {
        let registry = CountryRegistry::builtin();

        assert!(matches!(registry.resolve("ANDORRA"), CountryMatch::Exact(c) if c.name() == "Andorra"));
        assert!(matches!(registry.resolve("braz"), CountryMatch::Partial(c) if c.name() == "Brazil"));
        assert!(matches!(registry.resolve("a"), CountryMatch::Ambiguous(ref c) if c.len() == 4));
        assert_eq!(registry.resolve("Mars"), CountryMatch::NotFound);
    }

    #[test]
    fn test_match_messages() {
        let registry = CountryRegistry::builtin();
        assert_eq!(registry.resolve("Andorra").message("Andorra"), None);
        assert_eq!(registry.resolve("and").message("and"), Some("Andorra".to_string()));
        assert_eq!(
            registry.resolve("a").message("a"),
            Some("Afghanistan\nAndorra\nAzerbaijan\nBrazil".to_string())
        );
        assert_eq!(
            registry.resolve("Mars").message("Mars"),
            Some("Country Mars not found.".to_string())
        );
    }

    #[test]
    fn test_overlapping_names_stay_ambiguous() {
        let registry = CountryRegistry::new(vec![
            Country::new("Niger", "NNNN").unwrap(),
            Country::new("Nigeria", "NNNNNN").unwrap(),
        ])
        .unwrap();

        let outcome = registry.resolve("niger");
        assert!(matches!(outcome, CountryMatch::Ambiguous(_)));
        assert_eq!(outcome.exact(), None);
        assert_eq!(outcome.message("niger"), Some("Niger\nNigeria".to_string()));
        assert_eq!(registry.find("niger").map(Country::name), Some("Niger"));
    }

    #[test]
    fn test_registry_rejects_empty_and_duplicates() {
        assert!(matches!(CountryRegistry::new(Vec::new()), Err(Error::EmptyRegistry)));

        let duplicate = CountryRegistry::new(vec![
            Country::new("Brazil", "NNNNN-NNN").unwrap(),
            Country::new("BRAZIL", "NNNNN").unwrap(),
        ]);
        assert!(matches!(duplicate, Err(Error::DuplicateCountry(name)) if name == "BRAZIL"));
    }

    #[test]
    fn test_country_name_is_trimmed_and_non_blank() {
        let country = Country::new("  Andorra ", "CCNNN").unwrap();
        assert_eq!(country.name(), "Andorra");
        assert!(matches!(Country::new("   ", "NNNN"), Err(Error::BlankCountryName)));
    }
}
