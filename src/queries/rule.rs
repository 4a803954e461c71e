use regex::{Regex, RegexBuilder};

use crate::error::QueryError;
use crate::model::Element;

/// A single typed predicate over one element.
///
/// Rules are immutable once built; their patterns are compiled (and
/// validated) at construction, so evaluation can never fail. All
/// patterns match case-insensitively, the way model authors write
/// category names varies too much for anything stricter.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Matches the element's category (raw entity type name, e.g.
    /// `IFCWALLSTANDARDCASE`).
    Category { pattern: Regex },

    /// Matches when any single property entry satisfies both the name
    /// and the value pattern.
    Property { name: Regex, value: Regex },
}

impl Rule {
    pub fn category(pattern: &str) -> Result<Self, QueryError> {
        Ok(Rule::Category {
            pattern: compile(pattern)?,
        })
    }

    pub fn property(name_pattern: &str, value_pattern: &str) -> Result<Self, QueryError> {
        Ok(Rule::Property {
            name: compile(name_pattern)?,
            value: compile(value_pattern)?,
        })
    }

    /// Property rule that accepts any property name.
    pub fn property_value(value_pattern: &str) -> Result<Self, QueryError> {
        Self::property("", value_pattern)
    }

    /// Parse a `NAME=VALUE` property filter, as entered in the UI field
    /// or passed to `--property`. A bare pattern matches any name.
    pub fn property_filter(filter: &str) -> Result<Self, QueryError> {
        match filter.split_once('=') {
            Some((name, value)) => Self::property(name.trim(), value.trim()),
            None => Self::property_value(filter.trim()),
        }
    }

    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Rule::Category { pattern } => pattern.is_match(&element.category),
            Rule::Property { name, value } => element
                .properties
                .iter()
                .any(|(n, v)| name.is_match(n) && value.is_match(v)),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, QueryError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}
