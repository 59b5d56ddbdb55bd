// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-empty keyword to match against cached property blobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Create a new query, rejecting input that is blank after trimming.
    ///
    /// Non-blank input is kept verbatim, surrounding whitespace included.
    pub fn new(query: impl Into<String>) -> Result<Self, ValidationError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyField("query"));
        }
        Ok(Self(query))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `LIKE` pattern matching the query anywhere in a blob.
    pub fn like_pattern(&self) -> String {
        format!("%{}%", self.0)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which block types a search considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Only page blocks.
    #[default]
    Page,
    /// Every block type; pages still sort first.
    All,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::All => "all",
        }
    }
}

impl std::str::FromStr for SearchScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "all" => Ok(Self::All),
            other => Err(ValidationError::InvalidScope(other.to_string())),
        }
    }
}

/// Renders an epoch-millisecond timestamp as ISO-8601 UTC (`...T...000Z`).
///
/// Missing or out-of-range timestamps render as an empty string.
pub fn iso_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_keeps_text_and_rejects_blank() {
        assert_eq!(SearchQuery::new("  meeting ").unwrap().as_str(), "  meeting ");
        assert_eq!(
            SearchQuery::new("meeting ").unwrap().like_pattern(),
            "%meeting %"
        );
        assert_eq!(
            SearchQuery::new("meeting").unwrap().like_pattern(),
            "%meeting%"
        );
        assert!(SearchQuery::new("").is_err());
        assert!(SearchQuery::new(" \t ").is_err());
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("page".parse::<SearchScope>().unwrap(), SearchScope::Page);
        assert_eq!("all".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert!("blocks".parse::<SearchScope>().is_err());
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(Some(0)), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso_timestamp(Some(1_700_000_000_123)), "2023-11-14T22:13:20.123Z");
        assert_eq!(iso_timestamp(None), "");
    }
}
