// ── Filter and sort criteria ──
//
// Always fully defined: there is no partial filter state. Mutated only
// through the store's explicit setters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort key for the derived view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Price,
}

/// Sort direction for the derived view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

// ── Category filter ─────────────────────────────────────────────────

/// Category criterion: everything, or one exact category.
///
/// The wire/UI sentinel `"all"` maps to [`CategoryFilter::All`]; any
/// other text selects that category exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Whether a record with the given category passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Category(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        if s == "all" {
            Self::All
        } else {
            Self::Category(s)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(f: CategoryFilter) -> Self {
        f.to_string()
    }
}

// ── Filter state ────────────────────────────────────────────────────

/// The full filter/sort criteria for the derived view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text filter; empty means no filter.
    pub query: String,
    pub category: CategoryFilter,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sort_enums_round_trip_through_strings() {
        assert_eq!(SortBy::Price.to_string(), "price");
        assert_eq!("name".parse::<SortBy>().unwrap(), SortBy::Name);
        assert_eq!("desc".parse::<SortDir>().unwrap(), SortDir::Desc);
    }

    #[test]
    fn all_sentinel_parses_to_all() {
        let f: CategoryFilter = "all".parse().unwrap();
        assert_eq!(f, CategoryFilter::All);
        assert!(f.matches("anything"));
    }

    #[test]
    fn named_category_matches_exactly() {
        let f: CategoryFilter = "fruit".parse().unwrap();
        assert!(f.matches("fruit"));
        assert!(!f.matches("Fruit"));
        assert!(!f.matches("fruits"));
    }

    #[test]
    fn default_filters_are_fully_defined() {
        let f = FilterState::default();
        assert_eq!(f.query, "");
        assert_eq!(f.category, CategoryFilter::All);
        assert_eq!(f.sort_by, SortBy::Name);
        assert_eq!(f.sort_dir, SortDir::Asc);
    }
}
