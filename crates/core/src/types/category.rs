//! Catalog category and subcategory enums.
//!
//! The persisted product documents store these as their display strings
//! (e.g. `"UPVC"`, `"Main gate"`), so serde renames match the display
//! forms exactly.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a category or subcategory from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct CategoryParseError {
    /// Which enum failed to parse ("category" or "subcategory").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Product material category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "UPVC")]
    Upvc,
    Aluminium,
    Steel,
    Glass,
    Iron,
    #[serde(rename = "WPVC")]
    Wpvc,
    #[serde(rename = "ABS")]
    Abs,
}

impl Category {
    /// All categories, in catalog display order.
    pub const ALL: [Self; 7] = [
        Self::Upvc,
        Self::Aluminium,
        Self::Steel,
        Self::Glass,
        Self::Iron,
        Self::Wpvc,
        Self::Abs,
    ];

    /// The display string, as persisted and as matched by search.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upvc => "UPVC",
            Self::Aluminium => "Aluminium",
            Self::Steel => "Steel",
            Self::Glass => "Glass",
            Self::Iron => "Iron",
            Self::Wpvc => "WPVC",
            Self::Abs => "ABS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CategoryParseError {
                kind: "category",
                value: s.to_owned(),
            })
    }
}

/// Product type subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subcategory {
    Windows,
    Doors,
    Ventilators,
    Partitions,
    Grill,
    Railings,
    #[serde(rename = "Main gate")]
    MainGate,
}

impl Subcategory {
    /// All subcategories, in catalog display order.
    pub const ALL: [Self; 7] = [
        Self::Windows,
        Self::Doors,
        Self::Ventilators,
        Self::Partitions,
        Self::Grill,
        Self::Railings,
        Self::MainGate,
    ];

    /// The display string, as persisted and as matched by search.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Doors => "Doors",
            Self::Ventilators => "Ventilators",
            Self::Partitions => "Partitions",
            Self::Grill => "Grill",
            Self::Railings => "Railings",
            Self::MainGate => "Main gate",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subcategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CategoryParseError {
                kind: "subcategory",
                value: s.to_owned(),
            })
    }
}
