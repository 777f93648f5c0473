//! Soil and rock categories accepted by the scoring engine.
//!
//! Both enums keep an `Other` variant instead of rejecting unknown names:
//! the engine scores unrecognized categories with a neutral default, so
//! parsing is total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surface soil category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Rocky,
    /// Any category the factor tables do not know.
    Other(String),
}

impl SoilType {
    pub const KNOWN: [SoilType; 4] = [Self::Clay, Self::Sandy, Self::Loamy, Self::Rocky];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clay => "clay",
            Self::Sandy => "sandy",
            Self::Loamy => "loamy",
            Self::Rocky => "rocky",
            Self::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for SoilType {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "clay" => Self::Clay,
            "sandy" => Self::Sandy,
            "loamy" => Self::Loamy,
            "rocky" => Self::Rocky,
            _ => Self::Other(normalized),
        }
    }
}

impl From<String> for SoilType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SoilType> for String {
    fn from(value: SoilType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for SoilType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying rock formation category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RockType {
    Sedimentary,
    Igneous,
    Metamorphic,
    Other(String),
}

impl RockType {
    pub const KNOWN: [RockType; 3] = [Self::Sedimentary, Self::Igneous, Self::Metamorphic];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Sedimentary => "sedimentary",
            Self::Igneous => "igneous",
            Self::Metamorphic => "metamorphic",
            Self::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for RockType {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "sedimentary" => Self::Sedimentary,
            "igneous" => Self::Igneous,
            "metamorphic" => Self::Metamorphic,
            _ => Self::Other(normalized),
        }
    }
}

impl From<String> for RockType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<RockType> for String {
    fn from(value: RockType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for RockType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_case_and_whitespace_insensitive() {
        assert_eq!(SoilType::from(" Clay "), SoilType::Clay);
        assert_eq!(RockType::from("IGNEOUS"), RockType::Igneous);
    }

    #[test]
    fn unknown_names_are_kept() {
        let soil = SoilType::from("Peat");
        assert_eq!(soil, SoilType::Other("peat".to_string()));
        assert!(!soil.is_known());
        assert_eq!(soil.to_string(), "peat");
    }

    #[test]
    fn serde_uses_plain_strings() {
        let json = serde_json::to_string(&RockType::Metamorphic).unwrap();
        assert_eq!(json, "\"metamorphic\"");

        let parsed: SoilType = serde_json::from_str("\"loamy\"").unwrap();
        assert_eq!(parsed, SoilType::Loamy);
    }
}
