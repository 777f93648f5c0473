//! Static soil and rock reference table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Soil,
    Rock,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Soil => "soil",
            Self::Rock => "rock",
        })
    }
}

/// Which kinds a search returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(MaterialKind),
}

impl KindFilter {
    fn admits(&self, kind: MaterialKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "soil" => Ok(Self::Only(MaterialKind::Soil)),
            "rock" => Ok(Self::Only(MaterialKind::Rock)),
            other => Err(format!("unknown filter '{other}', expected all, soil or rock")),
        }
    }
}

/// Low / Medium / High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEntry {
    pub name: &'static str,
    pub kind: MaterialKind,
    pub category: &'static str,
    pub water_retention: Level,
    pub drilling_difficulty: Difficulty,
    pub permeability: Level,
    pub description: &'static str,
    /// Well suitability, percent.
    pub suitability: u8,
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    name: &'static str,
    kind: MaterialKind,
    category: &'static str,
    water_retention: Level,
    drilling_difficulty: Difficulty,
    permeability: Level,
    description: &'static str,
    suitability: u8,
) -> MaterialEntry {
    MaterialEntry {
        name,
        kind,
        category,
        water_retention,
        drilling_difficulty,
        permeability,
        description,
        suitability,
    }
}

use Difficulty::{Easy, Hard, Medium as Moderate};
use Level::{High, Low, Medium};
use MaterialKind::{Rock, Soil};

#[rustfmt::skip]
pub static MATERIALS: [MaterialEntry; 8] = [
    entry("Clay Soil", Soil, "Fine-grained", High, Moderate, Low,
        "Fine particles with high water retention capacity", 85),
    entry("Sandy Soil", Soil, "Coarse-grained", Low, Easy, High,
        "Large particles with good drainage properties", 45),
    entry("Loamy Soil", Soil, "Mixed", Medium, Easy, Medium,
        "Balanced mixture of sand, silt, and clay", 75),
    entry("Sedimentary Rock", Rock, "Layered", High, Moderate, Medium,
        "Formed by deposition and compression of sediments", 90),
    entry("Igneous Rock", Rock, "Crystalline", Low, Hard, Low,
        "Formed from cooled and solidified magma", 35),
    entry("Metamorphic Rock", Rock, "Transformed", Medium, Hard, Low,
        "Formed by heat and pressure transformation", 55),
    entry("Limestone", Rock, "Carbonate", High, Moderate, High,
        "Porous rock excellent for groundwater storage", 95),
    entry("Sandstone", Rock, "Clastic", Medium, Moderate, High,
        "Porous sedimentary rock with good water flow", 80),
];

/// Entries whose name or description contains `term` (case-insensitive).
pub fn search(term: &str, filter: KindFilter) -> Vec<&'static MaterialEntry> {
    let term = term.trim().to_lowercase();
    MATERIALS
        .iter()
        .filter(|m| filter.admits(m.kind))
        .filter(|m| {
            term.is_empty()
                || m.name.to_lowercase().contains(&term)
                || m.description.to_lowercase().contains(&term)
        })
        .collect()
}
