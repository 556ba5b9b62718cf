use crate::model::card::ParseCardError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Land type printed on an invader card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    Jungle,
    Mountain,
    Sands,
    Wetland,
    /// Only printed on a single stage II card.
    CoastalLands,
    Unknown,
}

impl Terrain {
    /// Terrains common to every stage.
    pub const STANDARD: [Terrain; 4] = [
        Terrain::Jungle,
        Terrain::Mountain,
        Terrain::Sands,
        Terrain::Wetland,
    ];

    pub const ALL: [Terrain; 5] = [
        Terrain::Jungle,
        Terrain::Mountain,
        Terrain::Sands,
        Terrain::Wetland,
        Terrain::CoastalLands,
    ];

    pub const fn is_standard(self) -> bool {
        matches!(
            self,
            Terrain::Jungle | Terrain::Mountain | Terrain::Sands | Terrain::Wetland
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Terrain::Jungle => "jungle",
            Terrain::Mountain => "mountain",
            Terrain::Sands => "sands",
            Terrain::Wetland => "wetland",
            Terrain::CoastalLands => "coastal-lands",
            Terrain::Unknown => "unknown",
        }
    }
}

impl FromStr for Terrain {
    type Err = ParseCardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jungle" => Ok(Terrain::Jungle),
            "mountain" => Ok(Terrain::Mountain),
            "sands" => Ok(Terrain::Sands),
            "wetland" => Ok(Terrain::Wetland),
            "coastal-lands" | "coastal" => Ok(Terrain::CoastalLands),
            "unknown" | "?" => Ok(Terrain::Unknown),
            other => Err(ParseCardError::UnknownTerrain(other.to_string())),
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
