use crate::error::{InvaderError, Result};
use crate::model::stage::Stage;
use crate::model::terrain::Terrain;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Face {
    Printed,
    SaltDeposits,
}

/// An invader card: a stage and one or two terrains.
///
/// Values can only be built from the catalog, the placeholders, or the
/// special replacement cards, so every `Card` in the program is valid.
/// Stage III terrains are stored in catalog order regardless of how they
/// were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    stage: Stage,
    terrain: Terrain,
    terrain2: Terrain,
    face: Face,
}

impl Card {
    const fn printed(stage: Stage, terrain: Terrain, terrain2: Terrain) -> Self {
        Self {
            stage,
            terrain,
            terrain2,
            face: Face::Printed,
        }
    }

    pub const STAGE_I_JUNGLE: Card = Card::printed(Stage::I, Terrain::Jungle, Terrain::Unknown);
    pub const STAGE_I_MOUNTAIN: Card =
        Card::printed(Stage::I, Terrain::Mountain, Terrain::Unknown);
    pub const STAGE_I_SANDS: Card = Card::printed(Stage::I, Terrain::Sands, Terrain::Unknown);
    pub const STAGE_I_WETLAND: Card = Card::printed(Stage::I, Terrain::Wetland, Terrain::Unknown);
    pub const STAGE_II_JUNGLE: Card = Card::printed(Stage::II, Terrain::Jungle, Terrain::Unknown);
    pub const STAGE_II_MOUNTAIN: Card =
        Card::printed(Stage::II, Terrain::Mountain, Terrain::Unknown);
    pub const STAGE_II_SANDS: Card = Card::printed(Stage::II, Terrain::Sands, Terrain::Unknown);
    pub const STAGE_II_WETLAND: Card =
        Card::printed(Stage::II, Terrain::Wetland, Terrain::Unknown);
    pub const STAGE_II_COASTAL: Card =
        Card::printed(Stage::II, Terrain::CoastalLands, Terrain::Unknown);
    pub const STAGE_III_JUNGLE_MOUNTAIN: Card =
        Card::printed(Stage::III, Terrain::Jungle, Terrain::Mountain);
    pub const STAGE_III_JUNGLE_SANDS: Card =
        Card::printed(Stage::III, Terrain::Jungle, Terrain::Sands);
    pub const STAGE_III_JUNGLE_WETLAND: Card =
        Card::printed(Stage::III, Terrain::Jungle, Terrain::Wetland);
    pub const STAGE_III_MOUNTAIN_SANDS: Card =
        Card::printed(Stage::III, Terrain::Mountain, Terrain::Sands);
    pub const STAGE_III_MOUNTAIN_WETLAND: Card =
        Card::printed(Stage::III, Terrain::Mountain, Terrain::Wetland);
    pub const STAGE_III_SANDS_WETLAND: Card =
        Card::printed(Stage::III, Terrain::Sands, Terrain::Wetland);

    /// Habsburg Mining Expedition's replacement for a stage II card.
    pub const STAGE_II_SALT_DEPOSITS: Card = Card {
        stage: Stage::II,
        terrain: Terrain::Unknown,
        terrain2: Terrain::Unknown,
        face: Face::SaltDeposits,
    };

    pub const STAGE_I_UNKNOWN: Card = Card::unknown(Stage::I);
    pub const STAGE_II_UNKNOWN: Card = Card::unknown(Stage::II);
    pub const STAGE_III_UNKNOWN: Card = Card::unknown(Stage::III);

    /// Every card that can be revealed, grouped by stage.
    pub const CATALOG: [Card; 15] = [
        Card::STAGE_I_JUNGLE,
        Card::STAGE_I_MOUNTAIN,
        Card::STAGE_I_SANDS,
        Card::STAGE_I_WETLAND,
        Card::STAGE_II_JUNGLE,
        Card::STAGE_II_MOUNTAIN,
        Card::STAGE_II_SANDS,
        Card::STAGE_II_WETLAND,
        Card::STAGE_II_COASTAL,
        Card::STAGE_III_JUNGLE_MOUNTAIN,
        Card::STAGE_III_JUNGLE_SANDS,
        Card::STAGE_III_JUNGLE_WETLAND,
        Card::STAGE_III_MOUNTAIN_SANDS,
        Card::STAGE_III_MOUNTAIN_WETLAND,
        Card::STAGE_III_SANDS_WETLAND,
    ];

    /// Placeholder for a card whose terrain has not been seen yet.
    pub const fn unknown(stage: Stage) -> Self {
        Card::printed(stage, Terrain::Unknown, Terrain::Unknown)
    }

    pub fn new(stage: Stage, terrain: Terrain, terrain2: Terrain) -> Result<Self> {
        // Only two known terrains are reordered; a lone unknown never moves.
        let both_known = terrain != Terrain::Unknown && terrain2 != Terrain::Unknown;
        let (terrain, terrain2) = if both_known && terrain2 < terrain {
            (terrain2, terrain)
        } else {
            (terrain, terrain2)
        };
        let card = Card::printed(stage, terrain, terrain2);
        if card.is_placeholder() || card.is_catalog() {
            Ok(card)
        } else {
            Err(InvaderError::InvalidCard)
        }
    }

    pub fn single(stage: Stage, terrain: Terrain) -> Result<Self> {
        Card::new(stage, terrain, Terrain::Unknown)
    }

    pub fn catalog() -> &'static [Card] {
        &Card::CATALOG
    }

    pub fn catalog_for(stage: Stage) -> &'static [Card] {
        match stage {
            Stage::I => &Card::CATALOG[..4],
            Stage::II => &Card::CATALOG[4..9],
            Stage::III => &Card::CATALOG[9..],
        }
    }

    pub const fn stage(self) -> Stage {
        self.stage
    }

    pub const fn terrain(self) -> Terrain {
        self.terrain
    }

    pub const fn terrain2(self) -> Terrain {
        self.terrain2
    }

    pub fn carries(self, terrain: Terrain) -> bool {
        terrain != Terrain::Unknown && (self.terrain == terrain || self.terrain2 == terrain)
    }

    pub fn is_catalog(self) -> bool {
        Card::CATALOG.contains(&self)
    }

    pub const fn is_placeholder(self) -> bool {
        matches!(self.face, Face::Printed)
            && matches!(self.terrain, Terrain::Unknown)
            && matches!(self.terrain2, Terrain::Unknown)
    }

    pub const fn is_salt_deposits(self) -> bool {
        matches!(self.face, Face::SaltDeposits)
    }

    pub const fn is_coastal(self) -> bool {
        matches!(self.terrain, Terrain::CoastalLands)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.stage)?;
        if self.is_salt_deposits() {
            return f.write_str("salt-deposits");
        }
        f.write_str(self.terrain.as_str())?;
        if self.terrain2 != Terrain::Unknown {
            write!(f, "+{}", self.terrain2)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("expected `<stage>:<terrain>`, got `{0}`")]
    Malformed(String),
    #[error("unknown stage `{0}`")]
    UnknownStage(String),
    #[error("unknown terrain `{0}`")]
    UnknownTerrain(String),
    #[error("`{0}` is not an invader card")]
    NotInCatalog(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(value: &str) -> core::result::Result<Self, Self::Err> {
        let (stage, face) = value
            .split_once(':')
            .ok_or_else(|| ParseCardError::Malformed(value.to_string()))?;
        let stage =
            Stage::from_roman(stage).ok_or_else(|| ParseCardError::UnknownStage(stage.to_string()))?;
        let face = face.trim();

        if face.eq_ignore_ascii_case("salt-deposits") {
            return match stage {
                Stage::II => Ok(Card::STAGE_II_SALT_DEPOSITS),
                _ => Err(ParseCardError::NotInCatalog(value.to_string())),
            };
        }

        let mut terrains = face.split('+');
        let terrain = terrains.next().unwrap_or_default().parse::<Terrain>()?;
        let terrain2 = match terrains.next() {
            Some(second) => second.parse::<Terrain>()?,
            None => Terrain::Unknown,
        };
        if terrains.next().is_some() {
            return Err(ParseCardError::Malformed(value.to_string()));
        }
        // `jungle+unknown` is not a spelling of `jungle`.
        if face.contains('+') && (terrain == Terrain::Unknown) != (terrain2 == Terrain::Unknown) {
            return Err(ParseCardError::NotInCatalog(value.to_string()));
        }

        Card::new(stage, terrain, terrain2)
            .map_err(|_| ParseCardError::NotInCatalog(value.to_string()))
    }
}

impl TryFrom<String> for Card {
    type Error = ParseCardError;

    fn try_from(value: String) -> core::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}
