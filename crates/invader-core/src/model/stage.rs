use crate::error::{InvaderError, Result};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Stage {
    I = 1,
    II = 2,
    III = 3,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::I, Stage::II, Stage::III];

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Stage::I),
            2 => Some(Stage::II),
            3 => Some(Stage::III),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Number of stage tiers between `self` and `other`.
    pub const fn distance(self, other: Stage) -> u8 {
        (self as u8).abs_diff(other as u8)
    }

    pub const fn as_roman(self) -> &'static str {
        match self {
            Stage::I => "I",
            Stage::II => "II",
            Stage::III => "III",
        }
    }

    pub fn from_roman(value: &str) -> Option<Self> {
        match value.trim() {
            "I" | "i" | "1" => Some(Stage::I),
            "II" | "ii" | "2" => Some(Stage::II),
            "III" | "iii" | "3" => Some(Stage::III),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = InvaderError;

    fn try_from(value: u8) -> Result<Self> {
        Stage::from_number(value).ok_or(InvaderError::InvalidCard)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_roman())
    }
}
