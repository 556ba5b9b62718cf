use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional personality for the invaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Adversary {
    BrandenburgPrussia,
    England,
    #[serde(rename = "france-plantation-colony")]
    France,
    #[serde(rename = "habsburg-livestock-colony")]
    HabsburgLivestock,
    #[serde(rename = "habsburg-mining-expedition")]
    HabsburgMines,
    Russia,
    Scotland,
    Sweden,
}

impl Adversary {
    pub const ALL: [Adversary; 8] = [
        Adversary::BrandenburgPrussia,
        Adversary::England,
        Adversary::France,
        Adversary::HabsburgLivestock,
        Adversary::HabsburgMines,
        Adversary::Russia,
        Adversary::Scotland,
        Adversary::Sweden,
    ];

    /// Highest difficulty level printed on any adversary panel.
    pub const MAX_LEVEL: u8 = 6;

    pub const fn as_str(self) -> &'static str {
        match self {
            Adversary::BrandenburgPrussia => "brandenburg-prussia",
            Adversary::England => "england",
            Adversary::France => "france-plantation-colony",
            Adversary::HabsburgLivestock => "habsburg-livestock-colony",
            Adversary::HabsburgMines => "habsburg-mining-expedition",
            Adversary::Russia => "russia",
            Adversary::Scotland => "scotland",
            Adversary::Sweden => "sweden",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown adversary `{0}`")]
pub struct ParseAdversaryError(pub String);

impl FromStr for Adversary {
    type Err = ParseAdversaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Adversary::ALL
            .into_iter()
            .find(|adversary| adversary.as_str() == normalized)
            .ok_or(ParseAdversaryError(normalized))
    }
}

impl fmt::Display for Adversary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
