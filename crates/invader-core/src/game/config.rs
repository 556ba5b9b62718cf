use crate::model::adversary::Adversary;
use serde::{Deserialize, Serialize};

/// One adversary seat of a game; `adversary: None` leaves the seat empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdversarySlot {
    #[serde(default)]
    pub adversary: Option<Adversary>,
    #[serde(default)]
    pub level: u8,
}

impl AdversarySlot {
    pub const NONE: AdversarySlot = AdversarySlot {
        adversary: None,
        level: 0,
    };

    pub const fn new(adversary: Adversary, level: u8) -> Self {
        Self {
            adversary: Some(adversary),
            level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub leading: AdversarySlot,
    #[serde(default)]
    pub supporting: AdversarySlot,
}

impl GameConfig {
    pub const fn new(leading: AdversarySlot, supporting: AdversarySlot) -> Self {
        Self {
            leading,
            supporting,
        }
    }

    pub const fn led_by(adversary: Adversary, level: u8) -> Self {
        Self::new(AdversarySlot::new(adversary, level), AdversarySlot::NONE)
    }

    pub fn with_supporting(mut self, adversary: Adversary, level: u8) -> Self {
        self.supporting = AdversarySlot::new(adversary, level);
        self
    }

    /// Occupied slots in setup order: supporting first, then leading.
    pub fn adversaries(&self) -> impl Iterator<Item = (Adversary, u8)> {
        [self.supporting, self.leading]
            .into_iter()
            .filter_map(|slot| slot.adversary.map(|adversary| (adversary, slot.level)))
    }
}
