//! Adversary rules that touch the invader deck or the card pool.
//!
//! Every "adversary X at level N or higher does Y" condition lives in
//! [`RULES`]. The deck modifiers and the card pool both read from it, either
//! through [`effects_at`] or through a resolved [`ActiveRules`].

use crate::deck::modifiers::DeckStep;
use crate::game::config::GameConfig;
use crate::model::adversary::Adversary;
use crate::model::card::Card;
use crate::model::stage::Stage;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The stage II Coastal Lands card is known to every player from setup.
    RevealsCoastalLands,
    /// Fear cards may reveal a stage II or III card without drawing it.
    Entrenched,
    /// Structural change to the deck, applied once during setup.
    Deck(DeckStep),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub adversary: Adversary,
    pub min_level: u8,
    pub effect: Effect,
}

impl Rule {
    const fn new(adversary: Adversary, min_level: u8, effect: Effect) -> Self {
        Self {
            adversary,
            min_level,
            effect,
        }
    }

    pub const fn applies(&self, adversary: Adversary, level: u8) -> bool {
        self.adversary as u8 == adversary as u8 && level >= self.min_level
    }
}

/// Ordered by adversary, then by level. Deck steps of one adversary run in
/// table order.
pub const RULES: &[Rule] = &[
    Rule::new(
        Adversary::BrandenburgPrussia,
        2,
        Effect::Deck(DeckStep::PromoteBottom {
            moved: Stage::III,
            above: Stage::II,
        }),
    ),
    Rule::new(
        Adversary::BrandenburgPrussia,
        3,
        Effect::Deck(DeckStep::RemoveFirst(Stage::I)),
    ),
    Rule::new(
        Adversary::BrandenburgPrussia,
        4,
        Effect::Deck(DeckStep::RemoveFirst(Stage::II)),
    ),
    Rule::new(
        Adversary::BrandenburgPrussia,
        5,
        Effect::Deck(DeckStep::RemoveFirst(Stage::I)),
    ),
    Rule::new(
        Adversary::BrandenburgPrussia,
        6,
        Effect::Deck(DeckStep::RemoveAll(Stage::I)),
    ),
    Rule::new(
        Adversary::HabsburgLivestock,
        3,
        Effect::Deck(DeckStep::RemoveFirst(Stage::I)),
    ),
    Rule::new(
        Adversary::HabsburgMines,
        4,
        Effect::Deck(DeckStep::ReplaceNth {
            stage: Stage::II,
            ordinal: 2,
            card: Card::STAGE_II_SALT_DEPOSITS,
        }),
    ),
    Rule::new(Adversary::HabsburgMines, 4, Effect::RevealsCoastalLands),
    Rule::new(
        Adversary::Russia,
        4,
        Effect::Deck(DeckStep::FollowEach {
            anchor: Stage::II,
            moved: Stage::III,
        }),
    ),
    Rule::new(Adversary::Russia, 5, Effect::Entrenched),
    Rule::new(
        Adversary::Scotland,
        2,
        Effect::Deck(DeckStep::ReplaceNth {
            stage: Stage::II,
            ordinal: 3,
            card: Card::STAGE_II_COASTAL,
        }),
    ),
    Rule::new(
        Adversary::Scotland,
        2,
        Effect::Deck(DeckStep::LiftAbove {
            marker: Card::STAGE_II_COASTAL,
            stage: Stage::II,
            count: 2,
        }),
    ),
    Rule::new(Adversary::Scotland, 2, Effect::RevealsCoastalLands),
    Rule::new(
        Adversary::Scotland,
        4,
        Effect::Deck(DeckStep::ReplaceBottom {
            replaced: Stage::I,
            with: Stage::III,
        }),
    ),
];

pub fn rules_for(adversary: Adversary) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |rule| rule.adversary == adversary)
}

/// Effects granted by `adversary` at `level`, in table order.
pub fn effects_at(adversary: Adversary, level: u8) -> impl Iterator<Item = Effect> {
    RULES
        .iter()
        .filter(move |rule| rule.applies(adversary, level))
        .map(|rule| rule.effect)
}

/// Non-structural effects of a game configuration, resolved once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActiveRules {
    reveals_coastal_lands: bool,
    entrenched: bool,
}

impl ActiveRules {
    pub fn resolve(config: &GameConfig) -> Self {
        let mut active = ActiveRules::default();
        for (adversary, level) in config.adversaries() {
            for effect in effects_at(adversary, level) {
                match effect {
                    Effect::RevealsCoastalLands => active.reveals_coastal_lands = true,
                    Effect::Entrenched => active.entrenched = true,
                    Effect::Deck(_) => {}
                }
            }
        }
        active
    }

    pub const fn reveals_coastal_lands(&self) -> bool {
        self.reveals_coastal_lands
    }

    pub const fn is_entrenched(&self) -> bool {
        self.entrenched
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveRules, Effect, RULES, effects_at, rules_for};
    use crate::game::config::{AdversarySlot, GameConfig};
    use crate::model::adversary::Adversary;

    #[test]
    fn effects_are_gated_by_level() {
        assert_eq!(effects_at(Adversary::BrandenburgPrussia, 1).count(), 0);
        assert_eq!(effects_at(Adversary::BrandenburgPrussia, 2).count(), 1);
        assert_eq!(effects_at(Adversary::BrandenburgPrussia, 6).count(), 5);
        assert_eq!(effects_at(Adversary::Scotland, 3).count(), 3);
    }

    #[test]
    fn adversaries_without_deck_rules_have_no_entries() {
        for adversary in [Adversary::England, Adversary::France, Adversary::Sweden] {
            assert_eq!(rules_for(adversary).count(), 0);
        }
    }

    #[test]
    fn table_is_sorted_by_level_within_each_adversary() {
        for adversary in Adversary::ALL {
            let levels: Vec<u8> = rules_for(adversary).map(|rule| rule.min_level).collect();
            assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]), "{adversary}");
        }
        assert!(RULES.iter().all(|rule| rule.min_level <= Adversary::MAX_LEVEL));
    }

    #[test]
    fn coastal_reveal_thresholds() {
        let cases = [
            (Adversary::Scotland, 1, false),
            (Adversary::Scotland, 2, true),
            (Adversary::HabsburgMines, 3, false),
            (Adversary::HabsburgMines, 4, true),
            (Adversary::Russia, 6, false),
        ];
        for (adversary, level, expected) in cases {
            let leading = GameConfig::new(AdversarySlot::new(adversary, level), AdversarySlot::NONE);
            let supporting =
                GameConfig::new(AdversarySlot::NONE, AdversarySlot::new(adversary, level));
            assert_eq!(ActiveRules::resolve(&leading).reveals_coastal_lands(), expected);
            assert_eq!(ActiveRules::resolve(&supporting).reveals_coastal_lands(), expected);
        }
    }

    #[test]
    fn entrenchment_requires_russia_five() {
        let russia4 = GameConfig::new(AdversarySlot::new(Adversary::Russia, 4), AdversarySlot::NONE);
        let russia5 = GameConfig::new(
            AdversarySlot::new(Adversary::Scotland, 6),
            AdversarySlot::new(Adversary::Russia, 5),
        );
        assert!(!ActiveRules::resolve(&russia4).is_entrenched());
        assert!(ActiveRules::resolve(&russia5).is_entrenched());
        assert!(effects_at(Adversary::Russia, 5).any(|effect| effect == Effect::Entrenched));
    }
}
