use crate::deck::modifiers::DeckStep;
use crate::deck::sequence::CardSequence;
use crate::game::config::GameConfig;
use crate::model::adversary::Adversary;
use crate::rules::{self, Effect};
use tracing::{debug, trace};

/// Setup modifier of one adversary: its deck steps from the rules table,
/// gated by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    adversary: Adversary,
}

impl Modifier {
    pub fn steps(&self, level: u8) -> impl Iterator<Item = DeckStep> {
        rules::effects_at(self.adversary, level).filter_map(|effect| match effect {
            Effect::Deck(step) => Some(step),
            Effect::RevealsCoastalLands | Effect::Entrenched => None,
        })
    }

    pub fn apply(&self, deck: CardSequence, level: u8) -> CardSequence {
        self.steps(level).fold(deck, |deck, step| {
            let deck = step.apply(deck);
            trace!(adversary = %self.adversary, ?step, layout = %deck, "applied deck step");
            deck
        })
    }
}

/// Deck modifier for `adversary`, if it changes the deck at any level.
pub fn modifier_for(adversary: Adversary) -> Option<Modifier> {
    rules::rules_for(adversary)
        .any(|rule| matches!(rule.effect, Effect::Deck(_)))
        .then_some(Modifier { adversary })
}

/// Builds the starting deck: the base sequence, then the supporting
/// adversary's modifier, then the leading adversary's.
pub fn construct(config: &GameConfig) -> CardSequence {
    let deck = config
        .adversaries()
        .fold(CardSequence::base(), |deck, (adversary, level)| {
            match modifier_for(adversary) {
                Some(modifier) => modifier.apply(deck, level),
                None => deck,
            }
        });
    debug!(layout = %deck, cards = deck.len(), "constructed invader deck");
    deck
}
