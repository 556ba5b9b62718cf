use crate::deck::notation;
use crate::deck::registry;
use crate::deck::sequence::{CardSequence, DeckEntry};
use crate::error::{InvaderError, Result};
use crate::game::config::GameConfig;
use crate::model::card::Card;
use crate::model::stage::Stage;
use crate::rules::ActiveRules;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A card that left the deck face up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnEntry {
    pub card: Card,
    /// Still within one stage of the deck's top card, so it may be swapped back.
    pub past_returnable: bool,
}

impl DrawnEntry {
    const fn new(card: Card) -> Self {
        Self {
            card,
            past_returnable: false,
        }
    }
}

/// Undrawn sequence plus drawn history for one game.
///
/// Every operation validates before it mutates, so a reported error leaves
/// the deck unchanged. Drawn returnability is recomputed after each change.
#[derive(Debug, Clone, PartialEq)]
pub struct InvaderDeck {
    rules: ActiveRules,
    undrawn: CardSequence,
    drawn: Vec<DrawnEntry>,
}

impl InvaderDeck {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rules(config, ActiveRules::resolve(config))
    }

    pub fn with_rules(config: &GameConfig, rules: ActiveRules) -> Self {
        Self {
            rules,
            undrawn: registry::construct(config),
            drawn: Vec::new(),
        }
    }

    /// Deck resumed mid-game from known positions.
    pub fn from_parts(rules: ActiveRules, undrawn: CardSequence, drawn: Vec<Card>) -> Self {
        let mut deck = Self {
            rules,
            undrawn,
            drawn: drawn.into_iter().map(DrawnEntry::new).collect(),
        };
        deck.refresh_returnable();
        deck
    }

    pub fn undrawn(&self) -> &CardSequence {
        &self.undrawn
    }

    pub fn drawn(&self) -> &[DrawnEntry] {
        &self.drawn
    }

    pub fn top(&self) -> Option<&DeckEntry> {
        self.undrawn.top()
    }

    pub fn remaining(&self) -> usize {
        self.undrawn.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.undrawn.is_empty()
    }

    pub fn rules(&self) -> ActiveRules {
        self.rules
    }

    pub fn undrawn_layout(&self) -> String {
        self.undrawn.layout()
    }

    pub fn drawn_layout(&self) -> String {
        notation::layout(
            self.drawn
                .iter()
                .map(|entry| (entry.card, entry.past_returnable)),
        )
    }

    /// Records the card flipped from the top of the deck. Only its stage is
    /// checked against the top entry.
    pub fn draw(&mut self, card: Card) -> Result<()> {
        let top = self.undrawn.top().ok_or(InvaderError::EmptyDeck)?;
        if card.stage() != top.stage() {
            return Err(InvaderError::InvalidCard);
        }

        self.undrawn.pop_top();
        self.drawn.push(DrawnEntry::new(card));
        self.refresh_returnable();
        debug!(%card, remaining = self.undrawn.len(), "drew invader card");
        Ok(())
    }

    /// Swaps a drawn card back onto the top of the deck; the card that was on
    /// top takes its place in the drawn history.
    pub fn return_card(&mut self, card: Card) -> Result<()> {
        let index = self
            .drawn
            .iter()
            .position(|entry| entry.card == card)
            .ok_or(InvaderError::InvalidCard)?;
        if !self.drawn[index].past_returnable {
            return Err(InvaderError::NotReturnable);
        }
        let top = self.undrawn.top().ok_or(InvaderError::NotReturnable)?.card;

        self.drawn[index] = DrawnEntry {
            card: top,
            past_returnable: true,
        };
        self.undrawn.set_top(DeckEntry::new(card));
        self.refresh_returnable();
        debug!(%card, replaced_by = %top, "returned invader card to the deck");
        Ok(())
    }

    /// Discards the top card unseen, unless an adversary placed it there.
    pub fn ignore_rising_interest(&mut self) {
        match self.undrawn.top() {
            Some(top) if !top.specially_placed => {}
            _ => return,
        }

        self.undrawn.pop_top();
        self.refresh_returnable();
        debug!(remaining = self.undrawn.len(), "ignored top invader card");
    }

    /// Removes the top-most stage II card and the top-most stage III card.
    pub fn distract_hardworking_settlers(&mut self) {
        let mut targets: Vec<usize> = [
            self.undrawn.first_of(Stage::II),
            self.undrawn.first_of(Stage::III),
        ]
        .into_iter()
        .flatten()
        .collect();
        if targets.is_empty() {
            return;
        }

        // Higher index first so the other index stays valid.
        targets.sort_unstable_by(|a, b| b.cmp(a));
        for index in targets {
            self.undrawn.remove(index);
        }
        self.refresh_returnable();
        debug!(remaining = self.undrawn.len(), "distracted hardworking settlers");
    }

    /// Reveals a stage II or III card without drawing it.
    pub fn entrenched(&mut self, card: Card) -> Result<()> {
        if !self.rules.is_entrenched() {
            return Err(InvaderError::NotEntrenched);
        }
        if !matches!(card.stage(), Stage::II | Stage::III) {
            return Err(InvaderError::InvalidCard);
        }

        self.drawn.push(DrawnEntry::new(card));
        self.refresh_returnable();
        debug!(%card, "entrenched invader card");
        Ok(())
    }

    fn refresh_returnable(&mut self) {
        let top = self.undrawn.top().map(DeckEntry::stage);
        for entry in &mut self.drawn {
            entry.past_returnable = top.is_some_and(|stage| entry.card.stage().distance(stage) <= 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InvaderDeck;
    use crate::deck::sequence::CardSequence;
    use crate::error::InvaderError;
    use crate::game::config::GameConfig;
    use crate::model::adversary::Adversary;
    use crate::model::card::Card;
    use crate::model::stage::Stage;
    use crate::rules::ActiveRules;

    fn placeholders(stages: &[u8]) -> Vec<Card> {
        stages
            .iter()
            .map(|&n| Card::unknown(Stage::from_number(n).unwrap()))
            .collect()
    }

    fn deck_from(drawn: Vec<Card>, undrawn: Vec<Card>) -> InvaderDeck {
        InvaderDeck::from_parts(
            ActiveRules::default(),
            CardSequence::from_cards(undrawn),
            drawn,
        )
    }

    fn draw_stages(deck: &mut InvaderDeck, stages: &[u8]) {
        for card in placeholders(stages) {
            deck.draw(card).unwrap();
        }
    }

    #[test]
    fn draw_from_empty_deck_fails() {
        let mut deck = deck_from(Vec::new(), Vec::new());
        assert!(deck.is_exhausted());
        assert_eq!(deck.draw(Card::STAGE_I_JUNGLE), Err(InvaderError::EmptyDeck));
    }

    #[test]
    fn draw_checks_stage_of_top_card() {
        let mut deck = InvaderDeck::new(&GameConfig::default());
        assert_eq!(deck.draw(Card::STAGE_III_UNKNOWN), Err(InvaderError::InvalidCard));
        assert_eq!(deck.remaining(), 12);
        assert!(deck.drawn().is_empty());
    }

    #[test]
    fn drawing_every_card_exhausts_the_deck() {
        let mut deck = InvaderDeck::new(&GameConfig::default());
        draw_stages(&mut deck, &[1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3]);
        assert!(deck.is_exhausted());
        assert_eq!(deck.drawn_layout(), "111-2222-33333");
        assert_eq!(deck.draw(Card::STAGE_III_UNKNOWN), Err(InvaderError::EmptyDeck));
    }

    #[test]
    fn draw_marks_cards_within_one_stage_of_the_top() {
        let cases: [(&str, Vec<Card>, Vec<Card>, &str); 7] = [
            ("same", Vec::new(), placeholders(&[1, 1]), "1*"),
            ("up", Vec::new(), placeholders(&[2, 1]), "2*"),
            ("down", Vec::new(), placeholders(&[2, 3]), "2*"),
            ("two down", Vec::new(), placeholders(&[1, 3]), "1"),
            ("two up", Vec::new(), placeholders(&[3, 1]), "3"),
            ("emptied", Vec::new(), placeholders(&[3]), "3"),
            (
                "disparate",
                placeholders(&[2, 3, 2, 1]),
                placeholders(&[1, 3]),
                "2*-3*-2*-11",
            ),
        ];
        for (name, drawn, undrawn, expected) in cases {
            let first = undrawn[0];
            let mut deck = deck_from(drawn, undrawn);
            deck.draw(first).unwrap();
            assert_eq!(deck.drawn_layout(), expected, "{name}");
        }
    }

    #[test]
    fn return_requires_a_drawn_card() {
        let mut deck = InvaderDeck::new(&GameConfig::default());
        deck.draw(Card::STAGE_I_WETLAND).unwrap();
        assert_eq!(
            deck.return_card(Card::STAGE_I_JUNGLE),
            Err(InvaderError::InvalidCard)
        );
    }

    #[test]
    fn return_outside_the_window_fails() {
        let mut deck = InvaderDeck::new(&GameConfig::default());
        draw_stages(&mut deck, &[1, 1, 1, 2, 2, 2, 2, 3]);
        let before = deck.clone();
        assert_eq!(
            deck.return_card(Card::STAGE_I_UNKNOWN),
            Err(InvaderError::NotReturnable)
        );
        assert_eq!(deck, before);
    }

    #[test]
    fn return_swaps_with_the_top_card() {
        let cases = [
            (
                "basic",
                Vec::new(),
                vec![Card::STAGE_I_JUNGLE, Card::STAGE_I_UNKNOWN],
                Card::STAGE_I_JUNGLE,
                "1*",
            ),
            (
                "many",
                vec![Card::STAGE_I_JUNGLE, Card::STAGE_I_WETLAND, Card::STAGE_I_MOUNTAIN],
                vec![Card::STAGE_I_SANDS, Card::STAGE_II_UNKNOWN],
                Card::STAGE_I_MOUNTAIN,
                "1*1*-2*-1*",
            ),
            (
                "two away",
                vec![
                    Card::STAGE_I_JUNGLE,
                    Card::STAGE_I_WETLAND,
                    Card::STAGE_II_MOUNTAIN,
                    Card::STAGE_III_MOUNTAIN_WETLAND,
                ],
                vec![Card::STAGE_II_SANDS, Card::STAGE_III_UNKNOWN],
                Card::STAGE_III_MOUNTAIN_WETLAND,
                "11-2*-3*-2*",
            ),
            (
                "two away bridge",
                vec![
                    Card::STAGE_I_JUNGLE,
                    Card::STAGE_I_WETLAND,
                    Card::STAGE_II_MOUNTAIN,
                    Card::STAGE_III_MOUNTAIN_WETLAND,
                ],
                vec![Card::STAGE_II_SANDS, Card::STAGE_III_UNKNOWN],
                Card::STAGE_II_MOUNTAIN,
                "1*1*-3*3*-2*",
            ),
        ];
        for (name, drawn, undrawn, returned, expected) in cases {
            let first = undrawn[0];
            let mut deck = deck_from(drawn, undrawn);
            deck.draw(first).unwrap();
            let remaining = deck.remaining();

            deck.return_card(returned).unwrap();

            assert_eq!(deck.top().map(|entry| entry.card), Some(returned), "{name}");
            assert_eq!(deck.remaining(), remaining, "{name}");
            assert_eq!(deck.drawn_layout(), expected, "{name}");
        }
    }

    #[test]
    fn ignore_skips_plain_top_cards_only() {
        let mut deck = InvaderDeck::new(&GameConfig::led_by(Adversary::BrandenburgPrussia, 6));
        deck.ignore_rising_interest();
        assert_eq!(deck.undrawn_layout(), "3*-222-3333");

        deck.draw(Card::STAGE_III_JUNGLE_SANDS).unwrap();
        deck.ignore_rising_interest();
        assert_eq!(deck.undrawn_layout(), "22-3333");
        assert_eq!(deck.drawn_layout(), "3*");

        let mut empty = deck_from(Vec::new(), Vec::new());
        empty.ignore_rising_interest();
        assert!(empty.is_exhausted());
    }

    #[test]
    fn distract_removes_top_most_stage_two_and_three() {
        let mut deck = InvaderDeck::new(&GameConfig::led_by(Adversary::Russia, 4));
        deck.distract_hardworking_settlers();
        assert_eq!(deck.undrawn_layout(), "111-2-3*-2-3*-2-3*3");

        let mut only_one = deck_from(Vec::new(), placeholders(&[1, 3, 3]));
        only_one.distract_hardworking_settlers();
        assert_eq!(only_one.undrawn_layout(), "1-3");

        let mut untouched = deck_from(Vec::new(), placeholders(&[1]));
        untouched.distract_hardworking_settlers();
        assert_eq!(untouched.undrawn_layout(), "1");
    }

    #[test]
    fn entrenched_needs_russia_five_and_a_late_stage_card() {
        let mut plain = InvaderDeck::new(&GameConfig::led_by(Adversary::Scotland, 6));
        assert_eq!(
            plain.entrenched(Card::STAGE_II_MOUNTAIN),
            Err(InvaderError::NotEntrenched)
        );

        let mut russia = InvaderDeck::new(&GameConfig::led_by(Adversary::Russia, 5));
        let remaining = russia.remaining();
        assert_eq!(
            russia.entrenched(Card::STAGE_I_MOUNTAIN),
            Err(InvaderError::InvalidCard)
        );
        russia.entrenched(Card::STAGE_II_MOUNTAIN).unwrap();
        assert_eq!(russia.remaining(), remaining);
        assert_eq!(russia.drawn().len(), 1);
        // Top of a fresh Russia deck is stage I.
        assert!(russia.drawn()[0].past_returnable);
    }
}
