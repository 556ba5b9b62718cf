use crate::deck::notation;
use crate::model::card::Card;
use crate::model::stage::Stage;
use core::fmt;
use serde::{Deserialize, Serialize};

/// An undrawn card position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Card,
    /// Placed by an adversary rule rather than the base ordering.
    pub specially_placed: bool,
}

impl DeckEntry {
    pub const fn new(card: Card) -> Self {
        Self {
            card,
            specially_placed: false,
        }
    }

    pub const fn special(card: Card) -> Self {
        Self {
            card,
            specially_placed: true,
        }
    }

    pub const fn stage(&self) -> Stage {
        self.card.stage()
    }
}

/// Undrawn cards, top of the deck first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSequence {
    entries: Vec<DeckEntry>,
}

impl CardSequence {
    pub const BASE_COUNTS: [(Stage, usize); 3] = [(Stage::I, 3), (Stage::II, 4), (Stage::III, 5)];

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The 12 card setup before adversaries: 3 stage I, 4 stage II and 5
    /// stage III cards, all face down.
    pub fn base() -> Self {
        let mut entries = Vec::with_capacity(12);
        for (stage, count) in Self::BASE_COUNTS {
            entries.extend((0..count).map(|_| DeckEntry::new(Card::unknown(stage))));
        }
        Self { entries }
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            entries: cards.into_iter().map(DeckEntry::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.iter()
    }

    pub fn top(&self) -> Option<&DeckEntry> {
        self.entries.first()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.entries.iter().map(DeckEntry::stage).collect()
    }

    pub fn position(&self, predicate: impl Fn(&DeckEntry) -> bool) -> Option<usize> {
        self.entries.iter().position(predicate)
    }

    pub fn first_of(&self, stage: Stage) -> Option<usize> {
        self.first_of_from(stage, 0)
    }

    /// First entry of `stage` at or below index `from`.
    pub fn first_of_from(&self, stage: Stage, from: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, entry)| entry.stage() == stage)
            .map(|(index, _)| index)
    }

    pub fn last_of(&self, stage: Stage) -> Option<usize> {
        self.entries.iter().rposition(|entry| entry.stage() == stage)
    }

    /// Index of the `ordinal`-th (1-based) entry of `stage`, counting from the top.
    pub fn nth_of(&self, stage: Stage, ordinal: usize) -> Option<usize> {
        let skip = ordinal.checked_sub(1)?;
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.stage() == stage)
            .nth(skip)
            .map(|(index, _)| index)
    }

    pub fn insert(&mut self, index: usize, entry: DeckEntry) {
        self.entries.insert(index, entry);
    }

    pub fn remove(&mut self, index: usize) -> DeckEntry {
        self.entries.remove(index)
    }

    pub fn replace(&mut self, index: usize, entry: DeckEntry) -> DeckEntry {
        std::mem::replace(&mut self.entries[index], entry)
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
    }

    pub fn mark_special(&mut self, index: usize) {
        self.entries[index].specially_placed = true;
    }

    /// Moves the entry at `from` so it sits directly above the entry that is
    /// currently at `before`, marking it specially placed.
    pub fn relocate_above(&mut self, from: usize, before: usize) {
        let mut entry = self.entries.remove(from);
        entry.specially_placed = true;
        let target = if from < before { before - 1 } else { before };
        self.entries.insert(target, entry);
    }

    pub fn pop_top(&mut self) -> Option<DeckEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn set_top(&mut self, entry: DeckEntry) -> Option<DeckEntry> {
        self.entries
            .first_mut()
            .map(|top| std::mem::replace(top, entry))
    }

    pub fn layout(&self) -> String {
        notation::layout(
            self.entries
                .iter()
                .map(|entry| (entry.card, entry.specially_placed)),
        )
    }
}

impl fmt::Display for CardSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.layout())
    }
}
