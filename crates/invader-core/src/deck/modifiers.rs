//! Setup steps that adversaries apply to the invader deck.
//!
//! Each step is a pure function from one sequence to the next. Steps whose
//! anchors are missing leave the sequence untouched.

use crate::deck::sequence::{CardSequence, DeckEntry};
use crate::model::card::Card;
use crate::model::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStep {
    /// Move the bottom `moved` card directly above the first `above` card.
    PromoteBottom { moved: Stage, above: Stage },
    RemoveFirst(Stage),
    RemoveAll(Stage),
    /// Put `card` in place of the `ordinal`-th (1-based) card of `stage`.
    ReplaceNth {
        stage: Stage,
        ordinal: usize,
        card: Card,
    },
    /// Place the bottom `moved` card after each `anchor` card, top to bottom.
    FollowEach { anchor: Stage, moved: Stage },
    /// Move each of the first `count` `stage` cards above `marker` up one position.
    LiftAbove {
        marker: Card,
        stage: Stage,
        count: usize,
    },
    /// Put the bottom `with` card in place of the bottom `replaced` card.
    ReplaceBottom { replaced: Stage, with: Stage },
}

impl DeckStep {
    pub fn apply(self, deck: CardSequence) -> CardSequence {
        match self {
            DeckStep::PromoteBottom { moved, above } => promote_bottom(deck, moved, above),
            DeckStep::RemoveFirst(stage) => remove_first(deck, stage),
            DeckStep::RemoveAll(stage) => remove_all(deck, stage),
            DeckStep::ReplaceNth {
                stage,
                ordinal,
                card,
            } => replace_nth(deck, stage, ordinal, card),
            DeckStep::FollowEach { anchor, moved } => follow_each(deck, anchor, moved),
            DeckStep::LiftAbove {
                marker,
                stage,
                count,
            } => lift_above(deck, marker, stage, count),
            DeckStep::ReplaceBottom { replaced, with } => replace_bottom(deck, replaced, with),
        }
    }
}

pub fn promote_bottom(mut deck: CardSequence, moved: Stage, above: Stage) -> CardSequence {
    if let (Some(anchor), Some(from)) = (deck.first_of(above), deck.last_of(moved)) {
        if anchor < from {
            deck.relocate_above(from, anchor);
        }
    }
    deck
}

pub fn remove_first(mut deck: CardSequence, stage: Stage) -> CardSequence {
    if let Some(index) = deck.first_of(stage) {
        deck.remove(index);
    }
    deck
}

pub fn remove_all(mut deck: CardSequence, stage: Stage) -> CardSequence {
    while let Some(index) = deck.first_of(stage) {
        deck.remove(index);
    }
    deck
}

pub fn replace_nth(mut deck: CardSequence, stage: Stage, ordinal: usize, card: Card) -> CardSequence {
    if let Some(index) = deck.nth_of(stage, ordinal) {
        deck.replace(index, DeckEntry::special(card));
    }
    deck
}

pub fn follow_each(mut deck: CardSequence, anchor: Stage, moved: Stage) -> CardSequence {
    // Anchors are consumed strictly top to bottom, so the loop ends once the
    // scan runs past the last anchor.
    let mut scan_from = 0;
    while let Some(at) = deck.first_of_from(anchor, scan_from) {
        let Some(from) = deck.last_of(moved) else {
            break;
        };
        if from < at {
            break;
        }
        deck.relocate_above(from, at + 1);
        scan_from = at + 1;
    }
    deck
}

pub fn lift_above(mut deck: CardSequence, marker: Card, stage: Stage, count: usize) -> CardSequence {
    let Some(limit) = deck.position(|entry| entry.card == marker) else {
        return deck;
    };
    let lifted: Vec<usize> = deck.entries()[..limit]
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.stage() == stage)
        .map(|(index, _)| index)
        .take(count)
        .collect();

    for (rank, index) in lifted.into_iter().enumerate() {
        // A card never climbs over one lifted before it.
        if index > rank {
            deck.swap(index - 1, index);
            deck.mark_special(index - 1);
        }
    }
    deck
}

pub fn replace_bottom(mut deck: CardSequence, replaced: Stage, with: Stage) -> CardSequence {
    if let (Some(target), Some(from)) = (deck.last_of(replaced), deck.last_of(with)) {
        if target < from {
            let mut entry = deck.remove(from);
            entry.specially_placed = true;
            deck.replace(target, entry);
        }
    }
    deck
}
