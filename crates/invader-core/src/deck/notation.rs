//! Compact layout strings such as `111-3*-2222-3333`.
//!
//! One symbol per card: the stage number, `C` for Coastal Lands or `S` for
//! Salt Deposits. A trailing `*` marks a flagged entry (specially placed in
//! the deck, returnable in the drawn pile). Runs of different stages are
//! separated by `-`.

use crate::model::card::Card;

pub fn symbol(card: Card) -> char {
    if card.is_coastal() {
        'C'
    } else if card.is_salt_deposits() {
        'S'
    } else {
        char::from(b'0' + card.stage().number())
    }
}

pub fn layout(entries: impl IntoIterator<Item = (Card, bool)>) -> String {
    let mut out = String::new();
    let mut previous = None;
    for (card, flagged) in entries {
        let stage = card.stage();
        if previous.is_some_and(|prev| prev != stage) {
            out.push('-');
        }
        out.push(symbol(card));
        if flagged {
            out.push('*');
        }
        previous = Some(stage);
    }
    out
}
