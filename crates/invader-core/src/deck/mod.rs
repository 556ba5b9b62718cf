//! The invader deck: setup ordering, adversary modifiers and gameplay state.
//!
//! - `sequence`: owned ordered sequence of undrawn entries with positional primitives.
//! - `modifiers`: pure setup steps over a sequence.
//! - `registry`: per-adversary modifiers assembled from the rules table.
//! - `state`: the deck state machine used during play.
//! - `notation`: compact layout strings for sequences.

pub mod modifiers;
pub mod notation;
pub mod registry;
mod sequence;
mod state;

pub use modifiers::DeckStep;
pub use registry::{Modifier, construct, modifier_for};
pub use sequence::{CardSequence, DeckEntry};
pub use state::{DrawnEntry, InvaderDeck};
