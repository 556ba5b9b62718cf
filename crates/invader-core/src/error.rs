use thiserror::Error;

/// Recoverable failures reported by the estimator and the deck.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvaderError {
    #[error("not a valid invader card for this action")]
    InvalidCard,
    #[error("the invader deck is empty")]
    EmptyDeck,
    #[error("the invader card must be within one stage to return")]
    NotReturnable,
    #[error("only Russia 5+ is entrenched in the face of fear")]
    NotEntrenched,
}

pub type Result<T> = core::result::Result<T, InvaderError>;
