use core::fmt;
use core::str::FromStr;
use invader_core::model::{Card, ParseCardError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One scripted step, written as `<verb> [argument]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    Draw(Card),
    Return(Card),
    Reveal(Card),
    Entrenched(Card),
    /// Stage number as typed; out-of-range values are rejected by the pool.
    Predict(u8),
    IgnoreRisingInterest,
    DistractHardworkingSettlers,
    Show,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("empty action")]
    Empty,
    #[error("unknown action `{0}`")]
    UnknownVerb(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),
    #[error("invalid stage `{0}`")]
    InvalidStage(String),
    #[error(transparent)]
    Card(#[from] ParseCardError),
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split_whitespace();
        let verb = parts.next().ok_or(ParseActionError::Empty)?;
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(ParseActionError::UnexpectedArgument(value.to_string()));
        }

        let card = |argument: Option<&str>| -> Result<Card, ParseActionError> {
            let raw = argument.ok_or_else(|| ParseActionError::MissingArgument(verb.to_string()))?;
            Ok(raw.parse::<Card>()?)
        };
        let bare = |action: Action| match argument {
            None => Ok(action),
            Some(_) => Err(ParseActionError::UnexpectedArgument(value.to_string())),
        };

        match verb.to_ascii_lowercase().as_str() {
            "draw" => Ok(Action::Draw(card(argument)?)),
            "return" => Ok(Action::Return(card(argument)?)),
            "reveal" => Ok(Action::Reveal(card(argument)?)),
            "entrenched" => Ok(Action::Entrenched(card(argument)?)),
            "predict" => {
                let raw = argument.ok_or_else(|| ParseActionError::MissingArgument(verb.to_string()))?;
                raw.parse::<u8>()
                    .map(Action::Predict)
                    .map_err(|_| ParseActionError::InvalidStage(raw.to_string()))
            }
            "ignore-rising-interest" => bare(Action::IgnoreRisingInterest),
            "distract-hardworking-settlers" => bare(Action::DistractHardworkingSettlers),
            "show" => bare(Action::Show),
            _ => Err(ParseActionError::UnknownVerb(verb.to_string())),
        }
    }
}

impl TryFrom<String> for Action {
    type Error = ParseActionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Draw(card) => write!(f, "draw {card}"),
            Action::Return(card) => write!(f, "return {card}"),
            Action::Reveal(card) => write!(f, "reveal {card}"),
            Action::Entrenched(card) => write!(f, "entrenched {card}"),
            Action::Predict(stage) => write!(f, "predict {stage}"),
            Action::IgnoreRisingInterest => f.write_str("ignore-rising-interest"),
            Action::DistractHardworkingSettlers => f.write_str("distract-hardworking-settlers"),
            Action::Show => f.write_str("show"),
        }
    }
}
