use super::config::GameConfig;
use super::session::Session;
use crate::deck::{DeckEntry, DrawnEntry};
use crate::model::card::Card;
use crate::model::stage::Stage;
use crate::pool::Prediction;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StagePrediction {
    pub stage: Stage,
    pub terrains: Prediction,
}

/// Read-only view of a session for display or export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub config: GameConfig,
    pub entrenched: bool,
    pub revealed: Vec<Card>,
    pub undrawn_layout: String,
    pub drawn_layout: String,
    pub undrawn: Vec<DeckEntry>,
    pub drawn: Vec<DrawnEntry>,
    pub predictions: Vec<StagePrediction>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        let pool = session.cardpool();
        let deck = session.deck();
        SessionSnapshot {
            config: *session.config(),
            entrenched: session.rules().is_entrenched(),
            revealed: Stage::ALL
                .into_iter()
                .flat_map(|stage| pool.revealed(stage))
                .collect(),
            undrawn_layout: deck.undrawn_layout(),
            drawn_layout: deck.drawn_layout(),
            undrawn: deck.undrawn().entries().to_vec(),
            drawn: deck.drawn().to_vec(),
            predictions: Stage::ALL
                .into_iter()
                .map(|stage| StagePrediction {
                    stage,
                    terrains: pool.forecast(stage),
                })
                .collect(),
        }
    }

    pub fn to_json(session: &Session) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(session))
    }
}
