use invader_core::game::{GameConfig, Session, SessionSnapshot};
use invader_core::model::Card;
use invader_core::pool::Prediction;
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::action::Action;
use crate::script::Script;

/// What one action did to the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Deck { undrawn: String, drawn: String },
    Revealed { card: Card },
    Prediction { stage: u8, terrains: Prediction },
    /// The operation was refused; the session is unchanged.
    Failed { error: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: Action,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub failures: usize,
    #[serde(rename = "final")]
    pub final_state: SessionSnapshot,
}

/// Plays a script's actions, in order, against a fresh session.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    config: GameConfig,
    actions: Vec<Action>,
}

impl ScriptRunner {
    pub fn new(script: &Script) -> Self {
        Self {
            config: script.game,
            actions: script.actions.clone(),
        }
    }

    pub fn run(&self) -> RunReport {
        let span = info_span!(
            "script",
            leading = ?self.config.leading,
            supporting = ?self.config.supporting
        );
        let _entered = span.enter();

        let mut session = Session::new(self.config);
        let steps: Vec<StepReport> = self
            .actions
            .iter()
            .enumerate()
            .map(|(index, &action)| {
                let outcome = apply(&mut session, action);
                if let Outcome::Failed { error } = &outcome {
                    warn!(step = index + 1, %action, %error, "action refused");
                } else {
                    info!(step = index + 1, %action, "action applied");
                }
                StepReport {
                    step: index + 1,
                    action,
                    outcome,
                }
            })
            .collect();

        let failures = steps.iter().filter(|step| step.outcome.is_failure()).count();
        info!(steps = steps.len(), failures, "script finished");
        RunReport {
            steps,
            failures,
            final_state: SessionSnapshot::capture(&session),
        }
    }
}

/// Forwards one action to the session. Errors become `Outcome::Failed`.
pub fn apply(session: &mut Session, action: Action) -> Outcome {
    let result = match action {
        Action::Draw(card) => session.deck_mut().draw(card),
        Action::Return(card) => session.deck_mut().return_card(card),
        Action::Entrenched(card) => session.deck_mut().entrenched(card),
        Action::IgnoreRisingInterest => {
            session.deck_mut().ignore_rising_interest();
            Ok(())
        }
        Action::DistractHardworkingSettlers => {
            session.deck_mut().distract_hardworking_settlers();
            Ok(())
        }
        Action::Show => Ok(()),
        Action::Reveal(card) => {
            return match session.cardpool_mut().reveal(card) {
                Ok(()) => Outcome::Revealed { card },
                Err(err) => failed(err),
            };
        }
        Action::Predict(stage) => {
            return match session.cardpool().predict(stage) {
                Ok(terrains) => Outcome::Prediction { stage, terrains },
                Err(err) => failed(err),
            };
        }
    };

    match result {
        Ok(()) => Outcome::Deck {
            undrawn: session.deck().undrawn_layout(),
            drawn: session.deck().drawn_layout(),
        },
        Err(err) => failed(err),
    }
}

fn failed(err: impl std::fmt::Display) -> Outcome {
    Outcome::Failed {
        error: err.to_string(),
    }
}
