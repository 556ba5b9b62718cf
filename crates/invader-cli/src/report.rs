use std::fmt::Write;

use clap::ValueEnum;
use invader_core::game::AdversarySlot;
use invader_core::pool::Prediction;

use crate::runner::{Outcome, RunReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(report: &RunReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

pub fn render_text(report: &RunReport) -> String {
    let state = &report.final_state;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "leading: {}  supporting: {}",
        slot_label(&state.config.leading),
        slot_label(&state.config.supporting)
    );

    for step in &report.steps {
        let action = step.action.to_string();
        let _ = match &step.outcome {
            Outcome::Deck { undrawn, drawn } => writeln!(
                out,
                "{:>3}. {action:<34} {undrawn} | {}",
                step.step,
                empty_dash(drawn)
            ),
            Outcome::Revealed { card } => {
                writeln!(out, "{:>3}. {action:<34} revealed {card}", step.step)
            }
            Outcome::Prediction { terrains, .. } => writeln!(
                out,
                "{:>3}. {action:<34} {}",
                step.step,
                prediction_line(terrains)
            ),
            Outcome::Failed { error } => {
                writeln!(out, "{:>3}. {action:<34} error: {error}", step.step)
            }
        };
    }

    let _ = writeln!(out, "undrawn: {}", empty_dash(&state.undrawn_layout));
    let _ = writeln!(out, "drawn:   {}", empty_dash(&state.drawn_layout));
    let _ = writeln!(
        out,
        "{} step{}, {} refused",
        report.steps.len(),
        if report.steps.len() == 1 { "" } else { "s" },
        report.failures
    );
    out
}

fn slot_label(slot: &AdversarySlot) -> String {
    match slot.adversary {
        Some(adversary) => format!("{adversary} {}", slot.level),
        None => "none".to_string(),
    }
}

fn prediction_line(terrains: &Prediction) -> String {
    if terrains.is_empty() {
        return "no terrain left".to_string();
    }
    terrains
        .iter()
        .map(|(terrain, likelihood)| format!("{terrain}={likelihood:.3}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn empty_dash(layout: &str) -> &str {
    if layout.is_empty() { "-" } else { layout }
}
