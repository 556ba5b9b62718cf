use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use invader_cli::logging::init_logging;
use invader_cli::report::{OutputFormat, render};
use invader_cli::runner::ScriptRunner;
use invader_cli::script::Script;
use invader_core::game::AdversarySlot;
use invader_core::model::Adversary;

/// Replays a scripted game against the invader deck tracker.
#[derive(Debug, Parser)]
#[command(
    name = "invader-cli",
    author,
    version,
    about = "Invader deck tracker and terrain predictor"
)]
struct Cli {
    /// Path to the YAML script.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Override the leading adversary.
    #[arg(long, value_name = "ADVERSARY")]
    leading: Option<Adversary>,

    /// Override the leading adversary's level.
    #[arg(long, value_name = "LEVEL")]
    leading_level: Option<u8>,

    /// Override the supporting adversary.
    #[arg(long, value_name = "ADVERSARY")]
    supporting: Option<Adversary>,

    /// Override the supporting adversary's level.
    #[arg(long, value_name = "LEVEL")]
    supporting_level: Option<u8>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit after validating the script (no actions are played).
    #[arg(long)]
    validate_only: bool,

    /// Override the script's logging level.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn override_slot(slot: &mut AdversarySlot, adversary: Option<Adversary>, level: Option<u8>) {
    if let Some(adversary) = adversary {
        slot.adversary = Some(adversary);
    }
    if let Some(level) = level {
        slot.level = level;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut script = Script::from_path(&cli.script)?;

    override_slot(&mut script.game.leading, cli.leading, cli.leading_level);
    override_slot(&mut script.game.supporting, cli.supporting, cli.supporting_level);
    if let Some(level) = cli.log_level {
        script.logging.level = level;
    }

    script
        .validate()
        .with_context(|| format!("validating {}", cli.script.display()))?;

    if cli.validate_only {
        println!(
            "Script {} is valid ({} action{}).",
            cli.script.display(),
            script.actions.len(),
            if script.actions.len() == 1 { "" } else { "s" }
        );
        return Ok(());
    }

    let _logging_guard = init_logging(&script.logging)?;
    let report = ScriptRunner::new(&script).run();
    let rendered = render(&report, cli.format).context("rendering report")?;
    print!("{rendered}");
    if cli.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
