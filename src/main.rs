//! Console entry point for The Judge.
//!
//! Parses the command line, installs logging on stderr, and runs one
//! interactive session on stdin/stdout.

use std::io;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use the_judge::cli::{CliOptions, Session, Typewriter};
use the_judge::core::GameRng;
use the_judge::rules::JudgeRules;

fn main() -> anyhow::Result<()> {
    let options =
        CliOptions::parse(std::env::args().skip(1)).context("invalid command-line arguments")?;
    if options.help {
        println!("{}", CliOptions::USAGE);
        return Ok(());
    }

    // Logs go to stderr so they never interleave with the game text.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let rng = options.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let delay = if options.fast {
        Duration::ZERO
    } else {
        Typewriter::<io::Stdout>::DEFAULT_DELAY
    };
    info!(seed = rng.seed(), fast = options.fast, "starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        JudgeRules::standard(),
        rng,
        stdin.lock(),
        Typewriter::new(stdout.lock(), delay),
    );

    let summary = session.run().context("session aborted")?;
    info!(
        result = ?summary.result,
        turns_survived = summary.turns_survived,
        ending = ?summary.ending,
        "session finished"
    );
    Ok(())
}
