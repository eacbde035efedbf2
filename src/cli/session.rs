//! The interactive game loop.
//!
//! A `Session` owns one game: the rules, the state, the dice, and the two
//! ends of the console. It is generic over its input and output so tests
//! can script a whole game with a `Cursor` and read back a `Vec<u8>`.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use super::headlines::Newsroom;
use super::input::{parse_command, parse_confirmation, Command, InputError};
use super::render::{danger_stars, detective_line, opinion_meter, signed_percent, Typewriter};
use crate::cases::Criminal;
use crate::core::{Action, ActionRecord, GameRng, GameState};
use crate::rules::{
    Ending, ExecutionReport, GameResult, GameSummary, JudgeRules, RulesError, SkipReport,
    TurnReport,
};

/// Errors that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the console failed.
    #[error("console I/O failed")]
    Io(#[from] io::Error),

    /// The rules refused to deal a turn or apply an action.
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// How a single turn prompt ended.
enum Flow {
    Played,
    Quit,
}

/// One game of The Judge on a console.
pub struct Session<R: BufRead, W: Write> {
    rules: JudgeRules,
    state: GameState,
    rng: GameRng,
    news: Newsroom,
    input: R,
    out: Typewriter<W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with a fresh game.
    pub fn new(rules: JudgeRules, rng: GameRng, input: R, out: Typewriter<W>) -> Self {
        let state = rules.new_game();
        let news = Newsroom::new(&rng);
        Self {
            rules,
            state,
            rng,
            news,
            input,
            out,
        }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.out.into_inner()
    }

    /// Play until the game ends or the player quits.
    ///
    /// End of input counts as quitting.
    pub fn run(&mut self) -> Result<GameSummary, SessionError> {
        debug!(seed = self.rng.seed(), "session started");

        self.intro()?;
        if self.read_line()?.is_none() {
            return Ok(self.quit()?);
        }

        while self.rules.is_terminal(&self.state).is_none() {
            self.rules.open_turn(&mut self.state, &mut self.rng)?;
            self.show_turn()?;
            if let Flow::Quit = self.play_turn()? {
                return Ok(self.quit()?);
            }
        }

        let summary = self.rules.summary(&self.state);
        self.show_game_over(&summary)?;
        Ok(summary)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn quit(&mut self) -> io::Result<GameSummary> {
        self.out.blank()?;
        self.out.line("You put away the notebook... for now.")?;
        Ok(self.rules.summary(&self.state))
    }

    fn intro(&mut self) -> io::Result<()> {
        let config = self.rules.config();
        let max_skips = config.max_skips;
        let max_turns = config.max_turns;
        let out = &mut self.out;

        out.banner("THE JUDGE")?;
        out.blank()?;
        out.typed("You are The Judge.")?;
        out.typed("An ordinary person who stumbled upon something extraordinary...")?;
        out.typed("A notebook that kills.")?;
        out.blank()?;
        out.typed("The NOTEBOOK OF DEATH.")?;
        out.blank()?;
        out.typed("Anyone whose name is written in this notebook dies of a heart attack.")?;
        out.typed("You are the judge, jury, and executioner.")?;
        out.typed("Only YOU can decide who deserves to die.")?;
        out.blank()?;
        out.rule('-')?;
        out.typed("RULES:")?;
        out.typed("• Write a criminal's name to execute them")?;
        out.typed("• Each turn, choose who to judge (or skip)")?;
        out.typed("• Higher profile criminals = more risk, more reward")?;
        out.typed("• Killing detectives has varying consequences")?;
        out.typed("• If capture risk reaches 100%, you're caught")?;
        out.typed(&format!(
            "• You can skip up to {max_skips} turns to reduce capture risk"
        ))?;
        out.typed(&format!("• Survive {max_turns} turns to win"))?;
        out.rule('-')?;
        out.blank()?;
        out.prompt("Press Enter to begin your reign of justice...")
    }

    fn show_turn(&mut self) -> io::Result<()> {
        let config = self.rules.config();
        let state = &self.state;
        let out = &mut self.out;

        out.banner(&format!("TURN {} OF {}", state.turn, config.max_turns))?;

        let (bar, caption) = opinion_meter(state.popularity);
        out.blank()?;
        out.line("🌐 ONLINE PUBLIC OPINION:")?;
        out.line(&format!("   [{bar}] {caption}"))?;

        if state.can_skip(config) {
            out.blank()?;
            out.line(&format!("⚠️  HIGH CAPTURE RISK: {}!", state.capture_risk))?;
            out.line(&format!(
                "   You can skip this turn ({} skips remaining)",
                state.skips_remaining
            ))?;
        } else if state.skips_remaining == 0 {
            out.blank()?;
            out.line(&format!("⚠️  CAPTURE RISK: {}", state.capture_risk))?;
            out.line("   Your ego won't let you skip anymore...")?;
        }

        let headline = self.news.headline(state);
        out.blank()?;
        out.line("📺 NEWS HEADLINE:")?;
        out.line(&format!("   \"{headline}\""))?;

        out.blank()?;
        out.rule('-')?;
        out.typed("TODAY'S TARGETS:")?;
        out.rule('-')?;

        for (i, criminal) in state.docket.iter().enumerate() {
            let status = state.detective_status(criminal, config);
            out.blank()?;
            out.line(&format!("  [{}] {}", i + 1, criminal.name))?;
            out.line(&format!("      Crime: {}", criminal.crime))?;
            out.line(&format!("      Danger Level: {}", danger_stars(criminal.danger)))?;
            out.line(&format!("      Detective: {}", detective_line(&status)))?;
        }
        Ok(())
    }

    fn prompt_text(&self) -> String {
        if self.state.can_skip(self.rules.config()) {
            format!(
                "\nWho will you judge? (Enter number, 's' to skip [{} left], or 'q' to quit): ",
                self.state.skips_remaining
            )
        } else {
            "\nWho will you judge? (Enter number or 'q' to quit): ".to_string()
        }
    }

    /// Prompt until a valid action is applied or the player quits.
    fn play_turn(&mut self) -> Result<Flow, SessionError> {
        loop {
            let prompt = self.prompt_text();
            self.out.prompt(&prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(Flow::Quit);
            };

            match parse_command(&line, self.state.docket.len()) {
                Ok(Command::Quit) => return Ok(Flow::Quit),
                Ok(Command::Skip) => match self.rules.validate(&self.state, Action::Skip) {
                    Ok(()) => {
                        self.out.blank()?;
                        self.out.typed("You choose to lay low this turn...")?;
                        self.out.typed("The notebook remains in your pocket.")?;
                        let report = self.apply(Action::Skip)?;
                        if let TurnReport::Skip(skip) = report {
                            self.show_skip(&skip)?;
                        }
                        return Ok(Flow::Played);
                    }
                    Err(err) => self.explain(&err)?,
                },
                Ok(Command::Target(index)) => {
                    let criminal = self.state.docket[index].clone();
                    return self.judge(index, &criminal);
                }
                Err(InputError::OutOfRange { .. }) => {
                    self.out.line("Invalid choice. Please enter a valid number.")?;
                }
                Err(_) => self.out.line("Please enter a number.")?,
            }
        }
    }

    fn judge(&mut self, index: usize, criminal: &Criminal) -> Result<Flow, SessionError> {
        self.out.blank()?;
        self.out
            .typed(&format!("You write {}'s name in the notebook...", criminal.name))?;
        self.out.typed("...")?;

        let mut action = Action::execute(index);
        let status = self.state.detective_status(criminal, self.rules.config());
        if status.is_targetable() {
            if let Some(detective) = &criminal.detective {
                self.out.blank()?;
                self.out.typed(&format!(
                    "The detective assigned to {}'s case is:",
                    criminal.name
                ))?;
                self.out.line(&format!("  → {detective}"))?;
                self.out.prompt("\nKill the detective too? (y/n): ")?;
                let Some(answer) = self.read_line()? else {
                    return Ok(Flow::Quit);
                };
                if parse_confirmation(&answer) {
                    action = Action::execute_with_detective(index);
                }
            }
        }

        if let TurnReport::Execution(report) = self.apply(action)? {
            self.show_execution(&report)?;
        }
        Ok(Flow::Played)
    }

    fn apply(&mut self, action: Action) -> Result<TurnReport, SessionError> {
        Ok(self
            .rules
            .apply_action(&mut self.state, action, &mut self.rng)?)
    }

    fn explain(&mut self, err: &RulesError) -> io::Result<()> {
        match err {
            RulesError::NoSkipsRemaining => self.out.line(&format!(
                "Your ego won't let you skip anymore! You've used all {} skips.",
                self.rules.config().max_skips
            )),
            RulesError::SkipLocked { threshold, .. } => self.out.line(&format!(
                "You can't skip yet. Capture risk is below {threshold}%."
            )),
            other => self.out.line(&format!("You can't do that: {other}.")),
        }
    }

    fn show_execution(&mut self, report: &ExecutionReport) -> io::Result<()> {
        let out = &mut self.out;

        if let Some(detective) = &report.detective {
            out.blank()?;
            out.typed(&format!("You write {detective}'s name in the notebook..."))?;
            out.typed("...")?;
            out.typed(&format!("{detective} clutches their chest and collapses!"))?;

            let net = report.net_risk();
            out.blank()?;
            if net < 0 {
                out.line("✅  The police haven't made the connection yet!")?;
                out.line(&format!("   Net capture risk changed by {net}%"))?;
            } else {
                out.line("⚠️  WARNING! The investigation is getting closer!")?;
                out.line(&format!("   Net capture risk increased by {net}%!"))?;
            }
        } else {
            out.blank()?;
            out.typed(&format!("{} clutches their chest...", report.criminal))?;
            out.typed("Collapses...")?;
            out.typed("Heart attack. Dead.")?;
        }

        if report.protected {
            out.blank()?;
            out.line("🛡️  PUBLIC SUPPORT IS PROTECTING YOU!")?;
            out.line(&format!(
                "   Police sympathy lowers capture risk by {}%",
                self.rules.config().protection_bonus
            ))?;
        }

        out.blank()?;
        out.line(&format!("✓ Effectiveness +{}", report.effectiveness_gain))?;
        out.line(&format!("✓ Popularity +{}", report.popularity_gain))?;
        if report.detective.is_none() {
            out.line(&format!(
                "⚠ Capture Risk {}",
                signed_percent(report.criminal_risk)
            ))?;
        }

        if let Some(event) = report.event {
            out.blank()?;
            out.line("📺 BREAKING NEWS:")?;
            out.line(&format!("   {}", event.headline()))?;
        }
        Ok(())
    }

    fn show_skip(&mut self, report: &SkipReport) -> io::Result<()> {
        self.out.blank()?;
        self.out.line(&format!(
            "✓ You laid low - Capture Risk -{}%",
            report.risk_reduction
        ))?;
        self.out.line(&format!(
            "✓ Public interest wanes - Popularity -{}%",
            report.popularity_penalty
        ))?;
        self.out
            .line(&format!("   ({} skips remaining)", report.skips_remaining))?;

        if let Some(news) = self.news.quiet_news() {
            self.out.blank()?;
            self.out.line("📺 NEWS:")?;
            self.out.line(&format!("   \"{news}\""))?;
        }
        Ok(())
    }

    fn show_game_over(&mut self, summary: &GameSummary) -> io::Result<()> {
        let out = &mut self.out;

        match summary.result {
            Some(GameResult::Won) => {
                out.banner("VICTORY!")?;
                out.blank()?;
                for line in [
                    "The world has fallen silent.",
                    "No more mysterious deaths...",
                    "No more criminals dying of 'heart attacks'...",
                    "",
                    "The police have given up.",
                    "The investigations have been closed.",
                    "The world moves on, never knowing the truth...",
                    "",
                    "But The Judge is still out there.",
                    "Watching.",
                    "Waiting.",
                ] {
                    out.typed(line)?;
                }
                out.blank()?;
                out.rule('=')?;
                out.typed(&format!("YOU SURVIVED {} TURNS!", summary.turns_survived))?;
                out.line("The police could NOT stop The Judge.")?;
            }
            _ => {
                out.banner("GAME OVER")?;
                out.blank()?;
                out.typed("🚨 POLICE HAVE ARRESTED YOU! 🚨")?;
                out.blank()?;
                out.typed("They found the notebook.")?;
                out.typed("They found your notes.")?;
                out.typed("It's over.")?;
            }
        }

        out.blank()?;
        out.rule('-')?;
        out.typed("FINAL STATS:")?;
        out.rule('-')?;
        out.line(&format!("  Turns Survived: {}", summary.turns_survived))?;
        out.line(&format!("  Effectiveness Score: {}", summary.effectiveness))?;
        out.line(&format!("  Final Popularity: {}%", summary.popularity))?;
        out.line(&format!(
            "  Criminals Executed: {}",
            summary.criminals_executed
        ))?;
        out.line(&format!(
            "  Detectives Eliminated: {}",
            summary.detectives_eliminated
        ))?;
        out.line(&format!("  Skips Used: {}", summary.skips_used))?;
        out.rule('-')?;

        out.blank()?;
        out.typed("THE NOTEBOOK:")?;
        for record in self.state.history() {
            out.line(&format!("  Turn {}: {}", record.turn, notebook_entry(record)))?;
        }

        if let Some(ending) = summary.ending {
            let verdict = verdict(ending);
            if !verdict.is_empty() {
                out.blank()?;
                out.typed("THE WORLD'S FINAL VERDICT:")?;
                for line in verdict {
                    out.line(line)?;
                }
            }
            out.blank()?;
            out.line(&format!("  {ending}"))?;
        }
        out.rule('=')
    }
}

/// Names written on one turn, or a note that the Judge lay low.
fn notebook_entry(record: &ActionRecord) -> String {
    if record.executed.is_empty() {
        "(laid low)".to_string()
    } else {
        record.executed.join(", ")
    }
}

/// The public's last word on an arrested Judge.
fn verdict(ending: Ending) -> &'static [&'static str] {
    match ending {
        Ending::Best => &[],
        Ending::Worst => &[
            "\" The monster is finally caught!",
            "  The 'Judge' was just another madman.",
            "  Justice has been served by the real courts.\"",
        ],
        Ending::Bad => &[
            "\" The Judge is gone, but the debate continues.",
            "  Were they a hero or a villain?",
            "  Perhaps we'll never know...\"",
        ],
        Ending::Good => &[
            "\" The Judge has vanished!",
            "  Dead? In hiding? A god ascended to heaven?",
            "  The world mourns its guardian angel.\"",
            "  Flowers and candles appear at monuments worldwide.",
        ],
    }
}
