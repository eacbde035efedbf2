//! Endings and the final report.
//!
//! A win is always the best ending. An arrest is judged by the public: the
//! final popularity decides how the Judge is remembered.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::GameResult;
use crate::core::{GameState, Gauge, JudgeConfig};

/// Below this popularity an arrested Judge is remembered as a madman.
pub const WORST_ENDING_BELOW: i32 = 30;

/// Below this popularity (and at or above [`WORST_ENDING_BELOW`]) the
/// debate continues.
pub const BAD_ENDING_BELOW: i32 = 70;

/// How the story ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// Survived every turn.
    Best,
    /// Arrested, but mourned as a guardian angel.
    Good,
    /// Arrested; hero or villain, nobody agrees.
    Bad,
    /// Arrested and dismissed as a monster.
    Worst,
}

impl Ending {
    /// Classify a finished game.
    ///
    /// ```
    /// use the_judge::core::Gauge;
    /// use the_judge::rules::{Ending, GameResult};
    ///
    /// assert_eq!(Ending::classify(GameResult::Won, Gauge::settle(0)), Ending::Best);
    /// assert_eq!(Ending::classify(GameResult::Captured, Gauge::settle(29)), Ending::Worst);
    /// assert_eq!(Ending::classify(GameResult::Captured, Gauge::settle(30)), Ending::Bad);
    /// assert_eq!(Ending::classify(GameResult::Captured, Gauge::settle(70)), Ending::Good);
    /// ```
    #[must_use]
    pub fn classify(result: GameResult, popularity: Gauge) -> Self {
        match result {
            GameResult::Won => Ending::Best,
            GameResult::Captured => match popularity.get() {
                p if p < WORST_ENDING_BELOW => Ending::Worst,
                p if p < BAD_ENDING_BELOW => Ending::Bad,
                _ => Ending::Good,
            },
        }
    }

    /// Banner shown under the final verdict.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Ending::Best => "[BEST ENDING]",
            Ending::Good => "[GOOD ENDING]",
            Ending::Bad => "[BAD ENDING]",
            Ending::Worst => "[WORST ENDING]",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final statistics for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// How the game ended. `None` if the player quit.
    pub result: Option<GameResult>,
    /// Turns completed.
    pub turns_survived: u32,
    /// Cumulative effectiveness.
    pub effectiveness: i64,
    /// Popularity at the end.
    pub popularity: i32,
    /// Criminals written in the notebook.
    pub criminals_executed: usize,
    /// Detectives written in the notebook.
    pub detectives_eliminated: u32,
    /// Skips spent.
    pub skips_used: u32,
    /// Ending tier. `None` if the player quit.
    pub ending: Option<Ending>,
}

impl GameSummary {
    /// Summarise `state`. Pass the terminal result, or `None` for a
    /// session abandoned mid-game.
    #[must_use]
    pub fn new(state: &GameState, config: &JudgeConfig, result: Option<GameResult>) -> Self {
        let turns_survived = match result {
            Some(GameResult::Won) => config.max_turns,
            _ => state.turn.saturating_sub(1),
        };

        Self {
            result,
            turns_survived,
            effectiveness: state.effectiveness,
            popularity: state.popularity.get(),
            criminals_executed: state.criminals_executed(),
            detectives_eliminated: state.killed_detectives,
            skips_used: state.skips_used(config),
            ending: result.map(|r| Ending::classify(r, state.popularity)),
        }
    }
}
