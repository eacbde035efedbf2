//! Rule configuration.
//!
//! Every tunable number the rules use lives in `JudgeConfig`. The defaults
//! reproduce the standard game: 20 turns, 5 skips, protection at 60%
//! popularity, and so on. Variants (short games for tests, harder modes)
//! are built with the `with_*` setters.

use serde::{Deserialize, Serialize};

/// Complete rule configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Number of turns to survive. Reaching `max_turns + 1` is a win.
    pub max_turns: u32,

    /// Skips available at the start of the game.
    pub max_skips: u32,

    /// Capture risk at or above which skipping is allowed.
    pub skip_risk_threshold: i32,

    /// Capture risk removed by a skip.
    pub skip_risk_reduction: i32,

    /// Popularity lost by a skip.
    pub skip_popularity_penalty: i32,

    /// Popularity at or above which the police go easy on you.
    pub protection_threshold: i32,

    /// Capture risk removed per execution while protected.
    pub protection_bonus: i32,

    /// Extra capture risk for executing a criminal with an assigned detective.
    pub detective_bonus: i32,

    /// After this many detective kills the investigation is sealed:
    /// detective names are redacted and can no longer be targeted.
    pub detective_redaction_threshold: u32,

    /// Probability of a breaking-news event after an execution.
    pub random_event_chance: f64,

    /// Danger level from which a case may have no official detective.
    pub high_profile_danger: u8,

    /// Probability that a high-profile case has no detective.
    pub unassigned_chance: f64,

    /// Most criminals offered in a single turn.
    pub max_docket: usize,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            max_turns: 20,
            max_skips: 5,
            skip_risk_threshold: 50,
            skip_risk_reduction: 10,
            skip_popularity_penalty: 5,
            protection_threshold: 60,
            protection_bonus: 15,
            detective_bonus: 10,
            detective_redaction_threshold: 4,
            random_event_chance: 0.2,
            high_profile_danger: 7,
            unassigned_chance: 0.5,
            max_docket: 3,
        }
    }
}

impl JudgeConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of turns to survive.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns.max(1);
        self
    }

    /// Set the number of skips available.
    #[must_use]
    pub fn with_max_skips(mut self, skips: u32) -> Self {
        self.max_skips = skips;
        self
    }

    /// Set the breaking-news probability.
    #[must_use]
    pub fn with_random_event_chance(mut self, chance: f64) -> Self {
        self.random_event_chance = chance;
        self
    }

    /// Set the probability that a high-profile case has no detective.
    #[must_use]
    pub fn with_unassigned_chance(mut self, chance: f64) -> Self {
        self.unassigned_chance = chance;
        self
    }

    /// Number of criminals offered on `turn` (turn 1 is handled separately).
    #[must_use]
    pub fn docket_size(&self, turn: u32) -> usize {
        (2 + turn as usize / 5).min(self.max_docket)
    }
}
