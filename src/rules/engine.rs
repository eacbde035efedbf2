//! The rules engine.
//!
//! `JudgeRules` ties the pieces together:
//! - `open_turn`: deal the docket for the current turn
//! - `legal_actions` / `validate`: what the Judge may do
//! - `apply_action`: resolve a validated action
//! - `is_terminal`: win/loss check
//!
//! The engine owns no session state. Callers hold the `GameState` and the
//! `Dice`, so the same engine drives the CLI, tests, and simulations.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::ending::GameSummary;
use super::pool::generate_docket;
use super::resolver::{resolve_execution, resolve_skip, TurnReport};
use crate::cases::Roster;
use crate::core::{Action, ActionRecord, Dice, Docket, GameState, JudgeConfig};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Survived every turn.
    Won,
    /// Capture risk reached 100.
    Captured,
}

impl GameResult {
    /// Check if this is a win.
    #[must_use]
    pub fn is_win(self) -> bool {
        self == GameResult::Won
    }
}

/// Reasons an action is refused. The state is never touched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The session already ended.
    #[error("the game is over")]
    GameOver,

    /// `apply_action` was called before `open_turn`.
    #[error("no docket is open for turn {turn}")]
    NoDocket {
        /// Current turn.
        turn: u32,
    },

    /// The roster has no criminals to offer.
    #[error("the roster has no criminals")]
    EmptyRoster,

    /// Target index past the end of the docket.
    #[error("no target #{index}: the docket has {available}")]
    TargetOutOfRange {
        /// Requested index (0-based).
        index: usize,
        /// Docket length.
        available: usize,
    },

    /// The detective can't be written in the notebook.
    #[error("the detective on {criminal}'s case cannot be targeted")]
    DetectiveUnavailable {
        /// Criminal whose detective was targeted.
        criminal: String,
    },

    /// Capture risk is too low to justify lying low.
    #[error("capture risk {capture_risk}% is below the {threshold}% needed to skip")]
    SkipLocked {
        /// Current capture risk.
        capture_risk: i32,
        /// Threshold from the configuration.
        threshold: i32,
    },

    /// Every skip has been spent.
    #[error("no skips remaining")]
    NoSkipsRemaining,
}

/// The game's rules, bound to a configuration and roster.
///
/// ## Example
///
/// ```
/// use the_judge::core::{Action, GameRng};
/// use the_judge::rules::JudgeRules;
///
/// let rules = JudgeRules::standard();
/// let mut state = rules.new_game();
/// let mut rng = GameRng::new(42);
///
/// rules.open_turn(&mut state, &mut rng).unwrap();
/// assert_eq!(state.docket[0].name, "Marcus Webb");
///
/// let report = rules.apply_action(&mut state, Action::execute(0), &mut rng).unwrap();
/// assert_eq!(report.turn(), 1);
/// assert_eq!(state.turn, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct JudgeRules {
    config: JudgeConfig,
    roster: Roster,
}

impl JudgeRules {
    /// Create rules from a configuration and roster.
    #[must_use]
    pub fn new(config: JudgeConfig, roster: Roster) -> Self {
        Self { config, roster }
    }

    /// Standard configuration and roster.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Get the roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Opening state for a new session.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Deal the docket for the current turn.
    ///
    /// Idempotent: if a docket is already open it is returned unchanged,
    /// so re-prompting never re-rolls the targets.
    pub fn open_turn<'s>(
        &self,
        state: &'s mut GameState,
        dice: &mut impl Dice,
    ) -> Result<&'s Docket, RulesError> {
        if self.is_terminal(state).is_some() {
            return Err(RulesError::GameOver);
        }
        if self.roster.criminals().is_empty() {
            return Err(RulesError::EmptyRoster);
        }
        if state.docket.is_empty() {
            state.docket = generate_docket(state, &self.roster, &self.config, dice);
        }
        Ok(&state.docket)
    }

    /// Every action `validate` would accept.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        if self.is_terminal(state).is_some() {
            return vec![];
        }

        let mut actions = Vec::new();
        for (i, criminal) in state.docket.iter().enumerate() {
            actions.push(Action::execute(i));
            if state.detective_status(criminal, &self.config).is_targetable() {
                actions.push(Action::execute_with_detective(i));
            }
        }
        if !state.docket.is_empty() && state.can_skip(&self.config) {
            actions.push(Action::Skip);
        }
        actions
    }

    /// Check an action without applying it.
    pub fn validate(&self, state: &GameState, action: Action) -> Result<(), RulesError> {
        if self.is_terminal(state).is_some() {
            return Err(RulesError::GameOver);
        }
        if state.docket.is_empty() {
            return Err(RulesError::NoDocket { turn: state.turn });
        }

        match action {
            Action::Execute { target, detective } => {
                let criminal =
                    state
                        .docket
                        .get(target)
                        .ok_or(RulesError::TargetOutOfRange {
                            index: target,
                            available: state.docket.len(),
                        })?;
                if detective && !state.detective_status(criminal, &self.config).is_targetable() {
                    return Err(RulesError::DetectiveUnavailable {
                        criminal: criminal.name.clone(),
                    });
                }
                Ok(())
            }
            Action::Skip => {
                if state.skips_remaining == 0 {
                    return Err(RulesError::NoSkipsRemaining);
                }
                if !state.can_skip(&self.config) {
                    return Err(RulesError::SkipLocked {
                        capture_risk: state.capture_risk.get(),
                        threshold: self.config.skip_risk_threshold,
                    });
                }
                Ok(())
            }
        }
    }

    /// Validate and resolve an action, closing the current docket.
    pub fn apply_action(
        &self,
        state: &mut GameState,
        action: Action,
        dice: &mut impl Dice,
    ) -> Result<TurnReport, RulesError> {
        if let Err(err) = self.validate(state, action) {
            debug!(turn = state.turn, %action, %err, "action rejected");
            return Err(err);
        }

        let docket = std::mem::take(&mut state.docket);
        let report = match action {
            Action::Execute { target, detective } => {
                let criminal = &docket[target];
                TurnReport::Execution(resolve_execution(
                    state,
                    &self.config,
                    criminal,
                    detective,
                    dice,
                ))
            }
            Action::Skip => TurnReport::Skip(resolve_skip(state, &self.config)),
        };

        let executed = match &report {
            TurnReport::Execution(r) => std::iter::once(r.criminal.clone())
                .chain(r.detective.clone())
                .collect(),
            TurnReport::Skip(_) => Vec::new(),
        };
        state.record_action(ActionRecord::new(report.turn(), action, executed));

        if let Some(result) = report.result() {
            info!(
                ?result,
                turn = report.turn(),
                popularity = state.popularity.get(),
                capture_risk = state.capture_risk.get(),
                "game over"
            );
        }

        Ok(report)
    }

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    #[must_use]
    pub fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.won {
            Some(GameResult::Won)
        } else if state.game_over || state.capture_risk.is_full() {
            Some(GameResult::Captured)
        } else if state.turn > self.config.max_turns {
            Some(GameResult::Won)
        } else {
            None
        }
    }

    /// Final report for the session so far.
    #[must_use]
    pub fn summary(&self, state: &GameState) -> GameSummary {
        GameSummary::new(state, &self.config, self.is_terminal(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Gauge};

    fn opened(seed: u64) -> (JudgeRules, GameState, GameRng) {
        let rules = JudgeRules::standard();
        let mut state = rules.new_game();
        let mut rng = GameRng::new(seed);
        rules.open_turn(&mut state, &mut rng).unwrap();
        (rules, state, rng)
    }

    #[test]
    fn test_game_result_is_win() {
        assert!(GameResult::Won.is_win());
        assert!(!GameResult::Captured.is_win());
    }

    #[test]
    fn test_open_turn_is_idempotent() {
        let (rules, mut state, mut rng) = opened(42);
        let first = state.docket.clone();

        state.turn = 9;
        rules.open_turn(&mut state, &mut rng).unwrap();

        assert_eq!(state.docket, first);
    }

    #[test]
    fn test_legal_actions_turn_one() {
        let (rules, state, _) = opened(42);

        let actions = rules.legal_actions(&state);

        assert_eq!(
            actions,
            vec![Action::execute(0), Action::execute_with_detective(0)]
        );
    }

    #[test]
    fn test_legal_actions_include_skip_when_risky() {
        let (rules, mut state, _) = opened(42);
        state.capture_risk = Gauge::settle(50);

        assert!(rules.legal_actions(&state).contains(&Action::Skip));
    }

    #[test]
    fn test_validate_rejects_bad_target() {
        let (rules, state, _) = opened(42);

        assert_eq!(
            rules.validate(&state, Action::execute(3)),
            Err(RulesError::TargetOutOfRange {
                index: 3,
                available: 1
            })
        );
    }

    #[test]
    fn test_validate_rejects_locked_skip() {
        let (rules, mut state, _) = opened(42);

        assert_eq!(
            rules.validate(&state, Action::Skip),
            Err(RulesError::SkipLocked {
                capture_risk: 0,
                threshold: 50
            })
        );

        state.capture_risk = Gauge::settle(80);
        state.skips_remaining = 0;
        assert_eq!(
            rules.validate(&state, Action::Skip),
            Err(RulesError::NoSkipsRemaining)
        );
    }

    #[test]
    fn test_validate_rejects_sealed_detective() {
        let (rules, mut state, _) = opened(42);
        state.killed_detectives = 4;

        assert_eq!(
            rules.validate(&state, Action::execute_with_detective(0)),
            Err(RulesError::DetectiveUnavailable {
                criminal: "Marcus Webb".into()
            })
        );
        assert!(rules.validate(&state, Action::execute(0)).is_ok());
    }

    #[test]
    fn test_apply_without_docket() {
        let rules = JudgeRules::standard();
        let mut state = rules.new_game();
        let mut rng = GameRng::new(1);

        assert_eq!(
            rules.apply_action(&mut state, Action::execute(0), &mut rng),
            Err(RulesError::NoDocket { turn: 1 })
        );
    }

    #[test]
    fn test_rejected_action_leaves_state_untouched() {
        let (rules, state, mut rng) = opened(42);
        let mut attempt = state.clone();

        assert!(rules
            .apply_action(&mut attempt, Action::execute(7), &mut rng)
            .is_err());
        assert!(rules.apply_action(&mut attempt, Action::Skip, &mut rng).is_err());

        assert_eq!(attempt, state);
    }

    #[test]
    fn test_apply_records_history_and_closes_docket() {
        let (rules, mut state, mut rng) = opened(42);

        rules
            .apply_action(&mut state, Action::execute_with_detective(0), &mut rng)
            .unwrap();

        assert!(state.docket.is_empty());
        let record = state.history().next().unwrap();
        assert_eq!(record.turn, 1);
        assert_eq!(
            record.executed,
            vec!["Marcus Webb".to_string(), "Detective Sarah Chen".to_string()]
        );
    }

    #[test]
    fn test_terminal_blocks_everything() {
        let (rules, mut state, mut rng) = opened(42);
        state.game_over = true;

        assert_eq!(rules.is_terminal(&state), Some(GameResult::Captured));
        assert!(rules.legal_actions(&state).is_empty());
        assert_eq!(
            rules.open_turn(&mut state, &mut rng).map(|d| d.len()),
            Err(RulesError::GameOver)
        );
    }

    #[test]
    fn test_empty_roster_refuses_to_open() {
        let roster = Roster::new(vec![], vec![]).unwrap();
        let rules = JudgeRules::new(JudgeConfig::default(), roster);
        let mut state = rules.new_game();
        let mut rng = GameRng::new(1);

        assert_eq!(
            rules.open_turn(&mut state, &mut rng).map(|d| d.len()),
            Err(RulesError::EmptyRoster)
        );
    }

    #[test]
    fn test_error_messages() {
        let err = RulesError::TargetOutOfRange {
            index: 4,
            available: 3,
        };
        assert_eq!(err.to_string(), "no target #4: the docket has 3");
        assert_eq!(
            RulesError::SkipLocked {
                capture_risk: 20,
                threshold: 50
            }
            .to_string(),
            "capture risk 20% is below the 50% needed to skip"
        );
    }
}
