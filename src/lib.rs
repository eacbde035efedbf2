//! # The Judge
//!
//! A turn-based console game. A hidden vigilante with a deadly notebook
//! picks one criminal to judge each turn, trading effectiveness and public
//! popularity against the risk of capture, and must survive twenty turns.
//!
//! ## Architecture
//!
//! - **Explicit state**: `GameState` holds everything about a session and
//!   is passed to the rules. Nothing is global.
//!
//! - **Injected randomness**: every roll goes through the `Dice` trait.
//!   `GameRng` (ChaCha8) makes a seeded session fully reproducible;
//!   tests script exact rolls.
//!
//! - **Presentation on top**: `cli` only parses input and prints. All
//!   outcomes are decided in `rules`.
//!
//! ## Modules
//!
//! - `core`: state, gauges, actions, RNG, configuration
//! - `cases`: criminals, detectives, the roster
//! - `rules`: docket generation, turn resolution, endings, the engine
//! - `cli`: input parsing, headlines, rendering, the interactive session

pub mod cases;
pub mod cli;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, DetectiveStatus, Dice, Docket, GameRng, GameState, Gauge, JudgeConfig,
};

pub use crate::cases::{Criminal, CriminalProfile, Roster, RosterError};

pub use crate::rules::{
    Ending, ExecutionReport, GameResult, GameSummary, JudgeRules, RandomEvent, RulesError,
    SkipReport, TurnReport,
};

pub use crate::cli::{Session, SessionError};
