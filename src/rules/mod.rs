//! Game rules.
//!
//! - `pool`: which criminals are offered each turn
//! - `resolver`: how an execution or skip changes the state
//! - `ending`: how the story ends and the final report
//! - `engine`: `JudgeRules`, which validates actions and drives the above

pub mod ending;
pub mod engine;
pub mod pool;
pub mod resolver;

pub use ending::{Ending, GameSummary};
pub use engine::{GameResult, JudgeRules, RulesError};
pub use resolver::{ExecutionReport, RandomEvent, SkipReport, TurnReport};
