//! Action representation.
//!
//! Each turn the Judge takes exactly one action:
//! - **Execute** a criminal from the docket, optionally writing the assigned
//!   detective's name as well
//! - **Skip** the turn to lie low
//!
//! Targets are docket indices (0-based). The rules validate them; an action
//! is just a request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A turn action.
///
/// ## Example
///
/// ```
/// use the_judge::core::Action;
///
/// let plain = Action::execute(0);
/// let with_detective = Action::execute_with_detective(1);
///
/// assert_eq!(plain.to_string(), "Execute(0)");
/// assert_eq!(with_detective.to_string(), "Execute(1+detective)");
/// assert_eq!(Action::Skip.to_string(), "Skip");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Write a criminal's name in the notebook.
    Execute {
        /// Docket index of the criminal.
        target: usize,
        /// Also write the assigned detective's name.
        detective: bool,
    },
    /// Lie low for a turn.
    Skip,
}

impl Action {
    /// Execute the criminal at `target`, leaving the detective alone.
    #[must_use]
    pub const fn execute(target: usize) -> Self {
        Self::Execute {
            target,
            detective: false,
        }
    }

    /// Execute the criminal at `target` and the assigned detective.
    #[must_use]
    pub const fn execute_with_detective(target: usize) -> Self {
        Self::Execute {
            target,
            detective: true,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Execute {
                target,
                detective: false,
            } => write!(f, "Execute({target})"),
            Self::Execute {
                target,
                detective: true,
            } => write!(f, "Execute({target}+detective)"),
            Self::Skip => write!(f, "Skip"),
        }
    }
}

/// A recorded action with the names it touched.
///
/// `GameState` keeps these in order; the final report lists the names
/// written on each turn from them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Turn number when the action was taken.
    pub turn: u32,

    /// The action taken.
    pub action: Action,

    /// Names written in the notebook this turn (criminal first).
    pub executed: Vec<String>,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(turn: u32, action: Action, executed: Vec<String>) -> Self {
        Self {
            turn,
            action,
            executed,
        }
    }
}
