//! Game state.
//!
//! ## Gauge
//!
//! A meter clamped into 0-100. Popularity and capture risk are gauges, so
//! the clamp invariant holds by construction: there is no way to store an
//! out-of-range value.
//!
//! ## GameState
//!
//! Complete session state:
//! - Turn counter and terminal flags
//! - The three stats (effectiveness, popularity, capture risk)
//! - Executed names (append-only) and detective kill count
//! - Remaining skips
//! - The current docket and the action history
//!
//! Uses `im` persistent collections so snapshots are O(1) to clone.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::action::ActionRecord;
use super::config::JudgeConfig;
use crate::cases::Criminal;

/// The criminals offered this turn. At most three in the standard game.
pub type Docket = SmallVec<[Criminal; 3]>;

/// A meter clamped into 0-100.
///
/// ```
/// use the_judge::core::Gauge;
///
/// assert_eq!(Gauge::settle(130).get(), 100);
/// assert_eq!(Gauge::settle(-4).get(), 0);
/// assert_eq!(Gauge::settle(40).shifted(-15).get(), 25);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "i32", into = "i32")]
pub struct Gauge(u8);

impl Gauge {
    /// Lowest gauge value.
    pub const MIN: i32 = 0;
    /// Highest gauge value.
    pub const MAX: i32 = 100;

    /// Clamp a raw value into the gauge range.
    #[must_use]
    pub fn settle(raw: i32) -> Self {
        // Clamped to 0..=100, fits in u8
        Self(raw.clamp(Self::MIN, Self::MAX) as u8)
    }

    /// Current value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0 as i32
    }

    /// Apply a delta and clamp.
    #[must_use]
    pub fn shifted(self, delta: i32) -> Self {
        Self::settle(self.get().saturating_add(delta))
    }

    /// Whether the gauge is at 100.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 as i32 >= Self::MAX
    }
}

impl From<i32> for Gauge {
    fn from(raw: i32) -> Self {
        Self::settle(raw)
    }
}

impl From<Gauge> for i32 {
    fn from(gauge: Gauge) -> Self {
        gauge.get()
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// What the Judge knows about a criminal's detective.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectiveStatus<'a> {
    /// Too many detectives have died; the investigation is sealed.
    Redacted,
    /// The assigned detective is already dead.
    Eliminated(&'a str),
    /// A living detective is on the case.
    Assigned(&'a str),
    /// No official assignment.
    Unassigned,
}

impl DetectiveStatus<'_> {
    /// Whether the detective can be written in the notebook.
    #[must_use]
    pub fn is_targetable(&self) -> bool {
        matches!(self, DetectiveStatus::Assigned(_))
    }
}

/// Full game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current turn (starts at 1).
    pub turn: u32,

    /// Cumulative score. Display only.
    pub effectiveness: i64,

    /// Public opinion.
    pub popularity: Gauge,

    /// How close the police are. Full means arrest.
    pub capture_risk: Gauge,

    /// Detectives written in the notebook so far.
    pub killed_detectives: u32,

    /// Skips left.
    pub skips_remaining: u32,

    /// Session is over (won or captured).
    pub game_over: bool,

    /// Session ended in a win.
    pub won: bool,

    /// Criminals offered this turn. Empty between turns.
    pub docket: Docket,

    /// Everyone written in the notebook: criminals and detectives.
    executed_names: ImHashSet<String>,

    /// Every applied action, oldest first.
    history: Vector<ActionRecord>,
}

impl GameState {
    /// Create the opening state for a configuration.
    ///
    /// ## Defaults
    ///
    /// - `turn`: 1
    /// - all stats: 0
    /// - `skips_remaining`: `config.max_skips`
    #[must_use]
    pub fn new(config: &JudgeConfig) -> Self {
        Self {
            turn: 1,
            effectiveness: 0,
            popularity: Gauge::default(),
            capture_risk: Gauge::default(),
            killed_detectives: 0,
            skips_remaining: config.max_skips,
            game_over: false,
            won: false,
            docket: Docket::new(),
            executed_names: ImHashSet::new(),
            history: Vector::new(),
        }
    }

    // === Executed Names ===

    /// Whether `name` has been written in the notebook.
    #[must_use]
    pub fn is_executed(&self, name: &str) -> bool {
        self.executed_names.contains(name)
    }

    /// Write a name in the notebook. Names are never removed.
    ///
    /// Returns false if the name was already there.
    pub fn mark_executed(&mut self, name: impl Into<String>) -> bool {
        self.executed_names.insert(name.into()).is_none()
    }

    /// Iterate over executed names (unordered).
    pub fn executed_names(&self) -> impl Iterator<Item = &str> {
        self.executed_names.iter().map(String::as_str)
    }

    /// Number of names in the notebook.
    #[must_use]
    pub fn executed_count(&self) -> usize {
        self.executed_names.len()
    }

    /// Number of criminals (not detectives) in the notebook.
    #[must_use]
    pub fn criminals_executed(&self) -> usize {
        self.executed_names
            .len()
            .saturating_sub(self.killed_detectives as usize)
    }

    // === Detectives ===

    /// What the Judge knows about `criminal`'s detective.
    #[must_use]
    pub fn detective_status<'a>(
        &self,
        criminal: &'a Criminal,
        config: &JudgeConfig,
    ) -> DetectiveStatus<'a> {
        if self.killed_detectives >= config.detective_redaction_threshold {
            return DetectiveStatus::Redacted;
        }
        match criminal.detective.as_deref() {
            Some(name) if self.is_executed(name) => DetectiveStatus::Eliminated(name),
            Some(name) => DetectiveStatus::Assigned(name),
            None => DetectiveStatus::Unassigned,
        }
    }

    // === Skips ===

    /// Whether skipping is allowed right now.
    #[must_use]
    pub fn can_skip(&self, config: &JudgeConfig) -> bool {
        self.skips_remaining > 0 && self.capture_risk.get() >= config.skip_risk_threshold
    }

    /// Skips spent so far.
    #[must_use]
    pub fn skips_used(&self, config: &JudgeConfig) -> u32 {
        config.max_skips.saturating_sub(self.skips_remaining)
    }

    // === Action History ===

    /// Record an action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Applied actions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ActionRecord> {
        self.history.iter()
    }
}
