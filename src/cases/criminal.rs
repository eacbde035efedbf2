//! Criminal profiles and docket entries.

use serde::{Deserialize, Serialize};

/// Highest danger level a criminal can have.
const MAX_DANGER: u8 = 10;

/// Static criminal data from the roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriminalProfile {
    /// Full name. Unique within a roster.
    pub name: String,

    /// What they are wanted for.
    pub crime: String,

    /// Danger level, 1-10. Drives both reward and risk.
    pub danger: u8,
}

impl CriminalProfile {
    /// Create a profile. Danger is clamped into 1-10.
    pub fn new(name: impl Into<String>, crime: impl Into<String>, danger: u8) -> Self {
        Self {
            name: name.into(),
            crime: crime.into(),
            danger: danger.clamp(1, MAX_DANGER),
        }
    }
}

/// A criminal on the current docket.
///
/// ## Example
///
/// ```
/// use the_judge::cases::Criminal;
///
/// let c = Criminal::new("Marcus Webb", "Petty theft and fraud", 1)
///     .with_detective("Detective Sarah Chen");
///
/// assert_eq!(c.danger, 1);
/// assert_eq!(c.detective.as_deref(), Some("Detective Sarah Chen"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criminal {
    /// Full name.
    pub name: String,

    /// What they are wanted for.
    pub crime: String,

    /// Danger level, 1-10.
    pub danger: u8,

    /// Detective in charge of the case, if any.
    pub detective: Option<String>,
}

impl Criminal {
    /// Create a criminal with no assigned detective. Danger is clamped into 1-10.
    pub fn new(name: impl Into<String>, crime: impl Into<String>, danger: u8) -> Self {
        Self {
            name: name.into(),
            crime: crime.into(),
            danger: danger.clamp(1, MAX_DANGER),
            detective: None,
        }
    }

    /// Build a docket entry from a roster profile.
    #[must_use]
    pub fn from_profile(profile: &CriminalProfile, detective: Option<String>) -> Self {
        Self {
            name: profile.name.clone(),
            crime: profile.crime.clone(),
            danger: profile.danger,
            detective,
        }
    }

    /// Assign a detective.
    #[must_use]
    pub fn with_detective(mut self, detective: impl Into<String>) -> Self {
        self.detective = Some(detective.into());
        self
    }

    /// Danger as a signed value for stat arithmetic.
    #[must_use]
    pub fn danger_value(&self) -> i32 {
        i32::from(self.danger)
    }

    /// Whether any detective is assigned (eliminated or not).
    #[must_use]
    pub fn has_detective(&self) -> bool {
        self.detective.is_some()
    }
}
