//! Criminal and detective databases.
//!
//! The `Roster` owns both lists in database order. Order matters: the pool
//! generator falls back to the first three criminals when everyone has been
//! executed, and only ever picks detectives from the front of the list.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::criminal::CriminalProfile;

/// The standard criminal database, in four danger tiers.
const STANDARD_CRIMINALS: &[(&str, &str, u8)] = &[
    // Low danger (1-3)
    ("Marcus Webb", "Petty theft and fraud", 1),
    ("Danny 'Snake' Morrison", "Drug dealing", 2),
    ("Victor Crane", "Assault and robbery", 2),
    ("Jimmy 'The Rat' Franklin", "Informant for gang", 2),
    ("Tina Brooks", "Embezzlement", 1),
    ("Billy Bob Henderson", "DUI and hit-and-run", 1),
    ("Chuck 'The Sneak' Miller", "Burglary ring operator", 2),
    ("Petey 'Two-Times' O'Neil", "Identity theft", 1),
    ("Gambling Jim Malone", "Illegal gambling operation", 2),
    ("Ruth 'The Mom' Henderson", "Child neglect and abuse", 3),
    // Medium danger (4-6)
    ("Rico 'The Hammer' Santana", "Organized crime - several murders", 4),
    ("Dr. Harold Blackwood", "Illegal human experimentation", 5),
    ("Commander Zara Khan", "Military coup attempt, treason", 6),
    ("Silas 'Deadshot' Nash", "Serial killer - 12 victims", 5),
    ("The Crimson Queen", "International drug cartel leader", 6),
    ("Vinnie 'The Beast' Caruso", "Loan shark, extortionist", 4),
    ("Dr. Patricia Crane", "Black market organ trafficking", 5),
    ("Frankie 'Fingers' Delano", "Master pickpocket, crime boss", 4),
    ("Mayor 'Greedy' John Sullivan", "Corruption, bribery, kickbacks", 5),
    ("Dr. Irving Moss", "Deadly vaccine trials on homeless", 6),
    // High danger (7-8)
    ("General Marcus 'Iron' Sterling", "Military dictator, mass atrocities", 8),
    ("Viktor Volkov", "Terrorist mastermind, nuclear threats", 8),
    ("Elena 'The Spider' Vasquez", "Global human trafficking network", 7),
    ("Dr. Noah Crain", "Bio-weapon developer, mass murder", 7),
    ("Admiral Hector Stone", "Navy officer selling state secrets", 7),
    ("The Syndicate Leader 'Mr. White'", "Global crime syndicate", 8),
    ("Professor Death", "Creating deadly plagues for ransom", 8),
    // Extreme danger (9-10)
    ("President Richard 'The Puppet' Masters", "Global oligarch controlling governments", 10),
    ("The Architect", "AI terrorist threatening world security", 9),
    ("Kingpin Zero", "Shadow ruler of global crime, unreachable", 10),
];

const STANDARD_DETECTIVES: &[&str] = &[
    "Detective Sarah Chen",
    "Detective James Rodriguez",
    "Detective Michael Torres",
    "Captain Lisa Nakamura",
    "Detective David Kim",
    "Inspector General Maria Santos",
    "Chief Superintendent Arthur Black",
    "Detective Emma Watson",
    "Agent Frank Morrison",
    "Commander Helen Price",
    "Detective Robert 'Bob' Williams",
    "Special Agent Catherine 'Cat' Grant",
    "Detective Luis Fernandez",
    "Chief Inspector Yuki Tanaka",
    "Detective Anna Kowalski",
];

/// Why a custom roster was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Two criminals share a name.
    #[error("criminal '{0}' appears twice")]
    DuplicateCriminal(String),

    /// Two detectives share a name.
    #[error("detective '{0}' appears twice")]
    DuplicateDetective(String),

    /// A detective has the same name as a criminal.
    #[error("'{0}' is listed as both a criminal and a detective")]
    NameClash(String),
}

/// Criminal and detective databases.
///
/// ## Example
///
/// ```
/// use the_judge::cases::{CriminalProfile, Roster};
///
/// let roster = Roster::standard();
/// assert_eq!(roster.criminals().len(), 30);
/// assert_eq!(roster.detectives().len(), 15);
///
/// let tiny = Roster::new(
///     vec![CriminalProfile::new("Tina Brooks", "Embezzlement", 1)],
///     vec!["Detective Emma Watson".to_string()],
/// )
/// .unwrap();
/// assert!(tiny.get("Tina Brooks").is_some());
///
/// // A name can't be both a target and an investigator.
/// assert!(Roster::new(
///     vec![CriminalProfile::new("Agent Smith", "Impersonation", 2)],
///     vec!["Agent Smith".to_string()],
/// )
/// .is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Roster {
    criminals: Vec<CriminalProfile>,
    detectives: Vec<String>,
    by_name: FxHashMap<String, usize>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}

impl Roster {
    /// Create a roster from explicit lists.
    ///
    /// Every name must be unique across both lists: executed names are
    /// tracked in one set, so a shared name would mark two people dead.
    pub fn new(
        criminals: Vec<CriminalProfile>,
        detectives: Vec<String>,
    ) -> Result<Self, RosterError> {
        let mut by_name = FxHashMap::default();
        for (i, c) in criminals.iter().enumerate() {
            if by_name.insert(c.name.clone(), i).is_some() {
                return Err(RosterError::DuplicateCriminal(c.name.clone()));
            }
        }

        let roster = Self {
            criminals,
            detectives,
            by_name,
        };

        let mut seen = FxHashSet::default();
        for detective in &roster.detectives {
            if !seen.insert(detective.as_str()) {
                return Err(RosterError::DuplicateDetective(detective.clone()));
            }
            if roster.get(detective).is_some() {
                return Err(RosterError::NameClash(detective.clone()));
            }
        }

        Ok(roster)
    }

    /// The standard 30-criminal, 15-detective roster.
    #[must_use]
    pub fn standard() -> Self {
        let criminals: Vec<CriminalProfile> = STANDARD_CRIMINALS
            .iter()
            .map(|&(name, crime, danger)| CriminalProfile::new(name, crime, danger))
            .collect();
        let detectives = STANDARD_DETECTIVES.iter().map(|d| d.to_string()).collect();

        let by_name = criminals
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();

        Self {
            criminals,
            detectives,
            by_name,
        }
    }

    /// All criminal profiles in database order.
    #[must_use]
    pub fn criminals(&self) -> &[CriminalProfile] {
        &self.criminals
    }

    /// All detective names in database order.
    #[must_use]
    pub fn detectives(&self) -> &[String] {
        &self.detectives
    }

    /// Look up a criminal profile by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CriminalProfile> {
        self.by_name.get(name).map(|&i| &self.criminals[i])
    }

    /// Criminal profiles matching a predicate, in database order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CriminalProfile>
    where
        F: Fn(&CriminalProfile) -> bool,
    {
        self.criminals.iter().filter(move |c| predicate(c))
    }
}
