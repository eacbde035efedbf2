//! Case files: criminals, detectives, and the databases they come from.
//!
//! ## Key Types
//!
//! - `CriminalProfile`: Static database row (name, crime, danger)
//! - `Criminal`: A profile on today's docket, with its assigned detective
//! - `Roster`: The criminal and detective databases

pub mod criminal;
pub mod roster;

pub use criminal::{Criminal, CriminalProfile};
pub use roster::{Roster, RosterError};
