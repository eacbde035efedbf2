//! Core game types: state, actions, RNG, configuration.
//!
//! This module contains the building blocks the rules operate on. Nothing
//! here decides outcomes; `rules` does that.

pub mod action;
pub mod config;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::JudgeConfig;
pub use rng::{Dice, GameRng};
pub use state::{DetectiveStatus, Docket, GameState, Gauge};
