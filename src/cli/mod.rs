//! Console front end.
//!
//! Everything here is presentation: parsing what the player types, picking
//! flavor text, and printing. Game outcomes are decided in `rules`.
//!
//! - `input`: turn commands and command-line flags
//! - `headlines`: news headlines and quiet-news lines
//! - `render`: meters, stars, typewriter output
//! - `session`: the interactive loop

pub mod headlines;
pub mod input;
pub mod render;
pub mod session;

pub use headlines::Newsroom;
pub use input::{parse_command, parse_confirmation, CliOptions, Command, InputError};
pub use render::Typewriter;
pub use session::{Session, SessionError};
