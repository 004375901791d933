//! Moderator protocol handling.
//!
//! Parses the line-oriented commands a moderator or host sends to the
//! engine, and reads the roster supplied at setup.

pub mod parser;
pub mod roster;

pub use parser::{parse_command, Command};
pub use roster::{load_roster, parse_roster, validate_roster, RosterError};
