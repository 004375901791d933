//! Roster input.
//!
//! The roster arrives once at setup as a JSON array of
//! `{ "id", "name", "role" }` objects. Names are how actions and votes refer
//! to players, so they must be unique.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::game::Player;

/// Errors raised while reading or validating a roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster is empty")]
    Empty,

    #[error("duplicate player id {0}")]
    DuplicateId(u32),

    #[error("duplicate player name '{0}'")]
    DuplicateName(String),

    #[error("player {0} has an empty name")]
    EmptyName(u32),

    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
}

/// Checks that a roster is non-empty with unique ids and unique, non-blank names.
pub fn validate_roster(players: &[Player]) -> Result<(), RosterError> {
    if players.is_empty() {
        return Err(RosterError::Empty);
    }
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for p in players {
        if p.name.trim().is_empty() {
            return Err(RosterError::EmptyName(p.id));
        }
        if !ids.insert(p.id) {
            return Err(RosterError::DuplicateId(p.id));
        }
        if !names.insert(p.name.as_str()) {
            return Err(RosterError::DuplicateName(p.name.clone()));
        }
    }
    Ok(())
}

/// Parses and validates a roster from JSON.
pub fn parse_roster(json: &str) -> Result<Vec<Player>, RosterError> {
    let players: Vec<Player> = serde_json::from_str(json)?;
    validate_roster(&players)?;
    Ok(players)
}

/// Reads a roster file.
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Player>, RosterError> {
    let data = fs::read_to_string(path)?;
    parse_roster(&data)
}
