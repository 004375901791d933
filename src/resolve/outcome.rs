//! Win condition evaluation.
//!
//! The game ends as soon as either faction has no living members. This is
//! checked explicitly at the end of every step that can change a status.

use std::fmt;

use serde::Serialize;

use crate::game::{Faction, GameState, Lifecycle};

/// Which side won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Winner {
    #[serde(rename = "wolves-win")]
    Wolves,
    #[serde(rename = "village-wins")]
    Village,
}

impl Winner {
    /// Short tag used on the moderator protocol.
    pub const fn tag(self) -> &'static str {
        match self {
            Winner::Wolves => "wolves-win",
            Winner::Village => "village-wins",
        }
    }

    /// The line appended to the action log when the game ends.
    pub const fn announcement(self) -> &'static str {
        match self {
            Winner::Wolves => "Wolves win! All villagers are dead.",
            Winner::Village => "Village wins! All wolves are dead.",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returns the winner, if any, for the current roster.
///
/// A village wipe is checked first, so a table with nobody alive at all
/// goes to the wolves.
pub fn evaluate(state: &GameState) -> Option<Winner> {
    if state.alive_in(Faction::Village) == 0 {
        Some(Winner::Wolves)
    } else if state.alive_in(Faction::Wolves) == 0 {
        Some(Winner::Village)
    } else {
        None
    }
}

/// Evaluates the roster and ends a running game if a side has won.
///
/// Does nothing unless the game is playing, so the end is announced once.
pub fn check_game_end(state: &mut GameState) -> Option<Winner> {
    if state.lifecycle != Lifecycle::Playing {
        return state.winner;
    }
    let winner = evaluate(state)?;
    state.lifecycle = Lifecycle::Ended;
    state.winner = Some(winner);
    state.log.push(winner.announcement());
    log::info!("game over: {}", winner);
    Some(winner)
}
