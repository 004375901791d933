//! Day vote resolution.
//!
//! Votes accumulate in an order-preserving tally. When the moderator closes
//! voting, the player with the most votes is eliminated; ties go to the
//! player who received a vote first.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::game::{GameState, Phase, RoleName, Status};

use super::outcome::{check_game_end, Winner};

/// Vote counts per target, in first-vote order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    entries: Vec<(String, u32)>,
}

impl VoteTally {
    /// Adds one vote for `target` and returns its new count.
    pub fn add(&mut self, target: &str) -> u32 {
        match self.entries.iter_mut().find(|(name, _)| name == target) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                self.entries.push((target.to_string(), 1));
                1
            }
        }
    }

    /// Votes cast for `target`.
    pub fn count(&self, target: &str) -> u32 {
        self.entries
            .iter()
            .find(|(name, _)| name == target)
            .map_or(0, |(_, c)| *c)
    }

    /// Total votes cast so far.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates in the order they first received a vote.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    /// The plurality leader. Only a strictly larger count displaces the
    /// current leader, so earlier entries win ties.
    pub fn leader(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (name, count) in &self.entries {
            match best {
                Some((_, c)) if *count <= c => {}
                _ => best = Some((name.as_str(), *count)),
            }
        }
        best
    }

    /// Discards all votes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for VoteTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// The result of closing a day's vote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub eliminated: Option<String>,
    /// True when the eliminated player was the Hunter. The Hunter's parting
    /// shot is announced but not carried out.
    pub hunter_pending: bool,
    pub winner: Option<Winner>,
}

/// Eliminates the plurality leader, clears the tally, flips to night, and
/// checks for a winner.
pub fn resolve_day(tally: &mut VoteTally, state: &mut GameState) -> DayOutcome {
    let mut outcome = DayOutcome::default();

    if let Some((name, votes)) = tally.leader() {
        let name = name.to_string();
        log::debug!("{} voted out with {} votes", name, votes);
        state.set_status(&name, Status::Dead);
        state.log.push(format!("{} was voted out by the village", name));

        if state.role_of(&name) == Some(RoleName::Hunter) {
            state.log.push("Hunter can choose a player to kill");
            log::info!("hunter {} eliminated; parting shot is not resolved", name);
            outcome.hunter_pending = true;
        }
        outcome.eliminated = Some(name);
    }

    tally.clear();
    state.phase = Phase::Night;
    state.log.push("Night falls");
    log::info!("night falls");

    outcome.winner = check_game_end(state);
    outcome
}
