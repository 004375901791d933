//! Game state store.
//!
//! Holds everything that survives from one phase to the next: the roster,
//! the cross-round role data, the action log, and the coarse phase and
//! lifecycle flags. Resolvers mutate it only through the methods below.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::player::{Player, Status};
use super::role::{Faction, RoleName};
use crate::resolve::outcome::Winner;

/// Night or day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Night,
    Day,
}

impl Phase {
    /// The phase that follows this one.
    pub const fn flipped(self) -> Phase {
        match self {
            Phase::Night => Phase::Day,
            Phase::Day => Phase::Night,
        }
    }
}

/// Whether actions are accepted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Setup,
    Playing,
    Ended,
}

/// The two single-use Sorcerer potions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Potion {
    Revive,
    Kill,
}

/// Remaining Sorcerer potions. Each count is 0 or 1 and never goes back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potions {
    pub revive: u8,
    pub kill: u8,
}

impl Default for Potions {
    fn default() -> Self {
        Potions { revive: 1, kill: 1 }
    }
}

impl Potions {
    /// Clamps both counts into `0..=1`.
    pub fn clamped(self) -> Potions {
        Potions {
            revive: self.revive.min(1),
            kill: self.kill.min(1),
        }
    }

    /// True if at least one dose of `potion` remains.
    pub fn available(&self, potion: Potion) -> bool {
        match potion {
            Potion::Revive => self.revive > 0,
            Potion::Kill => self.kill > 0,
        }
    }

    /// Uses up a potion. Spending an empty potion leaves it at 0.
    pub fn spend(&mut self, potion: Potion) {
        match potion {
            Potion::Revive => self.revive = 0,
            Potion::Kill => self.kill = 0,
        }
    }
}

/// Role data that persists across nights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossRoundData {
    /// Whoever the Paladin last protected successfully.
    pub last_protected: Option<String>,
    pub potions: Potions,
}

/// Human-readable game history, newest entry first. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionLog(VecDeque<String>);

impl ActionLog {
    /// Records a line as the newest entry.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::debug!("log: {}", line);
        self.0.push_front(line);
    }

    /// Iterates entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The most recent entry.
    pub fn newest(&self) -> Option<&str> {
        self.0.front().map(String::as_str)
    }

    /// Number of entries recorded.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any entry contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|l| l.contains(needle))
    }
}

/// The single owner of all persistent game data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub cross_round: CrossRoundData,
    pub log: ActionLog,
    pub phase: Phase,
    pub lifecycle: Lifecycle,
    pub winner: Option<Winner>,
}

impl GameState {
    /// Creates a state in setup with the given roster and starting potions.
    pub fn new(players: Vec<Player>, potions: Potions) -> Self {
        GameState {
            players,
            cross_round: CrossRoundData {
                last_protected: None,
                potions: potions.clamped(),
            },
            log: ActionLog::default(),
            phase: Phase::Night,
            lifecycle: Lifecycle::Setup,
            winner: None,
        }
    }

    /// Looks up a player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// The role held by `name`, dead or alive.
    pub fn role_of(&self, name: &str) -> Option<RoleName> {
        self.player(name).map(|p| p.role)
    }

    /// True if `name` exists and is alive.
    pub fn is_alive(&self, name: &str) -> bool {
        self.player(name).is_some_and(Player::is_alive)
    }

    /// Sets a player's status. Returns false if no such player exists.
    pub fn set_status(&mut self, name: &str, status: Status) -> bool {
        match self.players.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.status = status;
                true
            }
            None => false,
        }
    }

    /// True if some living player holds `role`.
    pub fn role_in_play(&self, role: RoleName) -> bool {
        self.players.iter().any(|p| p.role == role && p.is_alive())
    }

    /// Number of living players on `faction`.
    pub fn alive_in(&self, faction: Faction) -> usize {
        self.players
            .iter()
            .filter(|p| p.is_alive() && p.role.faction() == faction)
            .count()
    }

    /// True between `start` and the end of the game.
    pub fn is_playing(&self) -> bool {
        self.lifecycle == Lifecycle::Playing
    }
}
