//! Players and their life status.

use serde::{Deserialize, Serialize};

use super::role::RoleName;

/// Whether a player is still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Alive,
    Dead,
}

/// A seat at the table.
///
/// `id` is the identity; `name` is what the moderator targets actions at and
/// must be unique within a roster. `role` never changes after setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub role: RoleName,
    #[serde(default)]
    pub status: Status,
}

impl Player {
    /// Creates a living player.
    pub fn new(id: u32, name: impl Into<String>, role: RoleName) -> Self {
        Player {
            id,
            name: name.into(),
            role,
            status: Status::Alive,
        }
    }

    /// True while the player's status is `Alive`.
    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }
}
