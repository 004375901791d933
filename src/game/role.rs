//! Role names and factions.
//!
//! The role set is closed. Every role belongs to exactly one faction, which
//! is all the win check needs to know about it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A role dealt to a player at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleName {
    Paladin,
    Sorcerer,
    FortuneTeller,
    Wolf,
    Villager,
    Hunter,
}

/// All roles, in declaration order.
pub const ALL_ROLES: [RoleName; 6] = [
    RoleName::Paladin,
    RoleName::Sorcerer,
    RoleName::FortuneTeller,
    RoleName::Wolf,
    RoleName::Villager,
    RoleName::Hunter,
];

/// The side a role plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Faction {
    Village,
    Wolves,
}

impl RoleName {
    /// Returns the display name used in log lines.
    pub const fn name(self) -> &'static str {
        match self {
            RoleName::Paladin => "Paladin",
            RoleName::Sorcerer => "Sorcerer",
            RoleName::FortuneTeller => "Fortune Teller",
            RoleName::Wolf => "Wolf",
            RoleName::Villager => "Villager",
            RoleName::Hunter => "Hunter",
        }
    }

    /// Everything that is not a Wolf counts for the village.
    pub const fn faction(self) -> Faction {
        match self {
            RoleName::Wolf => Faction::Wolves,
            _ => Faction::Village,
        }
    }

    /// Parses a role name, ignoring case, spaces, underscores and hyphens.
    pub fn parse(s: &str) -> Option<RoleName> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ALL_ROLES
            .iter()
            .copied()
            .find(|r| r.name().replace(' ', "").to_ascii_lowercase() == key)
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a role name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for RoleName {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleName::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl Serialize for RoleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for RoleName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
