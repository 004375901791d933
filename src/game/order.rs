//! Night turn order.

use super::role::RoleName;

/// The order in which roles are woken during the night.
pub const DEFAULT_TURN_ORDER: [RoleName; 4] = [
    RoleName::Paladin,
    RoleName::Sorcerer,
    RoleName::FortuneTeller,
    RoleName::Wolf,
];

/// A fixed, non-empty sequence of roles without repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrder(Vec<RoleName>);

impl TurnOrder {
    /// Builds a turn order. Returns `None` if empty or if a role repeats.
    pub fn new(roles: Vec<RoleName>) -> Option<Self> {
        if roles.is_empty() {
            return None;
        }
        for (i, r) in roles.iter().enumerate() {
            if roles[..i].contains(r) {
                return None;
            }
        }
        Some(TurnOrder(roles))
    }

    /// Number of roles woken each night.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed order.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Role at `idx`, wrapping around.
    pub fn role_at(&self, idx: usize) -> RoleName {
        self.0[idx % self.0.len()]
    }

    /// The roles in waking order.
    pub fn roles(&self) -> &[RoleName] {
        &self.0
    }

    /// Position of `role` in the order, if it acts at night.
    pub fn position(&self, role: RoleName) -> Option<usize> {
        self.0.iter().position(|&r| r == role)
    }
}

impl Default for TurnOrder {
    fn default() -> Self {
        TurnOrder(DEFAULT_TURN_ORDER.to_vec())
    }
}
