//! Turn sequencing.
//!
//! Tracks whose turn it is during the night. The night is over when the
//! counter wraps back to the first role; the day has no counter and ends
//! when the moderator closes voting.

use crate::game::{RoleName, TurnOrder};

/// Cyclic position within the night turn order.
#[derive(Debug, Clone)]
pub struct TurnScheduler {
    order: TurnOrder,
    current: usize,
}

impl TurnScheduler {
    /// Starts at the first role of `order`.
    pub fn new(order: TurnOrder) -> Self {
        TurnScheduler { order, current: 0 }
    }

    /// The role expected to act next.
    pub fn current_role(&self) -> RoleName {
        self.order.role_at(self.current)
    }

    /// Index of the current role within the turn order.
    pub fn index(&self) -> usize {
        self.current
    }

    /// The order being cycled through.
    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    /// Moves to the next role and reports whether the night is complete.
    ///
    /// The counter is incremented first and the wrap is read from the new
    /// value, so the last turn of a night is always the one that completes it.
    pub fn advance(&mut self) -> bool {
        self.current = (self.current + 1) % self.order.len();
        self.current == 0
    }

    /// Returns to the first role.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
