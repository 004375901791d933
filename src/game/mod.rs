//! Game data model.
//!
//! Contains the roles, players, night actions, turn order, and the state
//! store that persists between phases.

pub mod action;
pub mod order;
pub mod player;
pub mod role;
pub mod state;

pub use action::{verbs_for, Action, Verb};
pub use order::{TurnOrder, DEFAULT_TURN_ORDER};
pub use player::{Player, Status};
pub use role::{Faction, RoleName, UnknownRole, ALL_ROLES};
pub use state::{ActionLog, CrossRoundData, GameState, Lifecycle, Phase, Potion, Potions};
