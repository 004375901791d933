//! Phase resolution.
//!
//! Settles a night's buffered actions or a day's votes into status changes,
//! sequences turns within the night, and decides when the game is over.

pub mod day;
pub mod night;
pub mod outcome;
pub mod phase;

pub use day::{resolve_day, DayOutcome, VoteTally};
pub use night::{apply_night, resolve_night, Effect, NightDelta, NightOutcome, Reveal};
pub use outcome::{check_game_end, evaluate, Winner};
pub use phase::TurnScheduler;
