//! Engine state management.
//!
//! Owns the game state store, the night turn scheduler, the night action
//! buffer and the day vote tally. The host drives it one submission at a
//! time; every rejected submission leaves the engine untouched.

use serde::Serialize;

use crate::config::GameConfig;
use crate::game::{
    verbs_for, Action, GameState, Lifecycle, Phase, Player, Potion, RoleName, Verb,
};
use crate::protocol::roster::{validate_roster, RosterError};
use crate::resolve::{
    apply_night, check_game_end, resolve_day, resolve_night, DayOutcome, NightOutcome,
    TurnScheduler, VoteTally, Winner,
};

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("game has already started")]
    NotInSetup,

    #[error("game is not in progress")]
    NotPlaying,

    #[error("not allowed during the {0:?} phase")]
    WrongPhase(Phase),

    #[error("it is the {expected}'s turn, not the {got}'s")]
    OutOfTurn { expected: RoleName, got: RoleName },

    #[error("{role} cannot {verb}")]
    IllegalVerb { role: RoleName, verb: Verb },

    #[error("{0} needs a target")]
    MissingTarget(Verb),

    #[error("a vote needs a target")]
    MissingVote,

    #[error("no living player holds the {0} role")]
    RoleNotInPlay(RoleName),

    #[error("no player named '{0}'")]
    UnknownPlayer(String),

    #[error("{0} is dead")]
    TargetDead(String),

    #[error("{0} is still alive")]
    TargetAlive(String),

    #[error("the {0:?} potion is used up")]
    PotionDepleted(Potion),
}

/// What happened after an accepted night action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The night continues with this role.
    NextTurn(RoleName),
    /// That was the last turn; the night was resolved and day has begun
    /// (unless the game ended).
    NightResolved {
        outcome: NightOutcome,
        winner: Option<Winner>,
    },
}

/// A read-only view of the engine for renderers.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    #[serde(flatten)]
    pub state: &'a GameState,
    pub current_role: Option<RoleName>,
    pub votes: &'a VoteTally,
}

/// The moderator engine.
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    scheduler: TurnScheduler,
    night_actions: Vec<Action>,
    tally: VoteTally,
}

impl Engine {
    /// Creates an engine in setup from a validated roster.
    pub fn new(players: Vec<Player>, config: GameConfig) -> Result<Self, RosterError> {
        validate_roster(&players)?;
        Ok(Engine {
            state: GameState::new(players, config.potions),
            scheduler: TurnScheduler::new(config.turn_order),
            night_actions: Vec::new(),
            tally: VoteTally::default(),
        })
    }

    /// Starts play at the first night turn. A roster where one side is
    /// already empty ends immediately.
    pub fn start(&mut self) -> Result<Option<Winner>, SubmitError> {
        if self.state.lifecycle != Lifecycle::Setup {
            return Err(SubmitError::NotInSetup);
        }
        self.state.lifecycle = Lifecycle::Playing;
        self.state.phase = Phase::Night;
        self.scheduler.reset();
        log::info!("game started with {} players", self.state.players.len());
        Ok(check_game_end(&mut self.state))
    }

    /// The underlying game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current day/night phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Setup, playing or ended.
    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    /// The winning side once the game has ended.
    pub fn winner(&self) -> Option<Winner> {
        self.state.winner
    }

    /// Votes cast so far today.
    pub fn tally(&self) -> &VoteTally {
        &self.tally
    }

    /// Actions recorded so far tonight, in turn order.
    pub fn night_actions(&self) -> &[Action] {
        &self.night_actions
    }

    /// The role expected to act, while a night is in progress.
    pub fn current_role(&self) -> Option<RoleName> {
        (self.state.is_playing() && self.state.phase == Phase::Night)
            .then(|| self.scheduler.current_role())
    }

    /// Index of the current role within the turn order.
    pub fn turn_index(&self) -> usize {
        self.scheduler.index()
    }

    /// A serializable view of the whole engine.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: &self.state,
            current_role: self.current_role(),
            votes: &self.tally,
        }
    }

    /// Records the current role's night action.
    ///
    /// On the last role of the turn order the night is resolved in the same
    /// call: statuses change, the phase flips to day and the win condition
    /// is checked.
    pub fn submit_night_action(
        &mut self,
        role: RoleName,
        verb: Verb,
        target: Option<&str>,
    ) -> Result<Advance, SubmitError> {
        let action = self.validate_night_action(role, verb, target)?;
        log::debug!("night action accepted: {}", action.log_line());
        self.state.log.push(action.log_line());
        self.night_actions.push(action);

        if !self.scheduler.advance() {
            return Ok(Advance::NextTurn(self.scheduler.current_role()));
        }

        let actions = std::mem::take(&mut self.night_actions);
        let outcome = resolve_night(&actions, &self.state);
        let winner = apply_night(&outcome, &mut self.state);
        Ok(Advance::NightResolved { outcome, winner })
    }

    fn validate_night_action(
        &self,
        role: RoleName,
        verb: Verb,
        target: Option<&str>,
    ) -> Result<Action, SubmitError> {
        self.require(Phase::Night)?;
        let expected = self.scheduler.current_role();
        if role != expected {
            return Err(SubmitError::OutOfTurn { expected, got: role });
        }
        if !verbs_for(role).contains(&verb) {
            return Err(SubmitError::IllegalVerb { role, verb });
        }
        if verb == Verb::Pass {
            return Ok(Action::new(role, verb, None));
        }

        let target = target
            .filter(|t| !t.trim().is_empty())
            .ok_or(SubmitError::MissingTarget(verb))?;
        if !self.state.role_in_play(role) {
            return Err(SubmitError::RoleNotInPlay(role));
        }
        let player = self
            .state
            .player(target)
            .ok_or_else(|| SubmitError::UnknownPlayer(target.to_string()))?;

        match (verb, player.is_alive()) {
            (Verb::Revive, true) => return Err(SubmitError::TargetAlive(target.to_string())),
            (Verb::Revive, false) | (_, true) => {}
            (_, false) => return Err(SubmitError::TargetDead(target.to_string())),
        }

        let potion = match (role, verb) {
            (RoleName::Sorcerer, Verb::Revive) => Some(Potion::Revive),
            (RoleName::Sorcerer, Verb::Kill) => Some(Potion::Kill),
            _ => None,
        };
        if let Some(p) = potion {
            if !self.state.cross_round.potions.available(p) {
                return Err(SubmitError::PotionDepleted(p));
            }
        }

        Ok(Action::new(role, verb, Some(target.to_string())))
    }

    /// Casts one day vote against a living player and returns their count.
    pub fn submit_vote(&mut self, target: &str) -> Result<u32, SubmitError> {
        self.require(Phase::Day)?;
        if target.trim().is_empty() {
            return Err(SubmitError::MissingVote);
        }
        let player = self
            .state
            .player(target)
            .ok_or_else(|| SubmitError::UnknownPlayer(target.to_string()))?;
        if !player.is_alive() {
            return Err(SubmitError::TargetDead(target.to_string()));
        }
        let count = self.tally.add(target);
        self.state.log.push(format!("Vote cast for {}", target));
        log::debug!("vote for {} ({} total)", target, count);
        Ok(count)
    }

    /// Closes the day's voting: eliminates the plurality leader, flips to
    /// night and checks the win condition.
    pub fn close_voting(&mut self) -> Result<DayOutcome, SubmitError> {
        self.require(Phase::Day)?;
        let outcome = resolve_day(&mut self.tally, &mut self.state);
        self.scheduler.reset();
        Ok(outcome)
    }

    fn require(&self, phase: Phase) -> Result<(), SubmitError> {
        if !self.state.is_playing() {
            return Err(SubmitError::NotPlaying);
        }
        if self.state.phase != phase {
            return Err(SubmitError::WrongPhase(self.state.phase));
        }
        Ok(())
    }
}
