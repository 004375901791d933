//! Night action resolution.
//!
//! Each role has a handler mapping its recorded action to an effect on the
//! current state. Handlers are pure; `resolve_night` folds their effects in
//! turn-order scan order into one `NightOutcome`, and `apply_night` writes
//! that outcome back to the state store.
//!
//! Kills share a single slot, so when both the Sorcerer and the Wolves kill
//! in the same night the later action in scan order wins. With the default
//! turn order that is the Wolf.

use crate::game::{Action, GameState, Phase, Potion, RoleName, Status, Verb};

use super::outcome::{check_game_end, Winner};

/// What a single night action asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Protect(String),
    Revive(String),
    Kill(String),
    Reveal(Reveal),
    /// The Paladin stood down; tomorrow nobody counts as last protected.
    Lapse,
    Nothing,
}

/// A Fortune Teller reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub player: String,
    pub role: RoleName,
}

/// A handler's contribution to the night: an effect and the potion it costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightDelta {
    pub effect: Effect,
    pub spends: Option<Potion>,
}

impl NightDelta {
    fn free(effect: Effect) -> Self {
        NightDelta { effect, spends: None }
    }

    fn nothing() -> Self {
        Self::free(Effect::Nothing)
    }
}

type Handler = fn(&Action, &GameState) -> NightDelta;

/// Looks up the resolution handler for a role. Roles without night powers
/// have none.
fn handler_for(role: RoleName) -> Option<Handler> {
    match role {
        RoleName::Paladin => Some(paladin),
        RoleName::Sorcerer => Some(sorcerer),
        RoleName::FortuneTeller => Some(fortune_teller),
        RoleName::Wolf => Some(wolf),
        RoleName::Villager | RoleName::Hunter => None,
    }
}

fn paladin(action: &Action, state: &GameState) -> NightDelta {
    match (action.verb, &action.target) {
        (Verb::Protect, Some(target))
            if state.cross_round.last_protected.as_deref() != Some(target.as_str()) =>
        {
            NightDelta::free(Effect::Protect(target.clone()))
        }
        (Verb::Pass, _) => NightDelta::free(Effect::Lapse),
        _ => NightDelta::nothing(),
    }
}

fn sorcerer(action: &Action, state: &GameState) -> NightDelta {
    match (action.verb, &action.target) {
        // Reviving the living is refused; the potion is kept.
        (Verb::Revive, Some(target)) if state.player(target).is_some_and(|p| !p.is_alive()) => {
            NightDelta {
                effect: Effect::Revive(target.clone()),
                spends: Some(Potion::Revive),
            }
        }
        (Verb::Kill, Some(target)) => NightDelta {
            effect: Effect::Kill(target.clone()),
            spends: Some(Potion::Kill),
        },
        _ => NightDelta::nothing(),
    }
}

fn fortune_teller(action: &Action, state: &GameState) -> NightDelta {
    match (action.verb, &action.target) {
        (Verb::Reveal, Some(target)) => match state.player(target) {
            Some(p) => NightDelta::free(Effect::Reveal(Reveal {
                player: p.name.clone(),
                role: p.role,
            })),
            None => NightDelta::nothing(),
        },
        _ => NightDelta::nothing(),
    }
}

fn wolf(action: &Action, state: &GameState) -> NightDelta {
    match (action.verb, &action.target) {
        (Verb::Kill, Some(target)) => {
            let fellow_wolf = state
                .player(target)
                .is_some_and(|p| p.is_alive() && p.role == RoleName::Wolf);
            if fellow_wolf {
                NightDelta::nothing()
            } else {
                NightDelta::free(Effect::Kill(target.clone()))
            }
        }
        _ => NightDelta::nothing(),
    }
}

/// The settled result of one night.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightOutcome {
    /// Effective protection, if the Paladin's choice was allowed.
    pub protected: Option<String>,
    /// The Paladin passed, so the repeat-protection rule is reset.
    pub protection_lapsed: bool,
    /// The kill that will be attempted.
    pub killed: Option<String>,
    pub revived: Option<String>,
    pub reveal: Option<Reveal>,
    /// Potions consumed tonight.
    pub spent: Vec<Potion>,
}

impl NightOutcome {
    /// The kill that actually lands, after protection.
    pub fn death(&self) -> Option<&str> {
        match (&self.killed, &self.protected) {
            (Some(k), Some(p)) if k == p => None,
            (Some(k), _) => Some(k.as_str()),
            (None, _) => None,
        }
    }
}

/// Folds the night's actions into a single outcome without touching state.
///
/// Potions are re-checked here; an action whose potion is already gone has
/// no effect.
pub fn resolve_night(actions: &[Action], state: &GameState) -> NightOutcome {
    let mut outcome = NightOutcome::default();
    let mut potions = state.cross_round.potions;

    for action in actions {
        let Some(handler) = handler_for(action.role) else {
            continue;
        };
        let delta = handler(action, state);
        if let Some(potion) = delta.spends {
            if !potions.available(potion) {
                log::debug!("{} has no {:?} potion left", action.role, potion);
                continue;
            }
            potions.spend(potion);
            outcome.spent.push(potion);
        }
        match delta.effect {
            Effect::Protect(name) => outcome.protected = Some(name),
            Effect::Revive(name) => outcome.revived = Some(name),
            Effect::Kill(name) => outcome.killed = Some(name),
            Effect::Reveal(reveal) => outcome.reveal = Some(reveal),
            Effect::Lapse => outcome.protection_lapsed = true,
            Effect::Nothing => {}
        }
    }

    outcome
}

/// Writes a night outcome to the state, flips to day, and checks for a winner.
pub fn apply_night(outcome: &NightOutcome, state: &mut GameState) -> Option<Winner> {
    if let Some(name) = &outcome.protected {
        state.cross_round.last_protected = Some(name.clone());
    } else if outcome.protection_lapsed {
        state.cross_round.last_protected = None;
    }
    for &potion in &outcome.spent {
        state.cross_round.potions.spend(potion);
    }

    if let Some(name) = &outcome.revived {
        if state.set_status(name, Status::Alive) {
            state.log.push(format!("{} was revived by the Sorcerer", name));
        }
    }

    if let Some(name) = outcome.death() {
        if state.is_alive(name) {
            state.set_status(name, Status::Dead);
            state.log.push(format!("{} was killed during the night", name));
        }
    }

    if let Some(reveal) = &outcome.reveal {
        state.log.push(format!(
            "Fortune Teller revealed {} is a {}",
            reveal.player, reveal.role
        ));
    }

    state.phase = Phase::Day;
    state.log.push("Day breaks");
    log::info!("day breaks");

    check_game_end(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Lifecycle, Player, Potions};

    fn table() -> GameState {
        let mut state = GameState::new(
            vec![
                Player::new(1, "Pia", RoleName::Paladin),
                Player::new(2, "Sol", RoleName::Sorcerer),
                Player::new(3, "Fay", RoleName::FortuneTeller),
                Player::new(4, "Wulf", RoleName::Wolf),
                Player::new(5, "Vin", RoleName::Villager),
                Player::new(6, "Rex", RoleName::Wolf),
            ],
            Potions::default(),
        );
        state.lifecycle = Lifecycle::Playing;
        state
    }

    fn act(role: RoleName, verb: Verb, target: &str) -> Action {
        Action::new(role, verb, Some(target.to_string()))
    }

    fn run(actions: &[Action], state: &mut GameState) -> NightOutcome {
        let outcome = resolve_night(actions, state);
        apply_night(&outcome, state);
        outcome
    }

    #[test]
    fn unprotected_wolf_kill_lands() {
        let mut state = table();
        run(&[act(RoleName::Wolf, Verb::Kill, "Vin")], &mut state);
        assert!(!state.is_alive("Vin"));
        assert!(state.log.contains("Vin was killed during the night"));
        assert_eq!(state.phase, Phase::Day);
        assert_eq!(state.log.newest(), Some("Day breaks"));
    }

    #[test]
    fn protection_overrides_kill() {
        let mut state = table();
        let outcome = run(
            &[
                act(RoleName::Paladin, Verb::Protect, "Vin"),
                act(RoleName::Wolf, Verb::Kill, "Vin"),
            ],
            &mut state,
        );
        assert_eq!(outcome.death(), None);
        assert!(state.is_alive("Vin"));
        assert!(!state.log.contains("killed"));
        assert_eq!(state.cross_round.last_protected.as_deref(), Some("Vin"));
    }

    #[test]
    fn repeated_protection_is_void() {
        let mut state = table();
        state.cross_round.last_protected = Some("Vin".into());
        let outcome = run(
            &[
                act(RoleName::Paladin, Verb::Protect, "Vin"),
                act(RoleName::Wolf, Verb::Kill, "Vin"),
            ],
            &mut state,
        );
        assert_eq!(outcome.protected, None);
        assert!(!state.is_alive("Vin"));
        assert_eq!(state.cross_round.last_protected.as_deref(), Some("Vin"));
    }

    #[test]
    fn paladin_pass_clears_last_protected() {
        let mut state = table();
        state.cross_round.last_protected = Some("Vin".into());
        let outcome = run(
            &[Action::new(RoleName::Paladin, Verb::Pass, None)],
            &mut state,
        );
        assert!(outcome.protection_lapsed);
        assert_eq!(state.cross_round.last_protected, None);
    }

    #[test]
    fn wolf_cannot_kill_a_living_wolf() {
        let mut state = table();
        let outcome = run(&[act(RoleName::Wolf, Verb::Kill, "Rex")], &mut state);
        assert_eq!(outcome.killed, None);
        assert!(state.is_alive("Rex"));
    }

    #[test]
    fn sorcerer_kill_spends_potion() {
        let mut state = table();
        run(&[act(RoleName::Sorcerer, Verb::Kill, "Fay")], &mut state);
        assert!(!state.is_alive("Fay"));
        assert_eq!(state.cross_round.potions.kill, 0);
        assert_eq!(state.cross_round.potions.revive, 1);
    }

    #[test]
    fn spent_kill_potion_has_no_effect() {
        let mut state = table();
        state.cross_round.potions.kill = 0;
        let outcome = run(&[act(RoleName::Sorcerer, Verb::Kill, "Fay")], &mut state);
        assert_eq!(outcome.killed, None);
        assert!(outcome.spent.is_empty());
        assert!(state.is_alive("Fay"));
    }

    #[test]
    fn later_wolf_kill_takes_the_kill_slot() {
        let mut state = table();
        let outcome = run(
            &[
                act(RoleName::Sorcerer, Verb::Kill, "Fay"),
                act(RoleName::Wolf, Verb::Kill, "Vin"),
            ],
            &mut state,
        );
        assert_eq!(outcome.killed.as_deref(), Some("Vin"));
        assert!(state.is_alive("Fay"));
        assert!(!state.is_alive("Vin"));
        assert_eq!(state.cross_round.potions.kill, 0);
    }

    #[test]
    fn revive_restores_the_dead() {
        let mut state = table();
        state.set_status("Vin", Status::Dead);
        run(&[act(RoleName::Sorcerer, Verb::Revive, "Vin")], &mut state);
        assert!(state.is_alive("Vin"));
        assert_eq!(state.cross_round.potions.revive, 0);
        assert!(state.log.contains("Vin was revived by the Sorcerer"));
    }

    #[test]
    fn reviving_the_living_keeps_the_potion() {
        let mut state = table();
        let outcome = run(&[act(RoleName::Sorcerer, Verb::Revive, "Vin")], &mut state);
        assert_eq!(outcome.revived, None);
        assert_eq!(state.cross_round.potions.revive, 1);
    }

    #[test]
    fn reveal_is_log_only() {
        let mut state = table();
        let before = state.players.clone();
        run(&[act(RoleName::FortuneTeller, Verb::Reveal, "Wulf")], &mut state);
        assert_eq!(state.players, before);
        assert!(state.log.contains("Fortune Teller revealed Wulf is a Wolf"));
    }

    #[test]
    fn mismatched_verbs_are_ignored() {
        let mut state = table();
        let outcome = run(
            &[
                act(RoleName::Paladin, Verb::Kill, "Vin"),
                act(RoleName::Villager, Verb::Kill, "Vin"),
                act(RoleName::FortuneTeller, Verb::Protect, "Vin"),
            ],
            &mut state,
        );
        assert_eq!(outcome, NightOutcome::default());
        assert!(state.is_alive("Vin"));
    }

    #[test]
    fn log_order_is_death_then_reveal_then_daybreak() {
        let mut state = table();
        run(
            &[
                act(RoleName::FortuneTeller, Verb::Reveal, "Pia"),
                act(RoleName::Wolf, Verb::Kill, "Vin"),
            ],
            &mut state,
        );
        let lines: Vec<&str> = state.log.iter().collect();
        assert_eq!(
            lines,
            vec![
                "Day breaks",
                "Fortune Teller revealed Pia is a Paladin",
                "Vin was killed during the night",
            ]
        );
    }

    #[test]
    fn night_kill_can_end_the_game() {
        let mut state = GameState::new(
            vec![
                Player::new(1, "W", RoleName::Wolf),
                Player::new(2, "V", RoleName::Villager),
            ],
            Potions::default(),
        );
        state.lifecycle = Lifecycle::Playing;
        let outcome = resolve_night(&[act(RoleName::Wolf, Verb::Kill, "V")], &state);
        assert_eq!(apply_night(&outcome, &mut state), Some(Winner::Wolves));
        assert_eq!(state.lifecycle, Lifecycle::Ended);
    }
}
