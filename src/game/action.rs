//! Night action types.
//!
//! An `Action` is what the moderator records for the role whose turn it is.
//! It lives only until the night is resolved.

use std::fmt;

use super::role::RoleName;

/// The verb chosen for a night turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Paladin: shield a player from tonight's kill.
    Protect,
    /// Sorcerer: bring a dead player back (single use).
    Revive,
    /// Sorcerer (single use) or Wolf: eliminate a player.
    Kill,
    /// Fortune Teller: learn a player's role.
    Reveal,
    /// Skip the turn. The only verb that takes no target.
    Pass,
}

impl Verb {
    /// The lowercase keyword used in commands and the action log.
    pub const fn name(self) -> &'static str {
        match self {
            Verb::Protect => "protect",
            Verb::Revive => "revive",
            Verb::Kill => "kill",
            Verb::Reveal => "reveal",
            Verb::Pass => "pass",
        }
    }

    /// Parses a lowercase verb keyword.
    pub fn parse(s: &str) -> Option<Verb> {
        match s.to_ascii_lowercase().as_str() {
            "protect" => Some(Verb::Protect),
            "revive" => Some(Verb::Revive),
            "kill" => Some(Verb::Kill),
            "reveal" => Some(Verb::Reveal),
            "pass" => Some(Verb::Pass),
            _ => None,
        }
    }

    /// Whether the verb must name a player.
    pub const fn needs_target(self) -> bool {
        !matches!(self, Verb::Pass)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the verbs a role may use on its night turn, pass included.
pub fn verbs_for(role: RoleName) -> &'static [Verb] {
    match role {
        RoleName::Paladin => &[Verb::Protect, Verb::Pass],
        RoleName::Sorcerer => &[Verb::Revive, Verb::Kill, Verb::Pass],
        RoleName::FortuneTeller => &[Verb::Reveal, Verb::Pass],
        RoleName::Wolf => &[Verb::Kill, Verb::Pass],
        RoleName::Villager | RoleName::Hunter => &[Verb::Pass],
    }
}

/// One recorded night turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub role: RoleName,
    pub verb: Verb,
    /// Target player name; `None` only for `Verb::Pass`.
    pub target: Option<String>,
}

impl Action {
    /// Creates an action; validation happens at submission.
    pub fn new(role: RoleName, verb: Verb, target: Option<String>) -> Self {
        Action { role, verb, target }
    }

    /// The line recorded in the action log when the turn is accepted.
    pub fn log_line(&self) -> String {
        match &self.target {
            Some(t) => format!("{} {} {}", self.role, self.verb, t),
            None => format!("{} {}", self.role, self.verb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_verbs() {
        assert_eq!(Verb::parse("kill"), Some(Verb::Kill));
        assert_eq!(Verb::parse("Protect"), Some(Verb::Protect));
        assert_eq!(Verb::parse("vote"), None);
    }

    #[test]
    fn only_pass_takes_no_target() {
        assert!(!Verb::Pass.needs_target());
        assert!(Verb::Kill.needs_target());
        assert!(Verb::Reveal.needs_target());
    }

    #[test]
    fn every_role_may_pass() {
        for role in crate::game::role::ALL_ROLES {
            assert!(verbs_for(role).contains(&Verb::Pass));
        }
    }

    #[test]
    fn log_line_formats() {
        let a = Action::new(RoleName::Wolf, Verb::Kill, Some("Cy".into()));
        assert_eq!(a.log_line(), "Wolf kill Cy");
        let p = Action::new(RoleName::Sorcerer, Verb::Pass, None);
        assert_eq!(p.log_line(), "Sorcerer pass");
    }
}
