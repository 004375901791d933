//! Moderator command parser.
//!
//! Parses lines typed by the moderator (or piped in by a host) into
//! structured `Command` variants that the session loop can dispatch on.

use crate::game::{Player, RoleName, Verb};

/// A parsed moderator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the pending roster with the contents of a JSON file.
    Roster { path: String },

    /// Load a game configuration file.
    Config { path: String },

    /// Add one player to the pending roster: `player <id> <name> <role>`.
    AddPlayer(Player),

    /// Begin the first night.
    Start,

    /// Record the current role's night action: `act <verb> [target]`.
    Act { verb: Verb, target: Option<String> },

    /// Cast a day vote: `vote <target>`.
    Vote { target: String },

    /// Close the day's voting.
    Close,

    /// Report the phase and whose turn it is.
    Turn,

    /// Print the action log, newest first.
    Log,

    /// Print the full state as JSON.
    State,

    /// Discard the current game and roster.
    NewGame,

    /// Exit the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "start" => Some(Command::Start),
        "close" => Some(Command::Close),
        "turn" => Some(Command::Turn),
        "log" => Some(Command::Log),
        "state" => Some(Command::State),
        "newgame" => Some(Command::NewGame),
        "quit" => Some(Command::Quit),

        "roster" => parse_path(args, "roster").map(|path| Command::Roster { path }),
        "config" => parse_path(args, "config").map(|path| Command::Config { path }),
        "player" => parse_player(args),
        "act" => parse_act(args),
        "vote" => parse_vote(args),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Joins the remaining tokens into a path, allowing spaces.
fn parse_path(args: &[&str], cmd: &str) -> Option<String> {
    if args.is_empty() {
        log::warn!("malformed {}: expected '{} <path>'", cmd, cmd);
        return None;
    }
    Some(args.join(" "))
}

/// Parses `player <id> <name> <role...>`. The role may span several tokens
/// ("fortune teller").
fn parse_player(args: &[&str]) -> Option<Command> {
    if args.len() < 3 {
        log::warn!("malformed player: expected 'player <id> <name> <role>'");
        return None;
    }
    let id = match args[0].parse::<u32>() {
        Ok(id) => id,
        Err(_) => {
            log::warn!("malformed player: invalid id '{}'", args[0]);
            return None;
        }
    };
    let role_text = args[2..].join(" ");
    let role = match RoleName::parse(&role_text) {
        Some(r) => r,
        None => {
            log::warn!("malformed player: unknown role '{}'", role_text);
            return None;
        }
    };
    Some(Command::AddPlayer(Player::new(id, args[1], role)))
}

/// Joins target tokens back into a player name ("Mary Ann").
fn join_target(args: &[&str]) -> Option<String> {
    (!args.is_empty()).then(|| args.join(" "))
}

/// Parses `act <verb> [target...]`.
fn parse_act(args: &[&str]) -> Option<Command> {
    let Some((&verb_text, rest)) = args.split_first() else {
        log::warn!("malformed act: expected 'act <verb> [target]'");
        return None;
    };
    let Some(verb) = Verb::parse(verb_text) else {
        log::warn!("malformed act: unknown verb '{}'", verb_text);
        return None;
    };
    if !verb.needs_target() && !rest.is_empty() {
        log::warn!("malformed act: {} takes no target", verb);
        return None;
    }
    Some(Command::Act {
        verb,
        target: join_target(rest),
    })
}

/// Parses `vote <target...>`.
fn parse_vote(args: &[&str]) -> Option<Command> {
    match join_target(args) {
        Some(target) => Some(Command::Vote { target }),
        None => {
            log::warn!("malformed vote: expected 'vote <target>'");
            None
        }
    }
}
