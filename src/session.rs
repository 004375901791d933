//! Moderator session.
//!
//! Holds the pending roster and configuration until the game starts, then
//! forwards commands to the engine and writes protocol responses:
//! `log <line>` for each new action-log entry (oldest first), then one
//! status line (`ok ...`, `ended <winner>` or `error <message>`).

use std::io::{self, Write};

use crate::config::GameConfig;
use crate::engine::{Engine, SubmitError};
use crate::game::{Lifecycle, Phase, Player};
use crate::protocol::parser::Command;
use crate::protocol::roster::load_roster;

/// Mutable state of one moderator session.
#[derive(Debug, Default)]
pub struct Session {
    config: GameConfig,
    pending: Vec<Player>,
    engine: Option<Engine>,
}

impl Session {
    /// Creates a session in setup with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The running engine, once `start` has succeeded.
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Dispatches one command. Returns `Ok(false)` when the session should end.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<bool> {
        match cmd {
            Command::Roster { path } => self.handle_roster(&path, out)?,
            Command::Config { path } => self.handle_config(&path, out)?,
            Command::AddPlayer(player) => self.handle_add_player(player, out)?,
            Command::Start => self.handle_start(out)?,
            Command::Act { verb, target } => {
                self.with_engine(out, |engine| {
                    let role = match engine.current_role() {
                        Some(role) => role,
                        None if engine.lifecycle() != Lifecycle::Playing => {
                            return Err(SubmitError::NotPlaying)
                        }
                        None => return Err(SubmitError::WrongPhase(engine.phase())),
                    };
                    engine
                        .submit_night_action(role, verb, target.as_deref())
                        .map(|_| ())
                })?;
            }
            Command::Vote { target } => {
                self.with_engine(out, |engine| engine.submit_vote(&target).map(|_| ()))?;
            }
            Command::Close => {
                self.with_engine(out, |engine| engine.close_voting().map(|_| ()))?;
            }
            Command::Turn => self.handle_turn(out)?,
            Command::Log => self.handle_log(out)?,
            Command::State => self.handle_state(out)?,
            Command::NewGame => {
                *self = Session {
                    config: std::mem::take(&mut self.config),
                    ..Session::default()
                };
                writeln!(out, "ok newgame")?;
            }
            Command::Quit => return Ok(false),
        }
        out.flush()?;
        Ok(true)
    }

    fn in_setup(&self) -> bool {
        self.engine.is_none()
    }

    fn handle_roster<W: Write>(&mut self, path: &str, out: &mut W) -> io::Result<()> {
        if !self.in_setup() {
            return writeln!(out, "error {}", SubmitError::NotInSetup);
        }
        match load_roster(path) {
            Ok(players) => {
                self.pending = players;
                writeln!(out, "ok roster {}", self.pending.len())
            }
            Err(e) => {
                log::warn!("roster {}: {}", path, e);
                writeln!(out, "error {}", e)
            }
        }
    }

    fn handle_config<W: Write>(&mut self, path: &str, out: &mut W) -> io::Result<()> {
        if !self.in_setup() {
            return writeln!(out, "error {}", SubmitError::NotInSetup);
        }
        match GameConfig::load(path) {
            Ok(config) => {
                self.config = config;
                writeln!(out, "ok config")
            }
            Err(e) => {
                log::warn!("config {}: {}", path, e);
                writeln!(out, "error {}", e)
            }
        }
    }

    fn handle_add_player<W: Write>(&mut self, player: Player, out: &mut W) -> io::Result<()> {
        if !self.in_setup() {
            return writeln!(out, "error {}", SubmitError::NotInSetup);
        }
        let name = player.name.clone();
        self.pending.push(player);
        writeln!(out, "ok player {}", name)
    }

    fn handle_start<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.in_setup() {
            return writeln!(out, "error {}", SubmitError::NotInSetup);
        }
        let mut engine = match Engine::new(self.pending.clone(), self.config.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                log::warn!("start refused: {}", e);
                return writeln!(out, "error {}", e);
            }
        };
        if let Err(e) = engine.start() {
            return writeln!(out, "error {}", e);
        }
        self.engine = Some(engine);
        self.write_new_log(0, out)?;
        self.write_status(out)
    }

    /// Runs an engine submission and reports new log lines plus status.
    fn with_engine<W, F>(&mut self, out: &mut W, f: F) -> io::Result<()>
    where
        W: Write,
        F: FnOnce(&mut Engine) -> Result<(), SubmitError>,
    {
        let Some(engine) = self.engine.as_mut() else {
            return writeln!(out, "error {}", SubmitError::NotPlaying);
        };
        let before = engine.state().log.len();
        if let Err(e) = f(engine) {
            log::warn!("rejected: {}", e);
            return writeln!(out, "error {}", e);
        }
        self.write_new_log(before, out)?;
        self.write_status(out)
    }

    fn write_new_log<W: Write>(&self, before: usize, out: &mut W) -> io::Result<()> {
        let Some(engine) = &self.engine else {
            return Ok(());
        };
        let log = &engine.state().log;
        let fresh: Vec<&str> = log.iter().take(log.len() - before).collect();
        for line in fresh.iter().rev() {
            writeln!(out, "log {}", line)?;
        }
        Ok(())
    }

    fn write_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.engine {
            None => writeln!(out, "ok setup {}", self.pending.len()),
            Some(engine) => match (engine.lifecycle(), engine.phase()) {
                (Lifecycle::Ended, _) => match engine.winner() {
                    Some(w) => writeln!(out, "ended {}", w),
                    None => writeln!(out, "ended"),
                },
                (_, Phase::Night) => match engine.current_role() {
                    Some(role) => writeln!(out, "ok night {}", role),
                    None => writeln!(out, "ok night"),
                },
                (_, Phase::Day) => writeln!(out, "ok day {}", engine.tally().total()),
            },
        }
    }

    fn handle_turn<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_status(out)
    }

    fn handle_log<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(engine) = &self.engine {
            for line in engine.state().log.iter() {
                writeln!(out, "log {}", line)?;
            }
        }
        Ok(())
    }

    fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = match &self.engine {
            Some(engine) => serde_json::to_string(&engine.snapshot()),
            None => serde_json::to_string(&self.pending),
        };
        match json {
            Ok(json) => writeln!(out, "{}", json),
            Err(e) => writeln!(out, "error {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parser::parse_command;

    fn run(session: &mut Session, lines: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for line in lines {
            if let Some(cmd) = parse_command(line) {
                if !session.handle(cmd, &mut out).unwrap() {
                    break;
                }
            }
        }
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    const SETUP: [&str; 5] = [
        "player 1 Pia paladin",
        "player 2 Sol sorcerer",
        "player 3 Fay fortune teller",
        "player 4 Wulf wolf",
        "player 5 Vin villager",
    ];

    #[test]
    fn start_reports_first_turn() {
        let mut session = Session::new();
        let mut lines = SETUP.to_vec();
        lines.push("start");
        let out = run(&mut session, &lines);
        assert_eq!(out.last().map(String::as_str), Some("ok night Paladin"));
    }

    #[test]
    fn start_with_empty_roster_is_an_error() {
        let mut session = Session::new();
        let out = run(&mut session, &["start"]);
        assert_eq!(out, vec!["error roster is empty"]);
        assert!(session.engine().is_none());
    }

    #[test]
    fn act_before_start_is_an_error() {
        let mut session = Session::new();
        let out = run(&mut session, &["act pass"]);
        assert_eq!(out, vec!["error game is not in progress"]);
    }

    #[test]
    fn night_then_vote_ends_game() {
        let mut session = Session::new();
        let mut lines = SETUP.to_vec();
        lines.extend([
            "start",
            "act protect Vin",
            "act pass",
            "act reveal Wulf",
            "act kill Vin",
            "vote Wulf",
            "close",
        ]);
        let out = run(&mut session, &lines);
        assert!(out.contains(&"log Fortune Teller revealed Wulf is a Wolf".to_string()));
        assert!(out.contains(&"log Day breaks".to_string()));
        assert!(out.contains(&"ok day 0".to_string()));
        assert!(out.contains(&"log Wulf was voted out by the village".to_string()));
        assert_eq!(out.last().map(String::as_str), Some("ended village-wins"));
    }

    #[test]
    fn roster_is_locked_after_start() {
        let mut session = Session::new();
        let mut lines = SETUP.to_vec();
        lines.extend(["start", "player 6 Late villager"]);
        let out = run(&mut session, &lines);
        assert_eq!(out.last().map(String::as_str), Some("error game has already started"));
    }

    #[test]
    fn newgame_returns_to_setup() {
        let mut session = Session::new();
        let mut lines = SETUP.to_vec();
        lines.extend(["start", "newgame", "turn"]);
        let out = run(&mut session, &lines);
        assert_eq!(out.last().map(String::as_str), Some("ok setup 0"));
        assert!(session.engine().is_none());
    }

    #[test]
    fn quit_stops_processing() {
        let mut session = Session::new();
        let out = run(&mut session, &["quit", "turn"]);
        assert!(out.is_empty());
    }
}
