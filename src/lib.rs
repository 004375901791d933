//! Nightwatch moderator engine library.
//!
//! Exposes the game model, phase resolvers, engine state, configuration and
//! moderator protocol for use by integration tests and the binary entry point.

pub mod config;
pub mod engine;
pub mod game;
pub mod protocol;
pub mod resolve;
pub mod session;
