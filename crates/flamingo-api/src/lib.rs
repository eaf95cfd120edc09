//! flamingo-api: HTTP API layer for the Flamingo swap engine
//!
//! Exposes routing, quoting and invocation building over REST, plus a shared
//! swap session that a block watcher keeps fresh.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
