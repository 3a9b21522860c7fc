// Guild Roster - API Core
//
// Admin backend for a game guild: members, dated events with rosters, a task
// taxonomy, and participation reports exported as CSV/TXT.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
