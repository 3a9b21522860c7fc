//! Event domain - dated guild activities and their rosters
//!
//! An event exclusively owns its `event_members` rows. Roster changes are
//! always whole-set replacements inside a single transaction.

pub mod data;
pub mod models;

pub use data::{EventInput, RosterEntry, RosterSlot};
pub use models::event::{Event, EventDetail, EventListItem, EventRosterRow, EventWriteError};
pub use models::event_member::{EventMember, RosterMember};
