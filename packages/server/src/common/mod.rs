// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod filters;
pub mod id;
pub mod utils;

pub use auth::{AuthError, Principal};
pub use entity_ids::*;
pub use filters::{DateRange, FilterError, ParticipationFilter};
pub use id::Id;
