//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use guild_core::common::{EventId, MemberId};
//!
//! let member_id = MemberId::new(1);
//! let event_id = EventId::new(1);
//! // member_id and event_id are different types even with equal raw values.
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for guild members.
pub struct Member;

/// Marker type for dated participation events.
pub struct Event;

/// Marker type for task taxonomy entries.
pub struct TaskDefinition;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Event entities.
pub type EventId = Id<Event>;

/// Typed ID for TaskDefinition entities.
pub type TaskDefinitionId = Id<TaskDefinition>;
