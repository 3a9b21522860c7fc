//! Task taxonomy - named, categorized activity types
//!
//! Definitions are soft-deleted only: events reference tasks by name, so a
//! retired definition must stay resolvable for history.

pub mod data;
pub mod models;

pub use data::TaskInput;
pub use models::task_definition::{TaskDefinition, TaskError};
