// HTTP routes
pub mod admin;
pub mod attachment;
pub mod events;
pub mod health;
pub mod members;
pub mod reports;
pub mod tasks;

pub use health::*;
