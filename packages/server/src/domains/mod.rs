// Business domains
pub mod events;
pub mod members;
pub mod reports;
pub mod tasks;
