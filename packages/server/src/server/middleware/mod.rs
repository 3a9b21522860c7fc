// HTTP request gates
pub mod auth;

pub use auth::*;
