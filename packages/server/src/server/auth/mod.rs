// Admin session storage
pub mod session;

pub use session::*;
