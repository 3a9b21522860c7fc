// Injected infrastructure seams

pub mod traits;

pub use traits::*;
