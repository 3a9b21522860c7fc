//! Member domain - guild roster entries
//!
//! Members are plain rows: a display name, a free-text remark and a
//! creation timestamp. Participation lives in the events domain.

pub mod data;
pub mod models;

pub use data::{ImportReport, MemberImportRow, MemberInput};
pub use models::member::Member;
