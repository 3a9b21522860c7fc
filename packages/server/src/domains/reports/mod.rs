//! Reporting - participation aggregates and their text exports
//!
//! `models` runs the grouping queries; `export` turns their rows into CSV
//! and TXT artifacts. Exports are read-only and byte-for-byte reproducible
//! for the same underlying rows.

pub mod export;
pub mod models;

pub use export::{MemberSummaryRow, MemberSummaryTable};
pub use models::participation::{MemberTaskCount, TaskParticipation};
pub use models::report_row::{ReportRow, Stats};
