pub mod participation;
pub mod report_row;
