pub mod event;
pub mod event_member;
