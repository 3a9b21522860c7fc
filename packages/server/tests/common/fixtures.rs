//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use chrono::NaiveDate;
use guild_core::common::{EventId, MemberId};
use guild_core::domains::events::{Event, EventInput, RosterEntry};
use guild_core::domains::members::{Member, MemberInput};
use sqlx::SqlitePool;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date")
}

/// Create a member with an empty remark
pub async fn create_test_member(pool: &SqlitePool, name: &str) -> Result<MemberId> {
    let input = MemberInput::new(Some(name), None).expect("fixture name");
    let member = Member::create(&input, pool).await?;
    Ok(member.id)
}

/// Create an event whose roster is `members` in the given order
pub async fn create_test_event(
    pool: &SqlitePool,
    on: &str,
    title: &str,
    task: &str,
    members: &[MemberId],
) -> Result<EventId> {
    let entries = members.iter().copied().map(RosterEntry::Id).collect();
    let input = EventInput::new(
        date(on),
        title.to_string(),
        Some(task.to_string()),
        None,
        entries,
    );
    let detail = Event::create(&input, pool).await?;
    Ok(detail.event.id)
}

/// Create an event with per-member notes
pub async fn create_test_event_with_notes(
    pool: &SqlitePool,
    on: &str,
    title: &str,
    task: &str,
    members: &[(MemberId, &str)],
) -> Result<EventId> {
    let entries = members
        .iter()
        .map(|(id, note)| RosterEntry::Annotated {
            id: *id,
            note: Some(note.to_string()),
        })
        .collect();
    let input = EventInput::new(
        date(on),
        title.to_string(),
        Some(task.to_string()),
        None,
        entries,
    );
    let detail = Event::create(&input, pool).await?;
    Ok(detail.event.id)
}
