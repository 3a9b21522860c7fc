use chrono::NaiveDate;
use serde::Deserialize;

use crate::common::MemberId;

/// A roster entry as sent by clients: either a bare member id or an object
/// carrying a per-participation note.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RosterEntry {
    Id(MemberId),
    Annotated {
        id: MemberId,
        #[serde(default)]
        note: Option<String>,
    },
}

impl RosterEntry {
    pub fn member_id(&self) -> MemberId {
        match self {
            RosterEntry::Id(id) | RosterEntry::Annotated { id, .. } => *id,
        }
    }
}

/// One normalized roster row, ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSlot {
    pub member_id: MemberId,
    pub note: Option<String>,
}

/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub date: NaiveDate,
    pub title: String,
    pub task: String,
    pub remark: String,
    pub roster: Vec<RosterSlot>,
}

impl EventInput {
    pub fn new(
        date: NaiveDate,
        title: String,
        task: Option<String>,
        remark: Option<String>,
        entries: Vec<RosterEntry>,
    ) -> Self {
        Self {
            date,
            title,
            task: task.map(|t| t.trim().to_string()).unwrap_or_default(),
            remark: remark.unwrap_or_default(),
            roster: normalize_roster(entries),
        }
    }

    pub fn member_ids(&self) -> Vec<MemberId> {
        self.roster.iter().map(|slot| slot.member_id).collect()
    }
}

/// Collapses repeated members onto their first occurrence and drops blank
/// notes. Input order is kept; it becomes the roster's `sort_order`.
pub fn normalize_roster(entries: Vec<RosterEntry>) -> Vec<RosterSlot> {
    let mut slots: Vec<RosterSlot> = Vec::with_capacity(entries.len());

    for entry in entries {
        let member_id = entry.member_id();
        if slots.iter().any(|slot| slot.member_id == member_id) {
            continue;
        }

        let note = match entry {
            RosterEntry::Id(_) => None,
            RosterEntry::Annotated { note, .. } => {
                note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
            }
        };

        slots.push(RosterSlot { member_id, note });
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_entries_accept_both_shapes() {
        let entries: Vec<RosterEntry> =
            serde_json::from_str(r#"[1, {"id": 2, "note": "late"}, {"id": 3}]"#).unwrap();

        assert_eq!(entries[0], RosterEntry::Id(MemberId::new(1)));
        assert_eq!(
            entries[1],
            RosterEntry::Annotated {
                id: MemberId::new(2),
                note: Some("late".to_string())
            }
        );
        assert_eq!(entries[2].member_id(), MemberId::new(3));
    }

    #[test]
    fn test_normalize_keeps_first_occurrence() {
        let slots = normalize_roster(vec![
            RosterEntry::Id(MemberId::new(3)),
            RosterEntry::Annotated {
                id: MemberId::new(1),
                note: Some("tank".to_string()),
            },
            RosterEntry::Annotated {
                id: MemberId::new(3),
                note: Some("ignored".to_string()),
            },
        ]);

        assert_eq!(
            slots,
            vec![
                RosterSlot {
                    member_id: MemberId::new(3),
                    note: None
                },
                RosterSlot {
                    member_id: MemberId::new(1),
                    note: Some("tank".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_blank_notes_dropped() {
        let slots = normalize_roster(vec![RosterEntry::Annotated {
            id: MemberId::new(1),
            note: Some("   ".to_string()),
        }]);
        assert_eq!(slots[0].note, None);
    }

    #[test]
    fn test_input_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let input = EventInput::new(date, "Siege".to_string(), None, None, vec![]);
        assert_eq!(input.task, "");
        assert_eq!(input.remark, "");
        assert!(input.roster.is_empty());
    }
}
