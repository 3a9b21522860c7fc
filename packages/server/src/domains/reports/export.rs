//! Text exports: three CSV shapes and the single-event TXT record.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write;

use serde::Serialize;

use super::models::participation::{MemberTaskCount, TaskParticipation};
use super::models::report_row::ReportRow;
use crate::common::utils::{CsvBuilder, Field};
use crate::common::MemberId;
use crate::domains::events::EventDetail;

/// Flat report: one line per (event, member) pair
pub fn report_csv(rows: &[ReportRow]) -> String {
    let mut csv = CsvBuilder::with_bom();
    csv.row(&[
        Field::Plain("date"),
        Field::Plain("title"),
        Field::Plain("task"),
        Field::Plain("event_remark"),
        Field::Plain("member_id"),
        Field::Plain("member_name"),
        Field::Plain("member_note"),
    ]);

    for row in rows {
        let date = row.date.to_string();
        csv.row(&[
            Field::Quoted(&date),
            Field::Quoted(&row.title),
            Field::Quoted(&row.task),
            Field::Quoted(&row.event_remark),
            Field::Int(row.member_id.get()),
            Field::Quoted(&row.member_name),
            Field::Quoted(row.member_note.as_deref().unwrap_or_default()),
        ]);
    }

    csv.finish()
}

/// One line per (task, member) aggregate, in query order
pub fn task_participation_csv(rows: &[TaskParticipation]) -> String {
    let mut csv = CsvBuilder::with_bom();
    csv.row(&[
        Field::Plain("task"),
        Field::Plain("member_id"),
        Field::Plain("member_name"),
        Field::Plain("participation_count"),
        Field::Plain("first_date"),
        Field::Plain("last_date"),
    ]);

    for row in rows {
        let first = row.first_date.to_string();
        let last = row.last_date.to_string();
        csv.row(&[
            Field::Quoted(&row.task),
            Field::Int(row.member_id.get()),
            Field::Quoted(&row.member_name),
            Field::Int(row.participation_count),
            Field::Plain(&first),
            Field::Plain(&last),
        ]);
    }

    csv.finish()
}

/// One member's line of the pivoted summary
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MemberSummaryRow {
    pub member_id: MemberId,
    pub member_name: String,
    /// Aligned with `MemberSummaryTable::tasks`; 0 where the member never took part
    pub counts: Vec<i64>,
    pub total_count: i64,
}

/// Wide-format member x task matrix
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MemberSummaryTable {
    /// Every task seen in the input, ascending
    pub tasks: Vec<String>,
    /// Ordered by total descending, then member id ascending
    pub rows: Vec<MemberSummaryRow>,
}

impl MemberSummaryTable {
    /// Pivots long-format counts into one row per member with one column per
    /// distinct task and a trailing total.
    pub fn pivot(counts: &[MemberTaskCount]) -> Self {
        let tasks: Vec<String> = counts
            .iter()
            .map(|c| c.task.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let column: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (task.as_str(), i))
            .collect();

        let mut rows: Vec<MemberSummaryRow> = Vec::new();
        let mut row_of: HashMap<MemberId, usize> = HashMap::new();

        for count in counts {
            let index = *row_of.entry(count.member_id).or_insert_with(|| {
                rows.push(MemberSummaryRow {
                    member_id: count.member_id,
                    member_name: count.member_name.clone(),
                    counts: vec![0; tasks.len()],
                    total_count: 0,
                });
                rows.len() - 1
            });

            let row = &mut rows[index];
            row.counts[column[count.task.as_str()]] += count.task_count;
            row.total_count += count.task_count;
        }

        rows.sort_by(|a, b| {
            b.total_count
                .cmp(&a.total_count)
                .then(a.member_id.cmp(&b.member_id))
        });

        Self { tasks, rows }
    }

    pub fn to_csv(&self) -> String {
        let mut csv = CsvBuilder::with_bom();

        let mut header = vec![Field::Plain("ID"), Field::Plain("name")];
        header.extend(self.tasks.iter().map(|t| Field::Quoted(t)));
        header.push(Field::Plain("total"));
        csv.row(&header);

        for row in &self.rows {
            let mut line = vec![Field::Int(row.member_id.get()), Field::Quoted(&row.member_name)];
            line.extend(row.counts.iter().map(|c| Field::Int(*c)));
            line.push(Field::Int(row.total_count));
            csv.row(&line);
        }

        csv.finish()
    }
}

/// Plain-text record of a single event.
///
/// ```text
/// [Event]
/// Date: 2024-05-01
/// Title: Siege
/// Task: 城池争夺
/// Remark:
///
/// [Members]
/// 001 Alice (tank)
/// 012 Bob
/// ```
pub fn event_txt(detail: &EventDetail) -> String {
    let event = &detail.event;
    let mut txt = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(txt, "[Event]");
    let _ = writeln!(txt, "Date: {}", event.date);
    let _ = writeln!(txt, "Title: {}", event.title);
    let _ = writeln!(txt, "Task: {}", event.task);
    let _ = writeln!(txt, "Remark: {}", event.remark);
    let _ = writeln!(txt);
    let _ = writeln!(txt, "[Members]");

    for member in &detail.members {
        let _ = write!(txt, "{} {}", member.id.padded(), member.name);
        if let Some(note) = member.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = write!(txt, " ({})", note);
        }
        txt.push('\n');
    }

    txt
}
