use crate::calendar::WeekKey;
use crate::error::{PlannerError, Result};
use crate::types::{Category, Client, Database, WeekStatus};
use serde::Serialize;
use std::collections::HashSet;

/// Background color the UI paints for "no status". Stored colors equal to it
/// never count as an assignment.
pub const NEUTRAL_COLOR: &str = "#f3f4f6";

/// A client with no qualifying status for the week after the current one.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder<'a> {
    pub category: Category,
    pub client: &'a Client,
}

/// Whether `status` is a real label assignment: present, non-empty, and not
/// the neutral color.
pub fn has_status(status: Option<&WeekStatus>, neutral_color: &str) -> bool {
    status.is_some_and(|s| !s.color.is_empty() && s.color != neutral_color)
}

/// The week reminders look at: the one after `current`. Fails for the last
/// representable week, which has no successor.
pub fn reminder_week(current: WeekKey) -> Result<WeekKey> {
    current.checked_succ().ok_or(PlannerError::InvalidWeek {
        year: current.year() + 1,
        week: 1,
    })
}

/// Clients lacking a status for `current.succ()`, skipping `dismissed` ids.
///
/// The next week is computed with the real week count of the current year, so
/// week 53 of a long year is checked rather than skipped. Order is content
/// table first, then music, insertion order within each.
pub fn pending_reminders<'a>(
    db: &'a Database,
    current: WeekKey,
    dismissed: &HashSet<String>,
    neutral_color: &str,
) -> Vec<Reminder<'a>> {
    let next = current.succ();
    db.tables
        .iter()
        .flat_map(|(category, table)| {
            table
                .clients
                .iter()
                .map(move |client| Reminder { category, client })
        })
        .filter(|r| !dismissed.contains(&r.client.id))
        .filter(|r| !has_status(r.client.week(next), neutral_color))
        .collect()
}
