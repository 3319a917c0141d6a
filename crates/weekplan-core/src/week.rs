use crate::calendar::WeekKey;
use crate::client::find_client_mut;
use crate::error::Result;
use crate::label::remove_label;
use crate::types::{Category, Client, Database, Label, Table, Tables, WeekStatus};
use serde::Serialize;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

/// Partially update one client-week. A missing entry starts as
/// `{color: "", note: ""}`; `None` fields keep their current value. Returns
/// the resulting status (empty statuses are not stored).
pub fn set_status(
    table: &mut Table,
    client_id: &str,
    week: WeekKey,
    color: Option<&str>,
    note: Option<&str>,
) -> Result<WeekStatus> {
    let client = find_client_mut(table, client_id)?;
    let entry = client.weeks.entry(week).or_default();
    if let Some(color) = color {
        entry.color = color.to_string();
    }
    if let Some(note) = note {
        entry.note = note.to_string();
    }
    let status = entry.clone();
    prune_empty(client);
    Ok(status)
}

/// Next color in the cycle `unset -> labels[0] -> ... -> labels[n-1] -> unset`.
///
/// An empty or unknown color moves to the first label; the last label moves
/// back to unset. With duplicate colors the first matching label wins. With
/// no labels at all the current color is kept.
pub fn next_color(current: &str, labels: &[&Label]) -> String {
    if labels.is_empty() {
        return current.to_string();
    }
    let index = if current.is_empty() {
        None
    } else {
        labels.iter().position(|l| l.color == current)
    };
    match index {
        None => labels.first().map(|l| l.color.clone()).unwrap_or_default(),
        Some(i) if i + 1 == labels.len() => String::new(),
        Some(i) => labels[i + 1].color.clone(),
    }
}

/// Advance the color of one client-week through `labels`, keeping its note.
pub fn cycle_status(
    table: &mut Table,
    client_id: &str,
    week: WeekKey,
    labels: &[&Label],
) -> Result<WeekStatus> {
    let client = find_client_mut(table, client_id)?;
    let entry = client.weeks.entry(week).or_default();
    entry.color = next_color(&entry.color, labels);
    let status = entry.clone();
    prune_empty(client);
    Ok(status)
}

/// Drop week entries with neither color nor note.
pub fn prune_empty(client: &mut Client) {
    client.weeks.retain(|_, status| !status.is_empty());
}

// ---------------------------------------------------------------------------
// Label removal cascade
// ---------------------------------------------------------------------------

/// Reset every week color equal to `color` in both tables, keeping notes.
/// Returns the number of week entries reset.
pub fn remove_label_cascade(tables: &mut Tables, color: &str) -> usize {
    if color.is_empty() {
        return 0;
    }
    let mut reset = 0;
    for (_, client) in tables.clients_mut() {
        for status in client.weeks.values_mut() {
            if status.color == color {
                status.color.clear();
                reset += 1;
            }
        }
        prune_empty(client);
    }
    reset
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelRemoval {
    pub label: Label,
    pub weeks_reset: usize,
}

/// Remove a label from the registry and cascade its color out of every table.
pub fn delete_label(db: &mut Database, id: &str) -> Result<LabelRemoval> {
    let label = remove_label(&mut db.labels, id)?;
    let weeks_reset = remove_label_cascade(&mut db.tables, &label.color);
    Ok(LabelRemoval { label, weeks_reset })
}

// ---------------------------------------------------------------------------
// Orphaned colors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedColor {
    pub category: Category,
    pub client_id: String,
    pub client_name: String,
    pub week: WeekKey,
    pub color: String,
}

/// Clear week colors that no label in the registry carries any more (left
/// behind by label color edits). Returns what was cleared, in table order.
pub fn clear_orphaned_colors(db: &mut Database) -> Vec<OrphanedColor> {
    let Database { labels, tables } = db;
    let valid: HashSet<&str> = labels.iter().map(|l| l.color.as_str()).collect();
    let mut cleared = Vec::new();
    for (category, client) in tables.clients_mut() {
        for (week, status) in client.weeks.iter_mut() {
            if !status.color.is_empty() && !valid.contains(status.color.as_str()) {
                cleared.push(OrphanedColor {
                    category,
                    client_id: client.id.clone(),
                    client_name: client.name.clone(),
                    week: *week,
                    color: std::mem::take(&mut status.color),
                });
            }
        }
        prune_empty(client);
    }
    cleared
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
