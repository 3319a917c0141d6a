//! Conversion of the legacy realtime-database export into the planning
//! document.
//!
//! The legacy export keeps clients per column (`col1` = content, `col2` =
//! music) with a `weekStatus` array of `{number, value, note}` records, where
//! `value` is a 1-based index into that column's legend (`lagenda`). Week
//! numbers carry no year; the caller supplies one.

use crate::calendar::WeekKey;
use crate::error::Result;
use crate::types::{Category, Client, Database, Label, WeekStatus};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyExport {
    #[serde(default)]
    pub col1: Option<Map<String, Value>>,
    #[serde(default)]
    pub col2: Option<Map<String, Value>>,
    #[serde(default)]
    pub lagenda: Option<LegacyLegends>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyLegends {
    #[serde(default)]
    pub col1: Option<Map<String, Value>>,
    #[serde(default)]
    pub col2: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegendEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyClient {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default, rename = "weekStatus")]
    week_status: Value,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyWeek {
    #[serde(default)]
    number: Value,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    note: Option<String>,
}

pub fn read_export(path: &Path) -> Result<LegacyExport> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Color for a legacy status `value`: `legend[value - 1]` when `value` is a
/// positive integer that indexes the legend, else unset.
pub fn legend_color<'a>(legend: &'a [LegendEntry], value: &Value) -> Option<&'a str> {
    let index = value.as_u64().filter(|v| *v > 0)? - 1;
    legend
        .get(usize::try_from(index).ok()?)
        .map(|l| l.color.as_str())
}

/// Build a fresh document from a legacy export, mapping every week number into
/// `target_year`. Weeks that do not exist in that year, malformed records, and
/// records with neither color nor note are dropped with a warning.
pub fn import_legacy(export: &LegacyExport, target_year: i32) -> Result<Database> {
    WeekKey::new(target_year, 1)?;

    let mut db = Database::default();
    let legends = export.lagenda.clone().unwrap_or_default();
    let content_legend = legend_entries(legends.col1.as_ref(), Category::Content);
    let music_legend = legend_entries(legends.col2.as_ref(), Category::Music);

    for (legend, category) in [
        (&content_legend, Category::Content),
        (&music_legend, Category::Music),
    ] {
        for entry in legend {
            let id = (db.labels.len() + 1).to_string();
            db.labels.push(Label {
                id,
                name: entry.name.clone(),
                color: entry.color.clone(),
                category,
            });
        }
    }

    for (clients, legend, category) in [
        (export.col1.as_ref(), &content_legend, Category::Content),
        (export.col2.as_ref(), &music_legend, Category::Music),
    ] {
        let Some(clients) = clients else { continue };
        for (uid, raw) in clients {
            let legacy: LegacyClient = match serde_json::from_value(raw.clone()) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(%category, %uid, error = %e, "skipping malformed legacy client");
                    continue;
                }
            };
            let id = legacy
                .uid
                .clone()
                .unwrap_or_else(|| format!("{}{uid}", category.id_prefix()));
            let mut client = Client::new(id, legacy.name.clone().unwrap_or_default());
            client.weeks = convert_weeks(&legacy.week_status, legend, target_year, category);
            db.table_mut(category).clients.push(client);
        }
    }

    Ok(db)
}

fn legend_entries(legend: Option<&Map<String, Value>>, category: Category) -> Vec<LegendEntry> {
    let Some(legend) = legend else {
        tracing::warn!(%category, "no legend in legacy export; no labels imported");
        return Vec::new();
    };
    legend
        .values()
        .filter_map(|v| match serde_json::from_value::<LegendEntry>(v.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(%category, error = %e, "skipping malformed legend entry");
                None
            }
        })
        .collect()
}

fn convert_weeks(
    raw: &Value,
    legend: &[LegendEntry],
    year: i32,
    category: Category,
) -> BTreeMap<WeekKey, WeekStatus> {
    let mut weeks = BTreeMap::new();
    let Some(records) = raw.as_array() else {
        return weeks;
    };
    for record in records {
        let Ok(week) = serde_json::from_value::<LegacyWeek>(record.clone()) else {
            continue;
        };
        let Some(number) = week.number.as_u64().and_then(|n| u32::try_from(n).ok()) else {
            continue;
        };
        let key = match WeekKey::new(year, number) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(%category, error = %e, "dropping legacy week");
                continue;
            }
        };
        let color = match legend_color(legend, &week.value) {
            Some(color) => color.to_string(),
            None => {
                if week.value.as_u64().is_some_and(|v| v > 0) {
                    tracing::warn!(%category, week = %key, value = %week.value, "no legend entry; leaving color empty");
                }
                String::new()
            }
        };
        let status = WeekStatus {
            color,
            note: week.note.unwrap_or_default(),
        };
        if !status.is_empty() {
            weeks.insert(key, status);
        }
    }
    weeks
}
