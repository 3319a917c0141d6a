use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use weekplan_core::calendar::current_week_key;
use weekplan_core::client::find_client;
use weekplan_core::dismissal::Dismissals;
use weekplan_core::reminder::{pending_reminders, reminder_week};
use weekplan_core::{DocumentStore, PlannerError, WeekKey};

pub fn run(
    root: &Path,
    week: Option<WeekKey>,
    dismiss: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let today = super::today();
    let db = DocumentStore::open(root).read()?;

    let mut dismissals =
        Dismissals::load(root, today).context("failed to load reminder dismissals")?;
    if !dismiss.is_empty() {
        for id in dismiss {
            let known = db
                .tables
                .iter()
                .any(|(_, table)| find_client(table, id).is_ok());
            if !known {
                return Err(PlannerError::ClientNotFound(id.clone()).into());
            }
            if !dismissals.dismiss(id.as_str()) {
                tracing::info!(client = %id, "already dismissed today");
            }
        }
        dismissals
            .save(root)
            .context("failed to save reminder dismissals")?;
    }

    let current = week.unwrap_or_else(|| current_week_key(today));
    let next = reminder_week(current)?;
    let reminders = pending_reminders(&db, current, &dismissals.ids(), &config.neutral_color);

    if json {
        let items: Vec<serde_json::Value> = reminders
            .iter()
            .map(|r| {
                serde_json::json!({
                    "table": r.category,
                    "clientId": r.client.id,
                    "name": r.client.name,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "week": current,
            "nextWeek": next,
            "reminders": items,
        }))?;
        return Ok(());
    }

    if reminders.is_empty() {
        println!("Every client has a status for {next}.");
        return Ok(());
    }

    println!("No status yet for {next}:");
    let rows = reminders
        .iter()
        .map(|r| {
            vec![
                r.category.to_string(),
                r.client.id.clone(),
                r.client.name.clone(),
            ]
        })
        .collect();
    print_table(&["TABLE", "ID", "NAME"], rows);
    Ok(())
}
