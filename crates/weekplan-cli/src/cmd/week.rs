use crate::output::{or_dash, print_json, print_table};
use anyhow::{bail, Context};
use clap::Subcommand;
use std::path::Path;
use weekplan_core::calendar::{current_week_key, week_window};
use weekplan_core::client::find_client;
use weekplan_core::label::{label_for_color, labels_for};
use weekplan_core::types::{Category, WeekStatus};
use weekplan_core::{week as week_ops, DocumentStore, WeekKey};

#[derive(Subcommand)]
pub enum WeekSubcommand {
    /// Set the color and/or note of one client-week
    Set {
        table: Category,
        client_id: String,
        week: WeekKey,
        /// Label color; pass "" to clear
        #[arg(long)]
        color: Option<String>,
        /// Free-text note; pass "" to clear
        #[arg(long)]
        note: Option<String>,
    },
    /// Advance one client-week to the next label color
    Cycle {
        table: Category,
        client_id: String,
        week: WeekKey,
    },
    /// Show a client's statuses across the week window
    Show {
        table: Category,
        client_id: String,
        /// Center week (default: current week)
        #[arg(long)]
        week: Option<WeekKey>,
    },
}

pub fn run(root: &Path, subcmd: WeekSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        WeekSubcommand::Set {
            table,
            client_id,
            week,
            color,
            note,
        } => set(
            root,
            table,
            &client_id,
            week,
            color.as_deref(),
            note.as_deref(),
            json,
        ),
        WeekSubcommand::Cycle {
            table,
            client_id,
            week,
        } => cycle(root, table, &client_id, week, json),
        WeekSubcommand::Show {
            table,
            client_id,
            week,
        } => show(root, table, &client_id, week, json),
    }
}

fn set(
    root: &Path,
    table: Category,
    client_id: &str,
    week: WeekKey,
    color: Option<&str>,
    note: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if color.is_none() && note.is_none() {
        bail!("nothing to set: pass --color and/or --note");
    }
    let status = DocumentStore::open(root)
        .update(|db| week_ops::set_status(db.table_mut(table), client_id, week, color, note))
        .with_context(|| format!("failed to set {week} for {table} client '{client_id}'"))?;
    print_status(client_id, week, &status, json)
}

fn cycle(
    root: &Path,
    table: Category,
    client_id: &str,
    week: WeekKey,
    json: bool,
) -> anyhow::Result<()> {
    let status = DocumentStore::open(root)
        .update(|db| {
            let labels = labels_for(&db.labels, table);
            week_ops::cycle_status(db.tables.get_mut(table), client_id, week, &labels)
        })
        .with_context(|| format!("failed to cycle {week} for {table} client '{client_id}'"))?;
    print_status(client_id, week, &status, json)
}

fn print_status(client_id: &str, week: WeekKey, status: &WeekStatus, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&serde_json::json!({
            "clientId": client_id,
            "weekKey": week,
            "color": status.color,
            "note": status.note,
        }))?;
    } else {
        println!(
            "[{client_id}] {week}: color {} note {}",
            or_dash(&status.color),
            or_dash(&status.note)
        );
    }
    Ok(())
}

fn show(
    root: &Path,
    table: Category,
    client_id: &str,
    center: Option<WeekKey>,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let db = DocumentStore::open(root).read()?;
    let client = find_client(db.table(table), client_id)?;
    let center = center.unwrap_or_else(|| current_week_key(super::today()));
    let window = week_window(center, config.past_weeks, config.future_weeks);

    if json {
        let weeks: Vec<serde_json::Value> = window
            .iter()
            .map(|k| {
                let status = client.week(*k).cloned().unwrap_or_default();
                serde_json::json!({ "weekKey": k, "color": status.color, "note": status.note })
            })
            .collect();
        print_json(&serde_json::json!({
            "clientId": client.id,
            "name": client.name,
            "weeks": weeks,
        }))?;
        return Ok(());
    }

    println!("{} [{}]", client.name, client.id);
    let rows = window
        .iter()
        .map(|k| {
            let status = client.week(*k).cloned().unwrap_or_default();
            let label = label_for_color(&db.labels, table, &status.color)
                .map(|l| l.name.clone())
                .unwrap_or_default();
            let marker = if *k == center { "*" } else { "" };
            vec![
                format!("{k}{marker}"),
                or_dash(&status.color),
                or_dash(&label),
                or_dash(&status.note),
            ]
        })
        .collect();
    print_table(&["WEEK", "COLOR", "LABEL", "NOTE"], rows);
    Ok(())
}
