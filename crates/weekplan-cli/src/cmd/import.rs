use crate::output::print_json;
use anyhow::{bail, Context};
use std::path::Path;
use weekplan_core::import::{import_legacy, read_export};
use weekplan_core::DocumentStore;

pub fn run(root: &Path, file: &Path, year: i32, force: bool, json: bool) -> anyhow::Result<()> {
    let export =
        read_export(file).with_context(|| format!("failed to read export {}", file.display()))?;
    let db = import_legacy(&export, year)?;

    let store = DocumentStore::open(root);
    let existing = store.read()?;
    if !force && existing != Default::default() {
        bail!(
            "{} already holds data; pass --force to replace it",
            store.path().display()
        );
    }
    store.replace(&db).context("failed to write document")?;

    let weeks: usize = db
        .tables
        .iter()
        .flat_map(|(_, t)| t.clients.iter())
        .map(|c| c.weeks.len())
        .sum();
    if json {
        print_json(&serde_json::json!({
            "year": year,
            "labels": db.labels.len(),
            "contentClients": db.tables.content.clients.len(),
            "musicClients": db.tables.music.clients.len(),
            "weeks": weeks,
        }))?;
    } else {
        println!(
            "Imported {} labels, {} content clients, {} music clients, {} week statuses into {year}",
            db.labels.len(),
            db.tables.content.clients.len(),
            db.tables.music.clients.len(),
            weeks
        );
    }
    Ok(())
}
