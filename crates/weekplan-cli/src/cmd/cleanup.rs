use crate::output::{print_json, print_table};
use std::path::Path;
use weekplan_core::label::duplicate_colors;
use weekplan_core::week::clear_orphaned_colors;
use weekplan_core::DocumentStore;

pub fn run(root: &Path, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let store = DocumentStore::open(root);
    let (cleared, duplicates) = if dry_run {
        let mut db = store.read()?;
        let cleared = clear_orphaned_colors(&mut db);
        (cleared, duplicate_colors(&db.labels))
    } else {
        store.update(|db| Ok((clear_orphaned_colors(db), duplicate_colors(&db.labels))))?
    };

    for (category, color) in &duplicates {
        tracing::warn!(%category, %color, "several labels share this color");
    }

    if json {
        let dups: Vec<serde_json::Value> = duplicates
            .iter()
            .map(|(category, color)| serde_json::json!({ "category": category, "color": color }))
            .collect();
        print_json(&serde_json::json!({
            "dryRun": dry_run,
            "cleared": cleared,
            "duplicateColors": dups,
        }))?;
        return Ok(());
    }

    if cleared.is_empty() {
        println!("No orphaned week colors.");
        return Ok(());
    }

    let verb = if dry_run { "Would clear" } else { "Cleared" };
    println!("{verb} {} orphaned week colors:", cleared.len());
    let rows = cleared
        .iter()
        .map(|o| {
            vec![
                o.category.to_string(),
                o.client_name.clone(),
                o.week.to_string(),
                o.color.clone(),
            ]
        })
        .collect();
    print_table(&["TABLE", "CLIENT", "WEEK", "COLOR"], rows);
    Ok(())
}
