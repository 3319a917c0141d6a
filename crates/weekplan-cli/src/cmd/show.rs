use crate::output::{print_json, print_table};
use std::path::Path;
use weekplan_core::DocumentStore;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let db = DocumentStore::open(root).read()?;

    if json {
        return print_json(&db);
    }

    println!("Labels");
    let rows = db
        .labels
        .iter()
        .map(|l| {
            vec![
                l.id.clone(),
                l.category.to_string(),
                l.color.clone(),
                l.name.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "CATEGORY", "COLOR", "NAME"], rows);

    for (category, table) in db.tables.iter() {
        println!();
        println!("Clients ({category})");
        let rows = table
            .clients
            .iter()
            .map(|c| {
                let last = c.weeks.keys().next_back().map(|k| k.to_string());
                vec![
                    c.id.clone(),
                    c.name.clone(),
                    c.weeks.len().to_string(),
                    last.unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        print_table(&["ID", "NAME", "WEEKS", "LATEST"], rows);
    }
    Ok(())
}
