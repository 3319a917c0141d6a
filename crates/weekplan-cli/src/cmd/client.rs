use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use weekplan_core::client as client_ops;
use weekplan_core::types::Category;
use weekplan_core::DocumentStore;

#[derive(Subcommand)]
pub enum ClientSubcommand {
    /// Append a client to a table (content or music)
    Add {
        table: Category,
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Rename a client
    Rename {
        table: Category,
        client_id: String,
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Delete a client and all of its week statuses
    Delete { table: Category, client_id: String },
    /// List clients, optionally of one table
    List { table: Option<Category> },
}

pub fn run(root: &Path, subcmd: ClientSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ClientSubcommand::Add { table, name } => add(root, table, &name.join(" "), json),
        ClientSubcommand::Rename {
            table,
            client_id,
            name,
        } => rename(root, table, &client_id, &name.join(" "), json),
        ClientSubcommand::Delete { table, client_id } => delete(root, table, &client_id, json),
        ClientSubcommand::List { table } => list(root, table, json),
    }
}

fn add(root: &Path, table: Category, name: &str, json: bool) -> anyhow::Result<()> {
    let client = DocumentStore::open(root)
        .update(|db| Ok(client_ops::add_client(db.table_mut(table), table, name)))
        .context("failed to add client")?;

    if json {
        print_json(&client)?;
    } else {
        println!("Added {table} client [{}]: {}", client.id, client.name);
    }
    Ok(())
}

fn rename(root: &Path, table: Category, id: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let client = DocumentStore::open(root)
        .update(|db| client_ops::rename_client(db.table_mut(table), id, name))
        .with_context(|| format!("failed to rename {table} client '{id}'"))?;

    if json {
        print_json(&client)?;
    } else {
        println!("Renamed [{id}] to: {}", client.name);
    }
    Ok(())
}

fn delete(root: &Path, table: Category, id: &str, json: bool) -> anyhow::Result<()> {
    let client = DocumentStore::open(root)
        .update(|db| client_ops::remove_client(db.table_mut(table), id))
        .with_context(|| format!("failed to delete {table} client '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "deleted": client.id, "table": table }))?;
    } else {
        println!(
            "Deleted [{}] {} ({} week statuses removed)",
            client.id,
            client.name,
            client.weeks.len()
        );
    }
    Ok(())
}

fn list(root: &Path, table: Option<Category>, json: bool) -> anyhow::Result<()> {
    let db = DocumentStore::open(root).read()?;
    let clients: Vec<(Category, &weekplan_core::types::Client)> = db
        .tables
        .iter()
        .filter(|(category, _)| table.map_or(true, |t| t == *category))
        .flat_map(|(category, t)| t.clients.iter().map(move |c| (category, c)))
        .collect();

    if json {
        let items: Vec<serde_json::Value> = clients
            .iter()
            .map(|(category, c)| {
                serde_json::json!({
                    "table": category,
                    "id": c.id,
                    "name": c.name,
                    "weeks": c.weeks.len(),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if clients.is_empty() {
        println!("No clients.");
        return Ok(());
    }

    let rows = clients
        .iter()
        .map(|(category, c)| {
            vec![
                category.to_string(),
                c.id.clone(),
                c.name.clone(),
                c.weeks.len().to_string(),
            ]
        })
        .collect();
    print_table(&["TABLE", "ID", "NAME", "WEEKS"], rows);
    Ok(())
}
