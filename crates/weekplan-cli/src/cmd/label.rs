use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use weekplan_core::label::{self as label_ops, LabelUpdate};
use weekplan_core::types::Category;
use weekplan_core::{week, DocumentStore};

#[derive(Subcommand)]
pub enum LabelSubcommand {
    /// Append a label; its position sets the cycling order
    Add {
        #[arg(required = true)]
        name: Vec<String>,
        /// Display color, e.g. "#60a5fa"
        #[arg(long)]
        color: String,
        #[arg(long, default_value = "content")]
        category: Category,
    },
    /// Edit a label. Weeks holding the old color keep it (see `cleanup`).
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Delete a label and reset its color in every week of both tables
    Delete { id: String },
    /// List labels in cycling order
    List {
        #[arg(long)]
        category: Option<Category>,
    },
}

pub fn run(root: &Path, subcmd: LabelSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        LabelSubcommand::Add {
            name,
            color,
            category,
        } => add(root, &name.join(" "), &color, category, json),
        LabelSubcommand::Update {
            id,
            name,
            color,
            category,
        } => update(
            root,
            &id,
            LabelUpdate {
                name,
                color,
                category,
            },
            json,
        ),
        LabelSubcommand::Delete { id } => delete(root, &id, json),
        LabelSubcommand::List { category } => list(root, category, json),
    }
}

fn add(root: &Path, name: &str, color: &str, category: Category, json: bool) -> anyhow::Result<()> {
    let label = DocumentStore::open(root)
        .update(|db| {
            let label = label_ops::add_label(&mut db.labels, name, color, category);
            if label_ops::duplicate_colors(&db.labels).contains(&(category, label.color.clone())) {
                tracing::warn!(
                    color = %label.color,
                    %category,
                    "another label already uses this color; cycling treats them as one"
                );
            }
            Ok(label)
        })
        .context("failed to add label")?;

    if json {
        print_json(&label)?;
    } else {
        println!("Added {} label [{}]: {} {}", label.category, label.id, label.color, label.name);
    }
    Ok(())
}

fn update(root: &Path, id: &str, changes: LabelUpdate, json: bool) -> anyhow::Result<()> {
    let label = DocumentStore::open(root)
        .update(|db| label_ops::update_label(&mut db.labels, id, changes))
        .with_context(|| format!("failed to update label '{id}'"))?;

    if json {
        print_json(&label)?;
    } else {
        println!("Updated [{}]: {} {} ({})", label.id, label.color, label.name, label.category);
    }
    Ok(())
}

fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let removal = DocumentStore::open(root)
        .update(|db| week::delete_label(db, id))
        .with_context(|| format!("failed to delete label '{id}'"))?;

    if json {
        print_json(&removal)?;
    } else {
        println!(
            "Deleted [{}] {} ({} weeks reset)",
            removal.label.id, removal.label.name, removal.weeks_reset
        );
    }
    Ok(())
}

fn list(root: &Path, category: Option<Category>, json: bool) -> anyhow::Result<()> {
    let db = DocumentStore::open(root).read()?;
    let labels: Vec<&weekplan_core::types::Label> = match category {
        Some(c) => label_ops::labels_for(&db.labels, c),
        None => db.labels.iter().collect(),
    };

    if json {
        print_json(&labels)?;
        return Ok(());
    }

    if labels.is_empty() {
        println!("No labels.");
        return Ok(());
    }

    let rows = labels
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
    Ok(())
}
