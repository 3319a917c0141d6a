use anyhow::Context;
use std::path::Path;
use weekplan_core::config::Config;
use weekplan_core::{io, paths, DocumentStore};

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing weekplan in: {}", root.display());

    let dir = paths::weekplan_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    let store = DocumentStore::open(root);
    let rel = store
        .path()
        .strip_prefix(root)
        .unwrap_or(store.path())
        .display()
        .to_string();
    if store.init().context("failed to write document")? {
        println!("  created: {rel}");
    } else {
        println!("  exists:  {rel}");
    }

    Ok(())
}
