use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const WEEKPLAN_DIR: &str = ".weekplan";
pub const CONFIG_FILE: &str = ".weekplan/config.yaml";
pub const DISMISSALS_FILE: &str = ".weekplan/dismissals.json";

/// Logical location of the single planning document: collection, then id.
pub const DOCUMENT_COLLECTION: &str = "weekOfYears";
pub const DOCUMENT_ID: &str = "main";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn weekplan_dir(root: &Path) -> PathBuf {
    root.join(WEEKPLAN_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn dismissals_path(root: &Path) -> PathBuf {
    root.join(DISMISSALS_FILE)
}

pub fn document_path(root: &Path) -> PathBuf {
    weekplan_dir(root)
        .join(DOCUMENT_COLLECTION)
        .join(format!("{DOCUMENT_ID}.json"))
}
