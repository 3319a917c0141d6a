pub mod cleanup;
pub mod client;
pub mod import;
pub mod init;
pub mod label;
pub mod remind;
pub mod serve;
pub mod show;
pub mod week;
pub mod weeks;

use anyhow::Context;
use std::path::Path;
use weekplan_core::config::Config;

/// Load the project config and surface its validation warnings.
pub(crate) fn load_config(root: &Path) -> anyhow::Result<Config> {
    let config = Config::load(root).context("failed to load .weekplan/config.yaml")?;
    for warning in config.validate() {
        tracing::warn!(level = ?warning.level, "{}", warning.message);
    }
    Ok(config)
}

/// The current local calendar day.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
