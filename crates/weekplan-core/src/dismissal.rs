use crate::error::Result;
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Reminder dismissals for one local calendar day. A file recorded on an
/// earlier day loads as an empty set, so dismissals lapse at midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dismissals {
    pub date: NaiveDate,
    #[serde(default)]
    pub clients: BTreeSet<String>,
}

impl Dismissals {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            clients: BTreeSet::new(),
        }
    }

    pub fn load(root: &Path, today: NaiveDate) -> Result<Self> {
        let path = paths::dismissals_path(root);
        if !path.exists() {
            return Ok(Self::new(today));
        }
        let data = std::fs::read_to_string(&path)?;
        let stored: Dismissals = serde_json::from_str(&data)?;
        if stored.date != today {
            return Ok(Self::new(today));
        }
        Ok(stored)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::dismissals_path(root);
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Returns false if the client was already dismissed today.
    pub fn dismiss(&mut self, client_id: impl Into<String>) -> bool {
        self.clients.insert(client_id.into())
    }

    pub fn ids(&self) -> HashSet<String> {
        self.clients.iter().cloned().collect()
    }
}
