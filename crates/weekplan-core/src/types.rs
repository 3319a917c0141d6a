use crate::calendar::WeekKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Content,
    Music,
}

impl Category {
    /// Table iteration order: content before music.
    pub fn all() -> &'static [Category] {
        &[Category::Content, Category::Music]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Music => "music",
        }
    }

    /// Single-letter prefix carried by client ids of this table.
    pub fn id_prefix(self) -> char {
        match self {
            Category::Content => 'c',
            Category::Music => 'm',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(Category::Content),
            "music" => Ok(Category::Music),
            _ => Err(crate::error::PlannerError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub category: Category,
}

// ---------------------------------------------------------------------------
// WeekStatus
// ---------------------------------------------------------------------------

/// Status of one client in one week. An empty `color` means no status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStatus {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub note: String,
}

impl WeekStatus {
    pub fn is_empty(&self) -> bool {
        self.color.is_empty() && self.note.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Client / Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Carried for document compatibility; nothing reads it.
    #[serde(default)]
    pub label_id: String,
    /// Sparse: absent keys mean `{color: "", note: ""}`.
    #[serde(default)]
    pub weeks: BTreeMap<WeekKey, WeekStatus>,
}

impl Client {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label_id: String::new(),
            weeks: BTreeMap::new(),
        }
    }

    pub fn week(&self, key: WeekKey) -> Option<&WeekStatus> {
        self.weeks.get(&key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub content: Table,
    #[serde(default)]
    pub music: Table,
}

impl Tables {
    pub fn get(&self, category: Category) -> &Table {
        match category {
            Category::Content => &self.content,
            Category::Music => &self.music,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Table {
        match category {
            Category::Content => &mut self.content,
            Category::Music => &mut self.music,
        }
    }

    /// Both tables, content first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Table)> {
        Category::all().iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn clients_mut(&mut self) -> impl Iterator<Item = (Category, &mut Client)> {
        let content = self
            .content
            .clients
            .iter_mut()
            .map(|c| (Category::Content, c));
        let music = self.music.clients.iter_mut().map(|c| (Category::Music, c));
        content.chain(music)
    }
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// The whole persisted dataset: one document, read and written as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub tables: Tables,
}

impl Database {
    pub fn table(&self, category: Category) -> &Table {
        self.tables.get(category)
    }

    pub fn table_mut(&mut self, category: Category) -> &mut Table {
        self.tables.get_mut(category)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
