// --- File: crates/tablebook_grid/src/table.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;
use tablebook_config::{GridConfig, DEFAULT_TABLES};

use crate::error::GridError;

/// Identifier of a station or room, as sent to the backend (`"3"`, `"STAR WARS"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TableId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered rows of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    tables: Vec<TableId>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES.iter().map(|t| TableId::from(*t)).collect(),
        }
    }
}

impl TableLayout {
    pub fn new(tables: Vec<TableId>) -> Result<Self, GridError> {
        if tables.is_empty() {
            return Err(GridError::InvalidSchedule(
                "at least one table is required".to_string(),
            ));
        }
        for (i, table) in tables.iter().enumerate() {
            if table.as_str().trim().is_empty() {
                return Err(GridError::InvalidSchedule("empty table id".to_string()));
            }
            if tables[..i].contains(table) {
                return Err(GridError::InvalidSchedule(format!(
                    "table {table} listed twice"
                )));
            }
        }
        Ok(Self { tables })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
        Self::new(config.tables.iter().cloned().map(TableId::from).collect())
    }

    pub fn tables(&self) -> &[TableId] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, table: &TableId) -> bool {
        self.tables.contains(table)
    }

    pub fn position(&self, table: &TableId) -> Option<usize> {
        self.tables.iter().position(|t| t == table)
    }
}
