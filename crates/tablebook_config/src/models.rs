// --- File: crates/tablebook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Venue stations and rooms, in display order.
pub const DEFAULT_TABLES: [&str; 15] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "CS", "DOTA", "TWITCH", "GTA", "MAFIA", "ANIME",
    "STAR WARS",
];

// --- Booking API Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String, // e.g. loaded via TABLEBOOK_API__BASE_URL
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

// --- Schedule Day Config ---
/// The venue's operating day: opens at `start_hour`, closes at `end_hour` of the next calendar day.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    /// IANA zone name used for the live time marker.
    pub timezone: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_hour: 12,
            end_hour: 6,
            timezone: "Europe/Moscow".to_string(),
        }
    }
}

/// How pointer input turns into a selection.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Press on a cell, drag along the row, release.
    #[default]
    Drag,
    /// Click the first cell, then click the last cell on the same table.
    TwoClick,
}

// --- Grid Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub cell_width: f64,
    pub selection_mode: SelectionMode,
    pub tables: Vec<String>,
    pub now_refresh_secs: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 60.0,
            selection_mode: SelectionMode::Drag,
            tables: DEFAULT_TABLES.iter().map(|t| t.to_string()).collect(),
            now_refresh_secs: 60,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub schedule: ScheduleConfig,
    pub grid: GridConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            schedule: ScheduleConfig::default(),
            grid: GridConfig::default(),
            log_level: "info".to_string(),
        }
    }
}
