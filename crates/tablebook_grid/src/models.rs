// --- File: crates/tablebook_grid/src/models.rs ---

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::table::TableId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Reserved, guests not there yet.
    #[default]
    Booked,
    /// Guests are seated.
    Occupied,
}

/// A reservation as sent to the backend on create and update.
///
/// Field names on the wire follow the backend schema (`reqAmount`, `amountFact`, `fromWho`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub table: TableId,
    pub date: NaiveDate,
    /// First slot, inclusive.
    pub start: usize,
    /// Last slot, exclusive.
    pub end: usize,
    pub name: String,
    pub phone: String,
    #[serde(rename = "reqAmount", default)]
    pub requested_count: u32,
    #[serde(rename = "amountFact", default)]
    pub amount_fact: u32,
    #[serde(rename = "fromWho", default)]
    pub from_who: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: BookingStatus,
}

impl BookingDraft {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.start >= self.end {
            return Err(GridError::Validation(format!(
                "start slot {} must be before end slot {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// A stored reservation; `id` is assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    #[serde(flatten)]
    pub details: BookingDraft,
}

impl Booking {
    pub fn table(&self) -> &TableId {
        &self.details.table
    }

    pub fn date(&self) -> NaiveDate {
        self.details.date
    }

    pub fn status(&self) -> BookingStatus {
        self.details.status
    }

    /// `start <= slot < end` on `table`.
    pub fn covers(&self, table: &TableId, slot: usize) -> bool {
        self.details.table == *table && slot >= self.details.start && slot < self.details.end
    }
}
