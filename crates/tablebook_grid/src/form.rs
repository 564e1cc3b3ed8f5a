// --- File: crates/tablebook_grid/src/form.rs ---
//! Edit buffer behind the create and edit dialogs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::BookingApi;
use crate::error::GridError;
use crate::models::{Booking, BookingDraft, BookingStatus};
use crate::selection::Selection;
use crate::table::TableId;

/// Every field the dialog can show. `id` is set when editing an existing booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub id: Option<i64>,
    pub table: TableId,
    pub date: NaiveDate,
    pub start: usize,
    pub end: usize,
    pub name: String,
    pub phone: String,
    pub requested_count: Option<u32>,
    pub amount_fact: Option<u32>,
    pub from_who: String,
    pub comment: String,
    pub status: BookingStatus,
}

/// A partial update of a [`FormState`]; `None` leaves a field untouched.
///
/// The counters are `Option<Option<u32>>` so an input can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormPatch {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub requested_count: Option<Option<u32>>,
    pub amount_fact: Option<Option<u32>>,
    pub from_who: Option<String>,
    pub comment: Option<String>,
    pub status: Option<BookingStatus>,
}

impl FormPatch {
    pub fn start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn requested_count(mut self, count: Option<u32>) -> Self {
        self.requested_count = Some(count);
        self
    }

    pub fn amount_fact(mut self, count: Option<u32>) -> Self {
        self.amount_fact = Some(count);
        self
    }

    pub fn from_who(mut self, from_who: impl Into<String>) -> Self {
        self.from_who = Some(from_who.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl FormState {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn apply(&mut self, patch: FormPatch) {
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(count) = patch.requested_count {
            self.requested_count = count;
        }
        if let Some(count) = patch.amount_fact {
            self.amount_fact = count;
        }
        if let Some(from_who) = patch.from_who {
            self.from_who = from_who;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Checks the required fields and builds the request body.
    pub fn to_draft(&self) -> Result<BookingDraft, GridError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if !missing.is_empty() {
            return Err(GridError::Validation(format!(
                "required field(s) missing: {}",
                missing.join(", ")
            )));
        }

        let draft = BookingDraft {
            table: self.table.clone(),
            date: self.date,
            start: self.start,
            end: self.end,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            requested_count: self.requested_count.unwrap_or(0),
            amount_fact: self.amount_fact.unwrap_or(0),
            from_who: self.from_who.clone(),
            comment: self.comment.clone(),
            status: self.status,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Blank form for a fresh selection, status `booked`.
pub fn open_for_create(selection: &Selection, date: NaiveDate) -> FormState {
    FormState {
        id: None,
        table: selection.table.clone(),
        date,
        start: selection.start,
        end: selection.end,
        name: String::new(),
        phone: String::new(),
        requested_count: None,
        amount_fact: None,
        from_who: String::new(),
        comment: String::new(),
        status: BookingStatus::Booked,
    }
}

pub fn open_for_edit(booking: &Booking) -> FormState {
    let details = &booking.details;
    FormState {
        id: Some(booking.id),
        table: details.table.clone(),
        date: details.date,
        start: details.start,
        end: details.end,
        name: details.name.clone(),
        phone: details.phone.clone(),
        requested_count: Some(details.requested_count),
        amount_fact: Some(details.amount_fact),
        from_who: details.from_who.clone(),
        comment: details.comment.clone(),
        status: details.status,
    }
}

/// Validates locally, then creates or updates depending on `form.id`.
///
/// A validation failure returns before any request is made.
pub async fn submit<A>(form: &FormState, api: &A) -> Result<Booking, GridError>
where
    A: BookingApi + ?Sized,
{
    let draft = form.to_draft().inspect_err(|e| warn!("Booking form rejected: {}", e))?;

    let saved = match form.id {
        Some(id) => api.update(id, &draft).await?,
        None => api.create(&draft).await?,
    };
    info!(
        "Saved booking {} on table {} ({}..{})",
        saved.id, saved.details.table, saved.details.start, saved.details.end
    );
    Ok(saved)
}
