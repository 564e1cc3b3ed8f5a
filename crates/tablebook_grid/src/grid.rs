// --- File: crates/tablebook_grid/src/grid.rs ---
//! The booking grid view model.
//!
//! [`BookingGrid`] owns a serializable [`ViewState`] and changes it only through
//! one method per input event. Rendering reads the state through
//! [`BookingGrid::cell_state`] and [`ViewState::now_offset`].
//!
//! Network transitions borrow the grid mutably for the whole request, so events
//! are applied strictly one at a time. The loaded bookings are a read-through
//! copy of the backend: every successful mutation is followed by a refetch.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tablebook_common::log_result;
use tablebook_config::{AppConfig, SelectionMode};
use tracing::{debug, error, info};

use crate::api::BookingApi;
use crate::error::GridError;
use crate::form::{self, FormPatch, FormState};
use crate::models::{Booking, BookingStatus};
use crate::now_indicator::NowIndicator;
use crate::overlap::OverlapIndex;
use crate::selection::SelectionEngine;
use crate::slots::TimeSlotSequence;
use crate::table::{TableId, TableLayout};

/// Something the UI should show to the user, e.g. in an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

/// Everything the booking screen needs to draw itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub date: NaiveDate,
    /// Bookings of `date`, as last fetched.
    pub bookings: Vec<Booking>,
    pub selection: SelectionEngine,
    /// Open create or edit dialog.
    pub form: Option<FormState>,
    pub scroll_offset: f64,
    pub cell_width: f64,
    /// Wall-clock time of the last tick.
    pub now: Option<NaiveTime>,
    pub now_offset: Option<f64>,
    pub notice: Option<Notice>,
}

impl ViewState {
    pub fn new(date: NaiveDate, cell_width: f64) -> Self {
        Self {
            date,
            bookings: Vec::new(),
            selection: SelectionEngine::new(),
            form: None,
            scroll_offset: 0.0,
            cell_width,
            now: None,
            now_offset: None,
            notice: None,
        }
    }
}

/// Synchronous input events, as delivered by a UI loop or the now ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    PointerDown { table: TableId, slot: usize },
    PointerEnter { table: TableId, slot: usize },
    PointerUp,
    CellClick { table: TableId, slot: usize },
    Scroll(f64),
    Resize(f64),
    Tick(NaiveTime),
}

/// What a single cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Free,
    Booked,
    Occupied,
    /// Inside the selection being dragged or awaiting confirmation.
    Selected,
    /// First cell of a two-click selection.
    Anchor,
}

pub struct BookingGrid<A> {
    api: A,
    slots: TimeSlotSequence,
    tables: TableLayout,
    mode: SelectionMode,
    indicator: NowIndicator,
    state: ViewState,
}

impl<A: BookingApi> BookingGrid<A> {
    pub fn new(
        api: A,
        slots: TimeSlotSequence,
        tables: TableLayout,
        mode: SelectionMode,
        date: NaiveDate,
        cell_width: f64,
    ) -> Self {
        Self {
            api,
            indicator: NowIndicator::new(&slots),
            slots,
            tables,
            mode,
            state: ViewState::new(date, cell_width),
        }
    }

    pub fn from_config(api: A, config: &AppConfig, date: NaiveDate) -> Result<Self, GridError> {
        let slots = TimeSlotSequence::from_config(&config.schedule)?;
        let tables = TableLayout::from_config(&config.grid)?;
        Ok(Self::new(
            api,
            slots,
            tables,
            config.grid.selection_mode,
            date,
            config.grid.cell_width,
        ))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn slots(&self) -> &TimeSlotSequence {
        &self.slots
    }

    pub fn tables(&self) -> &TableLayout {
        &self.tables
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn indicator(&self) -> &NowIndicator {
        &self.indicator
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // --- Derived values ---

    pub fn booking_at(&self, table: &TableId, slot: usize) -> Option<&Booking> {
        OverlapIndex::new(&self.state.bookings, self.state.date).find(table, slot)
    }

    pub fn cell_state(&self, table: &TableId, slot: usize) -> CellState {
        if let Some(booking) = self.booking_at(table, slot) {
            return match booking.status() {
                BookingStatus::Booked => CellState::Booked,
                BookingStatus::Occupied => CellState::Occupied,
            };
        }
        if let Some((anchor_table, anchor)) = self.state.selection.anchor() {
            if anchor_table == table && anchor == slot {
                return CellState::Anchor;
            }
            return CellState::Free;
        }
        match self.state.selection.normalize() {
            Some(selection) if selection.contains(table, slot) => CellState::Selected,
            _ => CellState::Free,
        }
    }

    // --- Pointer transitions ---

    pub fn handle(&mut self, event: GridEvent) -> Result<(), GridError> {
        match event {
            GridEvent::PointerDown { table, slot } => self.pointer_down(&table, slot),
            GridEvent::PointerEnter { table, slot } => self.pointer_enter(&table, slot),
            GridEvent::PointerUp => {
                self.pointer_up();
                Ok(())
            }
            GridEvent::CellClick { table, slot } => self.cell_click(&table, slot),
            GridEvent::Scroll(offset) => {
                self.scroll(offset);
                Ok(())
            }
            GridEvent::Resize(width) => {
                self.resize(width);
                Ok(())
            }
            GridEvent::Tick(now) => {
                self.tick(now);
                Ok(())
            }
        }
    }

    /// Drag mode: press on a cell. A booked cell opens that booking instead.
    pub fn pointer_down(&mut self, table: &TableId, slot: usize) -> Result<(), GridError> {
        self.check_cell(table, slot)?;
        if self.state.form.is_some() || self.mode != SelectionMode::Drag {
            return Ok(());
        }
        if self.open_existing(table, slot) {
            return Ok(());
        }
        self.state.selection.begin_selection(table, slot);
        Ok(())
    }

    pub fn pointer_enter(&mut self, table: &TableId, slot: usize) -> Result<(), GridError> {
        self.check_cell(table, slot)?;
        self.state.selection.extend_selection(table, slot);
        Ok(())
    }

    /// Drag mode: release. Opens the create form for the dragged interval.
    pub fn pointer_up(&mut self) {
        if let Some(selection) = self.state.selection.finish_drag() {
            debug!(
                "Selected table {} slots {}..{}",
                selection.table, selection.start, selection.end
            );
            self.state.form = Some(form::open_for_create(&selection, self.state.date));
        }
    }

    /// Opens a booked cell in either mode; drives the selection in two-click mode.
    pub fn cell_click(&mut self, table: &TableId, slot: usize) -> Result<(), GridError> {
        self.check_cell(table, slot)?;
        if self.state.form.is_some() {
            return Ok(());
        }
        if self.open_existing(table, slot) {
            return Ok(());
        }
        if self.mode == SelectionMode::TwoClick {
            if let Some(selection) = self.state.selection.click(table, slot) {
                self.state.form = Some(form::open_for_create(&selection, self.state.date));
            }
        }
        Ok(())
    }

    fn open_existing(&mut self, table: &TableId, slot: usize) -> bool {
        let Some(booking) = self.booking_at(table, slot) else {
            return false;
        };
        debug!("Opening booking {} for edit", booking.id);
        let form = form::open_for_edit(booking);
        self.state.selection.reset();
        self.state.form = Some(form);
        true
    }

    fn check_cell(&self, table: &TableId, slot: usize) -> Result<(), GridError> {
        if !self.tables.contains(table) {
            return Err(GridError::UnknownTable(table.to_string()));
        }
        if !self.slots.contains(slot) {
            return Err(GridError::InvalidSlot {
                index: slot,
                count: self.slots.slot_count(),
            });
        }
        Ok(())
    }

    // --- Viewport and clock ---

    pub fn scroll(&mut self, offset: f64) {
        self.state.scroll_offset = offset.max(0.0);
        self.recompute_now_offset();
    }

    pub fn resize(&mut self, cell_width: f64) {
        self.state.cell_width = cell_width;
        self.recompute_now_offset();
    }

    pub fn tick(&mut self, now: NaiveTime) {
        self.state.now = Some(now);
        self.recompute_now_offset();
    }

    fn recompute_now_offset(&mut self) {
        self.state.now_offset = self.state.now.and_then(|now| {
            self.indicator
                .offset(now, self.state.cell_width, self.state.scroll_offset)
        });
    }

    // --- Form ---

    /// Applies `patch` to the open form. `start` must be a slot of the day and
    /// `end` at most the slot count; their order is checked on submit.
    pub fn update_form(&mut self, patch: FormPatch) -> Result<(), GridError> {
        let count = self.slots.slot_count();
        let out_of_range = [
            patch.start.filter(|start| *start >= count),
            patch.end.filter(|end| *end > count),
        ];
        if let Some(index) = out_of_range.into_iter().flatten().next() {
            return Err(GridError::InvalidSlot { index, count });
        }
        let form = self.state.form.as_mut().ok_or(GridError::NoOpenForm)?;
        form.apply(patch);
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.state.form = None;
        self.state.selection.reset();
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    // --- Network transitions ---

    /// Refetches the active date. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<(), GridError> {
        let date = self.state.date;
        let result = log_result(
            self.api.list_by_date(date).await,
            &format!("Loaded bookings for {date}"),
            &format!("Failed to load bookings for {date}"),
        );
        match result {
            Ok(bookings) => {
                self.state.bookings = bookings;
                Ok(())
            }
            Err(e) => {
                // already logged by log_result
                self.set_notice(&e);
                Err(e)
            }
        }
    }

    /// Switches the active date, dropping any selection or open form, and loads it.
    pub async fn set_date(&mut self, date: NaiveDate) -> Result<(), GridError> {
        self.state.date = date;
        self.state.bookings.clear();
        self.cancel_form();
        self.refresh().await
    }

    /// Previous (`-1`) or next (`1`) day.
    pub async fn shift_date(&mut self, days: i64) -> Result<(), GridError> {
        let date = self.state.date + Duration::days(days);
        self.set_date(date).await
    }

    /// Saves the open form. On success the form closes and the date is refetched;
    /// on failure the form stays open with the error as notice.
    pub async fn submit_form(&mut self) -> Result<Booking, GridError> {
        let form = self.state.form.clone().ok_or(GridError::NoOpenForm)?;
        let saved = match form::submit(&form, &self.api).await {
            Ok(saved) => saved,
            Err(e) => {
                self.notify(&e);
                return Err(e);
            }
        };
        self.finish_mutation().await;
        Ok(saved)
    }

    pub async fn delete_open_booking(&mut self) -> Result<(), GridError> {
        let id = self.open_booking_id()?;
        if let Err(e) = self.api.delete(id).await {
            self.notify(&e);
            return Err(e);
        }
        info!("Deleted booking {}", id);
        self.finish_mutation().await;
        Ok(())
    }

    /// Quick action: guests arrived.
    pub async fn mark_open_booking_occupied(&mut self) -> Result<Booking, GridError> {
        self.open_booking_id()?;
        let previous = self.state.form.as_ref().map(|form| form.status);
        self.update_form(FormPatch::default().status(BookingStatus::Occupied))?;

        let result = self.submit_form().await;
        if result.is_err() {
            if let (Some(form), Some(status)) = (self.state.form.as_mut(), previous) {
                form.status = status;
            }
        }
        result
    }

    fn open_booking_id(&self) -> Result<i64, GridError> {
        let form = self.state.form.as_ref().ok_or(GridError::NoOpenForm)?;
        form.id.ok_or(GridError::NoOpenBooking)
    }

    async fn finish_mutation(&mut self) {
        self.state.form = None;
        self.state.selection.reset();
        self.state.notice = None;
        // a failed refetch is already recorded as notice
        let _ = self.refresh().await;
    }

    fn notify(&mut self, err: &GridError) {
        error!("Booking grid error: {}", err);
        self.set_notice(err);
    }

    fn set_notice(&mut self, err: &GridError) {
        self.state.notice = Some(Notice {
            message: err.to_string(),
        });
    }
}
