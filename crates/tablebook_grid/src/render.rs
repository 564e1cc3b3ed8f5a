// --- File: crates/tablebook_grid/src/render.rs ---
//! Plain-text rendering of a [`BookingGrid`], one character per cell.

use std::fmt::Write;

use crate::api::BookingApi;
use crate::grid::{BookingGrid, CellState};

const TABLE_HEADER: &str = "Table";

pub fn cell_char(state: CellState) -> char {
    match state {
        CellState::Free => '.',
        CellState::Booked => 'B',
        CellState::Occupied => 'O',
        CellState::Selected => '#',
        CellState::Anchor => '*',
    }
}

/// Renders the title, the hour header, the now marker (after the first tick),
/// one row per table and a legend.
pub fn render_text<A: BookingApi>(grid: &BookingGrid<A>) -> String {
    let state = grid.state();
    let slots = grid.slots();
    let slot_count = slots.slot_count();
    let width = grid
        .tables()
        .tables()
        .iter()
        .map(|t| t.as_str().chars().count())
        .chain(std::iter::once(TABLE_HEADER.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Bookings for {}", state.date.format("%d.%m.%Y"));

    // the schedule opens on the hour, so every hour spans exactly two cells
    let mut hours = String::with_capacity(slot_count);
    for index in (0..slot_count).step_by(2) {
        let label = slots.slot_label(index).unwrap_or_default();
        hours.push_str(label.get(..2).unwrap_or("??"));
    }
    let _ = writeln!(out, "{:<width$}|{}|", TABLE_HEADER, hours);

    if let Some(now) = state.now {
        let column = (grid.indicator().column(now).floor() as usize).min(slot_count);
        let _ = writeln!(out, "{:<width$}|{}v", "now", " ".repeat(column));
    }

    for table in grid.tables().tables() {
        let cells: String = (0..slot_count)
            .map(|slot| cell_char(grid.cell_state(table, slot)))
            .collect();
        let _ = writeln!(out, "{:<width$}|{}|", table.as_str(), cells);
    }

    let _ = writeln!(
        out,
        "{} free  {} booked  {} occupied  {} selected",
        cell_char(CellState::Free),
        cell_char(CellState::Booked),
        cell_char(CellState::Occupied),
        cell_char(CellState::Selected),
    );
    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "! {}", notice.message);
    }
    out
}
