// --- File: crates/tablebook_grid/src/lib.rs ---
// Declare modules within this crate
pub mod api;
pub mod error;
pub mod form;
pub mod grid;
#[cfg(test)]
mod grid_test;
pub mod models;
pub mod now_indicator;
pub mod overlap;
pub mod render;
pub mod selection;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
pub mod table;
pub mod ticker;

pub use api::{mock::InMemoryBookingApi, BookingApi, HttpBookingApi};
pub use error::GridError;
pub use form::{FormPatch, FormState};
pub use grid::{BookingGrid, CellState, GridEvent, Notice, ViewState};
pub use models::{Booking, BookingDraft, BookingStatus};
pub use now_indicator::{parse_timezone, venue_now, NowIndicator};
pub use overlap::OverlapIndex;
pub use render::render_text;
pub use selection::{Selection, SelectionEngine, SelectionState};
pub use slots::TimeSlotSequence;
pub use table::{TableId, TableLayout};
pub use ticker::NowTicker;
