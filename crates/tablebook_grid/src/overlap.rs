// --- File: crates/tablebook_grid/src/overlap.rs ---
use chrono::NaiveDate;

use crate::models::Booking;
use crate::table::TableId;

/// Answers "which booking occupies this cell" for one date.
///
/// A linear scan per query; a day holds a few dozen bookings at most.
#[derive(Debug, Clone, Copy)]
pub struct OverlapIndex<'a> {
    bookings: &'a [Booking],
    date: NaiveDate,
}

impl<'a> OverlapIndex<'a> {
    pub fn new(bookings: &'a [Booking], date: NaiveDate) -> Self {
        Self { bookings, date }
    }

    /// First booking in list order covering `slot` on `table`.
    ///
    /// Overlapping bookings are a backend integrity problem; the earlier one wins here.
    pub fn find(&self, table: &TableId, slot: usize) -> Option<&'a Booking> {
        self.bookings
            .iter()
            .find(|b| b.date() == self.date && b.covers(table, slot))
    }

    /// Bookings of `table` on the active date, in list order.
    pub fn for_table<'t>(&self, table: &'t TableId) -> impl Iterator<Item = &'a Booking> + 't
    where
        'a: 't,
    {
        let date = self.date;
        let bookings: &'a [Booking] = self.bookings;
        bookings
            .iter()
            .filter(move |b| b.date() == date && b.table() == table)
    }
}
