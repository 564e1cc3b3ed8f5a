// --- File: crates/tablebook_grid/src/now_indicator.rs ---
//! Horizontal position of the live "now" line.

use chrono::{NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::GridError;
use crate::slots::{TimeSlotSequence, MINUTES_PER_DAY, SLOT_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowIndicator {
    schedule_start_minutes: u32,
    schedule_end_minutes: u32,
}

impl NowIndicator {
    pub fn new(slots: &TimeSlotSequence) -> Self {
        Self {
            schedule_start_minutes: slots.schedule_start_minutes(),
            schedule_end_minutes: slots.schedule_end_minutes(),
        }
    }

    /// `now` in minutes after the opening day's midnight, clamped to the schedule day.
    ///
    /// Times before the opening hour are treated as after midnight, so the line
    /// sits at the closing edge between closing and the next opening.
    pub fn schedule_minutes(&self, now: NaiveTime) -> u32 {
        let mut minutes = now.hour() * 60 + now.minute();
        if minutes < self.schedule_start_minutes {
            minutes += MINUTES_PER_DAY;
        }
        minutes.clamp(self.schedule_start_minutes, self.schedule_end_minutes)
    }

    /// Fractional column of the line: 0.0 at opening, `slot_count` at closing.
    pub fn column(&self, now: NaiveTime) -> f64 {
        f64::from(self.schedule_minutes(now) - self.schedule_start_minutes) / f64::from(SLOT_MINUTES)
    }

    /// Pixel offset inside the scrolled viewport.
    ///
    /// `None` until the cell width is known.
    pub fn offset(&self, now: NaiveTime, cell_width: f64, scroll_offset: f64) -> Option<f64> {
        if cell_width.is_nan() || cell_width <= 0.0 {
            return None;
        }
        Some(self.column(now) * cell_width - scroll_offset)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, GridError> {
    Tz::from_str(name).map_err(|e| GridError::InvalidSchedule(format!("timezone {name}: {e}")))
}

/// Current wall-clock date and time at the venue.
pub fn venue_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}
