// --- File: crates/tablebook_grid/src/slots.rs ---
//! Half-hour slots of a schedule day that opens at `start_hour` and closes at
//! `end_hour` on the next calendar day.
//!
//! Slots are plain `usize` offsets from the opening time. Labels are `"HH:MM"`
//! wall-clock times, so the label sequence wraps through midnight:
//! `12:00, 12:30, ..., 23:30, 00:00, ..., 05:30` for the default 12 → 6 day.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tablebook_config::ScheduleConfig;

use crate::error::GridError;

/// Minutes covered by one grid column.
pub const SLOT_MINUTES: u32 = 30;
pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotSequence {
    start_hour: u32,
    end_hour: u32,
}

impl Default for TimeSlotSequence {
    fn default() -> Self {
        Self {
            start_hour: 12,
            end_hour: 6,
        }
    }
}

impl TimeSlotSequence {
    /// `end_hour` is on the next calendar day, so it may not be later than `start_hour`.
    /// Equal hours describe a full 24 hour day.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, GridError> {
        if start_hour >= 24 {
            return Err(GridError::InvalidSchedule(format!(
                "start_hour must be below 24, got {start_hour}"
            )));
        }
        if end_hour > start_hour {
            return Err(GridError::InvalidSchedule(format!(
                "end_hour {end_hour} must not be later than start_hour {start_hour}"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self, GridError> {
        Self::new(config.start_hour, config.end_hour)
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn slot_count(&self) -> usize {
        ((24 - self.start_hour + self.end_hour) * 2) as usize
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.slot_count()
    }

    /// Opening time in minutes after midnight.
    pub fn schedule_start_minutes(&self) -> u32 {
        self.start_hour * 60
    }

    /// Closing time in minutes after the opening day's midnight (past 1440 when wrapped).
    pub fn schedule_end_minutes(&self) -> u32 {
        self.schedule_start_minutes() + self.slot_count() as u32 * SLOT_MINUTES
    }

    /// Start of slot `index` in minutes after the opening day's midnight.
    pub fn slot_start_minutes(&self, index: usize) -> Result<u32, GridError> {
        self.check(index)?;
        Ok(self.schedule_start_minutes() + index as u32 * SLOT_MINUTES)
    }

    pub fn slot_label(&self, index: usize) -> Result<String, GridError> {
        let minutes = self.slot_start_minutes(index)? % MINUTES_PER_DAY;
        Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
    }

    /// Inverse of [`slot_label`](Self::slot_label). Unpadded hours (`"0:30"`) are accepted.
    pub fn slot_index(&self, label: &str) -> Result<usize, GridError> {
        let invalid = || GridError::InvalidLabel(label.to_string());

        let (hour, minute) = label.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !digits(hour)
            || !digits(minute)
        {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour >= 24 || minute >= 60 {
            return Err(invalid());
        }

        let mut minutes = hour * 60 + minute;
        if minutes % SLOT_MINUTES != 0 {
            return Err(invalid());
        }
        if minutes < self.schedule_start_minutes() {
            minutes += MINUTES_PER_DAY;
        }
        let index = ((minutes - self.schedule_start_minutes()) / SLOT_MINUTES) as usize;
        if !self.contains(index) {
            return Err(invalid());
        }
        Ok(index)
    }

    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.slot_count()).filter_map(move |index| self.slot_label(index).ok())
    }

    /// The calendar date whose schedule day is running (or next to run) at `now`.
    ///
    /// Times before `end_hour` belong to the previous day's schedule.
    pub fn schedule_date(&self, now: NaiveDateTime) -> NaiveDate {
        let minutes = now.hour() * 60 + now.minute();
        // end_hour <= start_hour, so this covers full-day schedules too
        if minutes < self.end_hour * 60 {
            now.date() - Duration::days(1)
        } else {
            now.date()
        }
    }

    fn check(&self, index: usize) -> Result<(), GridError> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(GridError::InvalidSlot {
                index,
                count: self.slot_count(),
            })
        }
    }
}
