//! Bookable time slots
//!
//! The dining room takes reservations from opening (18:00) until last call
//! (21:00) inclusive, on a fixed 30-minute grid. The grid is a static table.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Minutes between two bookable start times
pub const SLOT_INTERVAL_MINUTES: u32 = 30;

/// A wall-clock start time on the booking grid (minute granularity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight
    pub const fn minute_of_day(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// `HH:MM` label used by clients and in persisted rows
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// First bookable start time
pub const OPENING: TimeSlot = TimeSlot::new(18, 0);

/// Last call: the latest start time a reservation may have
pub const LAST_CALL: TimeSlot = TimeSlot::new(21, 0);

/// Every bookable start time, ascending
pub static TIME_SLOTS: [TimeSlot; 7] = [
    TimeSlot::new(18, 0),
    TimeSlot::new(18, 30),
    TimeSlot::new(19, 0),
    TimeSlot::new(19, 30),
    TimeSlot::new(20, 0),
    TimeSlot::new(20, 30),
    TimeSlot::new(21, 0),
];

/// Minutes since midnight for a parsed time (seconds ignored)
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Look up the grid slot starting exactly at `time`
pub fn slot_at(time: NaiveTime) -> Option<TimeSlot> {
    if time.second() != 0 || time.nanosecond() != 0 {
        return None;
    }
    let minutes = minute_of_day(time);
    TIME_SLOTS
        .iter()
        .copied()
        .find(|slot| slot.minute_of_day() == minutes)
}
