//! Normalized output of schedule parsing.
//!
//! A [`ScheduleSpec`] is the contract handed to the job scheduler: three sorted,
//! deduplicated integer sets. "Every hour" and "every minute" are already expanded.

use crate::core::domain::error::ScheduleError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Exclusive upper bound of the weekday field (0 = Sunday).
pub const WEEKDAY_MAX: u8 = 7;
/// Exclusive upper bound of the hour field.
pub const HOUR_MAX: u8 = 24;
/// Exclusive upper bound of the minute field.
pub const MINUTE_MAX: u8 = 60;

/// Matching weekdays, hours and minutes of a recurring job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSpec {
    weekdays: BTreeSet<u8>,
    hours: BTreeSet<u8>,
    minutes: BTreeSet<u8>,
}

impl ScheduleSpec {
    /// Builds a spec from already validated sets.
    pub(crate) fn new_unchecked(
        weekdays: BTreeSet<u8>,
        hours: BTreeSet<u8>,
        minutes: BTreeSet<u8>,
    ) -> Self {
        Self {
            weekdays,
            hours,
            minutes,
        }
    }

    #[must_use]
    pub fn weekdays(&self) -> &BTreeSet<u8> {
        &self.weekdays
    }

    #[must_use]
    pub fn hours(&self) -> &BTreeSet<u8> {
        &self.hours
    }

    #[must_use]
    pub fn minutes(&self) -> &BTreeSet<u8> {
        &self.minutes
    }

    #[must_use]
    pub fn is_every_day(&self) -> bool {
        self.weekdays.len() == usize::from(WEEKDAY_MAX)
    }

    #[must_use]
    pub fn is_every_hour(&self) -> bool {
        self.hours.len() == usize::from(HOUR_MAX)
    }

    #[must_use]
    pub fn is_every_minute(&self) -> bool {
        self.minutes.len() == usize::from(MINUTE_MAX)
    }

    /// Returns `true` if the given wall-clock slot is selected.
    ///
    /// `weekday` uses 0 = Sunday. No timezone handling is applied.
    #[must_use]
    pub fn matches(&self, weekday: u8, hour: u8, minute: u8) -> bool {
        self.weekdays.contains(&weekday)
            && self.hours.contains(&hour)
            && self.minutes.contains(&minute)
    }
}

impl FromStr for ScheduleSpec {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::schedule::application::parser::parse_schedule(s)
    }
}

impl fmt::Display for ScheduleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<u8>, every: bool| {
            if every {
                "*".to_string()
            } else {
                set.iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            }
        };
        write!(
            f,
            "weekdays={} hours={} minutes={}",
            join(&self.weekdays, self.is_every_day()),
            join(&self.hours, self.is_every_hour()),
            join(&self.minutes, self.is_every_minute())
        )
    }
}
