//! Calendar schedule expressions.
//!
//! Accepts a compact subset of systemd-style `OnCalendar` syntax:
//!
//! ```text
//! [weekday-spec] [time-spec] [utc]
//!
//! mon,tue 08:00      Monday and Tuesday at 08:00
//! sun..wed 3:30      Sunday, Monday, Tuesday at 03:30 (upper bound excluded)
//! */15               every quarter hour, every day
//! sat 0.12:0         Saturday at 00:00 and 12:00
//! ```
//!
//! Parsing is strict. Any malformed or out-of-range token, or a calendar date
//! clause, fails the whole expression.

use super::{
    field_parser::{Field, is_field_spec, parse_field, parse_weekdays},
    tokenizer::tokenize,
};
use crate::core::domain::{
    error::ScheduleError,
    model::schedule_spec::{ScheduleSpec, WEEKDAY_MAX},
};
use std::collections::BTreeSet;

/// Parses a schedule expression into its normalized weekday/hour/minute sets.
///
/// # Errors
///
/// * `ScheduleError::InvalidFormat` if a token matches no recognized grammar
/// * `ScheduleError::OutOfRange` if a value meets or exceeds its field bound
/// * `ScheduleError::DateNotSupported` if the expression contains a date clause
///
/// # Examples
///
/// ```
/// use proxmox_jolly::parse_schedule;
///
/// let spec = parse_schedule("mon,tue 08:00").unwrap();
/// assert!(spec.matches(1, 8, 0));
/// assert!(!spec.matches(3, 8, 0));
/// ```
pub fn parse_schedule(schedule: &str) -> Result<ScheduleSpec, ScheduleError> {
    let normalized = schedule.trim().to_lowercase();
    let tokens = tokenize(&normalized)?;

    let weekdays = match tokens.weekdays {
        Some(token) => parse_weekdays(token)?,
        None => (0..WEEKDAY_MAX).collect(),
    };

    let (hours, minutes) = match tokens.time {
        Some(token) => parse_time(token)?,
        None => (BTreeSet::from([0]), BTreeSet::from([0])),
    };

    let spec = ScheduleSpec::new_unchecked(weekdays, hours, minutes);
    tracing::debug!(schedule = %schedule, spec = %spec, "Parsed schedule");
    Ok(spec)
}

/// Parses `H:M`, or a bare minute spec that runs every hour.
fn parse_time(token: &str) -> Result<(BTreeSet<u8>, BTreeSet<u8>), ScheduleError> {
    if let Some((hour, minute)) = token.split_once(':') {
        if !is_field_spec(hour) || !is_field_spec(minute) {
            return Err(ScheduleError::InvalidFormat(format!(
                "Invalid time specification '{}'",
                token
            )));
        }
        return Ok((
            parse_field(hour, Field::Hour)?,
            parse_field(minute, Field::Minute)?,
        ));
    }

    if is_field_spec(token) {
        return Ok((Field::Hour.every(), parse_field(token, Field::Minute)?));
    }

    Err(ScheduleError::InvalidFormat(format!(
        "Invalid time specification '{}'",
        token
    )))
}
