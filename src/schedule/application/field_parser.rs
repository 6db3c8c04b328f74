//! Numeric field specs (`*`, `N`, `N/R`, `A..B`) and weekday lists.

use crate::core::domain::{
    error::ScheduleError,
    model::schedule_spec::{HOUR_MAX, MINUTE_MAX},
    value_object::Weekday,
};
use std::collections::BTreeSet;

/// A numeric calendar field and its exclusive upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Hour,
    Minute,
}

impl Field {
    pub(crate) fn max(self) -> u8 {
        match self {
            Field::Hour => HOUR_MAX,
            Field::Minute => MINUTE_MAX,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Field::Hour => "hour",
            Field::Minute => "minute",
        }
    }

    /// The full `0..max` range.
    pub(crate) fn every(self) -> BTreeSet<u8> {
        (0..self.max()).collect()
    }
}

/// Returns `true` if `token` only uses characters allowed in a field spec.
pub(crate) fn is_field_spec(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '*' | '/' | '.' | ','))
}

/// Parses a full field, which may list several sub-specs separated by `,` or `.`.
pub(crate) fn parse_field(spec: &str, field: Field) -> Result<BTreeSet<u8>, ScheduleError> {
    let mut every = false;
    let mut values = BTreeSet::new();
    for sub_spec in split_sub_specs(spec) {
        every |= parse_sub_spec(sub_spec, field, &mut values)?;
    }
    Ok(if every { field.every() } else { values })
}

/// Splits on `,` and on single dots. A double dot is always the range operator.
fn split_sub_specs(spec: &str) -> Vec<&str> {
    let bytes = spec.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let separator = match b {
            b',' => true,
            b'.' => {
                let prev_dot = i > 0 && bytes[i - 1] == b'.';
                let next_dot = bytes.get(i + 1) == Some(&b'.');
                !prev_dot && !next_dot
            }
            _ => false,
        };
        if separator {
            parts.push(&spec[start..i]);
            start = i + 1;
        }
    }
    parts.push(&spec[start..]);
    parts
}

/// Adds the values of one sub-spec. Returns `true` for `*`.
fn parse_sub_spec(
    sub_spec: &str,
    field: Field,
    values: &mut BTreeSet<u8>,
) -> Result<bool, ScheduleError> {
    let max = field.max();

    if sub_spec == "*" {
        return Ok(true);
    }

    if let Some((start, step)) = sub_spec.split_once('/') {
        let start = if start == "*" {
            0
        } else {
            bounded(start, field)?
        };
        let step = bounded(step, field)?;
        if step == 0 {
            return Err(ScheduleError::InvalidFormat(format!(
                "Repetition step must be positive in '{}'",
                sub_spec
            )));
        }
        values.extend((start..max).step_by(usize::from(step)));
        return Ok(false);
    }

    if let Some((from, to)) = sub_spec.split_once("..") {
        let from = bounded(from, field)?;
        let to = bounded(to, field)?;
        if from > to {
            return Err(ScheduleError::InvalidFormat(format!(
                "Range start exceeds range end in '{}'",
                sub_spec
            )));
        }
        values.extend(from..=to);
        return Ok(false);
    }

    values.insert(bounded(sub_spec, field)?);
    Ok(false)
}

/// Parses a decimal literal and checks it against the field bound.
fn bounded(literal: &str, field: Field) -> Result<u8, ScheduleError> {
    if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScheduleError::InvalidFormat(format!(
            "Expected a number for {}, got '{}'",
            field.name(),
            literal
        )));
    }

    let out_of_range = || ScheduleError::OutOfRange {
        field: field.name(),
        value: literal.to_string(),
        max: u32::from(field.max()),
    };
    let value: u32 = literal.parse().map_err(|_| out_of_range())?;
    if value >= u32::from(field.max()) {
        return Err(out_of_range());
    }
    u8::try_from(value).map_err(|_| out_of_range())
}

/// Returns `true` if `token` is a weekday list such as `mon,wed..fri`.
pub(crate) fn is_weekday_spec(token: &str) -> bool {
    token.split(',').all(|part| match part.split_once("..") {
        Some((from, to)) => Weekday::from_abbrev(from).is_some() && Weekday::from_abbrev(to).is_some(),
        None => Weekday::from_abbrev(part).is_some(),
    })
}

/// Expands a weekday list. `a..b` covers `a` up to but excluding `b`.
pub(crate) fn parse_weekdays(token: &str) -> Result<BTreeSet<u8>, ScheduleError> {
    let day = |abbrev: &str| {
        Weekday::from_abbrev(abbrev)
            .ok_or_else(|| ScheduleError::InvalidFormat(format!("Unknown weekday '{}'", abbrev)))
    };

    let mut days = BTreeSet::new();
    for part in token.split(',') {
        match part.split_once("..") {
            Some((from, to)) => {
                let (from, to) = (day(from)?, day(to)?);
                if from >= to {
                    return Err(ScheduleError::InvalidFormat(format!(
                        "Weekday range '{}' selects no days",
                        part
                    )));
                }
                days.extend(from.index()..to.index());
            }
            None => {
                days.insert(day(part)?.index());
            }
        }
    }
    Ok(days)
}
