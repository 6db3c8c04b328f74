use super::field_parser::is_weekday_spec;
use crate::core::domain::error::ScheduleError;

/// The sections of a normalized schedule string.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ScheduleTokens<'a> {
    pub(crate) weekdays: Option<&'a str>,
    pub(crate) time: Option<&'a str>,
}

/// Splits an already lowercased and trimmed schedule into its sections.
///
/// The grammar is `[weekday-spec] [date] [time-spec] [utc]`. A date section is
/// rejected with `DateNotSupported` as soon as it is seen, before the remaining
/// tokens are checked.
pub(crate) fn tokenize(normalized: &str) -> Result<ScheduleTokens<'_>, ScheduleError> {
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();
    if tokens.last() == Some(&"utc") {
        tokens.pop();
    }
    if tokens.is_empty() {
        return Err(ScheduleError::InvalidFormat(
            "Schedule expression is empty".to_string(),
        ));
    }

    let mut sections = ScheduleTokens::default();
    let mut rest = tokens.as_slice();

    if let Some((first, tail)) = rest.split_first() {
        if is_weekday_spec(first) {
            sections.weekdays = Some(*first);
            rest = tail;
        }
    }
    if let Some(first) = rest.first() {
        if first.contains('-') {
            return Err(ScheduleError::DateNotSupported(first.to_string()));
        }
    }

    match rest {
        [] => {}
        [time] => sections.time = Some(*time),
        _ => {
            return Err(ScheduleError::InvalidFormat(format!(
                "Unexpected tokens '{}'",
                rest.join(" ")
            )));
        }
    }
    Ok(sections)
}
