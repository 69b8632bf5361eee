//! Commit timestamp normalization.
//!
//! Push payloads carry local clock times followed by a numeric UTC offset,
//! either `±HHMM` or `±HH:MM`.

use time::{
    format_description::FormatItem, macros::format_description, Duration, OffsetDateTime,
    PrimitiveDateTime,
};

use crate::{DomainError, Result};

const CLOCK_LENGTH: usize = 19;
const CLOCK_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Convert a hosting service commit timestamp to an absolute UTC instant.
pub fn normalize_timestamp(timestamp: &str) -> Result<OffsetDateTime> {
    let malformed = || DomainError::MalformedTimestamp {
        timestamp: timestamp.into(),
    };

    let clock = timestamp.get(..CLOCK_LENGTH).ok_or_else(malformed)?;
    let offset = timestamp.get(CLOCK_LENGTH..).ok_or_else(malformed)?;

    // Plain calendar decomposition, no zone applied yet.
    let naive = PrimitiveDateTime::parse(clock, CLOCK_FORMAT).map_err(|_| malformed())?;
    let offset_seconds = parse_offset_seconds(offset).ok_or_else(malformed)?;

    Ok(naive.assume_utc() - Duration::seconds(offset_seconds))
}

/// Signed offset east of UTC, in seconds.
fn parse_offset_seconds(offset: &str) -> Option<i64> {
    let sign = match offset.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };

    let digits = match offset.len() {
        5 => &offset[1..],
        6 if offset.as_bytes()[3] == b':' => &offset[1..],
        _ => return None,
    };
    let hours = parse_two_digits(digits.get(..2)?)?;
    let minutes = parse_two_digits(digits.get(digits.len() - 2..)?)?;

    Some(sign * (hours * 3600 + minutes * 60))
}

fn parse_two_digits(value: &str) -> Option<i64> {
    if value.len() == 2 && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}
