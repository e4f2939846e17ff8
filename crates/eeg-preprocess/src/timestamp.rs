//! Local Timestamp Conversion
//!
//! Session logs stamp every sample with local wall-clock time in the form
//! `YYYY-MM-DD HH:MM:SS.ffffff`. These helpers turn that text into epoch time.
//!
//! Wall-clock times that occur twice when clocks fall back resolve to the
//! earlier instant. Times skipped when clocks spring forward are read with the
//! offset in force before the transition, so they land after the gap.

use crate::error::PreprocessError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// chrono pattern for session timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Maximum number of fractional-second digits (microsecond precision)
const MAX_FRACTION_DIGITS: usize = 6;

/// Window searched for the other side of a clock transition
const TRANSITION_WINDOW_SECS: i64 = 24 * 3600;

/// Parse a local timestamp into floating-point epoch seconds
pub fn timestamp_to_unix_seconds(text: &str) -> Result<f64, PreprocessError> {
    timestamp_to_unix_seconds_with(text, local_offset)
}

/// Parse a local timestamp into integer epoch milliseconds, truncated toward zero
pub fn timestamp_to_unix_milliseconds(text: &str) -> Result<i64, PreprocessError> {
    let seconds = timestamp_to_unix_seconds(text)?;
    Ok((seconds * 1000.0).trunc() as i64)
}

/// Parse a timestamp against a zone given as `utc_seconds -> offset_seconds`
pub fn timestamp_to_unix_seconds_with<F>(text: &str, offset_at: F) -> Result<f64, PreprocessError>
where
    F: Fn(i64) -> Option<i64>,
{
    let naive = parse_naive(text)?;
    let seconds = resolve_local(naive.and_utc().timestamp(), offset_at).ok_or_else(|| {
        PreprocessError::Parse(format!(
            "timestamp {:?} is outside the local timezone range",
            text
        ))
    })?;
    Ok(seconds as f64 + naive.and_utc().timestamp_subsec_micros() as f64 / 1_000_000.0)
}

fn parse_naive(text: &str) -> Result<NaiveDateTime, PreprocessError> {
    let invalid = || {
        PreprocessError::Parse(format!(
            "timestamp {:?} does not match YYYY-MM-DD HH:MM:SS.ffffff",
            text
        ))
    };

    // The fractional part is mandatory and limited to microseconds
    let (_, fraction) = text.rsplit_once('.').ok_or_else(invalid)?;
    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| invalid())
}

/// UTC offset in seconds of the system timezone at an epoch second
fn local_offset(utc_seconds: i64) -> Option<i64> {
    let utc = DateTime::from_timestamp(utc_seconds, 0)?;
    Some(Local.offset_from_utc_datetime(&utc.naive_utc()).local_minus_utc() as i64)
}

/// Epoch second for wall-clock second `wall` (wall-clock fields read as UTC).
///
/// Only UTC-to-local lookups are used, so both offsets around a transition are
/// found explicitly. Repeated wall times take the earlier instant; skipped wall
/// times take the later candidate, which applies the pre-transition offset.
fn resolve_local<F>(wall: i64, offset_at: F) -> Option<i64>
where
    F: Fn(i64) -> Option<i64>,
{
    let to_wall = |utc: i64| offset_at(utc).map(|offset| utc + offset);

    let first_offset = offset_at(wall)?;
    let first = wall - first_offset;
    let first_wall = to_wall(first)?;

    let second_offset = if first_wall == wall {
        let earlier_offset = offset_at(first - TRANSITION_WINDOW_SECS)?;
        if earlier_offset == first_offset {
            return Some(first);
        }
        earlier_offset
    } else {
        first_wall - first
    };

    let second = wall - second_offset;
    if to_wall(second)? == wall {
        return Some(second);
    }
    if first_wall == wall {
        return Some(first);
    }
    // Wall time falls in a gap
    Some(first.max(second))
}
