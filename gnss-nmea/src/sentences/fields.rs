//! Shared field parsers. All of them treat an empty (omitted) field as
//! `Ok(None)` and report malformed content as `DecodeError::InvalidField`
//! carrying the sentence type, field name, and field index.

use chrono::{NaiveDate, NaiveTime};
use core::str::FromStr;

use crate::error::DecodeError;
use crate::sentence::NmeaSentence;

fn invalid(sentence: &'static str, field: &'static str, index: usize) -> DecodeError {
    DecodeError::InvalidField {
        sentence,
        field,
        index,
    }
}

pub(crate) fn opt_num<T: FromStr>(
    s: &NmeaSentence<'_>,
    sentence: &'static str,
    field: &'static str,
    index: usize,
) -> Result<Option<T>, DecodeError> {
    let raw = s.field(index);
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| invalid(sentence, field, index))
}

/// A `DDMM.MMMM`-encoded angle plus its hemisphere letter, converted to
/// signed decimal degrees (`D + M/60`, negated for `S`/`W`).
pub(crate) fn coordinate(
    s: &NmeaSentence<'_>,
    sentence: &'static str,
    field: &'static str,
    value_index: usize,
    hemisphere_index: usize,
) -> Result<Option<f64>, DecodeError> {
    let raw = s.field(value_index);
    if raw.is_empty() {
        return Ok(None);
    }
    let dot = raw.find('.').unwrap_or(raw.len());
    if dot < 3 {
        return Err(invalid(sentence, field, value_index));
    }
    let (deg, min) = raw.split_at(dot - 2);
    let deg: f64 = deg.parse().map_err(|_| invalid(sentence, field, value_index))?;
    let min: f64 = min.parse().map_err(|_| invalid(sentence, field, value_index))?;
    let unsigned = deg + min / 60.0;

    match s.field(hemisphere_index) {
        "N" | "E" => Ok(Some(unsigned)),
        "S" | "W" => Ok(Some(-unsigned)),
        _ => Err(invalid(sentence, field, hemisphere_index)),
    }
}

/// A `HHMMSS.sss` time-of-day field.
pub(crate) fn time_of_day(
    s: &NmeaSentence<'_>,
    sentence: &'static str,
    field: &'static str,
    index: usize,
) -> Result<Option<NaiveTime>, DecodeError> {
    let raw = s.field(index);
    if raw.is_empty() {
        return Ok(None);
    }
    let err = || invalid(sentence, field, index);
    let (main, frac) = match raw.split_once('.') {
        Some((main, frac)) => (main, frac),
        None => (raw, ""),
    };
    if main.len() != 6 || !main.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let hour: u32 = main[0..2].parse().map_err(|_| err())?;
    let minute: u32 = main[2..4].parse().map_err(|_| err())?;
    let second: u32 = main[4..6].parse().map_err(|_| err())?;
    let nanos = if frac.is_empty() {
        0
    } else {
        if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let digits: u32 = frac.parse().map_err(|_| err())?;
        digits * 10u32.pow(9 - frac.len() as u32)
    };
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(err).map(Some)
}

/// A `DDMMYY` date field. Two-digit years pivot at 2000, which is where
/// every receiver this crate targets lives.
pub(crate) fn date(
    s: &NmeaSentence<'_>,
    sentence: &'static str,
    field: &'static str,
    index: usize,
) -> Result<Option<NaiveDate>, DecodeError> {
    let raw = s.field(index);
    if raw.is_empty() {
        return Ok(None);
    }
    let err = || invalid(sentence, field, index);
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let day: u32 = raw[0..2].parse().map_err(|_| err())?;
    let month: u32 = raw[2..4].parse().map_err(|_| err())?;
    let year: i32 = raw[4..6].parse().map_err(|_| err())?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
        .ok_or_else(err)
        .map(Some)
}

/// A status letter field: `A` = valid, `V` = void.
pub(crate) fn status(
    s: &NmeaSentence<'_>,
    sentence: &'static str,
    field: &'static str,
    index: usize,
) -> Result<Option<bool>, DecodeError> {
    match s.field(index) {
        "" => Ok(None),
        "A" => Ok(Some(true)),
        "V" => Ok(Some(false)),
        _ => Err(invalid(sentence, field, index)),
    }
}
