//! GLL: geographic position, latitude/longitude.
//!
//! Field layout: latitude, N/S, longitude, E/W, time, status.

use crate::error::DecodeError;
use crate::registry::NavData;
use crate::sentence::NmeaSentence;
use crate::sentences::fields;
use crate::types::PositionFix;

const SENTENCE: &str = "GLL";

pub(crate) fn decode(s: &NmeaSentence<'_>) -> Result<NavData, DecodeError> {
    let mut fix = PositionFix::empty(s.talker, s.id);
    fix.latitude = fields::coordinate(s, SENTENCE, "latitude", 0, 1)?;
    fix.longitude = fields::coordinate(s, SENTENCE, "longitude", 2, 3)?;
    fix.time = fields::time_of_day(s, SENTENCE, "time", 4)?;
    fix.valid = fields::status(s, SENTENCE, "status", 5)?;
    Ok(NavData::Position(fix))
}
