//! RMC: recommended minimum navigation information.
//!
//! Field layout: time, status, latitude, N/S, longitude, E/W, speed over
//! ground (knots), course over ground, date, magnetic variation,
//! variation E/W.

use crate::error::DecodeError;
use crate::registry::NavData;
use crate::sentence::NmeaSentence;
use crate::sentences::fields;
use crate::types::PositionFix;

const SENTENCE: &str = "RMC";

pub(crate) fn decode(s: &NmeaSentence<'_>) -> Result<NavData, DecodeError> {
    let mut fix = PositionFix::empty(s.talker, s.id);
    fix.time = fields::time_of_day(s, SENTENCE, "time", 0)?;
    fix.valid = fields::status(s, SENTENCE, "status", 1)?;
    fix.latitude = fields::coordinate(s, SENTENCE, "latitude", 2, 3)?;
    fix.longitude = fields::coordinate(s, SENTENCE, "longitude", 4, 5)?;
    fix.speed_knots = fields::opt_num(s, SENTENCE, "speed_knots", 6)?;
    fix.course_deg = fields::opt_num(s, SENTENCE, "course", 7)?;
    fix.date = fields::date(s, SENTENCE, "date", 8)?;
    fix.magnetic_variation = match fields::opt_num::<f32>(s, SENTENCE, "magnetic_variation", 9)? {
        None => None,
        Some(var) => match s.field(10) {
            "E" => Some(var),
            "W" => Some(-var),
            _ => {
                return Err(DecodeError::InvalidField {
                    sentence: SENTENCE,
                    field: "magnetic_variation",
                    index: 10,
                })
            },
        },
    };
    Ok(NavData::Position(fix))
}
