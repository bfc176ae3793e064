//! GGA: global positioning system fix data.
//!
//! Field layout: time, latitude, N/S, longitude, E/W, fix quality,
//! satellites in use, HDOP, altitude MSL, `M`, geoid separation, `M`,
//! DGPS age, DGPS station id.

use crate::error::DecodeError;
use crate::registry::NavData;
use crate::sentence::NmeaSentence;
use crate::sentences::fields;
use crate::types::{FixQuality, PositionFix};

const SENTENCE: &str = "GGA";

pub(crate) fn decode(s: &NmeaSentence<'_>) -> Result<NavData, DecodeError> {
    let mut fix = PositionFix::empty(s.talker, s.id);
    fix.time = fields::time_of_day(s, SENTENCE, "time", 0)?;
    fix.latitude = fields::coordinate(s, SENTENCE, "latitude", 1, 2)?;
    fix.longitude = fields::coordinate(s, SENTENCE, "longitude", 3, 4)?;
    fix.quality = fields::opt_num::<u8>(s, SENTENCE, "quality", 5)?.map(FixQuality::from);
    fix.satellites_in_use = fields::opt_num(s, SENTENCE, "satellites_in_use", 6)?;
    fix.hdop = fields::opt_num(s, SENTENCE, "hdop", 7)?;
    fix.altitude_msl = fields::opt_num(s, SENTENCE, "altitude_msl", 8)?;
    fix.geoid_separation = fields::opt_num(s, SENTENCE, "geoid_separation", 10)?;
    Ok(NavData::Position(fix))
}
