//! VTG: track made good and ground speed.
//!
//! Field layout: track true, `T`, track magnetic, `M`, speed knots, `N`,
//! speed km/h, `K`. The unit letters are positional markers and are not
//! interpreted.

use crate::error::DecodeError;
use crate::registry::NavData;
use crate::sentence::NmeaSentence;
use crate::sentences::fields;
use crate::types::CourseOverGround;

const SENTENCE: &str = "VTG";

pub(crate) fn decode(s: &NmeaSentence<'_>) -> Result<NavData, DecodeError> {
    Ok(NavData::Course(CourseOverGround {
        talker: s.talker,
        course_true: fields::opt_num(s, SENTENCE, "course_true", 0)?,
        course_magnetic: fields::opt_num(s, SENTENCE, "course_magnetic", 2)?,
        speed_knots: fields::opt_num(s, SENTENCE, "speed_knots", 4)?,
        speed_kmh: fields::opt_num(s, SENTENCE, "speed_kmh", 6)?,
    }))
}
