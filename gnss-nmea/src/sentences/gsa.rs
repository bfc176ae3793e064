//! GSA: DOP and active satellites.
//!
//! Field layout: selection mode (M/A), fix dimension (1/2/3), twelve PRN
//! slots (empty slots permitted), PDOP, HDOP, VDOP.

use crate::error::DecodeError;
use crate::registry::NavData;
use crate::sentence::NmeaSentence;
use crate::sentences::fields;
use crate::types::{ActiveSatelliteSet, FixDimension, SelectionMode};

const SENTENCE: &str = "GSA";
const PRN_SLOTS: usize = 12;

pub(crate) fn decode(s: &NmeaSentence<'_>) -> Result<NavData, DecodeError> {
    let selection = match s.field(0) {
        "" => None,
        "M" => Some(SelectionMode::Manual),
        "A" => Some(SelectionMode::Automatic),
        _ => {
            return Err(DecodeError::InvalidField {
                sentence: SENTENCE,
                field: "selection",
                index: 0,
            })
        },
    };
    let fix = match s.field(1) {
        "" => None,
        "1" => Some(FixDimension::NoFix),
        "2" => Some(FixDimension::TwoD),
        "3" => Some(FixDimension::ThreeD),
        _ => {
            return Err(DecodeError::InvalidField {
                sentence: SENTENCE,
                field: "fix",
                index: 1,
            })
        },
    };

    let mut prns = alloc::vec::Vec::with_capacity(PRN_SLOTS);
    for slot in 0..PRN_SLOTS {
        if let Some(prn) = fields::opt_num::<u16>(s, SENTENCE, "prn", 2 + slot)? {
            prns.push(prn);
        }
    }

    Ok(NavData::ActiveSatellites(ActiveSatelliteSet {
        talker: s.talker,
        selection,
        fix,
        prns,
        pdop: fields::opt_num(s, SENTENCE, "pdop", 14)?,
        hdop: fields::opt_num(s, SENTENCE, "hdop", 15)?,
        vdop: fields::opt_num(s, SENTENCE, "vdop", 16)?,
    }))
}
