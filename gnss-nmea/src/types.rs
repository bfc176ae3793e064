use alloc::vec::Vec;
use chrono::{NaiveDate, NaiveTime};
use core::fmt;

use crate::sentence::{SentenceId, Talker};

/// GGA fix quality indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixQuality {
    NoFix,
    Autonomous,
    Differential,
    Pps,
    RtkFixed,
    RtkFloat,
    Estimated,
    Manual,
    Simulation,
    Other(u8),
}

impl From<u8> for FixQuality {
    fn from(value: u8) -> Self {
        match value {
            0 => FixQuality::NoFix,
            1 => FixQuality::Autonomous,
            2 => FixQuality::Differential,
            3 => FixQuality::Pps,
            4 => FixQuality::RtkFixed,
            5 => FixQuality::RtkFloat,
            6 => FixQuality::Estimated,
            7 => FixQuality::Manual,
            8 => FixQuality::Simulation,
            other => FixQuality::Other(other),
        }
    }
}

impl FixQuality {
    /// Whether this quality indicates a usable position.
    pub fn has_fix(&self) -> bool {
        !matches!(self, FixQuality::NoFix)
    }
}

/// GSA satellite selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    Manual,
    Automatic,
}

/// GSA fix dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixDimension {
    NoFix,
    TwoD,
    ThreeD,
}

/// A decoded position fix, produced from GGA, GLL, or RMC sentences.
///
/// Fields a given sentence type does not carry are `None`; an empty optional
/// field in the sentence is also `None`, never zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    pub talker: Talker,
    /// Which sentence type produced this fix.
    pub source: SentenceId,
    pub time: Option<NaiveTime>,
    /// Date of the fix; only RMC carries one.
    pub date: Option<NaiveDate>,
    /// Latitude in decimal degrees, negative south.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, negative west.
    pub longitude: Option<f64>,
    pub quality: Option<FixQuality>,
    pub satellites_in_use: Option<u8>,
    pub hdop: Option<f32>,
    /// Antenna altitude above mean sea level, meters.
    pub altitude_msl: Option<f64>,
    /// Geoid separation, meters.
    pub geoid_separation: Option<f64>,
    /// GLL/RMC status field: `A` (valid) or `V` (void).
    pub valid: Option<bool>,
    /// Speed over ground in knots (RMC).
    pub speed_knots: Option<f32>,
    /// Course over ground in degrees true (RMC).
    pub course_deg: Option<f32>,
    /// Magnetic variation in degrees, negative west (RMC).
    pub magnetic_variation: Option<f32>,
}

impl PositionFix {
    pub(crate) fn empty(talker: Talker, source: SentenceId) -> Self {
        Self {
            talker,
            source,
            time: None,
            date: None,
            latitude: None,
            longitude: None,
            quality: None,
            satellites_in_use: None,
            hdop: None,
            altitude_msl: None,
            geoid_separation: None,
            valid: None,
            speed_knots: None,
            course_deg: None,
            magnetic_variation: None,
        }
    }
}

impl fmt::Display for PositionFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => write!(f, "{}: {:.5} {:.5}", self.talker, lat, lon),
            _ => write!(f, "{}: no position", self.talker),
        }
    }
}

/// The set of satellites used for the current solution, from GSA.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSatelliteSet {
    pub talker: Talker,
    pub selection: Option<SelectionMode>,
    pub fix: Option<FixDimension>,
    /// PRNs of the satellites used in the solution, up to 12. Empty slots in
    /// the sentence are simply not present here.
    pub prns: Vec<u16>,
    pub pdop: Option<f32>,
    pub hdop: Option<f32>,
    pub vdop: Option<f32>,
}

/// Course and speed over ground, from VTG.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseOverGround {
    pub talker: Talker,
    /// Track angle in degrees true.
    pub course_true: Option<f32>,
    /// Track angle in degrees magnetic.
    pub course_magnetic: Option<f32>,
    pub speed_knots: Option<f32>,
    pub speed_kmh: Option<f32>,
}

/// One satellite record within a GSV sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatelliteInfo {
    pub prn: u16,
    /// Elevation in degrees, -90..90.
    pub elevation_deg: Option<i8>,
    /// Azimuth in degrees from true north, 0..359.
    pub azimuth_deg: Option<u16>,
    /// Carrier-to-noise ratio in dB-Hz.
    pub snr_db: Option<u8>,
}

/// The per-sentence subset of the satellites-in-view report, from GSV.
///
/// GSV data arrives split across `total_sentences` sentences; accumulate
/// records across sentences sharing one talker (see
/// [`GsvAccumulator`](crate::GsvAccumulator)) to obtain the full
/// constellation view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatellitesInView {
    pub talker: Talker,
    pub total_sentences: u8,
    /// 1-based index of this sentence within the group.
    pub sentence_index: u8,
    /// Total satellites in view, as reported by the receiver.
    pub satellites_in_view: u8,
    /// Up to four records carried by this sentence.
    pub satellites: Vec<SatelliteInfo>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fix_quality_from_u8() {
        assert_eq!(FixQuality::from(0), FixQuality::NoFix);
        assert_eq!(FixQuality::from(1), FixQuality::Autonomous);
        assert_eq!(FixQuality::from(8), FixQuality::Simulation);
        assert_eq!(FixQuality::from(42), FixQuality::Other(42));
        assert!(!FixQuality::NoFix.has_fix());
        assert!(FixQuality::RtkFixed.has_fix());
    }

    #[test]
    fn position_fix_display() {
        let mut fix = PositionFix::empty(Talker::GPS, SentenceId::GGA);
        assert_eq!(alloc::format!("{}", fix), "GP: no position");
        fix.latitude = Some(48.1173);
        fix.longitude = Some(11.51667);
        assert_eq!(alloc::format!("{}", fix), "GP: 48.11730 11.51667");
    }
}
