//! GSV: satellites in view.
//!
//! Field layout: total sentence count, this sentence's 1-based index,
//! satellites in view, then up to four records of (PRN, elevation, azimuth,
//! SNR). A full constellation view spans `total` sentences; the decoder is
//! stateless and emits only the per-sentence subset, [`GsvAccumulator`]
//! assembles the rest.

use alloc::vec::Vec;

use crate::error::DecodeError;
use crate::registry::NavData;
use crate::sentence::{NmeaSentence, Talker};
use crate::sentences::fields;
use crate::types::{SatelliteInfo, SatellitesInView};

const SENTENCE: &str = "GSV";
const RECORDS_PER_SENTENCE: usize = 4;
const RECORD_FIELDS: usize = 4;

pub(crate) fn decode(s: &NmeaSentence<'_>) -> Result<NavData, DecodeError> {
    let required = |field, index| DecodeError::InvalidField {
        sentence: SENTENCE,
        field,
        index,
    };
    let total_sentences = fields::opt_num::<u8>(s, SENTENCE, "total_sentences", 0)?
        .ok_or_else(|| required("total_sentences", 0))?;
    let sentence_index = fields::opt_num::<u8>(s, SENTENCE, "sentence_index", 1)?
        .ok_or_else(|| required("sentence_index", 1))?;
    let satellites_in_view = fields::opt_num::<u8>(s, SENTENCE, "satellites_in_view", 2)?
        .ok_or_else(|| required("satellites_in_view", 2))?;

    let mut satellites = Vec::with_capacity(RECORDS_PER_SENTENCE);
    for record in 0..RECORDS_PER_SENTENCE {
        let base = 3 + record * RECORD_FIELDS;
        // A record with no PRN is an unused trailing slot.
        let Some(prn) = fields::opt_num::<u16>(s, SENTENCE, "prn", base)? else {
            continue;
        };
        satellites.push(SatelliteInfo {
            prn,
            elevation_deg: fields::opt_num(s, SENTENCE, "elevation", base + 1)?,
            azimuth_deg: fields::opt_num(s, SENTENCE, "azimuth", base + 2)?,
            snr_db: fields::opt_num(s, SENTENCE, "snr", base + 3)?,
        });
    }

    Ok(NavData::SatellitesInView(SatellitesInView {
        talker: s.talker,
        total_sentences,
        sentence_index,
        satellites_in_view,
        satellites,
    }))
}

/// Assembles a full constellation view from the multi-sentence GSV group of
/// one talker.
///
/// The pipeline itself stays stateless per sentence; a subscriber that wants
/// the complete view feeds every [`SatellitesInView`] event into one of
/// these. Out-of-order sentences, a talker change, or a new group starting
/// over reset the accumulator.
pub struct GsvAccumulator {
    talker: Option<Talker>,
    expected_total: u8,
    next_index: u8,
    collected: Vec<SatelliteInfo>,
}

impl GsvAccumulator {
    pub fn new() -> Self {
        Self {
            talker: None,
            expected_total: 0,
            next_index: 0,
            collected: Vec::new(),
        }
    }

    /// Feeds one per-sentence report. Returns the full constellation once the
    /// last sentence of a consistent group has arrived.
    pub fn push(&mut self, report: &SatellitesInView) -> Option<Vec<SatelliteInfo>> {
        let continues_group = self.talker == Some(report.talker)
            && report.total_sentences == self.expected_total
            && report.sentence_index == self.next_index;

        if report.sentence_index == 1 {
            self.talker = Some(report.talker);
            self.expected_total = report.total_sentences;
            self.collected.clear();
        } else if !continues_group {
            self.reset();
            return None;
        }

        self.collected.extend_from_slice(&report.satellites);
        self.next_index = report.sentence_index + 1;

        if report.sentence_index == report.total_sentences {
            let full = core::mem::take(&mut self.collected);
            self.reset();
            Some(full)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.talker = None;
        self.expected_total = 0;
        self.next_index = 0;
        self.collected.clear();
    }
}

impl Default for GsvAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn report(raw: &[u8]) -> SatellitesInView {
        let s = NmeaSentence::parse(raw).unwrap();
        match decode(&s).unwrap() {
            NavData::SatellitesInView(r) => r,
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn decodes_full_sentence() {
        let r = report(b"$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74");
        assert_eq!(r.total_sentences, 3);
        assert_eq!(r.sentence_index, 1);
        assert_eq!(r.satellites_in_view, 11);
        assert_eq!(r.satellites.len(), 4);
        assert_eq!(
            r.satellites[0],
            SatelliteInfo {
                prn: 3,
                elevation_deg: Some(3),
                azimuth_deg: Some(111),
                snr_db: Some(0),
            }
        );
    }

    #[test]
    fn partial_last_sentence_and_missing_snr() {
        let r = report(b"$GPGSV,3,3,11,22,42,067,42,24,12,282,,27,08,138,16");
        assert_eq!(r.satellites.len(), 3);
        assert_eq!(r.satellites[1].snr_db, None);
    }

    #[test]
    fn missing_header_field_is_an_error() {
        let s = NmeaSentence::parse(b"$GPGSV,3,,11,22,42,067,42").unwrap();
        let err = decode(&s).unwrap_err();
        assert_eq!(err.field_index(), 1);
    }

    #[test]
    fn accumulator_assembles_group_in_order() {
        let mut acc = GsvAccumulator::new();
        assert!(acc
            .push(&report(
                b"$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45"
            ))
            .is_none());
        let full = acc
            .push(&report(
                b"$GPGSV,2,2,08,16,75,129,47,18,24,161,40,19,12,100,41,23,09,272,38"
            ))
            .expect("group complete");
        assert_eq!(full.len(), 8);
        assert_eq!(full[0].prn, 1);
        assert_eq!(full[7].prn, 23);
    }

    #[test]
    fn accumulator_resets_on_sequence_break() {
        let mut acc = GsvAccumulator::new();
        // Index 2 without a preceding index 1 is dropped.
        assert!(acc
            .push(&report(b"$GPGSV,2,2,08,16,75,129,47"))
            .is_none());
        // A fresh group still assembles.
        assert!(acc.push(&report(b"$GPGSV,2,1,05,01,40,083,46")).is_none());
        let full = acc
            .push(&report(b"$GPGSV,2,2,05,02,17,308,41"))
            .expect("group complete");
        assert_eq!(full.len(), 2);
    }

    #[test]
    fn single_sentence_group_completes_immediately() {
        let mut acc = GsvAccumulator::new();
        let full = acc
            .push(&report(b"$GPGSV,1,1,02,01,40,083,46,02,17,308,41"))
            .expect("group complete");
        assert_eq!(full.len(), 2);
    }
}
