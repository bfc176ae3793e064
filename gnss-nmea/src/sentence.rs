use alloc::vec::Vec;
use core::fmt;
use core::str;

use crate::error::SentenceError;

/// Two-letter code identifying the satellite system a sentence came from
/// (e.g. `GP` = GPS, `GN` = combined, `GL` = GLONASS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Talker(pub [u8; 2]);

impl Talker {
    pub const GPS: Talker = Talker(*b"GP");
    pub const GLONASS: Talker = Talker(*b"GL");
    pub const GALILEO: Talker = Talker(*b"GA");
    pub const BEIDOU: Talker = Talker(*b"GB");
    pub const COMBINED: Talker = Talker(*b"GN");

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for Talker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-letter sentence type code (the part of the address after the
/// talker, e.g. `GGA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceId(pub [u8; 3]);

impl SentenceId {
    pub const GGA: SentenceId = SentenceId(*b"GGA");
    pub const GLL: SentenceId = SentenceId(*b"GLL");
    pub const GSA: SentenceId = SentenceId(*b"GSA");
    pub const GSV: SentenceId = SentenceId(*b"GSV");
    pub const RMC: SentenceId = SentenceId(*b"RMC");
    pub const VTG: SentenceId = SentenceId(*b"VTG");

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated, tokenized sentence, borrowing from the frame it was parsed
/// from. Field positions are significant: an omitted optional field is kept
/// as an empty string, never skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmeaSentence<'a> {
    pub talker: Talker,
    pub id: SentenceId,
    /// The comma-separated fields after the address, in order.
    pub fields: Vec<&'a str>,
    /// Whether the frame carried a `*CC` checksum. Sentences without one are
    /// accepted as-is; some talkers omit it.
    pub checksummed: bool,
}

impl<'a> NmeaSentence<'a> {
    /// Validates and tokenizes one frame of the form
    /// `$<talker><type>,<field>,...*<checksum>` with optional trailing
    /// `\r\n`. The checksum is the XOR of all bytes strictly between `$` and
    /// `*`, compared case-insensitively.
    pub fn parse(frame: &'a [u8]) -> Result<NmeaSentence<'a>, SentenceError> {
        if !frame.is_ascii() {
            return Err(SentenceError::NotAscii);
        }
        let text = str::from_utf8(frame).map_err(|_| SentenceError::NotAscii)?;
        let text = text.trim_end_matches(['\r', '\n']);

        let start = text.find('$').ok_or(SentenceError::MissingStart)?;
        let body = &text[start + 1..];

        let (body, checksummed) = match body.rfind('*') {
            Some(star) => {
                let computed = xor_checksum(body[..star].as_bytes());
                let expected = parse_checksum(&body[star + 1..])?;
                if computed != expected {
                    return Err(SentenceError::ChecksumMismatch { expected, computed });
                }
                (&body[..star], true)
            },
            None => (body, false),
        };

        let mut parts = body.split(',');
        let address = parts.next().unwrap_or("");
        if address.len() < 5 {
            return Err(SentenceError::TruncatedAddress);
        }
        let addr = address.as_bytes();
        let talker = Talker([addr[0], addr[1]]);
        let id = SentenceId([addr[2], addr[3], addr[4]]);

        Ok(NmeaSentence {
            talker,
            id,
            fields: parts.collect(),
            checksummed,
        })
    }

    /// The field at `index`, or the empty string if the sentence is shorter.
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }
}

/// Running XOR of a byte span, as used by the NMEA checksum.
pub(crate) fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

fn parse_checksum(hex: &str) -> Result<u8, SentenceError> {
    if hex.len() != 2 {
        return Err(SentenceError::MalformedChecksum);
    }
    u8::from_str_radix(hex, 16).map_err(|_| SentenceError::MalformedChecksum)
}

#[cfg(test)]
mod test {
    use super::*;

    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    #[test]
    fn parses_valid_gga() {
        let s = NmeaSentence::parse(GGA).unwrap();
        assert_eq!(s.talker, Talker::GPS);
        assert_eq!(s.id, SentenceId::GGA);
        assert!(s.checksummed);
        assert_eq!(s.fields.len(), 14);
        assert_eq!(s.field(0), "123519");
        assert_eq!(s.field(1), "4807.038");
        assert_eq!(s.field(12), "");
    }

    #[test]
    fn accepts_trailing_crlf() {
        let mut frame = GGA.to_vec();
        frame.extend_from_slice(b"\r\n");
        let s = NmeaSentence::parse(&frame).unwrap();
        assert_eq!(s.id, SentenceId::GGA);
    }

    #[test]
    fn checksum_is_case_insensitive() {
        let s = NmeaSentence::parse(b"$GPGSV,1,1,00*79").unwrap();
        assert_eq!(s.id, SentenceId::GSV);
        let lower = NmeaSentence::parse(b"$GPTXT,01,01,02,ANTSTATUS=OK*3b").unwrap();
        assert_eq!(lower.id, SentenceId(*b"TXT"));
        assert!(lower.checksummed);
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let mut frame = GGA.to_vec();
        let last = frame.len() - 1;
        frame[last] = b'8';
        let err = NmeaSentence::parse(&frame).unwrap_err();
        assert!(matches!(err, SentenceError::ChecksumMismatch { .. }));
    }

    #[test]
    fn rejects_corrupted_body() {
        let mut frame = GGA.to_vec();
        frame[10] = b'9';
        let err = NmeaSentence::parse(&frame).unwrap_err();
        match err {
            SentenceError::ChecksumMismatch { expected, computed } => {
                assert_eq!(expected, 0x47);
                assert_ne!(expected, computed);
            },
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn missing_checksum_is_accepted() {
        let s = NmeaSentence::parse(b"$GPGLL,4916.45,N,12311.12,W,225444,A").unwrap();
        assert!(!s.checksummed);
        assert_eq!(s.field(0), "4916.45");
        assert_eq!(s.field(5), "A");
    }

    #[test]
    fn empty_fields_are_preserved_positionally() {
        let s = NmeaSentence::parse(b"$GPRMC,,V,,,,,,,,,,N").unwrap();
        assert_eq!(s.fields.len(), 12);
        assert_eq!(s.field(0), "");
        assert_eq!(s.field(1), "V");
        assert_eq!(s.field(11), "N");
    }

    #[test]
    fn missing_start_rejected() {
        assert_eq!(
            NmeaSentence::parse(b"GPGGA,123519*00"),
            Err(SentenceError::MissingStart)
        );
    }

    #[test]
    fn short_address_rejected() {
        assert_eq!(
            NmeaSentence::parse(b"$GP,1,2"),
            Err(SentenceError::TruncatedAddress)
        );
    }

    #[test]
    fn non_ascii_rejected() {
        assert_eq!(
            NmeaSentence::parse(b"$GPGGA,12\xC3\xA9*00"),
            Err(SentenceError::NotAscii)
        );
    }

    #[test]
    fn out_of_range_field_reads_empty() {
        let s = NmeaSentence::parse(b"$GPVTG,054.7,T*2E").unwrap();
        assert_eq!(s.field(10), "");
    }
}
