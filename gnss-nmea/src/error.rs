use core::fmt;

/// Error that is possible during frame extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingError {
    /// The ring buffer filled up without a delimiter being found and the
    /// oldest bytes were evicted. Non-fatal; extraction continues with
    /// whatever data remains buffered.
    Overflow { dropped: usize },
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramingError::Overflow { dropped } => {
                write!(f, "no delimiter found, {} oldest bytes evicted", dropped)
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FramingError {}

/// Error that is possible during sentence validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceError {
    /// The XOR of the bytes between `$` and `*` does not match the two hex
    /// digits following `*`.
    ChecksumMismatch { expected: u8, computed: u8 },
    /// The frame contains bytes outside the ASCII range.
    NotAscii,
    /// The frame has no `$` start character.
    MissingStart,
    /// The address field is shorter than the two-letter talker plus the
    /// three-letter sentence type.
    TruncatedAddress,
    /// The characters after `*` are not two hex digits.
    MalformedChecksum,
}

impl fmt::Display for SentenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceError::ChecksumMismatch { expected, computed } => write!(
                f,
                "not valid sentence checksum, expect {:02X}, got {:02X}",
                expected, computed
            ),
            SentenceError::NotAscii => f.write_str("sentence contains non-ASCII bytes"),
            SentenceError::MissingStart => f.write_str("sentence has no '$' start character"),
            SentenceError::TruncatedAddress => f.write_str("sentence address field is truncated"),
            SentenceError::MalformedChecksum => {
                f.write_str("checksum field is not two hex digits")
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SentenceError {}

/// Error that is possible during sentence decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A field did not parse as the type its position requires. Empty
    /// (omitted) optional fields are not errors; this fires only on malformed
    /// content.
    InvalidField {
        sentence: &'static str,
        field: &'static str,
        index: usize,
    },
}

impl DecodeError {
    /// Zero-based position of the offending field within the sentence's
    /// field list.
    pub fn field_index(&self) -> usize {
        match self {
            DecodeError::InvalidField { index, .. } => *index,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidField {
                sentence,
                field,
                index,
            } => write!(
                f,
                "invalid field {} (index {}) of sentence {}",
                field, index, sentence
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
