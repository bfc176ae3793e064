use alloc::vec::Vec;

use crate::error::FramingError;

mod ring;

pub use ring::RingBuffer;

/// Default ring buffer capacity. NMEA sentences are at most 82 bytes, so
/// this holds a couple dozen sentences of backlog.
const DEFAULT_CAPACITY: usize = 2048;

/// How message boundaries are recognized in the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// Each frame ends with the delimiter (NMEA: `\r\n`).
    SuffixDelimited,
    /// Each frame starts with the delimiter and carries exactly
    /// `message_len` payload bytes after it.
    PrefixDelimited { message_len: usize },
}

/// Framing parameters for one byte stream. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramingConfig {
    pub mode: FrameMode,
    /// The delimiter byte sequence (suffix or prefix, per `mode`).
    pub delimiter: Vec<u8>,
    /// Whether emitted frames keep the delimiter bytes.
    pub preserve_delimiter: bool,
    /// Bytes equal to this value are discarded before buffering. SPI
    /// transports return `0xFF` filler when no data is ready.
    pub filler_byte: Option<u8>,
    /// Capacity of the internal ring buffer.
    pub buffer_capacity: usize,
}

impl FramingConfig {
    /// Standard NMEA 0183 framing: `\r\n`-terminated sentences, delimiter
    /// stripped from emitted frames.
    pub fn nmea() -> Self {
        Self {
            mode: FrameMode::SuffixDelimited,
            delimiter: b"\r\n".to_vec(),
            preserve_delimiter: false,
            filler_byte: None,
            buffer_capacity: DEFAULT_CAPACITY,
        }
    }

    /// NMEA framing over SPI, where idle reads yield `0xFF` filler bytes.
    pub fn nmea_spi() -> Self {
        Self {
            filler_byte: Some(0xFF),
            ..Self::nmea()
        }
    }
}

/// Turns a possibly fragmented byte stream into discrete message frames.
///
/// Feed data with [`consume`]; the returned iterator drains every complete
/// frame currently buffered. Partial frames stay buffered across calls, so a
/// delimiter split over two reads is still detected once the trailing bytes
/// arrive.
///
/// [`consume`]: FrameExtractor::consume
pub struct FrameExtractor {
    config: FramingConfig,
    buf: RingBuffer,
    /// Bytes evicted by the ring buffer since the last overflow report.
    dropped: usize,
}

impl FrameExtractor {
    pub fn new(config: FramingConfig) -> Self {
        let buf = RingBuffer::with_capacity(config.buffer_capacity);
        Self {
            config,
            buf,
            dropped: 0,
        }
    }

    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Number of bytes buffered but not yet part of an emitted frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Adds data into the extractor and returns an iterator over the frames
    /// that are now complete (zero, one, or many). Safe to call with
    /// arbitrarily small or large chunks.
    pub fn consume(&mut self, data: &[u8]) -> FrameIter<'_> {
        match self.config.filler_byte {
            Some(filler) => {
                for b in data {
                    if *b != filler {
                        self.dropped += self.buf.extend(&[*b]);
                    }
                }
            },
            None => self.dropped += self.buf.extend(data),
        }
        FrameIter { extractor: self }
    }

    fn next_suffix_frame(&mut self) -> Option<Vec<u8>> {
        let delim_len = self.config.delimiter.len();
        let at = self.buf.find(&self.config.delimiter)?;
        let keep = if self.config.preserve_delimiter {
            at + delim_len
        } else {
            at
        };
        let mut frame = Vec::with_capacity(keep);
        for _ in 0..keep {
            match self.buf.pop() {
                Some(b) => frame.push(b),
                None => break,
            }
        }
        self.buf.skip(at + delim_len - keep);
        Some(frame)
    }

    fn next_prefix_frame(&mut self) -> Option<Vec<u8>> {
        let FrameMode::PrefixDelimited { message_len } = self.config.mode else {
            return None;
        };
        let delim_len = self.config.delimiter.len();
        let at = self.buf.find(&self.config.delimiter)?;
        // Garbage before the prefix carries no frame; discard it eagerly so
        // it cannot push real data out of the buffer.
        self.buf.skip(at);
        if self.buf.len() < delim_len + message_len {
            // Stall until the full record is buffered.
            return None;
        }
        if !self.config.preserve_delimiter {
            self.buf.skip(delim_len);
        }
        let keep = if self.config.preserve_delimiter {
            delim_len + message_len
        } else {
            message_len
        };
        let mut frame = Vec::with_capacity(keep);
        for _ in 0..keep {
            match self.buf.pop() {
                Some(b) => frame.push(b),
                None => break,
            }
        }
        Some(frame)
    }
}

/// Iterator over the frames completed by one [`FrameExtractor::consume`]
/// call. Yields an overflow diagnostic first if the ring buffer evicted data
/// since the last report.
pub struct FrameIter<'a> {
    extractor: &'a mut FrameExtractor,
}

impl Iterator for FrameIter<'_> {
    type Item = Result<Vec<u8>, FramingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.extractor.dropped > 0 {
            let dropped = core::mem::take(&mut self.extractor.dropped);
            return Some(Err(FramingError::Overflow { dropped }));
        }
        let frame = match self.extractor.config.mode {
            FrameMode::SuffixDelimited => self.extractor.next_suffix_frame(),
            FrameMode::PrefixDelimited { .. } => self.extractor.next_prefix_frame(),
        };
        frame.map(Ok)
    }
}
