use alloc::string::String;
use alloc::sync::Arc;
use log::{debug, trace, warn};

use crate::error::{DecodeError, FramingError, SentenceError};
use crate::framing::{FrameExtractor, FramingConfig};
use crate::registry::{DecoderRegistry, NavData};
use crate::sentence::NmeaSentence;
use crate::types::{ActiveSatelliteSet, CourseOverGround, PositionFix, SatellitesInView};

/// A recovered, non-fatal protocol failure, delivered alongside the data
/// events so subscribers can observe stream health. The raw sentence text
/// rides along where one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The framing buffer evicted `dropped` bytes before a delimiter was
    /// found. Data loss by design; the stream resynchronizes on the next
    /// delimiter.
    FramingOverflow { dropped: usize },
    /// A frame failed checksum or structural validation and was dropped.
    RejectedSentence { raw: String, reason: SentenceError },
    /// A validated sentence had a registered decoder, but a field did not
    /// parse. The sentence was dropped.
    DecodeFailure { raw: String, reason: DecodeError },
}

/// One event out of the pipeline: a typed navigation result or a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    Position(PositionFix),
    ActiveSatellites(ActiveSatelliteSet),
    Course(CourseOverGround),
    SatellitesInView(SatellitesInView),
    Diagnostic(Diagnostic),
}

impl From<NavData> for NavEvent {
    fn from(data: NavData) -> Self {
        match data {
            NavData::Position(fix) => NavEvent::Position(fix),
            NavData::ActiveSatellites(set) => NavEvent::ActiveSatellites(set),
            NavData::Course(cog) => NavEvent::Course(cog),
            NavData::SatellitesInView(siv) => NavEvent::SatellitesInView(siv),
        }
    }
}

/// Receives pipeline events, synchronously, in the exact order their frames
/// were extracted. Handlers run on the thread feeding the pipeline; a slow
/// handler delays subsequent frame processing, so handlers must not block
/// indefinitely.
pub trait EventHandler {
    fn handle(&mut self, event: NavEvent);
}

/// Implement handler for simple callbacks / closures
impl<F: FnMut(NavEvent)> EventHandler for F {
    fn handle(&mut self, event: NavEvent) {
        self(event)
    }
}

/// The full receive path for one device: frame extraction, sentence
/// validation, and decoder dispatch.
///
/// Owned by exactly one transport pump (or whatever single thread feeds it);
/// the registry behind the `Arc` is read-only and may be shared across any
/// number of pipelines. No failure in validation or decoding propagates back
/// into byte ingestion; every frame is processed independently and the
/// stream continues.
pub struct NmeaPipeline {
    extractor: FrameExtractor,
    registry: Arc<DecoderRegistry>,
}

impl NmeaPipeline {
    pub fn new(config: FramingConfig, registry: Arc<DecoderRegistry>) -> Self {
        Self {
            extractor: FrameExtractor::new(config),
            registry,
        }
    }

    /// Bytes buffered waiting for a frame boundary.
    pub fn pending_bytes(&self) -> usize {
        self.extractor.pending()
    }

    pub fn filler_byte(&self) -> Option<u8> {
        self.extractor.config().filler_byte
    }

    /// Feeds raw transport bytes through the pipeline, delivering every
    /// resulting event to `handler`. Any chunking is legal, down to one byte
    /// per call.
    pub fn process(&mut self, data: &[u8], handler: &mut dyn EventHandler) {
        let registry = &self.registry;
        for item in self.extractor.consume(data) {
            match item {
                Err(FramingError::Overflow { dropped }) => {
                    warn!("framing overflow, {} bytes evicted", dropped);
                    handler.handle(NavEvent::Diagnostic(Diagnostic::FramingOverflow {
                        dropped,
                    }));
                },
                Ok(frame) => Self::process_frame(registry, &frame, handler),
            }
        }
    }

    fn process_frame(registry: &DecoderRegistry, frame: &[u8], handler: &mut dyn EventHandler) {
        let sentence = match NmeaSentence::parse(frame) {
            Ok(sentence) => sentence,
            Err(reason) => {
                debug!("dropping invalid sentence: {}", reason);
                handler.handle(NavEvent::Diagnostic(Diagnostic::RejectedSentence {
                    raw: lossy(frame),
                    reason,
                }));
                return;
            },
        };
        match registry.dispatch(&sentence) {
            None => {
                // Expected and benign; many talkers emit types we do not
                // decode.
                trace!("ignoring unsupported sentence type {}", sentence.id);
            },
            Some(Ok(data)) => handler.handle(data.into()),
            Some(Err(reason)) => {
                debug!("decode failure: {}", reason);
                handler.handle(NavEvent::Diagnostic(Diagnostic::DecodeFailure {
                    raw: lossy(frame),
                    reason,
                }));
            },
        }
    }
}

fn lossy(frame: &[u8]) -> String {
    String::from_utf8_lossy(frame).into_owned()
}
