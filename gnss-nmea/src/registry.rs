use alloc::collections::BTreeMap;

use crate::error::DecodeError;
use crate::sentence::{NmeaSentence, SentenceId};
use crate::sentences;
use crate::types::{ActiveSatelliteSet, CourseOverGround, PositionFix, SatellitesInView};

/// A typed result produced by one decoder from one validated sentence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavData {
    Position(PositionFix),
    ActiveSatellites(ActiveSatelliteSet),
    Course(CourseOverGround),
    SatellitesInView(SatellitesInView),
}

/// A decoder is a pure function from a validated sentence to a typed result.
/// Plain function pointers keep the registry `Send + Sync`, so one registry
/// can be shared read-only across any number of device pipelines.
pub type DecoderFn = fn(&NmeaSentence<'_>) -> Result<NavData, DecodeError>;

/// Maps sentence type codes to decoders.
///
/// Populated once at startup and read-only during operation; there is no
/// hidden static registration. Sentence types without an entry are silently
/// ignored by [`dispatch`], since many talkers emit types nobody subscribed
/// to.
///
/// [`dispatch`]: DecoderRegistry::dispatch
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: BTreeMap<SentenceId, DecoderFn>,
}

impl DecoderRegistry {
    /// An empty registry. Every decoder must be registered explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the six standard decoders: GGA, GLL, GSA, RMC, VTG,
    /// and GSV.
    pub fn with_standard_decoders() -> Self {
        let mut registry = Self::new();
        registry.register(SentenceId::GGA, sentences::gga::decode);
        registry.register(SentenceId::GLL, sentences::gll::decode);
        registry.register(SentenceId::GSA, sentences::gsa::decode);
        registry.register(SentenceId::GSV, sentences::gsv::decode);
        registry.register(SentenceId::RMC, sentences::rmc::decode);
        registry.register(SentenceId::VTG, sentences::vtg::decode);
        registry
    }

    /// Registers `decoder` for `id`, replacing any previous entry.
    pub fn register(&mut self, id: SentenceId, decoder: DecoderFn) {
        self.decoders.insert(id, decoder);
    }

    pub fn is_registered(&self, id: SentenceId) -> bool {
        self.decoders.contains_key(&id)
    }

    /// Looks up the sentence's type and invokes its decoder. Returns `None`
    /// for unregistered types.
    pub fn dispatch(&self, sentence: &NmeaSentence<'_>) -> Option<Result<NavData, DecodeError>> {
        self.decoders.get(&sentence.id).map(|decode| decode(sentence))
    }
}
