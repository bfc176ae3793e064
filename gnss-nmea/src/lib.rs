//! # gnss-nmea
//!
//! A streaming protocol layer for GNSS receivers speaking NMEA 0183: frame
//! extraction from fragmented byte streams and decoding of validated
//! sentences into typed navigation results.
//!
//! Receivers deliver bytes over heterogeneous transports: character-stream
//! serial, polled register-based I2C, or polled SPI that returns `0xFF`
//! filler when idle. This crate turns whichever byte stream you have into
//! typed position/satellite/course events.
//!
//! Framing
//! =======
//!
//! Framing happens by instantiating a [`FrameExtractor`] and adding data into
//! it using its `consume()` method. The extractor keeps an internal ring
//! buffer, and when `consume()` is called an iterator is returned that drains
//! every complete frame currently buffered. Data may arrive in arbitrary
//! chunks; byte-at-a-time and whole-packet delivery yield identical frames.
//! ```
//! use gnss_nmea::{FrameExtractor, FramingConfig};
//!
//! let mut extractor = FrameExtractor::new(FramingConfig::nmea());
//! for frame in extractor.consume(b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n") {
//!     let frame = frame.expect("no overflow");
//!     assert!(frame.starts_with(b"$GPVTG"));
//! }
//! ```
//!
//! Decoding
//! ========
//!
//! A full pipeline couples the extractor with a [`DecoderRegistry`] and
//! delivers [`NavEvent`]s to a handler, in the exact order the frames were
//! extracted:
//! ```
//! use gnss_nmea::{DecoderRegistry, FramingConfig, NavEvent, NmeaPipeline};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(DecoderRegistry::with_standard_decoders());
//! let mut pipeline = NmeaPipeline::new(FramingConfig::nmea(), registry);
//!
//! let data = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
//! pipeline.process(&data[..], &mut |event: NavEvent| {
//!     if let NavEvent::Position(fix) = event {
//!         assert!(fix.latitude.unwrap() > 48.0);
//!     }
//! });
//! ```
//!
//! Sentences with bad checksums or malformed fields are surfaced through
//! [`NavEvent::Diagnostic`] and never abort the stream; unknown sentence
//! types are ignored. Handlers run synchronously on the thread feeding the
//! pipeline and must not block indefinitely.
//!
//! no_std support
//! ==============
//!
//! Framing, validation, and decoding require only `core + alloc`. The
//! transport pumps ([`SerialPump`], [`I2cPump`], [`SpiPump`]) use threads and
//! `std::io` and are gated behind the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    command::encode_sentence,
    error::{DecodeError, FramingError, SentenceError},
    framing::{FrameExtractor, FrameIter, FramingConfig, FrameMode, RingBuffer},
    pipeline::{Diagnostic, EventHandler, NavEvent, NmeaPipeline},
    registry::{DecoderFn, DecoderRegistry, NavData},
    sentence::{NmeaSentence, SentenceId, Talker},
    sentences::gsv::GsvAccumulator,
    types::{
        ActiveSatelliteSet, CourseOverGround, FixDimension, FixQuality, PositionFix,
        SatelliteInfo, SatellitesInView, SelectionMode,
    },
};

#[cfg(feature = "std")]
pub use crate::command::write_sentence;
#[cfg(feature = "std")]
pub use crate::pump::{BlockTransport, CancelToken, I2cPump, RegisterTransport, SerialPump, SpiPump};

mod command;
mod error;
mod framing;
mod pipeline;
mod registry;
mod sentence;
mod sentences;
mod types;

#[cfg(feature = "std")]
mod pump;
