//! Sentence-specific decoders. Each module decodes one fixed field layout
//! into a typed result; all of them are pure functions registered in a
//! [`DecoderRegistry`](crate::DecoderRegistry).

pub(crate) mod fields;

pub(crate) mod gga;
pub(crate) mod gll;
pub(crate) mod gsa;
pub mod gsv;
pub(crate) mod rmc;
pub(crate) mod vtg;
