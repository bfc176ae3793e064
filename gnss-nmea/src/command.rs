//! Outbound command encoding. Configuration commands are plain NMEA-style
//! sentences written to the transport once at startup; they share the
//! checksum rules of the receive path but are otherwise independent of it.

use alloc::format;
use alloc::string::String;

use crate::sentence::xor_checksum;

/// Encodes a command body as a complete sentence: `$<body>*CS\r\n`.
///
/// `body` is the text between `$` and `*`, e.g. `PMTK314,0,1,0,1,0,0,0,0`;
/// it must not itself contain `$` or `*`.
pub fn encode_sentence(body: &str) -> String {
    debug_assert!(
        body.is_ascii() && !body.contains(['$', '*']),
        "command body must be ASCII without framing characters"
    );
    format!("${}*{:02X}\r\n", body, xor_checksum(body.as_bytes()))
}

/// Encodes `body` and writes it to the transport in one call.
#[cfg(feature = "std")]
pub fn write_sentence<W: std::io::Write>(writer: &mut W, body: &str) -> std::io::Result<()> {
    writer.write_all(encode_sentence(body).as_bytes())
}
