use gnss_nmea::{FrameExtractor, FrameMode, FramingConfig, FramingError, RingBuffer};
use proptest::prelude::*;

fn frames_of(extractor: &mut FrameExtractor, data: &[u8]) -> Vec<Vec<u8>> {
    extractor.consume(data).filter_map(|f| f.ok()).collect()
}

#[test]
fn test_empty_input_yields_no_frames() {
    let mut extractor = FrameExtractor::new(FramingConfig::nmea());
    assert!(frames_of(&mut extractor, b"").is_empty());
    assert_eq!(extractor.pending(), 0);
}

#[test]
fn test_three_sentences_one_call() {
    let mut extractor = FrameExtractor::new(FramingConfig::nmea());
    let frames = frames_of(
        &mut extractor,
        b"$GPGGA,1*00\r\n$GPGSA,2*00\r\n$GPRMC,3*00\r\n",
    );
    assert_eq!(
        frames,
        vec![
            b"$GPGGA,1*00".to_vec(),
            b"$GPGSA,2*00".to_vec(),
            b"$GPRMC,3*00".to_vec(),
        ]
    );
}

#[test]
fn test_delimiter_split_across_calls() {
    let mut extractor = FrameExtractor::new(FramingConfig::nmea());
    assert!(frames_of(&mut extractor, b"$GPGLL,A").is_empty());
    assert!(frames_of(&mut extractor, b"\r").is_empty());
    let frames = frames_of(&mut extractor, b"\n");
    assert_eq!(frames, vec![b"$GPGLL,A".to_vec()]);
}

#[test]
fn test_byte_at_a_time_matches_whole_packet() {
    let data = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n";

    let mut whole = FrameExtractor::new(FramingConfig::nmea());
    let expected = frames_of(&mut whole, data);
    assert_eq!(expected.len(), 2);

    let mut trickle = FrameExtractor::new(FramingConfig::nmea());
    let mut got = Vec::new();
    for b in data.iter() {
        got.extend(frames_of(&mut trickle, &[*b]));
    }
    assert_eq!(got, expected);
}

#[test]
fn test_prefix_mode_stalls_without_full_payload() {
    let mut extractor = FrameExtractor::new(FramingConfig {
        mode: FrameMode::PrefixDelimited { message_len: 8 },
        delimiter: vec![0xB5, 0x62],
        preserve_delimiter: true,
        filler_byte: None,
        buffer_capacity: 128,
    });
    // Prefix plus a short payload: no frame, everything stays buffered.
    assert!(frames_of(&mut extractor, &[0xB5, 0x62, 1, 2, 3]).is_empty());
    assert_eq!(extractor.pending(), 5);
    assert!(frames_of(&mut extractor, &[4, 5, 6, 7]).is_empty());
    let frames = frames_of(&mut extractor, &[8]);
    assert_eq!(frames, vec![vec![0xB5, 0x62, 1, 2, 3, 4, 5, 6, 7, 8]]);
    assert_eq!(extractor.pending(), 0);
}

#[test]
fn test_prefix_mode_discards_garbage_before_prefix() {
    let mut extractor = FrameExtractor::new(FramingConfig {
        mode: FrameMode::PrefixDelimited { message_len: 2 },
        delimiter: vec![0xB5, 0x62],
        preserve_delimiter: false,
        filler_byte: None,
        buffer_capacity: 128,
    });
    let frames = frames_of(&mut extractor, &[9, 9, 9, 0xB5, 0x62, 42, 43]);
    assert_eq!(frames, vec![vec![42, 43]]);
}

#[test]
fn test_overflow_surfaces_diagnostic_and_recovers() {
    let mut extractor = FrameExtractor::new(FramingConfig {
        buffer_capacity: 16,
        ..FramingConfig::nmea()
    });
    let results: Vec<_> = extractor.consume(&[b'x'; 24]).collect();
    assert_eq!(results, vec![Err(FramingError::Overflow { dropped: 8 })]);

    // The stream recovers on the next complete sentence.
    let results: Vec<_> = extractor.consume(b"\r\n$GPGLL,ok\r\n").collect();
    assert!(results
        .iter()
        .any(|r| matches!(r, Ok(frame) if frame == b"$GPGLL,ok")));
}

#[test]
fn test_ring_buffer_wraparound_search() {
    let mut buf = RingBuffer::with_capacity(16);
    buf.extend(b"0123456789ABCDEF");
    buf.skip(12);
    buf.extend(b"$GPGLL\r\n");
    // The token now spans the physical wrap boundary.
    assert_eq!(buf.find(b"$GPGLL"), Some(4));
    assert_eq!(buf.find(b"\r\n"), Some(10));
}

proptest! {
    /// Any sequence of delimiter-free frames joined with the suffix
    /// delimiter round-trips through the extractor, whatever the chunking.
    #[test]
    fn round_trip_arbitrary_chunking(
        frames in proptest::collection::vec(
            proptest::collection::vec(32u8..127u8, 0..40),
            1..8,
        ),
        chunk_size in 1usize..24,
    ) {
        let mut stream = Vec::new();
        for frame in &frames {
            stream.extend_from_slice(frame);
            stream.extend_from_slice(b"\r\n");
        }

        let mut extractor = FrameExtractor::new(FramingConfig::nmea());
        let mut got = Vec::new();
        for chunk in stream.chunks(chunk_size) {
            for item in extractor.consume(chunk) {
                got.push(item.expect("no overflow in this test"));
            }
        }
        prop_assert_eq!(got, frames);
        prop_assert_eq!(extractor.pending(), 0);
    }
}
