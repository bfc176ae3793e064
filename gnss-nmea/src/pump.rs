//! Transport pumps: per-device loops that adapt a byte-source transport into
//! `NmeaPipeline::process` calls.
//!
//! Each pump owns its pipeline and runs on one dedicated thread; everything
//! downstream (framing, validation, dispatch, handler callbacks) executes
//! synchronously on that thread in strict arrival order. Only a transport
//! I/O error terminates a pump loop; every protocol-level condition is
//! recovered inside the pipeline and the loop continues.

use std::io;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::pipeline::{EventHandler, NmeaPipeline};

/// Cooperative cancellation flag shared between a pump thread and its owner.
///
/// Checked once per loop iteration; an in-flight transport read always
/// completes, and no partial-frame state is lost because the pipeline
/// retains unconsumed bytes across iterations.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A register-model transport (I2C): the device exposes a "bytes available"
/// count and a data register to read them from.
pub trait RegisterTransport {
    /// Reads the 2-byte big-endian "bytes available" register.
    fn bytes_available(&mut self) -> io::Result<u16>;

    /// Reads up to `buf.len()` bytes from the data register, returning how
    /// many were read.
    fn read_data(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// A block-transfer transport (SPI): every read clocks out a full block,
/// padded with filler bytes when the device has nothing to say.
pub trait BlockTransport {
    fn read_block(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

/// Pump for character-stream transports. `serialport`'s `SerialPort`
/// implements `io::Read`, as does anything else that can be read in chunks.
///
/// Read timeouts (`TimedOut`/`WouldBlock`) mean "no data yet" and keep the
/// loop alive; `Ok(0)` means the stream closed and ends the loop cleanly.
pub struct SerialPump<R> {
    reader: R,
    pipeline: NmeaPipeline,
    cancel: CancelToken,
}

impl<R: Read> SerialPump<R> {
    pub fn new(reader: R, pipeline: NmeaPipeline, cancel: CancelToken) -> Self {
        Self {
            reader,
            pipeline,
            cancel,
        }
    }

    /// Runs until cancelled, the stream closes, or a transport error occurs.
    pub fn run(&mut self, handler: &mut dyn EventHandler) -> io::Result<()> {
        let mut chunk = [0u8; 512];
        while !self.cancel.is_cancelled() {
            let nbytes = match self.reader.read(&mut chunk) {
                Ok(n) => n,
                Err(e)
                    if e.kind() == io::ErrorKind::TimedOut
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    continue;
                },
                Err(e) => return Err(e),
            };
            if nbytes == 0 {
                debug!("serial stream closed");
                return Ok(());
            }
            self.pipeline.process(&chunk[..nbytes], handler);
        }
        Ok(())
    }
}

/// Pump for register-model transports: poll the available count, read that
/// many bytes, sleep when idle.
pub struct I2cPump<T> {
    bus: T,
    pipeline: NmeaPipeline,
    cancel: CancelToken,
    poll_interval: Duration,
}

impl<T: RegisterTransport> I2cPump<T> {
    pub fn new(
        bus: T,
        pipeline: NmeaPipeline,
        cancel: CancelToken,
        poll_interval: Duration,
    ) -> Self {
        Self {
            bus,
            pipeline,
            cancel,
            poll_interval,
        }
    }

    pub fn run(&mut self, handler: &mut dyn EventHandler) -> io::Result<()> {
        let mut chunk = [0u8; 512];
        while !self.cancel.is_cancelled() {
            let available = self.bus.bytes_available()? as usize;
            if available == 0 {
                thread::sleep(self.poll_interval);
                continue;
            }
            let mut remaining = available;
            while remaining > 0 && !self.cancel.is_cancelled() {
                let want = remaining.min(chunk.len());
                let nbytes = self.bus.read_data(&mut chunk[..want])?;
                if nbytes == 0 {
                    break;
                }
                self.pipeline.process(&chunk[..nbytes], handler);
                remaining -= nbytes;
            }
        }
        Ok(())
    }
}

/// Pump for block-transfer transports. The pipeline's filler filter removes
/// the idle bytes; the pump only decides when to sleep.
pub struct SpiPump<T> {
    bus: T,
    pipeline: NmeaPipeline,
    cancel: CancelToken,
    idle_wait: Duration,
    block_len: usize,
}

impl<T: BlockTransport> SpiPump<T> {
    pub fn new(
        bus: T,
        pipeline: NmeaPipeline,
        cancel: CancelToken,
        idle_wait: Duration,
        block_len: usize,
    ) -> Self {
        Self {
            bus,
            pipeline,
            cancel,
            idle_wait,
            block_len,
        }
    }

    pub fn run(&mut self, handler: &mut dyn EventHandler) -> io::Result<()> {
        let mut block = vec![0u8; self.block_len];
        let filler = self.pipeline.filler_byte();
        while !self.cancel.is_cancelled() {
            self.bus.read_block(&mut block)?;
            self.pipeline.process(&block, handler);
            if !has_filler_boundary(&block, filler) {
                thread::sleep(self.idle_wait);
            }
        }
        Ok(())
    }
}

/// Whether the block contains a transition from filler to real data,
/// evidence that the device started talking mid-block and more is likely
/// queued. Without a configured filler byte there is nothing to look for and
/// the pump always paces itself.
fn has_filler_boundary(block: &[u8], filler: Option<u8>) -> bool {
    let Some(filler) = filler else {
        return false;
    };
    block
        .windows(2)
        .any(|pair| pair[0] == filler && pair[1] != filler)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::framing::FramingConfig;
    use crate::pipeline::NavEvent;
    use crate::registry::DecoderRegistry;
    use std::collections::VecDeque;

    const GGA: &[u8] =
        b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    fn pipeline(config: FramingConfig) -> NmeaPipeline {
        NmeaPipeline::new(config, Arc::new(DecoderRegistry::with_standard_decoders()))
    }

    #[test]
    fn cancel_token_propagates_to_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn serial_pump_processes_stream_until_eof() {
        let mut pump = SerialPump::new(
            io::Cursor::new(GGA.to_vec()),
            pipeline(FramingConfig::nmea()),
            CancelToken::new(),
        );
        let mut events = Vec::new();
        pump.run(&mut |event: NavEvent| events.push(event)).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavEvent::Position(_)));
    }

    #[test]
    fn serial_pump_stops_when_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let mut pump = SerialPump::new(
            io::Cursor::new(GGA.to_vec()),
            pipeline(FramingConfig::nmea()),
            token,
        );
        let mut events = Vec::new();
        pump.run(&mut |event: NavEvent| events.push(event)).unwrap();
        assert!(events.is_empty());
    }

    /// In-memory register-model device: a queue of bytes plus an available
    /// count, like a GNSS receiver's I2C data registers.
    struct FakeRegisterBus {
        data: VecDeque<u8>,
        fail_when_empty: bool,
    }

    impl RegisterTransport for FakeRegisterBus {
        fn bytes_available(&mut self) -> io::Result<u16> {
            if self.data.is_empty() && self.fail_when_empty {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "bus gone"));
            }
            Ok(self.data.len() as u16)
        }

        fn read_data(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.data.len());
            for slot in buf.iter_mut().take(n) {
                *slot = self.data.pop_front().unwrap();
            }
            Ok(n)
        }
    }

    #[test]
    fn i2c_pump_drains_available_bytes_and_dies_on_bus_error() {
        let bus = FakeRegisterBus {
            data: GGA.iter().copied().collect(),
            fail_when_empty: true,
        };
        let mut pump = I2cPump::new(
            bus,
            pipeline(FramingConfig::nmea()),
            CancelToken::new(),
            Duration::from_millis(1),
        );
        let mut events = Vec::new();
        let err = pump
            .run(&mut |event: NavEvent| events.push(event))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavEvent::Position(_)));
    }

    /// In-memory block device: hands out fixed blocks of queued data padded
    /// with filler, then errors once drained so tests terminate.
    struct FakeBlockBus {
        data: VecDeque<u8>,
        reads_after_empty: usize,
    }

    impl BlockTransport for FakeBlockBus {
        fn read_block(&mut self, buf: &mut [u8]) -> io::Result<()> {
            if self.data.is_empty() {
                if self.reads_after_empty == 0 {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "bus gone"));
                }
                self.reads_after_empty -= 1;
            }
            for slot in buf.iter_mut() {
                *slot = self.data.pop_front().unwrap_or(0xFF);
            }
            Ok(())
        }
    }

    #[test]
    fn spi_pump_strips_filler_and_decodes() {
        let mut data: VecDeque<u8> = VecDeque::new();
        // Device starts talking mid-block.
        data.extend([0xFF; 7]);
        data.extend(GGA.iter().copied());
        let bus = FakeBlockBus {
            data,
            reads_after_empty: 1,
        };
        let mut pump = SpiPump::new(
            bus,
            pipeline(FramingConfig::nmea_spi()),
            CancelToken::new(),
            Duration::from_millis(1),
            32,
        );
        let mut events = Vec::new();
        let err = pump
            .run(&mut |event: NavEvent| events.push(event))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavEvent::Position(_)));
    }

    #[test]
    fn filler_boundary_heuristic() {
        assert!(has_filler_boundary(&[0xFF, 0xFF, b'$', b'G'], Some(0xFF)));
        assert!(!has_filler_boundary(&[b'$', b'G', 0xFF, 0xFF], Some(0xFF)));
        assert!(!has_filler_boundary(&[0xFF; 8], Some(0xFF)));
        assert!(!has_filler_boundary(&[b'a'; 8], Some(0xFF)));
        assert!(!has_filler_boundary(&[0xFF, b'a'], None));
    }
}
