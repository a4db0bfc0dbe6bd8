//! Plantower PMS5003 particle sensor
//!
//! In active mode the sensor pushes a 32-byte frame roughly once a second at
//! 9600 baud. This driver only moves bytes; framing and checksums are handled
//! by `airlume_protocol::FrameSync`.

use airlume_core::traits::{ParticleSource, SourceError};
use airlume_hal::{UartConfig, UartRx};
use airlume_protocol::CHUNK_LEN;

/// PMS5003 byte source
pub struct Pms5003<U> {
    uart: U,
    /// Total bytes received
    received: u32,
}

impl<U: UartRx> Pms5003<U> {
    /// Line settings the UART must be opened with
    pub const UART_CONFIG: UartConfig = UartConfig::PMS5003;

    /// Wrap a UART opened with [`Self::UART_CONFIG`]
    pub fn new(uart: U) -> Self {
        Self { uart, received: 0 }
    }

    /// Drop anything the sensor sent before we started listening
    pub fn flush(&mut self) -> Result<(), SourceError> {
        self.uart.discard_pending().map_err(|_| SourceError::Uart)
    }

    /// Total bytes received so far
    pub fn received(&self) -> u32 {
        self.received
    }

    /// Release the UART
    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: UartRx> ParticleSource for Pms5003<U> {
    fn read_chunk(&mut self, buf: &mut [u8; CHUNK_LEN]) -> Result<usize, SourceError> {
        let n = self.uart.read_available(buf).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("PMS5003: UART read error");
            SourceError::Uart
        })?;

        let n = n.min(CHUNK_LEN);
        self.received = self.received.wrapping_add(n as u32);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Deque;

    /// UART that hands out queued bytes in bursts
    struct MockUart {
        pending: Deque<u8, 128>,
        burst: usize,
        fail: bool,
    }

    impl MockUart {
        fn new(bytes: &[u8], burst: usize) -> Self {
            let mut pending = Deque::new();
            for &b in bytes {
                pending.push_back(b).unwrap();
            }
            Self {
                pending,
                burst,
                fail: false,
            }
        }
    }

    impl UartRx for MockUart {
        type Error = ();

        fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            if self.fail {
                return Err(());
            }
            let mut n = 0;
            while n < buf.len() && n < self.burst {
                match self.pending.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }
    }

    #[test]
    fn test_line_settings() {
        let config = Pms5003::<MockUart>::UART_CONFIG;
        assert_eq!(config.baudrate, 9600);
        // A frame takes ~33 ms on the wire; reads give up well before a second
        assert!(config.read_timeout_ms < 1000);
    }

    #[test]
    fn test_reads_at_most_one_chunk() {
        let bytes = [0x11u8; 70];
        let mut sensor = Pms5003::new(MockUart::new(&bytes, 64));
        let mut buf = [0u8; CHUNK_LEN];

        assert_eq!(sensor.read_chunk(&mut buf), Ok(32));
        assert_eq!(sensor.read_chunk(&mut buf), Ok(32));
        assert_eq!(sensor.read_chunk(&mut buf), Ok(6));
        assert_eq!(sensor.read_chunk(&mut buf), Ok(0));
        assert_eq!(sensor.received(), 70);
    }

    #[test]
    fn test_partial_bursts_pass_through() {
        let mut sensor = Pms5003::new(MockUart::new(&[0x42, 0x4D, 0x00, 0x1C], 3));
        let mut buf = [0u8; CHUNK_LEN];

        assert_eq!(sensor.read_chunk(&mut buf), Ok(3));
        assert_eq!(&buf[..3], &[0x42, 0x4D, 0x00]);
        assert_eq!(sensor.read_chunk(&mut buf), Ok(1));
        assert_eq!(buf[0], 0x1C);
    }

    #[test]
    fn test_uart_error_maps_to_source_error() {
        let mut uart = MockUart::new(&[], 8);
        uart.fail = true;
        let mut sensor = Pms5003::new(uart);
        let mut buf = [0u8; CHUNK_LEN];

        assert_eq!(sensor.read_chunk(&mut buf), Err(SourceError::Uart));
        assert_eq!(sensor.flush(), Err(SourceError::Uart));
    }

    #[test]
    fn test_flush_discards_backlog() {
        let mut sensor = Pms5003::new(MockUart::new(&[0xAA; 100], 16));
        sensor.flush().unwrap();

        let mut buf = [0u8; CHUNK_LEN];
        assert_eq!(sensor.read_chunk(&mut buf), Ok(0));
        assert!(sensor.release().pending.is_empty());
    }
}
