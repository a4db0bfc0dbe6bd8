//! UART receive abstraction

/// UART receiver
///
/// The particle sensor streams frames on its own schedule, so reads never
/// wait for a buffer to fill.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Copy whatever bytes are already buffered into `buf`
    ///
    /// Returns the number of bytes written, which may be zero. Implementations
    /// may wait up to their configured read timeout, but no longer.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Discard everything currently buffered
    fn discard_pending(&mut self) -> Result<(), Self::Error> {
        let mut scratch = [0u8; 16];
        while self.read_available(&mut scratch)? > 0 {}
        Ok(())
    }
}

/// UART line settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Longest time a read may wait for data
    pub read_timeout_ms: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::PMS5003
    }
}

impl UartConfig {
    /// Plantower PMS5003: 9600 8N1
    pub const PMS5003: Self = Self {
        baudrate: 9600,
        read_timeout_ms: 250,
    };
}

/// [`UartRx`] over any `embedded-io` reader that can report readiness
///
/// Reads only when the peripheral already holds data, so a quiet line
/// returns zero bytes instead of blocking.
pub struct IoUart<T>(pub T);

impl<T: embedded_io::Read + embedded_io::ReadReady> UartRx for IoUart<T> {
    type Error = T::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !self.0.read_ready()? {
            return Ok(0);
        }
        self.0.read(buf)
    }
}
