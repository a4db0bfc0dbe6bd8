//! Sensor traits

use airlume_protocol::CHUNK_LEN;

/// Errors reading the particle sensor's byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// UART framing, parity or overrun error
    Uart,
}

/// Raw byte stream from the particle sensor
///
/// Implementations return whatever bytes are available right now, possibly
/// none, and never wait for a full frame.
pub trait ParticleSource {
    /// Read up to [`CHUNK_LEN`] bytes into `buf`
    ///
    /// Returns the number of bytes written.
    fn read_chunk(&mut self, buf: &mut [u8; CHUNK_LEN]) -> Result<usize, SourceError>;
}

/// Errors from the secondary gas sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No sensor fitted
    NotPresent,
    /// Bus transfer failed
    Bus,
    /// Data word failed its CRC
    Crc,
    /// Sensor not initialized yet
    NotInitialized,
}

/// Longest time one read + baseline pair may block a monitor tick
pub const GAS_POLL_BUDGET_MS: u32 = 25;

/// eCO2 / TVOC measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasReading {
    /// Equivalent CO2 in ppm
    pub eco2_ppm: u16,
    /// Total volatile organic compounds in ppb
    pub tvoc_ppb: u16,
}

/// Stored baseline calibration words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasBaseline {
    pub eco2: u16,
    pub tvoc: u16,
}

/// Secondary air quality sensor, used for diagnostics only
///
/// The monitor calls [`read`](Self::read) then [`baseline`](Self::baseline)
/// once each time its read gate opens. Implementations may wait out the
/// sensor's command execution time inside these calls, but must keep the
/// pair within [`GAS_POLL_BUDGET_MS`].
pub trait GasSensor {
    /// Take one measurement
    fn read(&mut self) -> Result<GasReading, SensorError>;

    /// Current baseline values
    fn baseline(&mut self) -> Result<GasBaseline, SensorError>;
}

/// Placeholder for builds without a gas sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGasSensor;

impl GasSensor for NoGasSensor {
    fn read(&mut self) -> Result<GasReading, SensorError> {
        Err(SensorError::NotPresent)
    }

    fn baseline(&mut self) -> Result<GasBaseline, SensorError> {
        Err(SensorError::NotPresent)
    }
}
