//! Sensirion SGP30 gas sensor
//!
//! Reports equivalent CO2 (ppm) and total VOC (ppb). The sensor runs its own
//! baseline compensation once `iaq_init` has been sent and should be polled
//! about once a second. Every 16-bit word on the wire is followed by a CRC-8.

use airlume_core::traits::{GasBaseline, GasReading, GasSensor, SensorError};
use airlume_hal::{DelayMs, I2cBus, I2cConfig};

/// Fixed 7-bit bus address
pub const SGP30_ADDRESS: u8 = 0x58;

/// Start the IAQ algorithm
const CMD_IAQ_INIT: [u8; 2] = [0x20, 0x03];
/// Read eCO2 and TVOC
const CMD_MEASURE_IAQ: [u8; 2] = [0x20, 0x08];
/// Read the current baseline
const CMD_GET_BASELINE: [u8; 2] = [0x20, 0x15];
/// Restore a stored baseline
const CMD_SET_BASELINE: [u8; 2] = [0x20, 0x1E];

/// Command execution times in ms (datasheet max)
const INIT_DELAY_MS: u32 = 10;
const MEASURE_DELAY_MS: u32 = 12;
const BASELINE_DELAY_MS: u32 = 10;

/// CRC-8 over one data word: polynomial 0x31, init 0xFF, no final XOR
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Split a response into its two checked words
fn decode_words(raw: &[u8; 6]) -> Result<(u16, u16), SensorError> {
    let mut words = [0u16; 2];
    for (word, chunk) in words.iter_mut().zip(raw.chunks_exact(3)) {
        if crc8(&chunk[..2]) != chunk[2] {
            #[cfg(feature = "defmt")]
            defmt::warn!("SGP30: CRC mismatch");
            return Err(SensorError::Crc);
        }
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    Ok((words[0], words[1]))
}

/// SGP30 on an I2C bus
pub struct Sgp30<I, D> {
    i2c: I,
    delay: D,
    initialized: bool,
}

impl<I: I2cBus, D: DelayMs> Sgp30<I, D> {
    /// Fastest bus clock the sensor supports
    pub const I2C_CONFIG: I2cConfig = I2cConfig::FAST;

    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            i2c,
            delay,
            initialized: false,
        }
    }

    /// Start IAQ measurement, optionally restoring a saved baseline
    pub fn init(&mut self, baseline: Option<GasBaseline>) -> Result<(), SensorError> {
        self.command(&CMD_IAQ_INIT, INIT_DELAY_MS)?;

        if let Some(baseline) = baseline {
            self.set_baseline(baseline)?;
        }

        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::info!("SGP30 initialized");
        Ok(())
    }

    /// Restore a baseline saved from an earlier run
    pub fn set_baseline(&mut self, baseline: GasBaseline) -> Result<(), SensorError> {
        // Sensor expects TVOC first, the reverse of the read order
        let tvoc = baseline.tvoc.to_be_bytes();
        let eco2 = baseline.eco2.to_be_bytes();
        let frame = [
            CMD_SET_BASELINE[0],
            CMD_SET_BASELINE[1],
            tvoc[0],
            tvoc[1],
            crc8(&tvoc),
            eco2[0],
            eco2[1],
            crc8(&eco2),
        ];
        self.command(&frame, BASELINE_DELAY_MS)
    }

    /// Read eCO2 and TVOC
    pub fn measure_iaq(&mut self) -> Result<GasReading, SensorError> {
        let (eco2_ppm, tvoc_ppb) = self.query(&CMD_MEASURE_IAQ, MEASURE_DELAY_MS)?;
        Ok(GasReading { eco2_ppm, tvoc_ppb })
    }

    /// Read the baseline the sensor is currently compensating with
    pub fn get_baseline(&mut self) -> Result<GasBaseline, SensorError> {
        let (eco2, tvoc) = self.query(&CMD_GET_BASELINE, BASELINE_DELAY_MS)?;
        Ok(GasBaseline { eco2, tvoc })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the bus and delay
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, frame: &[u8], delay_ms: u32) -> Result<(), SensorError> {
        self.i2c
            .write(SGP30_ADDRESS, frame)
            .map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(delay_ms);
        Ok(())
    }

    fn query(&mut self, cmd: &[u8; 2], delay_ms: u32) -> Result<(u16, u16), SensorError> {
        if !self.initialized {
            return Err(SensorError::NotInitialized);
        }

        self.command(cmd, delay_ms)?;

        let mut raw = [0u8; 6];
        self.i2c
            .read(SGP30_ADDRESS, &mut raw)
            .map_err(|_| SensorError::Bus)?;
        decode_words(&raw)
    }
}

impl<I: I2cBus, D: DelayMs> GasSensor for Sgp30<I, D> {
    fn read(&mut self) -> Result<GasReading, SensorError> {
        self.measure_iaq()
    }

    fn baseline(&mut self) -> Result<GasBaseline, SensorError> {
        self.get_baseline()
    }
}
