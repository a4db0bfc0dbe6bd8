//! I2C bus abstraction

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write `data` to the device at 7-bit `address`
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` from the device at 7-bit `address`
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// [`I2cBus`] over an `embedded-hal` 1.0 I2C master
pub struct HalI2c<T>(pub T);

impl<T: embedded_hal::i2c::I2c> I2cBus for HalI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, I2c, Operation};

    /// Bus that remembers the last write and answers reads with a counter
    #[derive(Default)]
    struct LoopbackI2c {
        address: u8,
        written: [u8; 4],
        written_len: usize,
    }

    impl ErrorType for LoopbackI2c {
        type Error = Infallible;
    }

    impl I2c for LoopbackI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            self.address = address;
            for op in operations {
                match op {
                    Operation::Write(data) => {
                        self.written_len = data.len().min(self.written.len());
                        self.written[..self.written_len].copy_from_slice(&data[..self.written_len]);
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = i as u8;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_adapter_forwards_write() {
        let mut bus = HalI2c(LoopbackI2c::default());
        bus.write(0x58, &[0x20, 0x08]).unwrap();

        assert_eq!(bus.0.address, 0x58);
        assert_eq!(&bus.0.written[..bus.0.written_len], &[0x20, 0x08]);
    }

    #[test]
    fn test_adapter_forwards_read() {
        let mut bus = HalI2c(LoopbackI2c::default());
        let mut buf = [0xFFu8; 6];
        bus.read(0x58, &mut buf).unwrap();

        assert_eq!(buf, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_presets() {
        assert_eq!(I2cConfig::default(), I2cConfig::STANDARD);
        assert!(I2cConfig::FAST.frequency > I2cConfig::STANDARD.frequency);
    }
}
