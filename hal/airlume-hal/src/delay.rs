//! Blocking delays

/// Millisecond delay provider
///
/// Used by drivers that must wait out a command's execution time before
/// reading the response.
pub trait DelayMs {
    /// Busy-wait for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// [`DelayMs`] over an `embedded-hal` 1.0 delay provider
pub struct HalDelay<T>(pub T);

impl<T: embedded_hal::delay::DelayNs> DelayMs for HalDelay<T> {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl embedded_hal::delay::DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_delay_forwards_milliseconds() {
        let mut delay = HalDelay(CountingDelay::default());
        delay.delay_ms(12);
        assert!(delay.0.total_ns >= 12_000_000);
    }
}
