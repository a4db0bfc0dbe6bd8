//! Rate gates for the monitor loop
//!
//! The loop runs as fast as it is polled; gates decide whether a given action
//! (decode attempt, display refresh) is due. Two independent gates keep the
//! rolling window fresh while the display redraws more slowly.

/// Monotonic milliseconds since boot
///
/// Wraps after ~49 days; elapsed time uses wrapping arithmetic.
pub type Millis = u32;

/// Periodic gate keyed on a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleGate {
    period_ms: Millis,
    /// Last time the gate opened; `None` until the first opening
    checkpoint: Option<Millis>,
}

impl SampleGate {
    /// Gate that opens on its first query, then every `period_ms`
    pub const fn new(period_ms: Millis) -> Self {
        Self {
            period_ms,
            checkpoint: None,
        }
    }

    /// Gate whose first period starts at `start`
    pub const fn starting_at(period_ms: Millis, start: Millis) -> Self {
        Self {
            period_ms,
            checkpoint: Some(start),
        }
    }

    /// Whether the action is due at `now`
    ///
    /// Opening moves the checkpoint to `now`; a closed gate leaves it alone.
    pub fn ready(&mut self, now: Millis) -> bool {
        let due = match self.checkpoint {
            None => true,
            Some(checkpoint) => now.wrapping_sub(checkpoint) >= self.period_ms,
        };
        if due {
            self.checkpoint = Some(now);
        }
        due
    }

    /// Time left until the gate opens, zero if already due
    pub fn remaining(&self, now: Millis) -> Millis {
        match self.checkpoint {
            None => 0,
            Some(checkpoint) => self.period_ms.saturating_sub(now.wrapping_sub(checkpoint)),
        }
    }

    /// Configured period
    pub const fn period_ms(&self) -> Millis {
        self.period_ms
    }

    /// Last opening time
    pub const fn checkpoint(&self) -> Option<Millis> {
        self.checkpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_query_opens() {
        let mut gate = SampleGate::new(15_000);
        assert!(gate.ready(3));
        assert_eq!(gate.checkpoint(), Some(3));
    }

    #[test]
    fn test_closed_until_period_elapsed() {
        let mut gate = SampleGate::starting_at(1_000, 0);

        assert!(!gate.ready(999));
        assert_eq!(gate.checkpoint(), Some(0));
        assert!(gate.ready(1_000));
        assert_eq!(gate.checkpoint(), Some(1_000));
        assert!(!gate.ready(1_500));
        assert!(gate.ready(2_200));
    }

    #[test]
    fn test_same_instant_opens_once() {
        let mut gate = SampleGate::starting_at(5_000, 0);

        assert!(gate.ready(7_000));
        assert!(!gate.ready(7_000));
    }

    #[test]
    fn test_wraparound() {
        let mut gate = SampleGate::starting_at(1_000, u32::MAX - 200);

        assert!(!gate.ready(500));
        assert!(gate.ready(800));
    }

    #[test]
    fn test_remaining() {
        let gate = SampleGate::starting_at(5_000, 1_000);

        assert_eq!(gate.remaining(2_000), 4_000);
        assert_eq!(gate.remaining(9_000), 0);
        assert_eq!(SampleGate::new(5_000).remaining(123), 0);
    }

    #[test]
    fn test_independent_gates() {
        let mut read = SampleGate::new(1_000);
        let mut output = SampleGate::new(5_000);
        let mut reads = 0;
        let mut outputs = 0;

        for now in (0..10_000).step_by(100) {
            if read.ready(now) {
                reads += 1;
            }
            if output.ready(now) {
                outputs += 1;
            }
        }

        assert_eq!(reads, 10);
        assert_eq!(outputs, 2);
    }
}
