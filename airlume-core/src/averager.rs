//! Rolling PM2.5 average
//!
//! Keeps the N most recent environmental PM2.5 readings in a FIFO window.
//! The mean is recomputed from the window contents on every query rather than
//! kept as a running sum, so nothing drifts over long uptimes.

use heapless::Deque;

use crate::config::WarmupPolicy;

/// Largest supported window
pub const MAX_WINDOW: usize = 64;

/// Averager state as reported to the display
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowState {
    /// Window still filling
    ///
    /// `average` is `None` while the warm-up policy withholds it.
    Filling { count: usize, average: Option<f32> },
    /// Window full; mean of exactly `capacity` samples
    Full { average: f32 },
}

impl WindowState {
    /// The reported average, if any
    pub fn average(&self) -> Option<f32> {
        match *self {
            WindowState::Filling { average, .. } => average,
            WindowState::Full { average } => Some(average),
        }
    }

    /// Whether the window has reached capacity
    pub fn is_full(&self) -> bool {
        matches!(self, WindowState::Full { .. })
    }
}

/// Fixed-capacity FIFO of PM2.5 readings
#[derive(Debug, Clone)]
pub struct RollingAverager {
    window: Deque<u16, MAX_WINDOW>,
    capacity: usize,
    warmup: WarmupPolicy,
}

impl RollingAverager {
    /// Create an averager holding `capacity` samples
    ///
    /// `capacity` is clamped to `1..=MAX_WINDOW`.
    pub fn new(capacity: usize, warmup: WarmupPolicy) -> Self {
        Self {
            window: Deque::new(),
            capacity: capacity.clamp(1, MAX_WINDOW),
            warmup,
        }
    }

    /// Append a reading, evicting the oldest once at capacity
    pub fn push(&mut self, value: u16) {
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        // Cannot fail: length is below capacity <= MAX_WINDOW here
        let _ = self.window.push_back(value);
    }

    /// Current window state
    pub fn current_state(&self) -> WindowState {
        let count = self.window.len();
        if count >= self.capacity {
            return WindowState::Full {
                average: self.mean().unwrap_or(0.0),
            };
        }

        let average = match self.warmup {
            WarmupPolicy::PartialAverage => self.mean(),
            WarmupPolicy::Calculating => None,
        };
        WindowState::Filling { count, average }
    }

    /// Mean of the window contents, `None` when empty
    pub fn mean(&self) -> Option<f32> {
        if self.window.is_empty() {
            return None;
        }
        let sum: u32 = self.window.iter().map(|&v| v as u32).sum();
        Some(sum as f32 / self.window.len() as f32)
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<u16> {
        self.window.back().copied()
    }

    /// Readings, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &u16> {
        self.window.iter()
    }

    /// Number of readings held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no readings are held
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Configured window size
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all readings
    pub fn clear(&mut self) {
        self.window.clear();
    }
}
