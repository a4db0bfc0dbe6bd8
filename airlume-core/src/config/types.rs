//! Configuration type definitions

use crate::averager::MAX_WINDOW;
use crate::scheduler::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// How the AQI headline and the reading body share the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DisplayLayout {
    /// Headline and body in one text region
    #[default]
    Single,
    /// Large headline region above a smaller body region
    Dual,
}

/// What to report while the rolling window is still filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WarmupPolicy {
    /// Average whatever samples exist so far
    #[default]
    PartialAverage,
    /// Withhold the average until the window is full
    Calculating,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period was zero
    ZeroPeriod,
    /// Window capacity outside 1..=MAX_WINDOW
    InvalidWindow,
    /// Config version mismatch
    VersionMismatch,
    /// TOML parsing failed
    TomlParse,
    /// Binary serialization failed (buffer too small)
    Serialize,
    /// Binary deserialization failed
    Deserialize,
    /// No configuration source available
    NotFound,
}

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Minimum time between decode attempts
    pub read_period_ms: Millis,
    /// Minimum time between display refreshes (None = refresh on every frame)
    pub output_period_ms: Option<Millis>,
    /// Rolling window size in samples
    pub window_capacity: u8,
    /// Screen layout
    pub display_layout: DisplayLayout,
    /// Warm-up reporting
    pub warmup: WarmupPolicy,
    /// Log every decoded record
    pub log_frames: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::single_panel()
    }
}

impl MonitorConfig {
    /// Slow single-region variant: 15 s reads, 20-sample (5 min) window
    pub const fn single_panel() -> Self {
        Self {
            version: CONFIG_VERSION,
            read_period_ms: 15_000,
            output_period_ms: None,
            window_capacity: 20,
            display_layout: DisplayLayout::Single,
            warmup: WarmupPolicy::PartialAverage,
            log_frames: false,
        }
    }

    /// Fast two-region variant: 1 s reads, 5 s refresh, 30-sample window
    pub const fn dual_panel() -> Self {
        Self {
            version: CONFIG_VERSION,
            read_period_ms: 1_000,
            output_period_ms: Some(5_000),
            window_capacity: 30,
            display_layout: DisplayLayout::Dual,
            warmup: WarmupPolicy::Calculating,
            log_frames: false,
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if self.read_period_ms == 0 || self.output_period_ms == Some(0) {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.window_capacity == 0 || self.window_capacity as usize > MAX_WINDOW {
            return Err(ConfigError::InvalidWindow);
        }
        Ok(())
    }

    /// Time span covered by a full window, in milliseconds
    pub fn window_span_ms(&self) -> u32 {
        self.read_period_ms.saturating_mul(self.window_capacity as u32)
    }
}
