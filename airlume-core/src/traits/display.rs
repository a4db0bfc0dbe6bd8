//! Display trait for the AQI readout

use crate::monitor::Snapshot;

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Text did not fit its region
    BufferOverflow,
    /// Display not initialized
    NotInitialized,
}

/// Output side of the monitor
///
/// The implementation owns layout, fonts and refresh mechanics; the monitor
/// only hands over the latest computed values. After an error the monitor
/// keeps running and tries again on the next refresh.
pub trait AqiDisplay {
    /// Show the given snapshot, replacing whatever was shown before
    fn show(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError>;
}
