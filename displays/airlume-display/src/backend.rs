//! Display backend trait
//!
//! Defines the interface for different panel types.

use airlume_core::aqi::Color;
use airlume_core::traits::DisplayError;

/// Screen region a label can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Large text near the top
    Primary,
    /// Smaller text below the primary region
    Secondary,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Primary, Region::Secondary];
}

/// Display backend trait
///
/// Implementations own fonts, scaling and placement of each region. Text may
/// contain `\n` line breaks.
pub trait DisplayBackend {
    /// Draw `text` into `region` in the given colour
    fn draw_text(&mut self, region: Region, text: &str, color: Color) -> Result<(), DisplayError>;

    /// Erase whatever is drawn in `region`
    fn erase(&mut self, region: Region) -> Result<(), DisplayError>;

    /// Flush buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check if the panel is ready
    fn is_ready(&self) -> bool;
}
