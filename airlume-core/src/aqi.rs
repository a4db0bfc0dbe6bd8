//! PM2.5 to Air Quality Index mapping
//!
//! Uses the EPA breakpoint table with piecewise-linear interpolation:
//!
//! ```text
//! AQI = AQI_lo + (AQI_hi - AQI_lo) / (C_hi - C_lo) * (C - C_lo)
//! ```
//!
//! The score is interpolated on the concentration as given and truncated to
//! a whole number. Values that fall between two listed bands (a rolling
//! average of 12.05, say) use the lower band, so every finite concentration
//! in 0.0..=500.4 maps and everything above 500.4 is an error.

/// 24-bit RGB display colour (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const GREEN: Color = Color(0x00FF00);
    pub const YELLOW: Color = Color(0xFFFF00);
    pub const ORANGE: Color = Color(0xFFA500);
    pub const RED: Color = Color(0xFF0000);
    pub const MAGENTA: Color = Color(0xFF00FF);
    pub const WHITE: Color = Color(0xFFFFFF);

    /// Colour shown when no band matches
    pub const ERROR: Color = Color::RED;

    /// Split into (r, g, b)
    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

/// AQI category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    Good,
    Moderate,
    /// Unhealthy for sensitive groups
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    /// Human readable name
    pub const fn label(self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthySensitive => "Unhealthy (SG)",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }
}

/// One row of the breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiBand {
    pub category: Category,
    /// Listed concentration interval in µg/m³
    pub concentration: (f32, f32),
    /// Closed AQI interval
    pub aqi: (u16, u16),
    pub color: Color,
}

impl AqiBand {
    const fn new(category: Category, c: (f32, f32), aqi: (u16, u16), color: Color) -> Self {
        Self {
            category,
            concentration: c,
            aqi,
            color,
        }
    }

    fn contains_aqi(&self, aqi: u16) -> bool {
        aqi >= self.aqi.0 && aqi <= self.aqi.1
    }

    /// Linear interpolation inside this band, truncated to a whole score
    fn interpolate(&self, c: f32) -> u16 {
        // Widened so the listed endpoints map exactly
        let (c_lo, c_hi) = (self.concentration.0 as f64, self.concentration.1 as f64);
        let (aqi_lo, aqi_hi) = (self.aqi.0 as f64, self.aqi.1 as f64);

        let aqi = aqi_lo + (aqi_hi - aqi_lo) * (c as f64 - c_lo) / (c_hi - c_lo);
        // Gap values just past C_hi must not spill into the next score range
        (aqi as u16).min(self.aqi.1)
    }
}

/// PM2.5 breakpoint table, scanned in order
pub const BANDS: [AqiBand; 6] = [
    AqiBand::new(Category::Good, (0.0, 12.0), (0, 50), Color::GREEN),
    AqiBand::new(Category::Moderate, (12.1, 35.4), (51, 100), Color::YELLOW),
    AqiBand::new(Category::UnhealthySensitive, (35.5, 55.4), (101, 150), Color::ORANGE),
    AqiBand::new(Category::Unhealthy, (55.5, 150.4), (151, 200), Color::RED),
    AqiBand::new(Category::VeryUnhealthy, (150.5, 250.4), (201, 300), Color::RED),
    AqiBand::new(Category::Hazardous, (250.5, 500.4), (301, 500), Color::MAGENTA),
];

/// Highest concentration the table covers
pub const MAX_CONCENTRATION: f32 = BANDS[BANDS.len() - 1].concentration.1;

/// Errors from AQI mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AqiError {
    /// Concentration is negative, not finite, or above the table
    OutOfRange,
}

/// Everything the display needs about one concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AqiReading {
    /// Whole-number AQI score
    pub aqi: u16,
    pub category: Category,
    pub color: Color,
}

/// Band covering `c`
///
/// A value between one band's C_hi and the next band's C_lo (12.05, say)
/// belongs to the lower band. Anything negative, non-finite or above
/// [`MAX_CONCENTRATION`] has no band.
pub fn band_for_concentration(c: f32) -> Option<&'static AqiBand> {
    if !c.is_finite() || c < 0.0 || c > MAX_CONCENTRATION {
        return None;
    }
    let mut found = None;
    for band in BANDS.iter() {
        if c < band.concentration.0 {
            break;
        }
        found = Some(band);
    }
    found
}

/// First band whose AQI interval contains `aqi`
pub fn band_for_aqi(aqi: u16) -> Option<&'static AqiBand> {
    BANDS.iter().find(|band| band.contains_aqi(aqi))
}

/// AQI score for a PM2.5 concentration in µg/m³
pub fn aqi_for_concentration(c: f32) -> Result<u16, AqiError> {
    let band = band_for_concentration(c).ok_or(AqiError::OutOfRange)?;
    Ok(band.interpolate(c))
}

/// Display colour for an AQI score
///
/// The band is re-derived from the score itself; out-of-range scores get
/// [`Color::ERROR`].
pub fn color_for_aqi(aqi: u16) -> Color {
    band_for_aqi(aqi).map_or(Color::ERROR, |band| band.color)
}

/// Score, category and colour for a concentration
pub fn classify(c: f32) -> Result<AqiReading, AqiError> {
    let aqi = aqi_for_concentration(c)?;
    let band = band_for_aqi(aqi).ok_or(AqiError::OutOfRange)?;
    Ok(AqiReading {
        aqi,
        category: band.category,
        color: band.color,
    })
}
