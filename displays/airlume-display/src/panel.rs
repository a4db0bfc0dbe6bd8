//! Region labels
//!
//! A [`Panel`] owns at most one [`Label`] per region. Replacing a label
//! always erases and drops the old one before the new one is drawn, so a
//! region never holds two labels at once.

use core::fmt;

use airlume_core::aqi::Color;
use airlume_core::traits::DisplayError;
use heapless::String;

use crate::backend::{DisplayBackend, Region};

/// Maximum characters per label
pub const LABEL_LEN: usize = 96;

/// Coloured block of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String<LABEL_LEN>,
    color: Color,
}

impl Label {
    /// Create an empty label
    pub fn new(color: Color) -> Self {
        Self {
            text: String::new(),
            color,
        }
    }

    /// Create a label holding `text`
    pub fn with_text(text: &str, color: Color) -> Result<Self, DisplayError> {
        let mut label = Self::new(color);
        label
            .text
            .push_str(text)
            .map_err(|_| DisplayError::BufferOverflow)?;
        Ok(label)
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl fmt::Write for Label {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s).map_err(|_| fmt::Error)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Label {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Label[{=u32:#08x}: {}]", self.color.0, self.text.as_str());
    }
}

/// Labels currently attached to a backend
pub struct Panel<B> {
    backend: B,
    primary: Option<Label>,
    secondary: Option<Label>,
}

impl<B: DisplayBackend> Panel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            primary: None,
            secondary: None,
        }
    }

    /// Show `label` in `region`, replacing any label already there
    ///
    /// If the new label cannot be drawn the previous one is put back, so the
    /// region keeps showing the last good text.
    pub fn attach(&mut self, region: Region, label: Label) -> Result<(), DisplayError> {
        let previous = self.detach(region)?;

        if let Err(e) = self.backend.draw_text(region, label.text(), label.color()) {
            if let Some(old) = previous {
                if self.backend.draw_text(region, old.text(), old.color()).is_ok() {
                    *self.slot_mut(region) = Some(old);
                }
            }
            return Err(e);
        }

        drop(previous);
        *self.slot_mut(region) = Some(label);
        Ok(())
    }

    /// Erase `region` and hand back the label that was there
    pub fn detach(&mut self, region: Region) -> Result<Option<Label>, DisplayError> {
        if self.slot_mut(region).is_none() {
            return Ok(None);
        }
        self.backend.erase(region)?;
        Ok(self.slot_mut(region).take())
    }

    /// Erase every region
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        for region in Region::ALL {
            self.detach(region)?;
        }
        Ok(())
    }

    /// Label currently shown in `region`
    pub fn label(&self, region: Region) -> Option<&Label> {
        match region {
            Region::Primary => self.primary.as_ref(),
            Region::Secondary => self.secondary.as_ref(),
        }
    }

    /// Push attached labels out to the panel
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        self.backend.flush()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn slot_mut(&mut self, region: Region) -> &mut Option<Label> {
        match region {
            Region::Primary => &mut self.primary,
            Region::Secondary => &mut self.secondary,
        }
    }
}
