//! Snapshot renderer
//!
//! Turns the monitor's latest values into label text:
//!
//! ```text
//! AQI: 51
//! PM2.5: 12 ug/m3
//! 5 min average:           (or "average of 7 samples:")
//! 12.1 ug/m3
//! ```
//!
//! While the warm-up policy withholds the average the last two lines read
//! `average: calculating`.

use core::fmt::{self, Write};

use airlume_core::aqi::Color;
use airlume_core::averager::WindowState;
use airlume_core::config::{DisplayLayout, MonitorConfig};
use airlume_core::monitor::Snapshot;
use airlume_core::traits::{AqiDisplay, DisplayError};

use crate::backend::{DisplayBackend, Region};
use crate::panel::{Label, Panel};

const MS_PER_MIN: u32 = 60_000;

/// Colour of the concentration block in the dual layout
const BODY_COLOR: Color = Color::WHITE;

/// Write the AQI headline, returning the colour it should be drawn in
fn write_headline<W: Write>(w: &mut W, snapshot: &Snapshot) -> Result<Color, fmt::Error> {
    match snapshot.aqi {
        Ok(reading) => {
            write!(w, "AQI: {}", reading.aqi)?;
            Ok(reading.color)
        }
        Err(_) => {
            w.write_str("AQI: --")?;
            Ok(Color::ERROR)
        }
    }
}

/// Write the latest reading and the window average
fn write_body<W: Write>(w: &mut W, snapshot: &Snapshot, window_span_ms: u32) -> fmt::Result {
    writeln!(w, "PM2.5: {} ug/m3", snapshot.latest_pm2_5())?;

    match snapshot.window {
        WindowState::Full { average } => {
            if window_span_ms % MS_PER_MIN == 0 {
                writeln!(w, "{} min average:", window_span_ms / MS_PER_MIN)?;
            } else {
                writeln!(w, "{} s average:", window_span_ms / 1000)?;
            }
            write!(w, "{:.1} ug/m3", average)
        }
        WindowState::Filling {
            count,
            average: Some(average),
        } => {
            writeln!(w, "average of {} samples:", count)?;
            write!(w, "{:.1} ug/m3", average)
        }
        WindowState::Filling { average: None, .. } => w.write_str("average: calculating"),
    }
}

/// [`AqiDisplay`] drawing onto a [`Panel`]
pub struct AqiPanel<B> {
    panel: Panel<B>,
    layout: DisplayLayout,
    /// Time covered by a full window, for the average caption
    window_span_ms: u32,
}

impl<B: DisplayBackend> AqiPanel<B> {
    pub fn new(backend: B, layout: DisplayLayout, window_span_ms: u32) -> Self {
        Self {
            panel: Panel::new(backend),
            layout,
            window_span_ms,
        }
    }

    /// Layout and caption taken from the monitor configuration
    pub fn from_config(backend: B, config: &MonitorConfig) -> Self {
        Self::new(backend, config.display_layout, config.window_span_ms())
    }

    pub fn layout(&self) -> DisplayLayout {
        self.layout
    }

    pub fn panel(&self) -> &Panel<B> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel<B> {
        &mut self.panel
    }

    fn show_single(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError> {
        let mut label = Label::new(Color::WHITE);
        let color = write_headline(&mut label, snapshot).map_err(overflow)?;
        label.write_char('\n').map_err(overflow)?;
        write_body(&mut label, snapshot, self.window_span_ms).map_err(overflow)?;
        label.set_color(color);

        self.panel.attach(Region::Primary, label)
    }

    fn show_dual(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError> {
        let mut headline = Label::new(Color::WHITE);
        let color = write_headline(&mut headline, snapshot).map_err(overflow)?;
        headline.set_color(color);

        let mut body = Label::new(BODY_COLOR);
        write_body(&mut body, snapshot, self.window_span_ms).map_err(overflow)?;

        self.panel.attach(Region::Primary, headline)?;
        self.panel.attach(Region::Secondary, body)
    }
}

fn overflow(_: fmt::Error) -> DisplayError {
    DisplayError::BufferOverflow
}

impl<B: DisplayBackend> AqiDisplay for AqiPanel<B> {
    fn show(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError> {
        if !self.panel.backend().is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        match self.layout {
            DisplayLayout::Single => self.show_single(snapshot)?,
            DisplayLayout::Dual => self.show_dual(snapshot)?,
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Display: {}", self.panel.label(Region::Primary));

        self.panel.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::tests::{Op, RecordingBackend};
    use airlume_core::aqi;
    use airlume_core::MeasurementRecord;

    /// 15 s reads into a 20-sample window
    const FIVE_MINUTES: u32 = 300_000;

    fn snapshot(latest: u16, window: WindowState) -> Snapshot {
        let record = MeasurementRecord {
            pm2_5_env: latest,
            ..Default::default()
        };
        let concentration = window.average().unwrap_or(latest as f32);
        Snapshot {
            record,
            window,
            aqi: aqi::classify(concentration),
        }
    }

    fn dual() -> AqiPanel<RecordingBackend> {
        AqiPanel::new(RecordingBackend::default(), DisplayLayout::Dual, FIVE_MINUTES)
    }

    fn text(panel: &AqiPanel<RecordingBackend>, region: Region) -> &str {
        panel.panel().label(region).map(|l| l.text()).unwrap_or("")
    }

    #[test]
    fn test_dual_full_window() {
        let mut display = dual();
        display
            .show(&snapshot(12, WindowState::Full { average: 12.1 }))
            .unwrap();

        assert_eq!(text(&display, Region::Primary), "AQI: 51");
        assert_eq!(
            text(&display, Region::Secondary),
            "PM2.5: 12 ug/m3\n5 min average:\n12.1 ug/m3"
        );
        let headline = display.panel().label(Region::Primary).unwrap();
        assert_eq!(headline.color(), Color::YELLOW);
        assert_eq!(
            display.panel().label(Region::Secondary).unwrap().color(),
            Color::WHITE
        );
        assert_eq!(display.panel().backend().ops.last(), Some(&Op::Flush));
    }

    #[test]
    fn test_dual_partial_window() {
        let mut display = dual();
        let window = WindowState::Filling {
            count: 7,
            average: Some(8.5),
        };
        display.show(&snapshot(9, window)).unwrap();

        assert_eq!(
            text(&display, Region::Secondary),
            "PM2.5: 9 ug/m3\naverage of 7 samples:\n8.5 ug/m3"
        );
        assert_eq!(
            display.panel().label(Region::Primary).unwrap().color(),
            Color::GREEN
        );
    }

    #[test]
    fn test_withheld_average() {
        let mut display = dual();
        let window = WindowState::Filling {
            count: 1,
            average: None,
        };
        display.show(&snapshot(40, window)).unwrap();

        assert_eq!(text(&display, Region::Primary), "AQI: 112");
        assert_eq!(
            text(&display, Region::Secondary),
            "PM2.5: 40 ug/m3\naverage: calculating"
        );
    }

    #[test]
    fn test_out_of_range_shows_error_colour() {
        let mut display = dual();
        display
            .show(&snapshot(900, WindowState::Full { average: 612.0 }))
            .unwrap();

        let headline = display.panel().label(Region::Primary).unwrap();
        assert_eq!(headline.text(), "AQI: --");
        assert_eq!(headline.color(), Color::ERROR);
    }

    #[test]
    fn test_single_layout_uses_one_region() {
        let mut display =
            AqiPanel::new(RecordingBackend::default(), DisplayLayout::Single, FIVE_MINUTES);
        display
            .show(&snapshot(60, WindowState::Full { average: 60.0 }))
            .unwrap();

        let label = display.panel().label(Region::Primary).unwrap();
        assert_eq!(
            label.text(),
            "AQI: 153\nPM2.5: 60 ug/m3\n5 min average:\n60.0 ug/m3"
        );
        assert_eq!(label.color(), Color::RED);
        assert!(display.panel().label(Region::Secondary).is_none());
    }

    #[test]
    fn test_redraw_detaches_old_labels_first() {
        let mut display = dual();
        let first = snapshot(5, WindowState::Full { average: 5.0 });
        let second = snapshot(6, WindowState::Full { average: 5.5 });
        display.show(&first).unwrap();
        display.show(&second).unwrap();

        let ops = &display.panel().backend().ops;
        // draw, draw, flush, then erase/draw per region
        assert_eq!(ops[3], Op::Erase(Region::Primary));
        assert!(matches!(ops[4], Op::Draw(Region::Primary, ..)));
        assert_eq!(ops[5], Op::Erase(Region::Secondary));
        assert!(matches!(ops[6], Op::Draw(Region::Secondary, ..)));
        assert_eq!(display.panel().backend().drawn().count(), 4);
    }

    #[test]
    fn test_sub_minute_window_caption() {
        let mut display = AqiPanel::new(RecordingBackend::default(), DisplayLayout::Dual, 45_000);
        display
            .show(&snapshot(3, WindowState::Full { average: 3.0 }))
            .unwrap();

        assert!(text(&display, Region::Secondary).contains("\n45 s average:\n"));
    }

    #[test]
    fn test_from_config() {
        let config = MonitorConfig::dual_panel();
        let display = AqiPanel::from_config(RecordingBackend::default(), &config);
        assert_eq!(display.layout(), DisplayLayout::Dual);
    }

    #[test]
    fn test_failed_redraw_keeps_last_values() {
        let mut display = dual();
        display
            .show(&snapshot(5, WindowState::Full { average: 5.0 }))
            .unwrap();
        display.panel_mut().backend_mut().fail_once = true;

        let result = display.show(&snapshot(80, WindowState::Full { average: 80.0 }));
        assert_eq!(result, Err(DisplayError::Communication));
        assert_eq!(text(&display, Region::Primary), "AQI: 20");
        assert!(text(&display, Region::Secondary).starts_with("PM2.5: 5 ug/m3"));
    }

    #[test]
    fn test_backend_error_propagates() {
        let mut display = dual();
        display.panel_mut().backend_mut().fail = true;

        assert_eq!(
            display.show(&snapshot(5, WindowState::Full { average: 5.0 })),
            Err(DisplayError::Communication)
        );
    }
}
