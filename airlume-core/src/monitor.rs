//! Cooperative monitor loop
//!
//! [`AirMonitor::tick`] is called from a busy loop. Each call does at most one
//! sensor read, one decode attempt, one average/AQI update and one redraw,
//! and returns immediately when nothing is due. Nothing in here sleeps or
//! fails: decode rejections, sensor errors and display errors are logged and
//! the display keeps its last good values. The one bounded wait is an
//! attached gas sensor's command time, capped at
//! [`GAS_POLL_BUDGET_MS`](crate::traits::GAS_POLL_BUDGET_MS) per read gate.

use airlume_protocol::{FrameSync, MeasurementRecord, SyncError, SyncStats, CHUNK_LEN};

use crate::aqi::{self, AqiError, AqiReading};
use crate::averager::{RollingAverager, WindowState};
use crate::config::MonitorConfig;
use crate::scheduler::{Millis, SampleGate};
use crate::traits::{
    AqiDisplay, DisplayError, GasReading, GasSensor, NoGasSensor, ParticleSource, SensorError,
};

/// Latest computed values, as handed to the display
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Most recent decoded record
    pub record: MeasurementRecord,
    /// Rolling window state after the record was added
    pub window: WindowState,
    /// AQI of the average, or of the latest reading while the average is
    /// withheld
    pub aqi: Result<AqiReading, AqiError>,
}

impl Snapshot {
    /// Latest environmental PM2.5 reading
    pub fn latest_pm2_5(&self) -> u16 {
        self.record.pm2_5_env
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Decode outcome, `None` while the read gate was closed
    pub decoded: Option<Result<MeasurementRecord, SyncError>>,
    /// Gas sensor reading taken alongside the decode, if a sensor is fitted
    pub gas: Option<Result<GasReading, SensorError>>,
    /// Render outcome, `None` when no redraw was due
    pub render: Option<Result<(), DisplayError>>,
}

impl TickReport {
    const IDLE: TickReport = TickReport {
        decoded: None,
        gas: None,
        render: None,
    };

    /// Whether the display was redrawn successfully
    pub fn rendered(&self) -> bool {
        matches!(self.render, Some(Ok(())))
    }
}

/// PM2.5 monitor wiring the decode pipeline to its collaborators
pub struct AirMonitor<S, D, G = NoGasSensor> {
    config: MonitorConfig,
    sync: FrameSync,
    averager: RollingAverager,
    read_gate: SampleGate,
    output_gate: Option<SampleGate>,
    snapshot: Option<Snapshot>,
    source: S,
    display: D,
    gas: Option<G>,
}

impl<S: ParticleSource, D: AqiDisplay> AirMonitor<S, D, NoGasSensor> {
    /// Create a monitor without a gas sensor
    ///
    /// `config` should already be validated; see [`MonitorConfig::validate`].
    pub fn new(config: MonitorConfig, source: S, display: D) -> Self {
        Self {
            sync: FrameSync::new(),
            averager: RollingAverager::new(config.window_capacity as usize, config.warmup),
            read_gate: SampleGate::new(config.read_period_ms),
            output_gate: config.output_period_ms.map(SampleGate::new),
            snapshot: None,
            source,
            display,
            gas: None,
            config,
        }
    }
}

impl<S: ParticleSource, D: AqiDisplay, G: GasSensor> AirMonitor<S, D, G> {
    /// Attach a secondary gas sensor for diagnostic logging
    pub fn with_gas_sensor<G2: GasSensor>(self, gas: G2) -> AirMonitor<S, D, G2> {
        AirMonitor {
            config: self.config,
            sync: self.sync,
            averager: self.averager,
            read_gate: self.read_gate,
            output_gate: self.output_gate,
            snapshot: self.snapshot,
            source: self.source,
            display: self.display,
            gas: Some(gas),
        }
    }

    /// Run one loop iteration at time `now`
    pub fn tick(&mut self, now: Millis) -> TickReport {
        let mut report = TickReport::IDLE;

        if self.read_gate.ready(now) {
            report.decoded = Some(self.read_and_decode());
            report.gas = self.poll_gas();
        }

        let due = match self.output_gate.as_mut() {
            None => matches!(report.decoded, Some(Ok(_))),
            // Only consume the gate when there is something to draw
            Some(gate) => self.snapshot.is_some() && gate.ready(now),
        };

        if due {
            report.render = self.render();
        }

        report
    }

    /// Milliseconds until the next tick can do any work
    ///
    /// Callers that can sleep use this instead of spinning on [`tick`](Self::tick).
    pub fn next_due(&self, now: Millis) -> Millis {
        let read = self.read_gate.remaining(now);
        match (&self.output_gate, &self.snapshot) {
            (Some(gate), Some(_)) => read.min(gate.remaining(now)),
            _ => read,
        }
    }

    /// Forget buffered bytes, the rolling window and the last snapshot
    ///
    /// For use after the sensor has been power-cycled or woken from sleep.
    /// Gate timing is kept.
    pub fn reset(&mut self) {
        self.sync.reset();
        self.averager.clear();
        self.snapshot = None;

        #[cfg(feature = "defmt")]
        defmt::info!("Monitor state reset");
    }

    /// Latest computed values
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Rolling window
    pub fn averager(&self) -> &RollingAverager {
        &self.averager
    }

    /// Frame synchronizer counters
    pub fn stats(&self) -> &SyncStats {
        self.sync.stats()
    }

    /// Active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Display collaborator
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Byte source collaborator
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Read one chunk and attempt one decode
    fn read_and_decode(&mut self) -> Result<MeasurementRecord, SyncError> {
        let mut chunk = [0u8; CHUNK_LEN];
        let len = match self.source.read_chunk(&mut chunk) {
            Ok(n) => n.min(CHUNK_LEN),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Sensor read error: {:?}", _e);
                0
            }
        };

        let result = self.sync.push(&chunk[..len]);
        match result {
            Ok(record) => self.accept(record),
            Err(SyncError::StructuralOverrun) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("buffer overfilled, flushed");
            }
            Err(e) if e.is_pending() => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Waiting for frame: {:?}", e);
            }
            Err(e) if e.flushed_buffer() => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Frame rejected, buffer flushed: {:?}", e);
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Frame rejected: {:?}", _e);
            }
        }
        result
    }

    /// Fold a validated record into the window and recompute the AQI
    fn accept(&mut self, record: MeasurementRecord) {
        if self.config.log_frames {
            log_record(&record);
        }

        self.averager.push(record.pm2_5_env);
        let window = self.averager.current_state();
        let concentration = window
            .average()
            .unwrap_or(record.pm2_5_env as f32);

        self.snapshot = Some(Snapshot {
            record,
            window,
            aqi: aqi::classify(concentration),
        });
    }

    fn poll_gas(&mut self) -> Option<Result<GasReading, SensorError>> {
        let gas = self.gas.as_mut()?;
        let reading = gas.read();

        match (reading, gas.baseline()) {
            (Ok(_r), Ok(_b)) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "eCO2 = {} ppm, TVOC = {} ppb (baseline eCO2 = {=u16:#x}, TVOC = {=u16:#x})",
                    _r.eco2_ppm,
                    _r.tvoc_ppb,
                    _b.eco2,
                    _b.tvoc
                );
            }
            (Ok(_r), Err(_e)) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "eCO2 = {} ppm, TVOC = {} ppb (baseline unavailable: {:?})",
                    _r.eco2_ppm,
                    _r.tvoc_ppb,
                    _e
                );
            }
            (Err(_e), _) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Gas sensor read failed: {:?}", _e);
            }
        }

        Some(reading)
    }

    fn render(&mut self) -> Option<Result<(), DisplayError>> {
        let snapshot = self.snapshot.as_ref()?;
        let result = self.display.show(snapshot);

        if let Err(_e) = result {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display update failed: {:?}", _e);
        }

        Some(result)
    }
}

#[cfg(feature = "defmt")]
fn log_record(record: &MeasurementRecord) {
    defmt::debug!(
        "standard PM1.0: {} PM2.5: {} PM10: {}",
        record.pm1_0_standard,
        record.pm2_5_standard,
        record.pm10_standard
    );
    defmt::debug!(
        "environmental PM1.0: {} PM2.5: {} PM10: {}",
        record.pm1_0_env,
        record.pm2_5_env,
        record.pm10_env
    );
    defmt::debug!(
        "particles/0.1L >0.3um: {} >0.5um: {} >1.0um: {} >2.5um: {} >5.0um: {} >10um: {}",
        record.particles_0_3um,
        record.particles_0_5um,
        record.particles_1_0um,
        record.particles_2_5um,
        record.particles_5_0um,
        record.particles_10um
    );
}

#[cfg(not(feature = "defmt"))]
fn log_record(_record: &MeasurementRecord) {}
