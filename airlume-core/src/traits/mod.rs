//! Collaborator traits
//!
//! These traits define the interface between the monitor logic and the
//! hardware-specific implementations in `airlume-drivers` and
//! `airlume-display`.

pub mod display;
pub mod sensor;

pub use display::{AqiDisplay, DisplayError};
pub use sensor::{
    GasBaseline, GasReading, GasSensor, NoGasSensor, ParticleSource, SensorError, SourceError,
    GAS_POLL_BUDGET_MS,
};
