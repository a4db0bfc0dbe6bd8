//! Board-agnostic core logic for the Airlume air quality monitor
//!
//! This crate contains everything between the decoded sensor frame and the
//! text on the screen, with no dependency on specific hardware:
//!
//! - AQI breakpoint table and concentration mapping
//! - Rolling PM2.5 average with warm-up reporting
//! - Rate gates for the decode and render steps
//! - Collaborator traits (particle source, gas sensor, display)
//! - Monitor configuration and loaders
//! - The cooperative monitor tick tying it all together

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod aqi;
pub mod averager;
pub mod config;
pub mod monitor;
pub mod scheduler;
pub mod traits;

pub use aqi::{AqiBand, AqiError, AqiReading, Category, Color};
pub use averager::{RollingAverager, WindowState, MAX_WINDOW};
pub use config::{DisplayLayout, MonitorConfig, WarmupPolicy};
pub use monitor::{AirMonitor, Snapshot, TickReport};
pub use scheduler::{Millis, SampleGate};

pub use airlume_protocol::{MeasurementRecord, SyncError};
