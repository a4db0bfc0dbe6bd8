//! AQI panel rendering for Airlume
//!
//! This crate provides:
//! - `DisplayBackend` trait for the physical panel (TFT, e-paper, etc.)
//! - `Panel`, which owns the labels currently shown in each region
//! - `AqiPanel`, the `AqiDisplay` implementation that turns a monitor
//!   snapshot into an AQI headline and a concentration block
//!
//! # Layout
//!
//! ```text
//! Dual                         Single
//! ┌────────────────────────┐   ┌────────────────────────┐
//! │  AQI: 51               │   │ AQI: 51                │
//! │  (large, band colour)  │   │ PM2.5: 12 ug/m3        │
//! ├────────────────────────┤   │ 5 min average:         │
//! │ PM2.5: 12 ug/m3        │   │ 12.1 ug/m3             │
//! │ 5 min average:         │   │ (one region, band      │
//! │ 12.1 ug/m3             │   │  colour)               │
//! └────────────────────────┘   └────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod panel;
pub mod renderer;

// Re-export key types
pub use airlume_core::traits::DisplayError;
pub use backend::{DisplayBackend, Region};
pub use panel::{Label, Panel, LABEL_LEN};
pub use renderer::AqiPanel;
