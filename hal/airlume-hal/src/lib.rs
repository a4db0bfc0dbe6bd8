//! Airlume Hardware Abstraction Layer
//!
//! Board support crates implement these traits for their peripherals; the
//! sensor drivers in `airlume-drivers` are written against them only.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  airlume-drivers (PMS5003, SGP30)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  airlume-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board support (UART, I2C, timer)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartRx`] - Non-blocking serial receive
//! - [`i2c::I2cBus`] - I2C master transfers
//! - [`delay::DelayMs`] - Millisecond busy waits
//!
//! Adapters ([`IoUart`], [`HalI2c`], [`HalDelay`]) lift `embedded-io` and
//! `embedded-hal` 1.0 peripherals onto these traits.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod i2c;
pub mod uart;

pub use delay::{DelayMs, HalDelay};
pub use i2c::{HalI2c, I2cBus, I2cConfig};
pub use uart::{IoUart, UartConfig, UartRx};
