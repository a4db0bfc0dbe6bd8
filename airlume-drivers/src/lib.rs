//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! airlume-core, written against the airlume-hal bus traits:
//!
//! - Particle sensor (Plantower PMS5003 over UART)
//! - Gas sensor (Sensirion SGP30 over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
