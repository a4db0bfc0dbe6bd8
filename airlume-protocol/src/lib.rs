//! PMS5003 Serial Protocol
//!
//! This crate decodes the free-running UART stream of a Plantower-style
//! particulate matter sensor. The sensor pushes one fixed-size frame roughly
//! every second with no flow control, so the receiver has to find frame
//! boundaries on its own and survive dropped or doubled bytes.
//!
//! # Frame Overview
//!
//! ```text
//! ┌──────┬──────┬────────┬──────────────────────┬──────────┬──────────┐
//! │ 0x42 │ 0x4D │ LENGTH │ 12 DATA WORDS        │ RESERVED │ CHECKSUM │
//! │ 1B   │ 1B   │ 2B =28 │ 24B (big-endian u16) │ 2B       │ 2B       │
//! └──────┴──────┴────────┴──────────────────────┴──────────┴──────────┘
//! ```
//!
//! The checksum is the plain sum of the first 30 bytes.
//!
//! Bytes flow through a [`ByteAccumulator`] (capped buffer with header
//! resynchronization) into a [`FrameDecoder`]; [`FrameSync`] wires the two
//! together for one poll cycle.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod accumulator;
pub mod decoder;
pub mod frame;
pub mod sync;

pub use accumulator::{ByteAccumulator, MAX_BUFFER_LEN};
pub use decoder::FrameDecoder;
pub use frame::{
    Frame, MeasurementRecord, CHUNK_LEN, FRAME_LEN, FRAME_LENGTH_FIELD, FRAME_START_1,
    FRAME_START_2,
};
pub use sync::{FrameSync, SyncError, SyncStats};
