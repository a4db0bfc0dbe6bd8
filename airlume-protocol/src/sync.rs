//! One poll cycle of stream synchronization.
//!
//! [`FrameSync`] owns the accumulator and decoder and runs at most one decode
//! attempt per chunk of incoming bytes. None of the outcomes are fatal: the
//! caller logs what it cares about and polls again.

use crate::accumulator::ByteAccumulator;
use crate::decoder::FrameDecoder;
use crate::frame::MeasurementRecord;

/// Reasons a poll cycle did not produce a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// Fewer than one frame of aligned bytes buffered
    ShortFrame,
    /// Buffer outgrew its cap without a valid frame and was reset
    CapacityOverrun,
    /// First header byte not followed by the second; one byte dropped
    BadSecondHeader,
    /// Length field was not 28; buffer flushed
    BadLength(u16),
    /// Frame window could not be taken; buffer flushed
    StructuralOverrun,
    /// Computed and received checksums differ; buffer flushed
    ChecksumMismatch {
        /// Sum of bytes 0-29
        computed: u32,
        /// Value of bytes 30-31
        received: u16,
    },
}

impl SyncError {
    /// Whether this outcome just means "wait for more bytes"
    pub fn is_pending(&self) -> bool {
        matches!(self, SyncError::ShortFrame | SyncError::BadSecondHeader)
    }

    /// Whether the whole buffer was discarded
    pub fn flushed_buffer(&self) -> bool {
        matches!(
            self,
            SyncError::CapacityOverrun
                | SyncError::BadLength(_)
                | SyncError::StructuralOverrun
                | SyncError::ChecksumMismatch { .. }
        )
    }
}

/// Running counters for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncStats {
    /// Frames decoded successfully
    pub frames: u32,
    /// Stray header bytes skipped
    pub bad_headers: u32,
    /// Frames rejected for a wrong length field
    pub bad_lengths: u32,
    /// Frames rejected for a checksum mismatch
    pub checksum_errors: u32,
    /// Buffer resets for overruns (capacity or structural)
    pub overruns: u32,
}

/// Accumulator and decoder driven together
#[derive(Debug, Clone, Default)]
pub struct FrameSync {
    accumulator: ByteAccumulator,
    decoder: FrameDecoder,
    stats: SyncStats,
}

impl FrameSync {
    /// Create an empty synchronizer
    pub const fn new() -> Self {
        Self {
            accumulator: ByteAccumulator::new(),
            decoder: FrameDecoder::new(),
            stats: SyncStats {
                frames: 0,
                bad_headers: 0,
                bad_lengths: 0,
                checksum_errors: 0,
                overruns: 0,
            },
        }
    }

    /// Ingest one chunk of bytes and attempt at most one decode
    pub fn push(&mut self, bytes: &[u8]) -> Result<MeasurementRecord, SyncError> {
        let result = self
            .accumulator
            .ingest(bytes)
            .and_then(|()| self.decoder.decode(&mut self.accumulator));
        self.record(&result);
        result
    }

    /// Diagnostic counters
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Underlying byte buffer
    pub fn accumulator(&self) -> &ByteAccumulator {
        &self.accumulator
    }

    /// Drop all buffered bytes
    pub fn reset(&mut self) {
        self.accumulator.clear();
    }

    fn record(&mut self, result: &Result<MeasurementRecord, SyncError>) {
        let counter = match result {
            Ok(_) => &mut self.stats.frames,
            Err(SyncError::ShortFrame) => return,
            Err(SyncError::BadSecondHeader) => &mut self.stats.bad_headers,
            Err(SyncError::BadLength(_)) => &mut self.stats.bad_lengths,
            Err(SyncError::ChecksumMismatch { .. }) => &mut self.stats.checksum_errors,
            Err(SyncError::CapacityOverrun | SyncError::StructuralOverrun) => {
                &mut self.stats.overruns
            }
        };
        *counter = counter.wrapping_add(1);
    }
}
