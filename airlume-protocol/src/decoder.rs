//! Frame validation and decoding.

use crate::accumulator::ByteAccumulator;
use crate::frame::{Frame, MeasurementRecord, FRAME_LEN, FRAME_LENGTH_FIELD, FRAME_START_2};
use crate::sync::SyncError;

/// Validates the leading frame window of a [`ByteAccumulator`]
///
/// Every outcome mutates the accumulator: a decoded frame is consumed, a
/// stray header byte is dropped, anything else flushes the buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder;

impl FrameDecoder {
    /// Create a new decoder
    pub const fn new() -> Self {
        Self
    }

    /// Try to decode the frame at the front of `acc`
    pub fn decode(&self, acc: &mut ByteAccumulator) -> Result<MeasurementRecord, SyncError> {
        // Work on a copy so later trimming cannot shorten the window mid-parse
        let window: [u8; FRAME_LEN] = match acc.candidate() {
            Some(window) => *window,
            None => {
                acc.clear();
                return Err(SyncError::StructuralOverrun);
            }
        };

        if window[1] != FRAME_START_2 {
            acc.drop_front(1);
            return Err(SyncError::BadSecondHeader);
        }

        let length = Frame::length_field(&window);
        if length != FRAME_LENGTH_FIELD {
            acc.clear();
            return Err(SyncError::BadLength(length));
        }

        let record = Frame::parse_record(&window);

        let computed = Frame::computed_checksum(&window);
        let received = Frame::received_checksum(&window);
        if computed != received as u32 {
            acc.clear();
            return Err(SyncError::ChecksumMismatch { computed, received });
        }

        acc.drop_front(FRAME_LEN);
        Ok(record)
    }
}
