//! Raw byte intake with header resynchronization.

use heapless::Vec;

use crate::frame::{CHUNK_LEN, FRAME_LEN, FRAME_START_1};
use crate::sync::SyncError;

/// Hard cap on buffered bytes; anything beyond this is treated as garbage
pub const MAX_BUFFER_LEN: usize = 200;

/// Backing storage: a full buffer plus one UART chunk
const STORAGE_LEN: usize = MAX_BUFFER_LEN + CHUNK_LEN;

/// Capped intake buffer for the sensor byte stream
///
/// After every [`ingest`](Self::ingest) the buffer is either empty or starts
/// with [`FRAME_START_1`].
#[derive(Debug, Clone, Default)]
pub struct ByteAccumulator {
    buffer: Vec<u8, STORAGE_LEN>,
    /// Leading bytes thrown away while looking for a header
    discarded: u32,
}

impl ByteAccumulator {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarded: 0,
        }
    }

    /// Append incoming bytes and realign the buffer on a header byte
    ///
    /// Returns `Ok(())` once at least one full frame window is buffered,
    /// [`SyncError::ShortFrame`] when more bytes are needed, or
    /// [`SyncError::CapacityOverrun`] when the buffer outgrew
    /// [`MAX_BUFFER_LEN`] and was reset.
    pub fn ingest(&mut self, bytes: &[u8]) -> Result<(), SyncError> {
        let mut overrun = false;

        for &byte in bytes {
            if self.buffer.push(byte).is_err() {
                // Leading junk may be holding the space
                self.resync();
                if self.buffer.push(byte).is_err() {
                    overrun = true;
                    break;
                }
            }
        }

        self.resync();

        if overrun || self.buffer.len() > MAX_BUFFER_LEN {
            self.buffer.clear();
            return Err(SyncError::CapacityOverrun);
        }

        if self.buffer.len() < FRAME_LEN {
            return Err(SyncError::ShortFrame);
        }

        Ok(())
    }

    /// The leading frame-sized window, if enough bytes are buffered
    pub fn candidate(&self) -> Option<&[u8; FRAME_LEN]> {
        self.buffer.get(..FRAME_LEN)?.try_into().ok()
    }

    /// Remove up to `n` bytes from the front
    pub fn drop_front(&mut self, n: usize) {
        let len = self.buffer.len();
        let n = n.min(len);
        self.buffer.copy_within(n..len, 0);
        self.buffer.truncate(len - n);
    }

    /// Discard everything
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Buffered bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Total bytes dropped while hunting for a header
    pub fn discarded(&self) -> u32 {
        self.discarded
    }

    /// Drop leading bytes until the buffer starts with a header byte
    fn resync(&mut self) {
        let skip = self
            .buffer
            .iter()
            .position(|&b| b == FRAME_START_1)
            .unwrap_or(self.buffer.len());

        if skip > 0 {
            self.drop_front(skip);
            self.discarded = self.discarded.wrapping_add(skip as u32);
        }
    }
}
