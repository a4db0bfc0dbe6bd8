//! Frame layout for the PMS5003 data stream.
//!
//! Frame format (all multi-byte fields big-endian):
//! - START (2 bytes): 0x42 0x4D
//! - LENGTH (2 bytes): number of bytes after this field, always 28
//! - DATA (26 bytes): thirteen u16 words, see [`MeasurementRecord`]
//! - CHECKSUM (2 bytes): sum of bytes 0-29

/// First frame synchronization byte
pub const FRAME_START_1: u8 = 0x42;

/// Second frame synchronization byte
pub const FRAME_START_2: u8 = 0x4D;

/// Complete frame size in bytes
pub const FRAME_LEN: usize = 32;

/// Value the length field must carry
pub const FRAME_LENGTH_FIELD: u16 = 28;

/// Largest chunk handed over by the UART per read
pub const CHUNK_LEN: usize = 32;

/// Number of data words between the length field and the checksum
pub const DATA_WORDS: usize = 13;

/// Offset of the first data word
const DATA_OFFSET: usize = 4;

/// Offset of the checksum field (also the number of summed bytes)
const CHECKSUM_OFFSET: usize = 30;

/// One decoded sensor measurement.
///
/// Mass concentrations are in µg/m³, particle counts are per 0.1 L of air
/// above the given diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementRecord {
    /// PM1.0, standard particle (CF=1)
    pub pm1_0_standard: u16,
    /// PM2.5, standard particle (CF=1)
    pub pm2_5_standard: u16,
    /// PM10, standard particle (CF=1)
    pub pm10_standard: u16,
    /// PM1.0, atmospheric environment
    pub pm1_0_env: u16,
    /// PM2.5, atmospheric environment
    pub pm2_5_env: u16,
    /// PM10, atmospheric environment
    pub pm10_env: u16,
    /// Particles > 0.3 µm
    pub particles_0_3um: u16,
    /// Particles > 0.5 µm
    pub particles_0_5um: u16,
    /// Particles > 1.0 µm
    pub particles_1_0um: u16,
    /// Particles > 2.5 µm
    pub particles_2_5um: u16,
    /// Particles > 5.0 µm
    pub particles_5_0um: u16,
    /// Particles > 10 µm
    pub particles_10um: u16,
    /// Reserved word (firmware version / error code on some revisions)
    pub reserved: u16,
}

impl MeasurementRecord {
    /// Build a record from the thirteen data words in wire order
    pub const fn from_words(w: [u16; DATA_WORDS]) -> Self {
        Self {
            pm1_0_standard: w[0],
            pm2_5_standard: w[1],
            pm10_standard: w[2],
            pm1_0_env: w[3],
            pm2_5_env: w[4],
            pm10_env: w[5],
            particles_0_3um: w[6],
            particles_0_5um: w[7],
            particles_1_0um: w[8],
            particles_2_5um: w[9],
            particles_5_0um: w[10],
            particles_10um: w[11],
            reserved: w[12],
        }
    }

    /// The thirteen data words in wire order
    pub const fn to_words(&self) -> [u16; DATA_WORDS] {
        [
            self.pm1_0_standard,
            self.pm2_5_standard,
            self.pm10_standard,
            self.pm1_0_env,
            self.pm2_5_env,
            self.pm10_env,
            self.particles_0_3um,
            self.particles_0_5um,
            self.particles_1_0um,
            self.particles_2_5um,
            self.particles_5_0um,
            self.particles_10um,
            self.reserved,
        ]
    }
}

/// Field accessors over a raw 32-byte frame window
pub struct Frame;

impl Frame {
    /// Read a big-endian word at `offset`
    fn word(window: &[u8; FRAME_LEN], offset: usize) -> u16 {
        u16::from_be_bytes([window[offset], window[offset + 1]])
    }

    /// Value of the length field (bytes 2-3)
    pub fn length_field(window: &[u8; FRAME_LEN]) -> u16 {
        Self::word(window, 2)
    }

    /// Parse the thirteen data words (bytes 4-29)
    pub fn parse_record(window: &[u8; FRAME_LEN]) -> MeasurementRecord {
        let mut words = [0u16; DATA_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = Self::word(window, DATA_OFFSET + 2 * i);
        }
        MeasurementRecord::from_words(words)
    }

    /// Sum of bytes 0-29, full width
    ///
    /// Thirty bytes cannot overflow a u16, but the sum is kept at u32 so a
    /// comparison with the received field never wraps.
    pub fn computed_checksum(window: &[u8; FRAME_LEN]) -> u32 {
        window[..CHECKSUM_OFFSET].iter().map(|&b| b as u32).sum()
    }

    /// Checksum carried in bytes 30-31
    pub fn received_checksum(window: &[u8; FRAME_LEN]) -> u16 {
        Self::word(window, CHECKSUM_OFFSET)
    }

    /// Encode a record into a complete, correctly checksummed frame
    ///
    /// The sensor never receives these; they feed simulators and tests.
    pub fn encode(record: &MeasurementRecord) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = FRAME_START_1;
        frame[1] = FRAME_START_2;
        frame[2..4].copy_from_slice(&FRAME_LENGTH_FIELD.to_be_bytes());

        for (i, word) in record.to_words().iter().enumerate() {
            let offset = DATA_OFFSET + 2 * i;
            frame[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
        }

        let checksum = (Self::computed_checksum(&frame) % 65_536) as u16;
        frame[CHECKSUM_OFFSET..].copy_from_slice(&checksum.to_be_bytes());
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MeasurementRecord {
        MeasurementRecord::from_words([
            1, 2, 3, 4, 35, 6, 1200, 400, 90, 12, 3, 1, 0x9100,
        ])
    }

    #[test]
    fn test_encode_header_and_length() {
        let frame = Frame::encode(&sample_record());

        assert_eq!(frame[0], FRAME_START_1);
        assert_eq!(frame[1], FRAME_START_2);
        assert_eq!(Frame::length_field(&frame), FRAME_LENGTH_FIELD);
    }

    #[test]
    fn test_encode_field_positions() {
        let frame = Frame::encode(&sample_record());

        // pm2_5_env is the fifth word, offset 12
        assert_eq!(&frame[12..14], &[0x00, 35]);
        // particles_0_3um = 1200 = 0x04B0 at offset 16
        assert_eq!(&frame[16..18], &[0x04, 0xB0]);
        // reserved word at offset 28
        assert_eq!(&frame[28..30], &[0x91, 0x00]);
    }

    #[test]
    fn test_checksum_matches_sum_of_first_thirty_bytes() {
        let frame = Frame::encode(&sample_record());
        let sum: u32 = frame[..30].iter().map(|&b| b as u32).sum();

        assert_eq!(Frame::computed_checksum(&frame), sum);
        assert_eq!(Frame::received_checksum(&frame) as u32, sum);
    }

    #[test]
    fn test_parse_record_reads_every_word() {
        let record = sample_record();
        let frame = Frame::encode(&record);

        assert_eq!(Frame::parse_record(&frame), record);
    }

    #[test]
    fn test_words_keep_wire_order() {
        let words = [10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22];
        let record = MeasurementRecord::from_words(words);

        assert_eq!(record.pm1_0_standard, 10);
        assert_eq!(record.pm2_5_env, 14);
        assert_eq!(record.particles_10um, 21);
        assert_eq!(record.to_words(), words);
    }
}
