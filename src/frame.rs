//! Decoding of the four channel result records.
//!
//! Each channel occupies two 16-bit registers, read MSB-first:
//!
//! ```text
//! MSB register: E[3:0]  R[19:8]
//! LSB register: R[7:0]  COUNTER[3:0]  CRC[3:0]
//! ```
//!
//! where `E` is the exponent and `R` the mantissa. The ADC code for the
//! channel is `R << E`. See section 8.6.1 of the [datasheet].
//!
//! [datasheet]: https://www.ti.com/lit/ds/symlink/opt4048.pdf

use crate::bits::NIBBLE_MASK;
use crate::crc::validate_integrity;
use crate::error::IntegrityMismatch;

/// Number of bytes in one channel record.
pub const CHANNEL_RECORD_LEN: usize = 4;
/// Number of colour channels.
pub const CHANNEL_COUNT: usize = 4;
/// Number of bytes returned by a burst read of all channels.
pub const BURST_LEN: usize = CHANNEL_RECORD_LEN * CHANNEL_COUNT;

/// One channel's sample, split into its register fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelFrame {
    /// 4-bit exponent. The sensor only uses 0–6 in practice.
    pub exponent: u8,
    /// 20-bit mantissa.
    pub mantissa: u32,
    /// 4-bit rolling sample counter.
    pub counter: u8,
    /// 4-bit integrity code as sent by the sensor.
    pub integrity_code: u8,
}

impl ChannelFrame {
    /// Split a `[MSB_hi, MSB_lo, LSB_hi, LSB_lo]` record into its fields.
    pub fn from_bytes(bytes: [u8; CHANNEL_RECORD_LEN]) -> Self {
        let [b0, b1, b2, b3] = bytes;
        Self {
            exponent: b0 >> 4,
            mantissa: u32::from(b0 & NIBBLE_MASK) << 16 | u32::from(b1) << 8 | u32::from(b2),
            counter: b3 >> 4,
            integrity_code: b3 & NIBBLE_MASK,
        }
    }

    /// The ADC code, `mantissa << exponent`.
    ///
    /// The full 4-bit exponent range is accepted, so the result needs up to
    /// 35 bits and is returned as a `u64`.
    pub fn code(&self) -> u64 {
        u64::from(self.mantissa) << self.exponent
    }

    /// Check the integrity code, returning the ADC code if it matches.
    ///
    /// `channel` is only used to label the error.
    pub fn verify(&self, channel: u8) -> Result<u64, IntegrityMismatch> {
        validate_integrity(self.exponent, self.mantissa, self.counter, self.integrity_code)
            .map_err(|expected| IntegrityMismatch {
                channel,
                expected,
                received: self.integrity_code,
            })?;
        Ok(self.code())
    }
}

/// Decode and verify all four channels of a burst read.
///
/// Channels are checked in order and the first mismatch fails the whole
/// read: the channels are sampled together, so no partial result is given.
pub fn decode_and_verify_channels(
    bytes: &[u8; BURST_LEN],
) -> Result<[u64; CHANNEL_COUNT], IntegrityMismatch> {
    let mut codes = [0u64; CHANNEL_COUNT];
    for (channel, (record, code)) in bytes
        .chunks_exact(CHANNEL_RECORD_LEN)
        .zip(codes.iter_mut())
        .enumerate()
    {
        let record = [record[0], record[1], record[2], record[3]];
        let frame = ChannelFrame::from_bytes(record);
        *code = frame.verify(channel as u8).inspect_err(|mismatch| {
            warn!(
                "integrity mismatch on channel {}: expected {}, received {}",
                mismatch.channel,
                mismatch.expected,
                mismatch.received
            );
        })?;
    }
    Ok(codes)
}
