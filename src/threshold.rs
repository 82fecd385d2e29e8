//! Encoding of the low and high threshold registers.
//!
//! Thresholds use a compressed format of a 4-bit exponent (bits 15–12) and
//! a 12-bit mantissa (bits 11–0), representing the ADC code
//! `mantissa << (8 + exponent)`. See section 8.6.1.9 of the [datasheet].
//!
//! [datasheet]: https://www.ti.com/lit/ds/symlink/opt4048.pdf

use crate::bits::{REGISTER_MANTISSA_MASK, pack_exponent_mantissa, unpack_exponent_mantissa};

/// Fixed shift added to the exponent when decoding.
pub const EXPONENT_BIAS: u32 = 8;
/// Largest exponent produced by [`EncodedThreshold::encode`].
///
/// Beyond this the threshold would exceed any ADC code the sensor can
/// produce, so encoding saturates here.
pub const MAX_ENCODED_EXPONENT: u8 = 15 - EXPONENT_BIAS as u8;
pub const MAX_MANTISSA: u16 = REGISTER_MANTISSA_MASK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedThreshold {
    pub exponent: u8,
    pub mantissa: u16,
}

impl EncodedThreshold {
    /// Encode an ADC code with the smallest exponent whose mantissa fits in
    /// 12 bits.
    ///
    /// Low bits that do not fit are truncated, so the encoded threshold
    /// never exceeds `value`. Values above `4095 << 15` saturate to
    /// mantissa 4095, exponent 7.
    pub fn encode(value: u32) -> Self {
        let mut exponent = 0;
        let mut mantissa = value >> EXPONENT_BIAS;
        while mantissa > u32::from(MAX_MANTISSA) && exponent < MAX_ENCODED_EXPONENT {
            mantissa >>= 1;
            exponent += 1;
        }

        if mantissa > u32::from(MAX_MANTISSA) {
            debug!("threshold {} saturated", value);
            return Self {
                exponent: MAX_ENCODED_EXPONENT,
                mantissa: MAX_MANTISSA,
            };
        }

        Self {
            exponent,
            mantissa: mantissa as u16,
        }
    }

    /// The ADC code this threshold represents.
    ///
    /// Any exponent the register can hold is accepted, which needs up to
    /// 35 bits.
    pub fn decode(&self) -> u64 {
        u64::from(self.mantissa) << (EXPONENT_BIAS + u32::from(self.exponent))
    }

    pub fn from_register(register: u16) -> Self {
        let (exponent, mantissa) = unpack_exponent_mantissa(register);
        Self { exponent, mantissa }
    }

    pub fn to_register(&self) -> u16 {
        pack_exponent_mantissa(self.exponent, self.mantissa)
    }
}
