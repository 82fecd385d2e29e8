use crate::bits::{bit, parity};

/// Mantissa bits at odd positions 1, 3, …, 19.
const ODD_MANTISSA_BITS: u32 = 0xA_AAAA;
/// Mantissa bits at positions 3, 7, 11, 15, 19.
const EVERY_FOURTH_MANTISSA_BIT: u32 = 0x8_8888;

/// Calculate the 4-bit integrity code for one channel sample.
///
/// The sensor appends this code to every channel so that corruption on the
/// bus can be detected. It is not a polynomial CRC: each output bit is the
/// XOR of a fixed selection of exponent (`E`), mantissa (`R`) and sample
/// counter (`C`) bits, as given in section 8.4.1 of the [datasheet]:
///
/// ```text
/// X[0] = XOR(E[3:0], R[19:0], C[3:0])
/// X[1] = XOR(C[1], C[3], R[1], R[3], …, R[19], E[1], E[3])
/// X[2] = XOR(C[3], R[3], R[7], R[11], R[15], R[19], E[3])
/// X[3] = XOR(R[3], R[11], R[19])
/// ```
///
/// The result is `X[3:0]`, most significant bit first, so it may be
/// compared directly against the low nibble of the channel's LSB register.
///
/// # Example usage
///
/// ```rust,ignore
/// // exponent 3, mantissa 0x00123, counter 5
/// assert_eq!(integrity_code(0x3, 0x00123, 0x5), 0b0010);
/// ```
///
/// [datasheet]: https://www.ti.com/lit/ds/symlink/opt4048.pdf
#[must_use]
pub(crate) fn integrity_code(exponent: u8, mantissa: u32, counter: u8) -> u8 {
    let e = u32::from(exponent);
    let c = u32::from(counter);

    let x0 = parity(e) ^ parity(mantissa) ^ parity(c);
    let x1 = bit(c, 1) ^ bit(c, 3) ^ parity(mantissa & ODD_MANTISSA_BITS) ^ bit(e, 1) ^ bit(e, 3);
    let x2 = bit(c, 3) ^ parity(mantissa & EVERY_FOURTH_MANTISSA_BIT) ^ bit(e, 3);
    let x3 = bit(mantissa, 3) ^ bit(mantissa, 11) ^ bit(mantissa, 19);

    x3 << 3 | x2 << 2 | x1 << 1 | x0
}

/// Compare the received code against the one calculated from the sample,
/// returning the calculated code on mismatch.
pub(crate) fn validate_integrity(
    exponent: u8,
    mantissa: u32,
    counter: u8,
    received: u8,
) -> Result<(), u8> {
    match integrity_code(exponent, mantissa, counter) {
        x if x == received => Ok(()),
        x => Err(x),
    }
}

#[cfg(test)]
mod test {
    use super::{integrity_code, validate_integrity};

    #[test]
    fn all_zero_sample() {
        assert_eq!(integrity_code(0, 0, 0), 0b0000);
    }

    #[test]
    fn datasheet_style_sample() {
        assert_eq!(integrity_code(0x3, 0x00123, 0x5), 0b0010);
    }

    #[test]
    fn all_ones_sample() {
        assert_eq!(integrity_code(0xF, 0xF_FFFF, 0xF), 0b1100);
    }

    #[test]
    fn single_bit_contributions() {
        // Mantissa bit 19 takes part in every equation.
        assert_eq!(integrity_code(0, 1 << 19, 0), 0b1111);
        // Mantissa bit 0 only feeds the overall parity.
        assert_eq!(integrity_code(0, 1, 0), 0b0001);
        // Counter bit 3 feeds X[0], X[1] and X[2].
        assert_eq!(integrity_code(0, 0, 0b1000), 0b0111);
        // Exponent bit 1 feeds X[0] and X[1].
        assert_eq!(integrity_code(0b0010, 0, 0), 0b0011);
    }

    #[test]
    fn deterministic() {
        for exponent in 0..16 {
            for counter in 0..16 {
                let mantissa = 0x5_A5A5 ^ (u32::from(exponent) << 7);
                assert_eq!(
                    integrity_code(exponent, mantissa, counter),
                    integrity_code(exponent, mantissa, counter)
                );
            }
        }
    }

    #[test]
    fn validation() {
        assert_eq!(validate_integrity(0x3, 0x00123, 0x5, 0b0010), Ok(()));
        assert_eq!(validate_integrity(0x3, 0x00123, 0x5, 0b0011), Err(0b0010));
    }
}
