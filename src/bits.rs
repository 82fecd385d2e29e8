/// Width of the mantissa field in a packed exponent/mantissa register.
pub(crate) const REGISTER_MANTISSA_BITS: u32 = 12;
pub(crate) const REGISTER_MANTISSA_MASK: u16 = (1 << REGISTER_MANTISSA_BITS) - 1;
pub(crate) const NIBBLE_MASK: u8 = 0x0F;

/// The bit at position `n` of `value`, as 0 or 1.
#[must_use]
pub(crate) const fn bit(value: u32, n: u32) -> u8 {
    ((value >> n) & 1) as u8
}

/// XOR of every bit in `value`.
#[must_use]
pub(crate) const fn parity(value: u32) -> u8 {
    (value.count_ones() & 1) as u8
}

/// Pack an exponent into bits 15–12 and a mantissa into bits 11–0 of a
/// 16-bit register value. Anything above each field's width is dropped.
#[must_use]
pub(crate) const fn pack_exponent_mantissa(exponent: u8, mantissa: u16) -> u16 {
    ((exponent & NIBBLE_MASK) as u16) << REGISTER_MANTISSA_BITS | (mantissa & REGISTER_MANTISSA_MASK)
}

/// Inverse of [`pack_exponent_mantissa`].
#[must_use]
pub(crate) const fn unpack_exponent_mantissa(register: u16) -> (u8, u16) {
    (
        (register >> REGISTER_MANTISSA_BITS) as u8 & NIBBLE_MASK,
        register & REGISTER_MANTISSA_MASK,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_bits() {
        assert_eq!(bit(0b1010, 0), 0);
        assert_eq!(bit(0b1010, 1), 1);
        assert_eq!(bit(0b1010, 3), 1);
        assert_eq!(bit(1 << 19, 19), 1);
    }

    #[test]
    fn parity_counts_set_bits() {
        assert_eq!(parity(0), 0);
        assert_eq!(parity(0b1), 1);
        assert_eq!(parity(0b1011), 1);
        assert_eq!(parity(0xFFFFF), 0);
    }

    #[test]
    fn register_fields() {
        assert_eq!(pack_exponent_mantissa(0x7, 0xFFF), 0x7FFF);
        assert_eq!(pack_exponent_mantissa(0x3, 0x123), 0x3123);
        // Oversized inputs are truncated to their field widths.
        assert_eq!(pack_exponent_mantissa(0x1F, 0x1FFF), 0xFFFF);
        assert_eq!(unpack_exponent_mantissa(0xA5C3), (0xA, 0x5C3));
    }
}
