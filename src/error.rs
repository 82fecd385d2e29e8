/// A channel's integrity code did not match the one calculated from its
/// exponent, mantissa and counter bits.
///
/// All four channels are sampled together, so a single mismatch discards
/// the whole burst read. Read the channels again to get a fresh sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntegrityMismatch {
    /// Index (0–3) of the first channel that failed.
    pub channel: u8,
    /// Code calculated from the sample bits.
    pub expected: u8,
    /// Code read from the sensor.
    pub received: u8,
}

impl core::fmt::Display for IntegrityMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "integrity check failed for channel {} (expected {:#06b}, received {:#06b})",
            self.channel, self.expected, self.received
        )
    }
}

impl core::error::Error for IntegrityMismatch {}

/// The tristimulus sum X + Y + Z was not positive, so chromaticity is
/// undefined. This is what an all-dark reading produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DegenerateColorSum;

impl core::fmt::Display for DegenerateColorSum {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("tristimulus sum is not positive, chromaticity is undefined")
    }
}

impl core::error::Error for DegenerateColorSum {}

#[derive(Debug)]
pub enum Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    IntegrityMismatch(IntegrityMismatch),
    DegenerateColorSum,
    /// The device id register did not hold the OPT4048's id.
    UnexpectedDeviceId(u16),
    I2c(I2cError),
}

impl<I2cError> From<I2cError> for Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    fn from(value: I2cError) -> Self {
        Error::I2c(value)
    }
}

impl<I2cError> core::fmt::Display for Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::IntegrityMismatch(mismatch) => write!(f, "{mismatch}"),
            Error::DegenerateColorSum => write!(f, "{}", DegenerateColorSum),
            Error::UnexpectedDeviceId(id) => {
                write!(f, "Unexpected device id {id:#06x}, is this an OPT4048?")
            }
            Error::I2c(e) => write!(f, "Received I2C error: {:?}", e),
        }
    }
}

impl<I> core::error::Error for Error<I> where I: embedded_hal::i2c::Error {}
