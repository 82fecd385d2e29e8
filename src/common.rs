use embedded_hal::i2c::SevenBitAddress;

use crate::conversions::{Colorimetry, colorimetry, lux};
use crate::error::{DegenerateColorSum, IntegrityMismatch};
use crate::frame::{BURST_LEN, CHANNEL_COUNT, decode_and_verify_channels};
use crate::threshold::EncodedThreshold;

/// First of the eight channel result registers (CH0 MSB).
pub(crate) const CHANNEL_0_MSB_REGISTER: u8 = 0x00;
pub(crate) const THRESHOLD_LOW_REGISTER: u8 = 0x08;
pub(crate) const THRESHOLD_HIGH_REGISTER: u8 = 0x09;
pub(crate) const DEVICE_ID_REGISTER: u8 = 0x11;

/// Contents of the device id register after reset.
pub const DEVICE_ID: u16 = 0x0821;

/// I2C address with the ADDR pin tied to ground.
pub const ADDRESS_GND: SevenBitAddress = 0x44;
/// I2C address with the ADDR pin tied to VDD.
pub const ADDRESS_VDD: SevenBitAddress = 0x45;
/// I2C address with the ADDR pin tied to SDA.
pub const ADDRESS_SDA: SevenBitAddress = 0x46;

/// Internal wrapper around the 16 bytes of a burst read of the channel
/// registers, so that the channel codes may only be accessed after passing
/// integrity verification.
pub(crate) struct Unvalidated([u8; BURST_LEN]);

impl Unvalidated {
    pub(crate) fn new(bytes: [u8; BURST_LEN]) -> Self {
        Self(bytes)
    }

    /// Return the four channel ADC codes if every channel's integrity code
    /// is valid, otherwise the first mismatch.
    ///
    /// See section 8.6.1 of the [datasheet] for the register layout.
    ///
    /// [datasheet]: https://www.ti.com/lit/ds/symlink/opt4048.pdf
    pub(crate) fn try_get_channels(self) -> Result<[u64; CHANNEL_COUNT], IntegrityMismatch> {
        decode_and_verify_channels(&self.0)
    }
}

/// One of the two threshold registers used for the interrupt and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Threshold {
    Low,
    High,
}

impl Threshold {
    pub(crate) fn register(&self) -> u8 {
        match self {
            Threshold::Low => THRESHOLD_LOW_REGISTER,
            Threshold::High => THRESHOLD_HIGH_REGISTER,
        }
    }
}

/// Bytes to write to set a threshold: register address, then the encoded
/// value MSB-first.
pub(crate) fn threshold_write_bytes(threshold: Threshold, value: u32) -> [u8; 3] {
    let [msb, lsb] = EncodedThreshold::encode(value).to_register().to_be_bytes();
    [threshold.register(), msb, lsb]
}

pub(crate) fn threshold_from_read_bytes(bytes: [u8; 2]) -> u64 {
    EncodedThreshold::from_register(u16::from_be_bytes(bytes)).decode()
}

pub struct Config {
    pub address: SevenBitAddress,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: ADDRESS_GND,
        }
    }
}

/// ADC codes of the four channels, all from the same conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub channels: [u64; CHANNEL_COUNT],
}

impl Measurement {
    pub(crate) fn from_read_bytes(sensor_data: Unvalidated) -> Result<Self, IntegrityMismatch> {
        Ok(Measurement {
            channels: sensor_data.try_get_channels()?,
        })
    }

    pub fn colorimetry(&self) -> Result<Colorimetry, DegenerateColorSum> {
        colorimetry(&self.channels)
    }

    pub fn lux(&self) -> f64 {
        lux(&self.channels)
    }

    /// Correlated colour temperature in kelvin, or 0.0 if undefined.
    pub fn color_temperature(&self) -> f64 {
        self.colorimetry()
            .map(|c| c.color_temperature())
            .unwrap_or(0.0)
    }
}
