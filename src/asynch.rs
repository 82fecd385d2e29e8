use embedded_hal_async::i2c::I2c;

use crate::common::{
    CHANNEL_0_MSB_REGISTER, Config, DEVICE_ID, DEVICE_ID_REGISTER, Measurement, Threshold,
    Unvalidated, threshold_from_read_bytes, threshold_write_bytes,
};
use crate::conversions::Colorimetry;
use crate::error::Error;
use crate::frame::BURST_LEN;

pub struct Opt4048<I: I2c> {
    i2c: I,
    read_buffer: [u8; BURST_LEN],
    pub config: Config,
}

impl<I: I2c> Opt4048<I> {
    pub fn new(i2c: I, config: Config) -> Self {
        Self {
            i2c,
            read_buffer: [0u8; BURST_LEN],
            config,
        }
    }

    pub fn destroy(self) -> I {
        self.i2c
    }

    pub async fn device_id(&mut self) -> Result<u16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.config.address, &[DEVICE_ID_REGISTER], &mut buffer)
            .await?;
        Ok(u16::from_be_bytes(buffer))
    }

    /// Check that the device at the configured address is an OPT4048.
    pub async fn verify_device_id(&mut self) -> Result<(), Error<I::Error>> {
        match self.device_id().await? {
            DEVICE_ID => Ok(()),
            id => {
                warn!("unexpected device id {}", id);
                Err(Error::UnexpectedDeviceId(id))
            }
        }
    }

    /// Read the ADC codes of all four channels in a single burst.
    pub async fn read_channels(&mut self) -> Result<Measurement, Error<I::Error>> {
        self.i2c
            .write_read(
                self.config.address,
                &[CHANNEL_0_MSB_REGISTER],
                &mut self.read_buffer,
            )
            .await?;
        Measurement::from_read_bytes(Unvalidated::new(self.read_buffer))
            .map_err(Error::IntegrityMismatch)
    }

    pub async fn read_colorimetry(&mut self) -> Result<Colorimetry, Error<I::Error>> {
        self.read_channels()
            .await?
            .colorimetry()
            .map_err(|_| Error::DegenerateColorSum)
    }

    pub async fn set_threshold(
        &mut self,
        threshold: Threshold,
        value: u32,
    ) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.config.address, &threshold_write_bytes(threshold, value))
            .await?;
        Ok(())
    }

    pub async fn threshold(&mut self, threshold: Threshold) -> Result<u64, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.config.address, &[threshold.register()], &mut buffer)
            .await?;
        Ok(threshold_from_read_bytes(buffer))
    }
}
