#![cfg(feature = "blocking")]

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
use opt4048::blocking::Opt4048;
use opt4048::common::{ADDRESS_SDA, Config, Threshold};
use opt4048::error::{Error, IntegrityMismatch};

const ADDRESS: u8 = 0x44;

/// exponent 3, mantissa 0x00123, counter 5, integrity code 0b0010.
const SAMPLE: [u8; 4] = [0x30, 0x01, 0x23, 0x52];

fn burst(records: [[u8; 4]; 4]) -> Vec<u8> {
    records.concat()
}

#[test]
fn reads_all_channels_in_one_burst() {
    let expectations = [Transaction::write_read(
        ADDRESS,
        vec![0x00],
        burst([SAMPLE, [0; 4], [0xFF, 0xFF, 0xFF, 0xFC], SAMPLE]),
    )];
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), Config::default());

    let measurement = sensor.read_channels().unwrap();
    assert_eq!(measurement.channels, [0x918, 0, 0xF_FFFF << 15, 0x918]);

    sensor.destroy().done();
}

#[test]
fn corrupt_channel_fails_the_whole_read() {
    let mut corrupt = SAMPLE;
    corrupt[3] ^= 0b0100;
    let expectations = [Transaction::write_read(
        ADDRESS,
        vec![0x00],
        burst([SAMPLE, SAMPLE, SAMPLE, corrupt]),
    )];
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), Config::default());

    match sensor.read_channels() {
        Err(Error::IntegrityMismatch(mismatch)) => assert_eq!(
            mismatch,
            IntegrityMismatch {
                channel: 3,
                expected: 0b0010,
                received: 0b0110,
            }
        ),
        other => panic!("expected integrity mismatch, got {other:?}"),
    }

    sensor.destroy().done();
}

#[test]
fn colorimetry_from_burst() {
    let expectations = [Transaction::write_read(
        ADDRESS,
        vec![0x00],
        burst([SAMPLE, SAMPLE, SAMPLE, [0; 4]]),
    )];
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), Config::default());

    let colorimetry = sensor.read_colorimetry().unwrap();
    assert!(colorimetry.cie_x > 0.30 && colorimetry.cie_x < 0.31);
    assert!(colorimetry.cie_y > 0.13 && colorimetry.cie_y < 0.14);
    assert!(colorimetry.lux > 0.0);

    sensor.destroy().done();
}

#[test]
fn darkness_is_degenerate() {
    let expectations = [Transaction::write_read(ADDRESS, vec![0x00], vec![0; 16])];
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), Config::default());

    assert!(matches!(
        sensor.read_colorimetry(),
        Err(Error::DegenerateColorSum)
    ));

    sensor.destroy().done();
}

#[test]
fn bus_errors_are_passed_through() {
    let expectations =
        [Transaction::write_read(ADDRESS, vec![0x00], vec![0; 16]).with_error(ErrorKind::Other)];
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), Config::default());

    assert!(matches!(
        sensor.read_channels(),
        Err(Error::I2c(ErrorKind::Other))
    ));

    sensor.destroy().done();
}

#[test]
fn device_id() {
    let expectations = [
        Transaction::write_read(ADDRESS_SDA, vec![0x11], vec![0x08, 0x21]),
        Transaction::write_read(ADDRESS_SDA, vec![0x11], vec![0x30, 0x84]),
    ];
    let config = Config {
        address: ADDRESS_SDA,
    };
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), config);

    sensor.verify_device_id().unwrap();
    assert!(matches!(
        sensor.verify_device_id(),
        Err(Error::UnexpectedDeviceId(0x3084))
    ));

    sensor.destroy().done();
}

#[test]
fn thresholds() {
    let expectations = [
        Transaction::write(ADDRESS, vec![0x08, 0x5B, 0xB8]),
        Transaction::write(ADDRESS, vec![0x09, 0x7F, 0xFF]),
        Transaction::write_read(ADDRESS, vec![0x08], vec![0x5B, 0xB8]),
        Transaction::write_read(ADDRESS, vec![0x09], vec![0x7F, 0xFF]),
    ];
    let mut sensor = Opt4048::new(I2cMock::new(&expectations), Config::default());

    sensor.set_threshold(Threshold::Low, 3000 << 13).unwrap();
    sensor.set_threshold(Threshold::High, u32::MAX).unwrap();
    assert_eq!(sensor.threshold(Threshold::Low).unwrap(), 3000 << 13);
    assert_eq!(sensor.threshold(Threshold::High).unwrap(), 4095 << 15);

    sensor.destroy().done();
}
