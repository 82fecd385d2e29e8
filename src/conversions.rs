//! Channel codes to CIE chromaticity, lux and colour temperature.
//!
//! These functions are used by the methods on [`Measurement`] but are
//! provided here should you need to use them with channel codes obtained
//! some other way.
//!
//! The calibration matrix and formulas can be found in section 8.4.5 of the
//! [datasheet].
//!
//! [`Measurement`]: crate::common::Measurement
//! [datasheet]: https://www.ti.com/lit/ds/symlink/opt4048.pdf

use crate::error::DegenerateColorSum;
use crate::frame::CHANNEL_COUNT;

/// Row per channel, columns X, Y, Z and lux.
const CHANNEL_MATRIX: [[f64; 4]; CHANNEL_COUNT] = [
    [2.34892992e-04, -1.89652390e-05, 1.20811684e-05, 0.0],
    [4.07467441e-05, 1.98958202e-04, -1.58848115e-05, 2.15e-03],
    [9.28619404e-05, -1.69739553e-05, 6.74021520e-04, 0.0],
    [0.0, 0.0, 0.0, 0.0],
];

/// Chromaticity epicentre of McCamy's approximation.
const MCCAMY_X_E: f64 = 0.3320;
const MCCAMY_Y_E: f64 = 0.1858;

/// Device-calibrated CIE XYZ tristimulus values plus illuminance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tristimulus {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub lux: f64,
}

/// CIE 1931 chromaticity coordinates and illuminance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Colorimetry {
    pub cie_x: f64,
    pub cie_y: f64,
    pub lux: f64,
}

impl Colorimetry {
    /// Correlated colour temperature in kelvin, see [`color_temperature`].
    pub fn color_temperature(&self) -> f64 {
        color_temperature(self.cie_x, self.cie_y)
    }
}

/// Apply the calibration matrix to the four channel ADC codes.
pub fn tristimulus(channels: &[u64; CHANNEL_COUNT]) -> Tristimulus {
    let mut xyzl = [0.0; 4];
    for (&code, row) in channels.iter().zip(CHANNEL_MATRIX.iter()) {
        let code = code as f64;
        for (out, coefficient) in xyzl.iter_mut().zip(row) {
            *out += code * coefficient;
        }
    }
    let [x, y, z, lux] = xyzl;
    Tristimulus { x, y, z, lux }
}

/// Illuminance in lux. Only channel 1 contributes.
pub fn lux(channels: &[u64; CHANNEL_COUNT]) -> f64 {
    tristimulus(channels).lux
}

/// CIE x, y chromaticity and lux from the four channel ADC codes.
///
/// Fails if X + Y + Z is not positive, as happens in darkness, since the
/// chromaticity is then undefined.
pub fn colorimetry(channels: &[u64; CHANNEL_COUNT]) -> Result<Colorimetry, DegenerateColorSum> {
    let Tristimulus { x, y, z, lux } = tristimulus(channels);
    let sum = x + y + z;
    if sum.is_nan() || sum <= 0.0 {
        warn!("tristimulus sum {} is not positive", sum);
        return Err(DegenerateColorSum);
    }

    Ok(Colorimetry {
        cie_x: x / sum,
        cie_y: y / sum,
        lux,
    })
}

/// Correlated colour temperature in kelvin from CIE x, y chromaticity,
/// using McCamy's cubic approximation.
///
/// The approximation is intended for roughly 2,000K to 30,000K near the
/// Planckian locus. The result is not range-checked, so chromaticities far
/// from the locus give meaningless (possibly negative) values.
///
/// Returns 0.0 when the temperature is undefined: for the `(0, 0)`
/// chromaticity of a failed reading, and when `cie_y` equals the
/// approximation's epicentre exactly. Near the epicentre the result grows
/// without bound and may overflow to infinity.
pub fn color_temperature(cie_x: f64, cie_y: f64) -> f64 {
    if cie_x == 0.0 && cie_y == 0.0 {
        return 0.0;
    }
    let denominator = MCCAMY_Y_E - cie_y;
    if denominator == 0.0 {
        return 0.0;
    }

    let n = (cie_x - MCCAMY_X_E) / denominator;
    437.0 * n * n * n + 3601.0 * n * n + 6861.0 * n + 5517.0
}
