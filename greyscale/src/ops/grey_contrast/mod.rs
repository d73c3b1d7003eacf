mod naive;
mod normalized;
mod simd;
pub(crate) mod statistics;
pub(crate) mod weights;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::common::{Result, ValidationError};
use crate::image::{GreyImage, RgbImage};

pub use statistics::{ContrastRemap, GreyStatistics, Moments};
pub use weights::FixedWeights;

/// Highest valid [`Version`] id.
pub const MAX_VERSION: i32 = 2;

/// Implementation variant of the grey transform.
///
/// All variants produce the same image up to a difference of one grey level
/// per pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Version {
    /// Integer weights summing to 256, vectorized with SSSE3 or NEON.
    #[default]
    Simd = 0,
    /// Scalar f32 with coefficients divided by their sum up front.
    Normalized = 1,
    /// Scalar f32, divides every pixel by the coefficient sum.
    Naive = 2,
}

impl Version {
    pub const ALL: [Version; 3] = [Version::Simd, Version::Normalized, Version::Naive];

    pub fn id(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Version {
    type Error = ValidationError;

    fn try_from(version: i32) -> std::result::Result<Self, Self::Error> {
        match version {
            0 => Ok(Version::Simd),
            1 => Ok(Version::Normalized),
            2 => Ok(Version::Naive),
            _ => Err(ValidationError::UnknownVersion {
                version,
                max: MAX_VERSION,
            }),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Version::Simd => "simd",
            Version::Normalized => "normalized",
            Version::Naive => "naive",
        };
        write!(f, "{} ({name})", self.id())
    }
}

/// Red, green and blue weights of the grey conversion.
///
/// Only the ratios matter; the sum does not have to be one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for Coefficients {
    /// 55/256, 182/256 and 19/256: exact in both f32 and the 8-bit fixed point.
    fn default() -> Self {
        Self {
            red: 0.21484375,
            green: 0.7109375,
            blue: 0.07421875,
        }
    }
}

impl Coefficients {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub fn sum(&self) -> f32 {
        self.red + self.green + self.blue
    }

    /// Coefficients divided by their sum.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        Self {
            red: self.red / sum,
            green: self.green / sum,
            blue: self.blue / sum,
        }
    }
}

/// Parameters of the grey, brightness and contrast transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GreyContrast {
    pub coefficients: Coefficients,
    /// Offset added to every grey value, in [-255, 255].
    pub brightness: i16,
    /// Contrast strength in [-255, 255]; `None` skips the contrast pass.
    pub contrast: Option<f32>,
}

impl GreyContrast {
    pub fn new(coefficients: Coefficients) -> Self {
        Self {
            coefficients,
            ..Self::default()
        }
    }

    /// Builder method to set brightness.
    pub fn brightness(mut self, brightness: i16) -> Self {
        self.brightness = brightness;
        self
    }

    /// Builder method to set contrast.
    pub fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = Some(contrast);
        self
    }

    /// Converts `input` into `output` with the chosen variant.
    ///
    /// # Panics
    /// Panics if the images have different dimensions.
    pub fn apply(&self, version: Version, input: &RgbImage, output: &mut GreyImage) -> Result<()> {
        assert_eq!(input.width(), output.width(), "width mismatch");
        assert_eq!(input.height(), output.height(), "height mismatch");

        transform(version, input, self, output.bytes_mut())
    }
}

/// Writes the grey value of every pixel of `input` into `output`.
///
/// Each grey value is shifted by the brightness and clamped. With contrast
/// set, the whole grey image is then remapped around its mean, scaled by
/// `contrast / stddev`.
///
/// Parameter ranges are not checked here. The coefficients must be
/// non-negative, finite and not all zero.
///
/// # Errors
/// Returns a computation error if the contrast constants are not finite.
/// `output` is then left with the grey values.
///
/// # Panics
/// Panics if `output` does not hold exactly one byte per input pixel.
pub fn transform(
    version: Version,
    input: &RgbImage,
    params: &GreyContrast,
    output: &mut [u8],
) -> Result<()> {
    assert_eq!(
        output.len(),
        input.pixel_count(),
        "output buffer size mismatch"
    );

    log::debug!(
        "grey transform {}x{} with version {version}, brightness {}, contrast {:?}",
        input.width(),
        input.height(),
        params.brightness,
        params.contrast
    );

    match version {
        Version::Simd => simd::apply(params, input.bytes(), output)?,
        Version::Normalized => normalized::apply(params, input.bytes(), output)?,
        Version::Naive => naive::apply(params, input.bytes(), output)?,
    }

    Ok(())
}

/// Truncates toward zero and clamps into [0, 255]; NaN becomes 0.
#[inline]
pub(crate) fn saturate_u8(value: f32) -> u8 {
    value as u8
}
