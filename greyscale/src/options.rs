use std::path::PathBuf;

use crate::common::ValidationError;
use crate::ops::{Coefficients, GreyContrast, Version};

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "output.pgm";

/// Largest absolute brightness or contrast.
const MAX_ADJUSTMENT: i32 = 255;

/// Unchecked run parameters as collected from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub version: i32,
    /// Timed repetitions; 0 runs once without timing.
    pub repeat: i32,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub coefficients: Coefficients,
    pub brightness: i32,
    pub contrast: Option<i32>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            version: Version::default().id(),
            repeat: 0,
            input: None,
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            coefficients: Coefficients::default(),
            brightness: 0,
            contrast: None,
        }
    }
}

/// Validated run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub version: Version,
    pub repeat: u32,
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: GreyContrast,
}

impl RunOptions {
    /// Checks every parameter and stops at the first violated rule.
    ///
    /// Rules are checked in a fixed order: brightness range, contrast range,
    /// coefficient signs, finite coefficients, version, repeat count, output
    /// path, input path, coefficient sum.
    pub fn validate(self) -> Result<RunConfig, ValidationError> {
        let adjustment_range = -MAX_ADJUSTMENT..=MAX_ADJUSTMENT;

        if !adjustment_range.contains(&self.brightness) {
            return Err(ValidationError::BrightnessOutOfRange(self.brightness));
        }

        if let Some(contrast) = self.contrast
            && !adjustment_range.contains(&contrast)
        {
            return Err(ValidationError::ContrastOutOfRange(contrast));
        }

        let Coefficients { red, green, blue } = self.coefficients;
        if red < 0.0 || green < 0.0 || blue < 0.0 {
            return Err(ValidationError::NegativeCoefficient);
        }
        if !self.coefficients.sum().is_finite() {
            return Err(ValidationError::NonFiniteCoefficient);
        }

        let version = Version::try_from(self.version)?;

        let repeat =
            u32::try_from(self.repeat).map_err(|_| ValidationError::NegativeRepeatCount(self.repeat))?;

        let output = self.output.ok_or(ValidationError::MissingOutput)?;
        let input = self.input.ok_or(ValidationError::MissingInput)?;

        if self.coefficients.sum() == 0.0 {
            return Err(ValidationError::ZeroCoefficientSum);
        }

        let mut params = GreyContrast::new(self.coefficients).brightness(self.brightness as i16);
        if let Some(contrast) = self.contrast {
            params = params.contrast(contrast as f32);
        }

        Ok(RunConfig {
            version,
            repeat,
            input,
            output,
            params,
        })
    }
}
