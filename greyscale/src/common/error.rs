use thiserror::Error;

/// Rejected user input. Raised before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a valid integer")]
    InvalidInteger(String),
    #[error("'{0}' does not fit into a 32-bit integer")]
    IntegerOutOfRange(String),
    #[error("Invalid format of coefficients. Expected format: '1.0,2.0,3.0'")]
    InvalidCoefficients(String),
    #[error("The brightness must be in [-255, 255].")]
    BrightnessOutOfRange(i32),
    #[error("The contrast must be in [-255, 255].")]
    ContrastOutOfRange(i32),
    #[error("The coefficients must be greater or equal to zero.")]
    NegativeCoefficient,
    #[error("The coefficients must be finite numbers.")]
    NonFiniteCoefficient,
    #[error("Version {version} does not exist. Choose a version from [0, {max}].")]
    UnknownVersion { version: i32, max: i32 },
    #[error("Option -B can not be negative.")]
    NegativeRepeatCount(i32),
    #[error("Option -B can not be zero.")]
    ZeroRepeatCount,
    #[error("Output filename has to be set.")]
    MissingOutput,
    #[error("Input filename has to be set.")]
    MissingInput,
    #[error("Sum of coefficients can not be 0.")]
    ZeroCoefficientSum,
    #[error("Image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: usize, height: usize },
    #[error("Image dimensions must be positive, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Numeric failure while deriving the contrast remap constants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ComputationError {
    #[error("computation for contrast failed: slope {contrast} / sqrt({variance}) is not finite")]
    NonFiniteSlope { contrast: f32, variance: f64 },
    #[error("computation for contrast failed: offset (1 - {kstd}) * {mean} is not finite")]
    NonFiniteOffset { kstd: f32, mean: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}

pub type Result<T> = std::result::Result<T, Error>;
