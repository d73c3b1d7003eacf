// Error handling
pub use crate::common::{ComputationError, Error, Result, ValidationError};

// Parsing and numeric helpers
pub use crate::common::{checked_pixel_counts, parse_coefficients, parse_integer, sqrt_heron};

// Image types
pub use crate::image::{GreyImage, RgbImage};

// Operations
pub use crate::ops::{
    Coefficients, ContrastRemap, FixedWeights, GreyContrast, GreyStatistics, MAX_VERSION, Moments,
    Version, transform,
};

// Run configuration
pub use crate::options::{DEFAULT_OUTPUT, RunConfig, RunOptions};
