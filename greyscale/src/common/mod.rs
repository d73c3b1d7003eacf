pub(crate) mod error;
pub(crate) mod numeric;

// Public API
pub use error::{ComputationError, Error, Result, ValidationError};
pub use numeric::{checked_pixel_counts, parse_coefficients, parse_integer, sqrt_heron};
