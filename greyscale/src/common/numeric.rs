use std::num::IntErrorKind;

use crate::common::error::ValidationError;
use crate::ops::Coefficients;

/// Upper bound for the Heron iteration. Starting from `(n + 1) / 2` the
/// iterate roughly halves until it reaches the root, so even `f32::MAX` and
/// subnormal inputs settle in well under a hundred steps.
const HERON_MAX_ITERATIONS: u32 = 256;

/// Parses a base-10 integer.
///
/// Leading whitespace and a sign are accepted. Empty input, trailing
/// characters, and values outside `i32` are rejected.
pub fn parse_integer(text: &str) -> Result<i32, ValidationError> {
    text.trim_start()
        .parse::<i32>()
        .map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ValidationError::IntegerOutOfRange(text.to_string())
            }
            _ => ValidationError::InvalidInteger(text.to_string()),
        })
}

/// Parses a `red,green,blue` coefficient triple such as `0.3,0.59,0.11`.
///
/// Exactly three tokens are required and each must be a complete float.
pub fn parse_coefficients(text: &str) -> Result<Coefficients, ValidationError> {
    let invalid = || ValidationError::InvalidCoefficients(text.to_string());

    let tokens: Vec<&str> = text.split(',').collect();
    let [red, green, blue] = tokens.as_slice() else {
        return Err(invalid());
    };

    let parse = |token: &str| token.trim_start().parse::<f32>().map_err(|_| invalid());

    Ok(Coefficients::new(parse(red)?, parse(green)?, parse(blue)?))
}

/// Square root by Heron's method.
///
/// Returns NaN for negative, NaN and infinite input and exactly 0 for 0.
/// Otherwise iterates `x = (x + n / x) / 2` from `(n + 1) / 2` until the
/// iterate stops changing. When f32 rounding makes the iterate alternate
/// between two neighbours, the smaller one is returned.
pub fn sqrt_heron(n: f32) -> f32 {
    if n < 0.0 || !n.is_finite() {
        return f32::NAN;
    }
    if n == 0.0 {
        return 0.0;
    }

    let mut x = (n + 1.0) / 2.0;
    let mut previous = 0.0_f32;
    let mut before_previous = f32::NAN;

    for _ in 0..HERON_MAX_ITERATIONS {
        if x == previous {
            return x;
        }
        if x == before_previous {
            return x.min(previous);
        }
        before_previous = previous;
        previous = x;
        x = (x + n / x) / 2.0;
    }

    x
}

/// Returns `(width * height, 3 * width * height)` or an error if either
/// product overflows `usize`.
pub fn checked_pixel_counts(
    width: usize,
    height: usize,
) -> Result<(usize, usize), ValidationError> {
    let too_large = || ValidationError::ImageTooLarge { width, height };

    let pixel_count = width.checked_mul(height).ok_or_else(too_large)?;
    let byte_count = pixel_count.checked_mul(3).ok_or_else(too_large)?;

    Ok((pixel_count, byte_count))
}
