
use crate::common::ValidationError;
use crate::common::numeric::checked_pixel_counts;

/// Interleaved 8-bit RGB image, row-major, no row padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl RgbImage {
    /// Wraps an interleaved RGB buffer.
    ///
    /// Fails if a dimension is zero, if `3 * width * height` overflows, or if
    /// `bytes` is not exactly that long.
    pub fn new(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        check_dimensions(width, height)?;
        let (_, byte_count) = checked_pixel_counts(width, height)?;

        if bytes.len() != byte_count {
            return Err(ValidationError::BufferSizeMismatch {
                expected: byte_count,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels; cannot overflow once constructed.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns the pixel bytes as `R, G, B, R, G, B, ...`.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Single channel 8-bit image, row-major, no row padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GreyImage {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl GreyImage {
    /// Allocates an image matching the dimensions of `source`.
    pub fn for_source(source: &RgbImage) -> Self {
        Self {
            width: source.width(),
            height: source.height(),
            bytes: vec![0; source.pixel_count()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), ValidationError> {
    if width == 0 || height == 0 {
        return Err(ValidationError::EmptyImage { width, height });
    }
    Ok(())
}
