use super::saturate_u8;
use crate::common::ComputationError;
use crate::common::numeric::sqrt_heron;

/// Raw integer moments of a grey buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Moments {
    pub count: u64,
    pub sum: u64,
    pub sum_sq: u64,
}

impl Moments {
    pub fn accumulate(pixels: &[u8]) -> Self {
        pixels.iter().fold(
            Self {
                count: pixels.len() as u64,
                ..Self::default()
            },
            |mut acc, &value| {
                let value = u64::from(value);
                acc.sum += value;
                acc.sum_sq += value * value;
                acc
            },
        )
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }
}

/// Mean and population variance of a grey buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreyStatistics {
    pub mean: f64,
    pub variance: f64,
}

impl GreyStatistics {
    /// Statistics from exact integer moments.
    ///
    /// The variance numerator `n * sum_sq - sum^2` is formed in 128-bit
    /// integers, so it is exact before the single conversion to f64.
    pub fn from_moments(moments: Moments) -> Self {
        debug_assert!(moments.count > 0, "statistics of an empty buffer");

        let n = u128::from(moments.count);
        let sum = u128::from(moments.sum);
        let numerator = n * u128::from(moments.sum_sq) - sum * sum;

        Self {
            mean: moments.sum as f64 / moments.count as f64,
            variance: numerator as f64 / (n * n) as f64,
        }
    }

    /// Mean first, then the mean squared deviation from it.
    pub fn two_pass(pixels: &[u8]) -> Self {
        debug_assert!(!pixels.is_empty(), "statistics of an empty buffer");

        let count = pixels.len() as f64;
        let sum: u64 = pixels.iter().map(|&value| u64::from(value)).sum();
        let mean = sum as f64 / count;

        let variance = pixels
            .iter()
            .map(|&value| {
                let deviation = f64::from(value) - mean;
                deviation * deviation
            })
            .sum::<f64>()
            / count;

        Self { mean, variance }
    }
}

/// Affine contrast remap `v -> kstd * v + (1 - kstd) * mean`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastRemap {
    kstd: f32,
    offset: f32,
}

impl ContrastRemap {
    /// Derives the remap constants for contrast strength `contrast`.
    ///
    /// A variance of exactly zero yields `kstd = 0`, which maps every value
    /// to the mean. Non-finite constants are reported as errors.
    pub fn new(contrast: f32, stats: GreyStatistics) -> Result<Self, ComputationError> {
        let kstd = if stats.variance == 0.0 {
            0.0
        } else {
            let kstd = contrast / sqrt_heron(stats.variance as f32);
            if !kstd.is_finite() {
                return Err(ComputationError::NonFiniteSlope {
                    contrast,
                    variance: stats.variance,
                });
            }
            kstd
        };

        let offset = (f64::from(1.0 - kstd) * stats.mean) as f32;
        if !offset.is_finite() {
            return Err(ComputationError::NonFiniteOffset {
                kstd,
                mean: stats.mean,
            });
        }

        Ok(Self { kstd, offset })
    }

    /// Slope of the remap: contrast over standard deviation.
    pub fn kstd(&self) -> f32 {
        self.kstd
    }

    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        saturate_u8(self.kstd * f32::from(value) + self.offset)
    }

    pub fn lookup_table(&self) -> [u8; 256] {
        std::array::from_fn(|value| self.map(value as u8))
    }

    /// Remaps every pixel in place through the lookup table.
    pub fn apply(&self, pixels: &mut [u8]) {
        let lookup = self.lookup_table();
        for value in pixels.iter_mut() {
            *value = lookup[usize::from(*value)];
        }
    }
}
