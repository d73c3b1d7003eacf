use super::Coefficients;

/// Fixed-point scale of the integer weights; `>> 8` divides by it.
pub const WEIGHT_SCALE: u16 = 256;
pub const WEIGHT_SHIFT: u32 = 8;

/// Channel weights as integers summing to [`WEIGHT_SCALE`].
///
/// Used by the vectorized path so that a grey value is
/// `(red * R + green * G + blue * B) >> 8` with no floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWeights {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl FixedWeights {
    /// Rescales `coefficients` to integers summing to 256 while keeping
    /// their ratios as close as possible.
    ///
    /// Every weight starts truncated from its ideal value `256 * w / sum`.
    /// While the total is off, one weight moves by one: below 256 the weight
    /// with the largest remainder grows, above 256 the one with the smallest
    /// remainder shrinks. Ties go to green over red, then to blue.
    ///
    /// The coefficients must be non-negative, finite and not all zero.
    pub fn from_coefficients(coefficients: Coefficients) -> Self {
        let channels = [coefficients.red, coefficients.green, coefficients.blue].map(f64::from);
        let sum: f64 = channels.iter().sum();
        let scale = f64::from(WEIGHT_SCALE);

        let ideal = channels.map(|w| scale * w / sum);
        let mut weights = ideal.map(|w| w as i64);
        let target = i64::from(WEIGHT_SCALE);

        loop {
            let total: i64 = weights.iter().sum();
            if total == target {
                break;
            }

            let remainder = [0, 1, 2].map(|i| ideal[i] - weights[i] as f64);
            if total < target {
                weights[pick(remainder, |a, b| a > b)] += 1;
            } else {
                weights[pick(remainder, |a, b| a < b)] -= 1;
            }
        }

        let [red, green, blue] = weights.map(|w| w as u16);
        Self { red, green, blue }
    }

    /// Grey value of one pixel.
    #[inline]
    pub fn grey(&self, r: u8, g: u8, b: u8) -> u8 {
        let sum = u32::from(self.red) * u32::from(r)
            + u32::from(self.green) * u32::from(g)
            + u32::from(self.blue) * u32::from(b);
        (sum >> WEIGHT_SHIFT) as u8
    }

    pub fn total(&self) -> u32 {
        u32::from(self.red) + u32::from(self.green) + u32::from(self.blue)
    }
}

/// Index of the winning remainder: red against green first, the survivor
/// against blue. A tie never wins, so it falls through to the later channel.
fn pick(remainder: [f64; 3], wins: impl Fn(f64, f64) -> bool) -> usize {
    if wins(remainder[0], remainder[1]) {
        if wins(remainder[0], remainder[2]) { 0 } else { 2 }
    } else if wins(remainder[1], remainder[2]) {
        1
    } else {
        2
    }
}
