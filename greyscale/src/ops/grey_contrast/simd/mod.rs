// Variant 0: integer weights summing to 256, 16 pixels per iteration.
//
// Grey pass: SSSE3 on x86_64, NEON on aarch64, scalar otherwise.
// Statistics pass: SSE2 / NEON integer sum and sum of squares.
// Contrast pass: shared 256-entry lookup table.

#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(test)]
mod tests;

use common::cpu_features;

use super::GreyContrast;
use super::statistics::{ContrastRemap, GreyStatistics, Moments};
use super::weights::FixedWeights;
use crate::common::ComputationError;

/// Pixels per vector iteration.
pub(super) const LANES: usize = 16;

pub(super) fn apply(
    params: &GreyContrast,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), ComputationError> {
    let weights = FixedWeights::from_coefficients(params.coefficients);
    log::debug!(
        "fixed point weights {}/{}/{}",
        weights.red,
        weights.green,
        weights.blue
    );

    grey_pass(&weights, params.brightness, src, dst);

    if let Some(contrast) = params.contrast {
        let stats = GreyStatistics::from_moments(moments(dst));
        log::debug!(
            "grey mean {:.3}, variance {:.3}",
            stats.mean,
            stats.variance
        );
        ContrastRemap::new(contrast, stats)?.apply(dst);
    }

    Ok(())
}

fn grey_pass(weights: &FixedWeights, brightness: i16, src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(src.len(), dst.len() * 3);

    #[cfg(target_arch = "x86_64")]
    if cpu_features::has_ssse3() {
        // SAFETY: SSSE3 support verified above
        unsafe { sse::grey_ssse3(weights, brightness, src, dst) };
        return;
    }

    #[cfg(target_arch = "aarch64")]
    if cpu_features::has_neon() {
        // SAFETY: NEON is always available on aarch64
        unsafe { neon::grey_neon(weights, brightness, src, dst) };
        return;
    }

    grey_scalar(weights, brightness, src, dst);
}

/// Reference kernel, also used for the tails of the vector loops.
pub(super) fn grey_scalar(weights: &FixedWeights, brightness: i16, src: &[u8], dst: &mut [u8]) {
    for (rgb, out) in src.chunks_exact(3).zip(dst.iter_mut()) {
        let grey = weights.grey(rgb[0], rgb[1], rgb[2]);
        *out = (i16::from(grey) + brightness).clamp(0, 255) as u8;
    }
}

fn moments(pixels: &[u8]) -> Moments {
    #[cfg(target_arch = "x86_64")]
    if cpu_features::has_sse2() {
        // SAFETY: SSE2 support verified above
        return unsafe { sse::moments_sse2(pixels) };
    }

    #[cfg(target_arch = "aarch64")]
    if cpu_features::has_neon() {
        // SAFETY: NEON is always available on aarch64
        return unsafe { neon::moments_neon(pixels) };
    }

    Moments::accumulate(pixels)
}
