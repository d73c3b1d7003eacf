use super::statistics::{ContrastRemap, GreyStatistics};
use super::{GreyContrast, saturate_u8};
use crate::common::ComputationError;

/// Variant 1: f32 weights divided by their sum once, one pass per stage.
pub(super) fn apply(
    params: &GreyContrast,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), ComputationError> {
    let weights = params.coefficients.normalized();
    let brightness = f32::from(params.brightness);

    for (rgb, out) in src.chunks_exact(3).zip(dst.iter_mut()) {
        let grey = weights.red * f32::from(rgb[0])
            + weights.green * f32::from(rgb[1])
            + weights.blue * f32::from(rgb[2]);
        *out = saturate_u8(grey + brightness);
    }

    if let Some(contrast) = params.contrast {
        let stats = GreyStatistics::two_pass(dst);
        log::debug!(
            "grey mean {:.3}, variance {:.3}",
            stats.mean,
            stats.variance
        );
        ContrastRemap::new(contrast, stats)?.apply(dst);
    }

    Ok(())
}
