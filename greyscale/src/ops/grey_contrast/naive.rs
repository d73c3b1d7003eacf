use super::statistics::{ContrastRemap, GreyStatistics};
use super::{Coefficients, GreyContrast, saturate_u8};
use crate::common::ComputationError;

/// Variant 2: straightforward per-pixel arithmetic, one loop per stage and
/// no lookup table.
pub(super) fn apply(
    params: &GreyContrast,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), ComputationError> {
    let Coefficients { red, green, blue } = params.coefficients;
    let sum = params.coefficients.sum();

    for (rgb, out) in src.chunks_exact(3).zip(dst.iter_mut()) {
        let grey =
            (red * f32::from(rgb[0]) + green * f32::from(rgb[1]) + blue * f32::from(rgb[2])) / sum;
        *out = saturate_u8(grey);
    }

    if params.brightness != 0 {
        for value in dst.iter_mut() {
            *value = (i16::from(*value) + params.brightness).clamp(0, 255) as u8;
        }
    }

    let Some(contrast) = params.contrast else {
        return Ok(());
    };

    let count = dst.len() as f64;
    let mean = dst.iter().map(|&v| f64::from(v)).sum::<f64>() / count;
    let variance = dst
        .iter()
        .map(|&v| (f64::from(v) - mean) * (f64::from(v) - mean))
        .sum::<f64>()
        / count;
    log::debug!("grey mean {mean:.3}, variance {variance:.3}");

    let kstd = ContrastRemap::new(contrast, GreyStatistics { mean, variance })?.kstd();
    let offset = f64::from(1.0 - kstd) * mean;

    for value in dst.iter_mut() {
        let mapped = f64::from(kstd * f32::from(*value)) + offset;
        *value = saturate_u8(mapped as f32);
    }

    Ok(())
}
