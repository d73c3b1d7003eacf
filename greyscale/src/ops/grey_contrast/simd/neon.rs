use std::arch::aarch64::*;

use super::{LANES, grey_scalar};
use crate::ops::grey_contrast::statistics::Moments;
use crate::ops::grey_contrast::weights::FixedWeights;

/// Vector blocks summed into 32-bit lanes before they are widened.
const FLUSH_BLOCKS: usize = 4096;

/// Grey plus brightness for 16 pixels per iteration.
///
/// `vld3q_u8` deinterleaves the channels. The weighted sum fits in u16
/// because the weights add up to 256; `vqmovun_s16` saturates after the
/// signed brightness offset.
#[target_feature(enable = "neon")]
pub(super) unsafe fn grey_neon(
    weights: &FixedWeights,
    brightness: i16,
    src: &[u8],
    dst: &mut [u8],
) {
    let blocks = dst.len() / LANES;

    let src_ptr = src.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    let r_w = vdupq_n_u16(weights.red);
    let g_w = vdupq_n_u16(weights.green);
    let b_w = vdupq_n_u16(weights.blue);
    let offset = vdupq_n_s16(brightness);

    for i in 0..blocks {
        let rgb = vld3q_u8(src_ptr.add(i * LANES * 3));

        let weigh = |r: uint8x8_t, g: uint8x8_t, b: uint8x8_t| {
            let sum = vmulq_u16(vmovl_u8(r), r_w);
            let sum = vmlaq_u16(sum, vmovl_u8(g), g_w);
            let sum = vmlaq_u16(sum, vmovl_u8(b), b_w);
            let grey = vreinterpretq_s16_u16(vshrq_n_u16(sum, 8));
            vqmovun_s16(vaddq_s16(grey, offset))
        };

        let lo = weigh(vget_low_u8(rgb.0), vget_low_u8(rgb.1), vget_low_u8(rgb.2));
        let hi = weigh(vget_high_u8(rgb.0), vget_high_u8(rgb.1), vget_high_u8(rgb.2));

        vst1q_u8(dst_ptr.add(i * LANES), vcombine_u8(lo, hi));
    }

    let done = blocks * LANES;
    grey_scalar(weights, brightness, &src[done * 3..], &mut dst[done..]);
}

/// Sum and sum of squares, 16 values per iteration.
#[target_feature(enable = "neon")]
pub(super) unsafe fn moments_neon(pixels: &[u8]) -> Moments {
    let blocks = pixels.len() / LANES;
    let ptr = pixels.as_ptr();

    let mut sum: u64 = 0;
    let mut sum_sq: u64 = 0;

    let mut block = 0;
    while block < blocks {
        let chunk_end = (block + FLUSH_BLOCKS).min(blocks);
        let mut sum_acc = vdupq_n_u32(0);
        let mut sq_acc = vdupq_n_u32(0);

        for i in block..chunk_end {
            let v = vld1q_u8(ptr.add(i * LANES));
            sum_acc = vpadalq_u16(sum_acc, vpaddlq_u8(v));

            let lo = vget_low_u8(v);
            let hi = vget_high_u8(v);
            sq_acc = vpadalq_u16(sq_acc, vmull_u8(lo, lo));
            sq_acc = vpadalq_u16(sq_acc, vmull_u8(hi, hi));
        }

        sum += vaddlvq_u32(sum_acc);
        sum_sq += vaddlvq_u32(sq_acc);

        block = chunk_end;
    }

    let vector = Moments {
        count: (blocks * LANES) as u64,
        sum,
        sum_sq,
    };
    vector.merge(Moments::accumulate(&pixels[blocks * LANES..]))
}
