use std::arch::x86_64::*;

use super::{LANES, grey_scalar};
use crate::ops::grey_contrast::statistics::Moments;
use crate::ops::grey_contrast::weights::FixedWeights;

/// Vector blocks summed into 32-bit lanes before they are widened.
/// One block adds at most `4 * 255^2` to a lane.
const FLUSH_BLOCKS: usize = 4096;

/// Grey plus brightness for 16 pixels (48 bytes) per iteration.
///
/// Channels are gathered with byte shuffles, widened to 16 bits, weighted
/// and shifted right by 8. Brightness is added in signed 16-bit lanes and
/// `packus` saturates the result into [0, 255].
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn grey_ssse3(
    weights: &FixedWeights,
    brightness: i16,
    src: &[u8],
    dst: &mut [u8],
) {
    let blocks = dst.len() / LANES;

    let src_ptr = src.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    // First 8 pixels: in0 holds R0..R5 G0..G4 B0..B4, in1 the rest up to pixel 7.
    let shuf_r0 = _mm_setr_epi8(0, 3, 6, 9, 12, 15, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_g0 = _mm_setr_epi8(1, 4, 7, 10, 13, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_b0 = _mm_setr_epi8(2, 5, 8, 11, 14, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_r1 = _mm_setr_epi8(-1, -1, -1, -1, -1, -1, 2, 5, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_g1 = _mm_setr_epi8(-1, -1, -1, -1, -1, 0, 3, 6, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_b1 = _mm_setr_epi8(-1, -1, -1, -1, -1, 1, 4, 7, -1, -1, -1, -1, -1, -1, -1, -1);

    // Last 8 pixels: in1 holds R8..R10 G8..G10 B8..B9, in2 the rest.
    let shuf_r2 = _mm_setr_epi8(8, 11, 14, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_g2 = _mm_setr_epi8(9, 12, 15, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_b2 = _mm_setr_epi8(10, 13, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_r3 = _mm_setr_epi8(-1, -1, -1, 1, 4, 7, 10, 13, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_g3 = _mm_setr_epi8(-1, -1, -1, 2, 5, 8, 11, 14, -1, -1, -1, -1, -1, -1, -1, -1);
    let shuf_b3 = _mm_setr_epi8(-1, -1, 0, 3, 6, 9, 12, 15, -1, -1, -1, -1, -1, -1, -1, -1);

    let zero = _mm_setzero_si128();
    let r_w = _mm_set1_epi16(weights.red as i16);
    let g_w = _mm_set1_epi16(weights.green as i16);
    let b_w = _mm_set1_epi16(weights.blue as i16);
    let offset = _mm_set1_epi16(brightness);

    for i in 0..blocks {
        let in0 = _mm_loadu_si128(src_ptr.add(i * LANES * 3) as *const __m128i);
        let in1 = _mm_loadu_si128(src_ptr.add(i * LANES * 3 + 16) as *const __m128i);
        let in2 = _mm_loadu_si128(src_ptr.add(i * LANES * 3 + 32) as *const __m128i);

        let r_lo = _mm_or_si128(_mm_shuffle_epi8(in0, shuf_r0), _mm_shuffle_epi8(in1, shuf_r1));
        let g_lo = _mm_or_si128(_mm_shuffle_epi8(in0, shuf_g0), _mm_shuffle_epi8(in1, shuf_g1));
        let b_lo = _mm_or_si128(_mm_shuffle_epi8(in0, shuf_b0), _mm_shuffle_epi8(in1, shuf_b1));

        let r_hi = _mm_or_si128(_mm_shuffle_epi8(in1, shuf_r2), _mm_shuffle_epi8(in2, shuf_r3));
        let g_hi = _mm_or_si128(_mm_shuffle_epi8(in1, shuf_g2), _mm_shuffle_epi8(in2, shuf_g3));
        let b_hi = _mm_or_si128(_mm_shuffle_epi8(in1, shuf_b2), _mm_shuffle_epi8(in2, shuf_b3));

        let weigh = |r: __m128i, g: __m128i, b: __m128i| {
            let sum = _mm_add_epi16(
                _mm_add_epi16(
                    _mm_mullo_epi16(_mm_unpacklo_epi8(r, zero), r_w),
                    _mm_mullo_epi16(_mm_unpacklo_epi8(g, zero), g_w),
                ),
                _mm_mullo_epi16(_mm_unpacklo_epi8(b, zero), b_w),
            );
            _mm_add_epi16(_mm_srli_epi16(sum, 8), offset)
        };

        let grey = _mm_packus_epi16(weigh(r_lo, g_lo, b_lo), weigh(r_hi, g_hi, b_hi));
        _mm_storeu_si128(dst_ptr.add(i * LANES) as *mut __m128i, grey);
    }

    let done = blocks * LANES;
    grey_scalar(weights, brightness, &src[done * 3..], &mut dst[done..]);
}

/// Sum and sum of squares, 16 values per iteration.
///
/// `sad_epu8` against zero yields the byte sums directly in 64-bit lanes.
/// Squares come from `madd_epi16` on the zero-extended bytes and collect in
/// 32-bit lanes, flushed into a u64 every [`FLUSH_BLOCKS`] blocks.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn moments_sse2(pixels: &[u8]) -> Moments {
    let blocks = pixels.len() / LANES;
    let ptr = pixels.as_ptr();
    let zero = _mm_setzero_si128();

    let mut sum = _mm_setzero_si128();
    let mut sum_sq: u64 = 0;

    let mut block = 0;
    while block < blocks {
        let chunk_end = (block + FLUSH_BLOCKS).min(blocks);
        let mut sq_acc = _mm_setzero_si128();

        for i in block..chunk_end {
            let v = _mm_loadu_si128(ptr.add(i * LANES) as *const __m128i);
            sum = _mm_add_epi64(sum, _mm_sad_epu8(v, zero));

            let lo = _mm_unpacklo_epi8(v, zero);
            let hi = _mm_unpackhi_epi8(v, zero);
            sq_acc = _mm_add_epi32(sq_acc, _mm_madd_epi16(lo, lo));
            sq_acc = _mm_add_epi32(sq_acc, _mm_madd_epi16(hi, hi));
        }

        let mut lanes = [0u32; 4];
        _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, sq_acc);
        sum_sq += lanes.iter().map(|&lane| u64::from(lane)).sum::<u64>();

        block = chunk_end;
    }

    let mut sums = [0u64; 2];
    _mm_storeu_si128(sums.as_mut_ptr() as *mut __m128i, sum);

    let vector = Moments {
        count: (blocks * LANES) as u64,
        sum: sums[0] + sums[1],
        sum_sq,
    };
    vector.merge(Moments::accumulate(&pixels[blocks * LANES..]))
}
