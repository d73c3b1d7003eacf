use rand::prelude::*;

use super::*;
use crate::ops::grey_contrast::Coefficients;

/// Pixel counts around the 16-pixel vector width.
const TEST_WIDTHS: [usize; 9] = [1, 15, 16, 17, 31, 32, 33, 100, 256];

fn random_rgb(pixels: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut src = vec![0u8; pixels * 3];
    rng.fill(&mut src[..]);
    src
}

fn test_weights() -> [FixedWeights; 4] {
    [
        FixedWeights::from_coefficients(Coefficients::default()),
        FixedWeights::from_coefficients(Coefficients::new(1.0, 1.0, 1.0)),
        FixedWeights::from_coefficients(Coefficients::new(1.0, 0.0, 0.0)),
        FixedWeights::from_coefficients(Coefficients::new(0.0, 0.0, 1.0)),
    ]
}

fn scalar(weights: &FixedWeights, brightness: i16, src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; src.len() / 3];
    grey_scalar(weights, brightness, src, &mut dst);
    dst
}

#[test]
fn grey_pass_matches_scalar_at_all_widths() {
    for (seed, &width) in TEST_WIDTHS.iter().enumerate() {
        let src = random_rgb(width, seed as u64);
        for weights in test_weights() {
            for brightness in [-255, -100, -1, 0, 1, 37, 255] {
                let expected = scalar(&weights, brightness, &src);
                let mut dst = vec![0u8; width];
                grey_pass(&weights, brightness, &src, &mut dst);
                assert_eq!(
                    dst, expected,
                    "width={width} weights={weights:?} brightness={brightness}"
                );
            }
        }
    }
}

#[test]
fn grey_pass_channels_land_in_order() {
    // Pixel i is (i, 0, 0): a pure red weight must reproduce the ramp.
    let src: Vec<u8> = (0..64u8).flat_map(|i| [i, 0, 0]).collect();
    let weights = FixedWeights::from_coefficients(Coefficients::new(1.0, 0.0, 0.0));
    let mut dst = vec![0u8; 64];
    grey_pass(&weights, 0, &src, &mut dst);
    assert_eq!(dst, (0..64u8).collect::<Vec<_>>());

    let src: Vec<u8> = (0..64u8).flat_map(|i| [0, 0, i]).collect();
    let weights = FixedWeights::from_coefficients(Coefficients::new(0.0, 0.0, 1.0));
    grey_pass(&weights, 0, &src, &mut dst);
    assert_eq!(dst, (0..64u8).collect::<Vec<_>>());
}

#[test]
fn brightness_saturates() {
    let src = vec![255u8; 40 * 3];
    let weights = FixedWeights::from_coefficients(Coefficients::default());
    let mut dst = vec![0u8; 40];

    grey_pass(&weights, 200, &src, &mut dst);
    assert!(dst.iter().all(|&v| v == 255));

    grey_pass(&weights, -255, &src, &mut dst);
    assert!(dst.iter().all(|&v| v == 0));
}

#[test]
fn moments_match_scalar_at_all_widths() {
    let mut rng = StdRng::seed_from_u64(11);
    for &width in TEST_WIDTHS.iter().chain(&[1000, 4099]) {
        let mut pixels = vec![0u8; width];
        rng.fill(&mut pixels[..]);
        assert_eq!(
            moments(&pixels),
            Moments::accumulate(&pixels),
            "width={width}"
        );
    }
}

#[test]
fn moments_do_not_overflow_on_large_white_images() {
    // More blocks than one 32-bit flush window holds.
    let pixels = vec![255u8; LANES * 4096 * 3 + 5];
    let expected = Moments {
        count: pixels.len() as u64,
        sum: 255 * pixels.len() as u64,
        sum_sq: 255 * 255 * pixels.len() as u64,
    };
    assert_eq!(moments(&pixels), expected);
}

#[test]
fn apply_with_uniform_image_and_contrast_keeps_grey() {
    let src = vec![90u8; 50 * 3];
    let mut dst = vec![0u8; 50];
    let params = GreyContrast::new(Coefficients::default()).contrast(200.0);
    apply(&params, &src, &mut dst).unwrap();
    assert!(dst.iter().all(|&v| v == 90));
}

#[cfg(target_arch = "x86_64")]
#[test]
fn ssse3_kernel_matches_scalar() {
    if !cpu_features::has_ssse3() {
        return;
    }
    for &width in &TEST_WIDTHS {
        let src = random_rgb(width, 100 + width as u64);
        for weights in test_weights() {
            let mut dst = vec![0u8; width];
            // SAFETY: SSSE3 support verified above
            unsafe { sse::grey_ssse3(&weights, -20, &src, &mut dst) };
            assert_eq!(dst, scalar(&weights, -20, &src), "width={width}");
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[test]
fn sse2_moments_match_scalar() {
    if !cpu_features::has_sse2() {
        return;
    }
    let mut rng = StdRng::seed_from_u64(5);
    let mut pixels = vec![0u8; 70_001];
    rng.fill(&mut pixels[..]);
    // SAFETY: SSE2 support verified above
    let vector = unsafe { sse::moments_sse2(&pixels) };
    assert_eq!(vector, Moments::accumulate(&pixels));
}

#[cfg(target_arch = "aarch64")]
#[test]
fn neon_kernel_matches_scalar() {
    for &width in &TEST_WIDTHS {
        let src = random_rgb(width, 100 + width as u64);
        for weights in test_weights() {
            let mut dst = vec![0u8; width];
            // SAFETY: NEON is always available on aarch64
            unsafe { neon::grey_neon(&weights, -20, &src, &mut dst) };
            assert_eq!(dst, scalar(&weights, -20, &src), "width={width}");
        }
    }
}

#[cfg(target_arch = "aarch64")]
#[test]
fn neon_moments_match_scalar() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut pixels = vec![0u8; 70_001];
    rng.fill(&mut pixels[..]);
    // SAFETY: NEON is always available on aarch64
    let vector = unsafe { neon::moments_neon(&pixels) };
    assert_eq!(vector, Moments::accumulate(&pixels));
}
