use rand::prelude::*;

use super::*;

fn run(version: Version, input: &RgbImage, params: &GreyContrast) -> Vec<u8> {
    let mut output = vec![0u8; input.pixel_count()];
    transform(version, input, params, &mut output).unwrap();
    output
}

fn random_image(width: usize, height: usize, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = vec![0u8; width * height * 3];
    rng.fill(&mut bytes[..]);
    RgbImage::new(width, height, bytes).unwrap()
}

/// Image whose red channel is `reds`, green and blue zero.
fn red_ramp(reds: &[u8]) -> RgbImage {
    let bytes = reds.iter().flat_map(|&r| [r, 0, 0]).collect();
    RgbImage::new(reds.len(), 1, bytes).unwrap()
}

fn assert_within_one(a: &[u8], b: &[u8], context: &str) {
    assert_eq!(a.len(), b.len());
    for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
        assert!(x.abs_diff(y) <= 1, "{context}: pixel {i}: {x} vs {y}");
    }
}

#[test]
fn version_ids_round_trip() {
    for version in Version::ALL {
        assert_eq!(Version::try_from(version.id()), Ok(version));
    }
    assert_eq!(Version::default(), Version::Simd);
    assert_eq!(
        Version::try_from(5),
        Err(ValidationError::UnknownVersion {
            version: 5,
            max: MAX_VERSION
        })
    );
    assert!(Version::try_from(-1).is_err());
    assert_eq!(Version::Naive.to_string(), "2 (naive)");
}

#[test]
fn default_coefficients_are_normalized() {
    let coefficients = Coefficients::default();
    assert_eq!(coefficients.sum(), 1.0);
    assert_eq!(coefficients.normalized(), coefficients);

    let scaled = Coefficients::new(2.0, 6.0, 8.0).normalized();
    assert_eq!(scaled, Coefficients::new(0.125, 0.375, 0.5));
}

#[test]
fn single_pixel_grey() {
    // 55/256 * 100 + 182/256 * 150 + 19/256 * 200 = 142.96875
    let input = RgbImage::new(1, 1, vec![100, 150, 200]).unwrap();
    for version in Version::ALL {
        assert_eq!(
            run(version, &input, &GreyContrast::default()),
            [142],
            "{version}"
        );
    }
}

#[test]
fn single_pixel_brightness_saturates() {
    let input = RgbImage::new(1, 1, vec![100, 150, 200]).unwrap();
    for version in Version::ALL {
        let brighter = GreyContrast::default().brightness(200);
        assert_eq!(run(version, &input, &brighter), [255], "{version}");

        let darker = GreyContrast::default().brightness(-200);
        assert_eq!(run(version, &input, &darker), [0], "{version}");

        let shifted = GreyContrast::default().brightness(-42);
        assert_eq!(run(version, &input, &shifted), [100], "{version}");
    }
}

#[test]
fn uniform_image_is_unchanged_by_contrast() {
    let input = RgbImage::new(7, 5, [10, 20, 30].repeat(35)).unwrap();
    for version in Version::ALL {
        let plain = run(version, &input, &GreyContrast::default());
        for contrast in [-255.0, -1.0, 0.0, 1.0, 255.0] {
            let params = GreyContrast::default().contrast(contrast);
            assert_eq!(
                run(version, &input, &params),
                plain,
                "{version} contrast {contrast}"
            );
        }
    }
}

#[test]
fn contrast_scales_around_the_mean() {
    // mean 100, stddev 100
    let input = red_ramp(&[0, 200]);
    let red = GreyContrast::new(Coefficients::new(1.0, 0.0, 0.0));

    let cases = [
        (50.0, [50, 150]),
        (100.0, [0, 200]),
        (-100.0, [200, 0]),
        (255.0, [0, 255]),
        (0.0, [100, 100]),
    ];
    for version in Version::ALL {
        for (contrast, expected) in cases {
            assert_eq!(
                run(version, &input, &red.contrast(contrast)),
                expected,
                "{version} contrast {contrast}"
            );
        }
    }
}

#[test]
fn contrast_applies_after_brightness() {
    // After brightness: [250, 255], mean 252.5, stddev 2.5, kstd 2.
    let input = red_ramp(&[10, 20]);
    let params = GreyContrast::new(Coefficients::new(1.0, 0.0, 0.0))
        .brightness(240)
        .contrast(5.0);
    for version in Version::ALL {
        assert_eq!(run(version, &input, &params), [247, 255], "{version}");
    }
}

#[test]
fn variants_agree_on_grey_and_brightness() {
    let mut rng = StdRng::seed_from_u64(1234);
    for round in 0..20 {
        let input = random_image(1 + round * 7, 3 + round % 4, round as u64);
        let params = GreyContrast::new(Coefficients::new(
            rng.random_range(0.0..10.0),
            rng.random_range(0.0..10.0),
            rng.random_range(0.01..10.0),
        ))
        .brightness(rng.random_range(-255..=255));

        let simd = run(Version::Simd, &input, &params);
        let normalized = run(Version::Normalized, &input, &params);
        let naive = run(Version::Naive, &input, &params);

        let context = format!("round {round}: {params:?}");
        assert_within_one(&simd, &normalized, &context);
        assert_within_one(&normalized, &naive, &context);
    }
}

#[test]
fn variants_agree_with_contrast() {
    let mut rng = StdRng::seed_from_u64(99);
    for round in 0..20 {
        let input = random_image(64 + round * 13, 9, 1000 + round as u64);
        let mut params = GreyContrast::default().contrast(rng.random_range(-255.0..=255.0));
        if round % 2 == 1 {
            params = params.brightness(rng.random_range(-100..=100));
        }

        let simd = run(Version::Simd, &input, &params);
        let normalized = run(Version::Normalized, &input, &params);
        let naive = run(Version::Naive, &input, &params);

        let context = format!("round {round}: {params:?}");
        assert_within_one(&simd, &normalized, &context);
        assert_within_one(&normalized, &naive, &context);
    }
}

/// With non-dyadic coefficients the grey values may differ by one between
/// variants, and the contrast slope scales that difference.
#[test]
fn contrast_amplifies_grey_disagreement_by_kstd() {
    let mut rng = StdRng::seed_from_u64(4711);
    let coefficients = Coefficients::new(0.3, 0.59, 0.11);
    for round in 0..20 {
        let input = random_image(48 + round * 11, 7, 2000 + round as u64);
        let brightness = rng.random_range(-60..=60);
        let contrast = rng.random_range(-255.0..=255.0f32);
        let plain = GreyContrast::new(coefficients).brightness(brightness);

        let grey = run(Version::Normalized, &input, &plain);
        let stats = GreyStatistics::two_pass(&grey);
        let kstd = ContrastRemap::new(contrast, stats).unwrap().kstd();
        let bound = ((2.0 * kstd.abs()).ceil() as u8).saturating_add(2);

        let params = plain.contrast(contrast);
        let simd = run(Version::Simd, &input, &params);
        let normalized = run(Version::Normalized, &input, &params);
        let naive = run(Version::Naive, &input, &params);

        for (i, ((&a, &b), &c)) in simd.iter().zip(&normalized).zip(&naive).enumerate() {
            let spread = a.max(b).max(c) - a.min(b).min(c);
            assert!(
                spread <= bound,
                "round {round}, pixel {i}: {a} {b} {c}, kstd {kstd}"
            );
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let input = random_image(123, 17, 8);
    let params = GreyContrast::new(Coefficients::new(0.3, 0.59, 0.11))
        .brightness(-30)
        .contrast(80.0);
    for version in Version::ALL {
        let first = run(version, &input, &params);
        for _ in 0..3 {
            assert_eq!(run(version, &input, &params), first, "{version}");
        }
    }
}

#[test]
fn apply_writes_into_grey_image() {
    let input = RgbImage::new(2, 1, vec![255, 255, 255, 0, 0, 0]).unwrap();
    let mut output = GreyImage::for_source(&input);
    GreyContrast::default()
        .apply(Version::Normalized, &input, &mut output)
        .unwrap();
    assert_eq!(output.bytes(), &[255, 0]);
}

#[test]
#[should_panic(expected = "output buffer size mismatch")]
fn transform_rejects_short_output() {
    let input = RgbImage::new(4, 4, vec![0; 48]).unwrap();
    let mut output = vec![0u8; 15];
    let _ = transform(Version::Simd, &input, &GreyContrast::default(), &mut output);
}

#[test]
fn saturate_truncates_and_clamps() {
    assert_eq!(saturate_u8(-0.5), 0);
    assert_eq!(saturate_u8(-1000.0), 0);
    assert_eq!(saturate_u8(12.99), 12);
    assert_eq!(saturate_u8(255.5), 255);
    assert_eq!(saturate_u8(1e9), 255);
    assert_eq!(saturate_u8(f32::NAN), 0);
}
