//! Comprehensive edge case and error condition tests
//!
//! This test suite focuses on boundary sizes, error conditions, and the
//! guarantee that a failed operation leaves its input untouched.

use image::{Luma, Rgb};
use seamcarve::{
    compare_strategies, parse_seam_count, CarveOptions, ComputeEnergy, DrawSeams, EnergyMap,
    FindSeam, Image, ProtectionMask, RemoveSeam, Seam, SeamCarve, SeamCarveError, SeamCarver,
    SeamTrail, Strategy,
};

/// Helper to create minimal 1x1 image
fn create_minimal_rgb_image() -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(1, 1);
    image.put_pixel(0, 0, Rgb([128, 128, 128]));
    image
}

/// Helper to create a small image with distinct pixels
fn create_numbered_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    Image::from_fn(width, height, |x, y| {
        Rgb([(x * 20) as u8, (y * 20) as u8, ((x + y) * 10) as u8])
    })
}

#[test]
fn test_minimum_image_size_operations() {
    let image = create_minimal_rgb_image();

    let energy = image.compute_energy(None).unwrap();
    assert_eq!(energy.dimensions(), (1, 1));
    assert_eq!(energy.get_pixel(0, 0)[0], 0.0);

    for strategy in [Strategy::Greedy, Strategy::ExactDp] {
        let found = energy.find_seam(strategy).unwrap();
        assert_eq!(found.seam.columns(), &[0]);

        let carved = image.seam_carve(1, 1, strategy).unwrap();
        assert_eq!(carved, image);
    }
}

#[test]
fn test_single_column_image_cannot_lose_its_column() {
    let image = create_numbered_image(1, 5);
    assert_eq!(
        image.seam_carve(0, 5, Strategy::Greedy),
        Err(SeamCarveError::InvalidDimensions {
            width: 1,
            height: 5,
            target_width: 0,
            target_height: 5,
        })
    );

    // height can still be reduced through the transpose
    let carved = image.seam_carve(1, 2, Strategy::ExactDp).unwrap();
    assert_eq!(carved.dimensions(), (1, 2));
}

#[test]
fn test_single_row_image_narrows() {
    let image = create_numbered_image(6, 1);
    let carved = image.seam_carve(2, 1, Strategy::Greedy).unwrap();
    assert_eq!(carved.dimensions(), (2, 1));
}

#[test]
fn test_empty_image_errors() {
    let empty: Image<Rgb<u8>> = Image::new(0, 0);

    assert!(matches!(
        empty.compute_energy(None),
        Err(SeamCarveError::InvalidImage(_))
    ));
    assert!(matches!(
        empty.seam_carve(0, 0, Strategy::Greedy),
        Err(SeamCarveError::InvalidImage(_))
    ));
    assert!(matches!(
        empty.remove_seam(&Seam::new(vec![])),
        Err(SeamCarveError::InvalidImage(_))
    ));
    assert!(matches!(
        EnergyMap::new(3, 0).find_seam(Strategy::Greedy),
        Err(SeamCarveError::InvalidImage(_))
    ));
}

#[test]
fn test_enlargement_leaves_image_unmodified() {
    let image = create_numbered_image(5, 4);
    let before = image.as_raw().clone();

    for (width, height) in [(6, 4), (5, 5), (9, 9)] {
        let result = image.seam_carve(width, height, Strategy::ExactDp);
        assert_eq!(
            result,
            Err(SeamCarveError::InvalidDimensions {
                width: 5,
                height: 4,
                target_width: width,
                target_height: height,
            })
        );
    }

    assert_eq!(image.as_raw(), &before);
}

#[test]
fn test_zero_target_is_rejected() {
    let image = create_numbered_image(4, 4);
    assert!(matches!(
        image.seam_carve(4, 0, Strategy::Greedy),
        Err(SeamCarveError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_unknown_algorithm_names() {
    for name in ["", "Greedy", "exact", "dp ", "fast"] {
        assert_eq!(
            name.parse::<Strategy>(),
            Err(SeamCarveError::UnknownAlgorithm(name.to_string()))
        );
    }
}

#[test]
fn test_invalid_seams_are_rejected_by_removal() {
    let image = create_numbered_image(3, 3);
    let before = image.clone();

    assert_eq!(
        image.remove_seam(&Seam::new(vec![0, 1, 3])),
        Err(SeamCarveError::IndexOutOfRange {
            row: 2,
            column: 3,
            width: 3,
        })
    );
    assert_eq!(
        image.remove_seam(&Seam::new(vec![0, 0])),
        Err(SeamCarveError::SeamLengthMismatch {
            expected: 3,
            actual: 2,
        })
    );
    assert_eq!(
        image.remove_seam(&Seam::new(vec![2, 0, 0])),
        Err(SeamCarveError::DisconnectedSeam {
            row: 1,
            from: 2,
            to: 0,
        })
    );
    assert_eq!(image, before);
}

#[test]
fn test_seam_limit_and_parameters() {
    let image = create_numbered_image(8, 8);

    let result = image.seam_carve_with(4, 4, &CarveOptions::default().with_max_seams(7));
    assert_eq!(
        result.err(),
        Some(SeamCarveError::SeamLimitExceeded {
            required: 8,
            limit: 7,
        })
    );

    let within = image.seam_carve_with(4, 4, &CarveOptions::default().with_max_seams(8));
    assert!(within.is_ok());

    for factor in [0.0, -2.0, f32::NAN, f32::INFINITY] {
        let options = CarveOptions::default().with_protection_factor(factor);
        assert!(matches!(
            image.seam_carve_with(7, 8, &options),
            Err(SeamCarveError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_mask_dimension_mismatch() {
    let image = create_numbered_image(4, 3);
    let mask = ProtectionMask::new(3, 4);
    assert_eq!(
        image.compute_energy(Some(&mask)),
        Err(SeamCarveError::DimensionMismatch {
            expected: (4, 3),
            actual: (3, 4),
        })
    );
}

#[test]
fn test_overlay_requires_original_dimensions() {
    let image = create_numbered_image(4, 4);
    let output = image.seam_carve_with(3, 4, &CarveOptions::default()).unwrap();

    // overlay on the carved image instead of the original
    assert!(matches!(
        output.image.draw_seams(&output.trail, Rgb([255, 0, 0])),
        Err(SeamCarveError::DimensionMismatch { .. })
    ));

    let empty = SeamTrail::new(4, 4);
    assert_eq!(image.draw_seams(&empty, Rgb([255, 0, 0])).unwrap(), image);
}

#[test]
fn test_carve_seams_rejects_counts_consuming_the_image() {
    let image = create_numbered_image(3, 3);
    let mut carver = SeamCarver::new(CarveOptions::default());

    assert!(matches!(
        carver.carve_seams(&image, 3, 0),
        Err(SeamCarveError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        carver.carve_seams(&image, 0, 10),
        Err(SeamCarveError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        compare_strategies(&image, 4, 0, &CarveOptions::default()),
        Err(SeamCarveError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_parse_seam_count_falls_back_to_one() {
    assert_eq!(parse_seam_count("12"), 12);
    assert_eq!(parse_seam_count(" 3\n"), 3);
    assert_eq!(parse_seam_count("0"), 0);
    assert_eq!(parse_seam_count("-4"), 1);
    assert_eq!(parse_seam_count("abc"), 1);
    assert_eq!(parse_seam_count(""), 1);
}

#[test]
fn test_grayscale_images_are_supported() {
    let image: Image<Luma<u8>> = Image::from_fn(5, 5, |x, y| Luma([(x * y * 9) as u8]));
    let carved = image.seam_carve(3, 4, Strategy::ExactDp).unwrap();
    assert_eq!(carved.dimensions(), (3, 4));
}

#[test]
fn test_error_messages() {
    let error = SeamCarveError::InvalidDimensions {
        width: 4,
        height: 3,
        target_width: 5,
        target_height: 3,
    };
    assert_eq!(error.to_string(), "Cannot carve a 4x3 image to 5x3");

    let error = SeamCarveError::UnknownAlgorithm("fast".to_string());
    assert_eq!(
        error.to_string(),
        "Unknown algorithm 'fast': expected 'greedy' or 'dp'"
    );
}
