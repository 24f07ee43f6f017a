//! Test utilities for seamcarve
//!
//! This module provides common fixtures for testing carving operations.
//! It is only compiled when running tests.

use crate::seam_carving::energy::EnergyMap;
use crate::Image;
use image::{ImageBuffer, Luma, Rgb};

/// Creates a test RGB image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_rgb_image() -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgb([200, 150, 100]));
    image.put_pixel(1, 0, Rgb([100, 200, 150]));
    image.put_pixel(0, 1, Rgb([150, 100, 200]));
    image.put_pixel(1, 1, Rgb([50, 75, 25]));
    image
}

/// Creates a 4x3 grayscale image: two black columns, then two white ones.
///
/// Its Sobel energy is `[0, 1020, 1020, 0]` on every row.
pub fn vertical_edge_image() -> Image<Luma<u8>> {
    ImageBuffer::from_fn(4, 3, |x, _| Luma([if x < 2 { 0 } else { 255 }]))
}

/// Builds an energy map from literal rows.
pub fn energy_from_rows<const N: usize>(rows: &[[f32; N]]) -> EnergyMap {
    let data = rows.iter().flatten().copied().collect();
    EnergyMap::from_raw(N as u32, rows.len() as u32, data)
        .expect("rows describe a complete grid")
}

/// Creates a larger RGB test image.
///
/// A diagonal colour gradient with a bright square near the centre, so the
/// energy is uneven and seams have somewhere to prefer.
pub fn create_large_test_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        let inside = x >= width / 3 && x < width * 2 / 3 && y >= height / 3 && y < height * 2 / 3;
        if inside {
            Rgb([250, 240, 40])
        } else {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            Rgb([r, g, ((x + y) * 7 % 256) as u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgb_image_with_valid_input_creates_image() {
        let image = create_test_rgb_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 150, 100]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([50, 75, 25]));
    }

    #[test]
    fn energy_from_rows_is_row_major() {
        let energy = energy_from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(energy.dimensions(), (2, 3));
        assert_eq!(energy.get_pixel(1, 2)[0], 6.0);
    }

    #[test]
    fn create_large_test_image_with_valid_input_creates_image() {
        let image = create_large_test_image(9, 9);
        assert_eq!(image.dimensions(), (9, 9));
        assert_eq!(image.get_pixel(4, 4), &Rgb([250, 240, 40]));
        assert_ne!(image.get_pixel(0, 0), &Rgb([250, 240, 40]));
    }
}
