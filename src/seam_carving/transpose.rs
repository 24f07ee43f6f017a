use crate::Image;
use image::{ImageBuffer, Pixel};

/// Swaps rows and columns, so height reduction can reuse width reduction
pub trait Transpose {
    fn transpose(&self) -> Self;
}

impl<P> Transpose for Image<P>
where
    P: Pixel + 'static,
{
    fn transpose(&self) -> Self {
        let (width, height) = self.dimensions();
        ImageBuffer::from_fn(height, width, |x, y| *self.get_pixel(y, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_rgb_image;
    use image::Luma;

    #[test]
    fn transpose_swaps_axes() {
        let image: Image<Luma<u8>> = ImageBuffer::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let flipped = image.transpose();

        assert_eq!(flipped.dimensions(), (2, 3));
        assert_eq!(flipped.as_raw(), &vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn transpose_twice_is_identity() {
        let image = create_test_rgb_image();
        assert_eq!(image.transpose().transpose(), image);
    }
}
