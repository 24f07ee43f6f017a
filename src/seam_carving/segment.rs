use crate::seam_carving::energy::ProtectionMask;
use crate::Image;
use image::{Luma, Pixel};

/// Foreground segmentation collaborator for content-aware carving
///
/// Implementations return a mask of the same shape as the image they are
/// given; non-zero samples mark pixels to protect.
pub trait Segmenter<P: Pixel> {
    fn segment(&self, image: &Image<P>) -> ProtectionMask;
}

impl<P, F> Segmenter<P> for F
where
    P: Pixel,
    F: Fn(&Image<P>) -> ProtectionMask,
{
    fn segment(&self, image: &Image<P>) -> ProtectionMask {
        self(image)
    }
}

/// Protects a fixed rectangle, clipped to the image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ProtectRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && u64::from(x) < u64::from(self.x) + u64::from(self.width)
            && u64::from(y) < u64::from(self.y) + u64::from(self.height)
    }
}

impl<P: Pixel> Segmenter<P> for ProtectRegion {
    fn segment(&self, image: &Image<P>) -> ProtectionMask {
        ProtectionMask::from_fn(image.width(), image.height(), |x, y| {
            Luma([if self.contains(x, y) { 255 } else { 0 }])
        })
    }
}
