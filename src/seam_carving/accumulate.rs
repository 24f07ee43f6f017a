//! Bookkeeping of removed seams for overlay visualisation.
//!
//! Seams are found against an image that shrinks (and is transposed for the
//! height phase), so their raw column indices only make sense for the image
//! they were removed from. The carver therefore threads an origin map through
//! every removal and transpose: each cell holds the linear index `y * W + x`
//! of the pixel in the original image. Recording a seam looks its cells up in
//! that map, so every traced pixel is an original-image coordinate.

use crate::error::{Result, SeamCarveError};
use crate::seam_carving::seam::{Seam, SeamSearch};
use crate::utils::validate_matching_dimensions;
use crate::Image;
use image::{GrayImage, ImageBuffer, Luma, Pixel};

/// Original linear pixel index per working-image cell
pub(crate) type OriginMap = Image<Luma<u32>>;

pub(crate) fn origin_map(width: u32, height: u32) -> Result<OriginMap> {
    if u64::from(width) * u64::from(height) > u64::from(u32::MAX) {
        return Err(SeamCarveError::InvalidImage(format!(
            "{}x{} image is too large to trace seams",
            width, height
        )));
    }
    Ok(ImageBuffer::from_fn(width, height, |x, y| Luma([y * width + x])))
}

/// Which extent a removed seam reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Top-to-bottom seam, narrows the width
    Vertical,
    /// Left-to-right seam, lowers the height
    Horizontal,
}

/// A removed seam, both as found and as original-image pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TracedSeam {
    pub axis: Axis,
    /// Column per row of the (possibly transposed) image it was removed from
    pub seam: Seam,
    pub cost: f32,
    /// `(x, y)` in the original image, one per seam entry
    pub pixels: Vec<(u32, u32)>,
}

/// Every seam removed during one carve, in removal order
#[derive(Debug, Clone, PartialEq)]
pub struct SeamTrail {
    width: u32,
    height: u32,
    seams: Vec<TracedSeam>,
}

impl SeamTrail {
    /// Empty trail for an original image of `width` x `height`
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            seams: Vec::new(),
        }
    }

    /// Dimensions of the original image the pixels refer to
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.seams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seams.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TracedSeam> {
        self.seams.iter()
    }

    pub fn seams(&self) -> &[TracedSeam] {
        &self.seams
    }

    /// Number of seams removed along `axis`
    pub fn count(&self, axis: Axis) -> usize {
        self.seams.iter().filter(|s| s.axis == axis).count()
    }

    /// Sum of the energy of every removed seam
    pub fn total_cost(&self) -> f32 {
        self.seams.iter().map(|s| s.cost).sum()
    }

    pub(crate) fn record(&mut self, axis: Axis, search: SeamSearch, origin: &OriginMap) {
        let width = self.width;
        let pixels = search
            .seam
            .columns()
            .iter()
            .enumerate()
            .map(|(row, &column)| {
                let index = origin.get_pixel(column, row as u32)[0];
                (index % width, index / width)
            })
            .collect();

        self.seams.push(TracedSeam {
            axis,
            seam: search.seam,
            cost: search.cost,
            pixels,
        });
    }

    /// Original-size mask with 255 at every removed pixel
    pub fn to_mask(&self) -> GrayImage {
        let mut mask = GrayImage::new(self.width, self.height);
        for &(x, y) in self.seams.iter().flat_map(|s| s.pixels.iter()) {
            mask.put_pixel(x, y, Luma([255]));
        }
        mask
    }
}

impl<'a> IntoIterator for &'a SeamTrail {
    type Item = &'a TracedSeam;
    type IntoIter = std::slice::Iter<'a, TracedSeam>;

    fn into_iter(self) -> Self::IntoIter {
        self.seams.iter()
    }
}

/// 除去したシームを元画像に描画する機能を提供するトレイト
pub trait DrawSeams<P: Pixel> {
    /// Paints every traced pixel of `trail` with `color`
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::DimensionMismatch` - the image is not the size the trail was recorded for
    fn draw_seams(&self, trail: &SeamTrail, color: P) -> Result<Image<P>>;
}

impl<P> DrawSeams<P> for Image<P>
where
    P: Pixel + 'static,
{
    fn draw_seams(&self, trail: &SeamTrail, color: P) -> Result<Image<P>> {
        validate_matching_dimensions(trail.dimensions(), self.dimensions())?;

        let mut overlay = self.clone();
        for &(x, y) in trail.iter().flat_map(|s| s.pixels.iter()) {
            overlay.put_pixel(x, y, color);
        }
        Ok(overlay)
    }
}
