//! Per-pixel importance ("energy") of an image.
//!
//! Energy is the Sobel gradient magnitude of the luminance channel. Borders
//! replicate the edge pixel, so a flat image has zero energy everywhere
//! including its outermost rows and columns.

use crate::error::{Result, SeamCarveError};
use crate::utils::{validate_matching_dimensions, validate_non_empty_image};
use crate::Image;
use image::{GrayImage, Luma, Pixel};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use imageproc::map::map_colors;

/// Grid of non-negative energy values, one per pixel
pub type EnergyMap = Image<Luma<f32>>;

/// Boolean grid of pixels to discourage removing; any non-zero sample is protected
pub type ProtectionMask = GrayImage;

/// Multiplier applied to the energy of protected pixels
pub const PROTECTION_FACTOR: f32 = 10.0;

/// エネルギーマップを計算する機能を提供するトレイト
///
/// Energy is always computed from scratch; nothing is cached between calls.
pub trait ComputeEnergy {
    /// Computes the energy map, boosting masked pixels by [`PROTECTION_FACTOR`]
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::InvalidImage` - the image has a zero width or height
    /// * `SeamCarveError::DimensionMismatch` - the mask shape differs from the image
    fn compute_energy(&self, mask: Option<&ProtectionMask>) -> Result<EnergyMap> {
        self.compute_energy_with_factor(mask, PROTECTION_FACTOR)
    }

    /// Computes the energy map with an explicit protection factor
    ///
    /// # Errors
    ///
    /// As [`ComputeEnergy::compute_energy`], plus
    /// `SeamCarveError::InvalidParameter` when `factor` is not a finite value
    /// of at least `1.0`.
    fn compute_energy_with_factor(
        &self,
        mask: Option<&ProtectionMask>,
        factor: f32,
    ) -> Result<EnergyMap>;
}

impl<P> ComputeEnergy for Image<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    fn compute_energy_with_factor(
        &self,
        mask: Option<&ProtectionMask>,
        factor: f32,
    ) -> Result<EnergyMap> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height, "compute_energy")?;
        validate_protection_factor(factor)?;
        if let Some(mask) = mask {
            validate_matching_dimensions((width, height), mask.dimensions())?;
        }

        let luma: GrayImage = map_colors(self, |pixel| pixel.to_luma());
        let mut energy = gradient_magnitude(&luma)?;

        if let Some(mask) = mask {
            apply_protection(&mut energy, mask, factor);
        }

        Ok(energy)
    }
}

pub(crate) fn validate_protection_factor(factor: f32) -> Result<()> {
    if !factor.is_finite() || factor < 1.0 {
        return Err(SeamCarveError::InvalidParameter(format!(
            "protection factor must be a finite value >= 1.0, got {}",
            factor
        )));
    }
    Ok(())
}

fn gradient_magnitude(luma: &GrayImage) -> Result<EnergyMap> {
    let gx = horizontal_sobel(luma);
    let gy = vertical_sobel(luma);

    let data = gx
        .as_raw()
        .iter()
        .zip(gy.as_raw())
        .map(|(&dx, &dy)| f32::from(dx).hypot(f32::from(dy)))
        .collect();

    EnergyMap::from_raw(luma.width(), luma.height(), data)
        .ok_or(SeamCarveError::ImageBufferCreationFailed)
}

fn apply_protection(energy: &mut EnergyMap, mask: &ProtectionMask, factor: f32) {
    for (cell, protected) in energy.pixels_mut().zip(mask.pixels()) {
        if protected[0] != 0 {
            cell[0] *= factor;
        }
    }
}

/// Scales an energy map to a viewable 8-bit heatmap
///
/// The highest energy maps to 255; an all-zero map stays black.
pub fn energy_heatmap(energy: &EnergyMap) -> GrayImage {
    let max = energy.pixels().fold(0.0f32, |acc, p| acc.max(p[0]));
    if max <= 0.0 {
        return GrayImage::new(energy.width(), energy.height());
    }
    map_colors(energy, |p| Luma([(p[0] / max * 255.0).round().clamp(0.0, 255.0) as u8]))
}
