//! Internal utility functions for seamcarve.
//!
//! This module contains validation and parsing shared by the carving operations.

use crate::error::{Result, SeamCarveError};
use log::warn;

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
/// * `context` - A description of the context for error messages
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `SeamCarveError::InvalidImage`
pub fn validate_non_empty_image(width: u32, height: u32, context: &str) -> Result<()> {
    if width == 0 || height == 0 {
        Err(SeamCarveError::InvalidImage(format!(
            "{}: image dimensions must be non-zero, got {}x{}",
            context, width, height
        )))
    } else {
        Ok(())
    }
}

/// Validates that two buffers have matching dimensions.
///
/// `expected` is the shape of the image being carved, `actual` the shape of
/// the companion buffer (mask or overlay base).
pub fn validate_matching_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        Err(SeamCarveError::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}

/// Validates a requested target size against the current image size.
///
/// Targets must be non-zero and no larger than the image on either axis.
pub fn validate_target(size: (u32, u32), target: (u32, u32)) -> Result<()> {
    let (width, height) = size;
    let (target_width, target_height) = target;
    if target_width == 0 || target_height == 0 || target_width > width || target_height > height
    {
        return Err(SeamCarveError::InvalidDimensions {
            width,
            height,
            target_width,
            target_height,
        });
    }
    Ok(())
}

/// Parses a seam count, falling back to a single seam on malformed input.
///
/// Negative numbers, empty strings and non-numeric text all yield `1` and log
/// a warning.
pub fn parse_seam_count(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(count) => count,
        Err(err) => {
            warn!("invalid seam count {:?} ({}), using 1 seam", input, err);
            1
        }
    }
}
