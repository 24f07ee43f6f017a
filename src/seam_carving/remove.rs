use crate::error::{Result, SeamCarveError};
use crate::seam_carving::seam::Seam;
use crate::utils::validate_non_empty_image;
use crate::Image;
use image::{ImageBuffer, Pixel};

/// 画像からシームを取り除く機能を提供するトレイト
pub trait RemoveSeam: Sized {
    /// Returns a copy one column narrower with the seam pixels dropped
    ///
    /// Pixels left of the seam keep their position, pixels right of it move
    /// one column left. Rows are handled independently.
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::InvalidImage` - the image has no pixels
    /// * `SeamCarveError::SeamLengthMismatch` - the seam is not one entry per row
    /// * `SeamCarveError::IndexOutOfRange` - a seam entry lies outside the row
    /// * `SeamCarveError::DisconnectedSeam` - the seam breaks 8-connectivity
    fn remove_seam(&self, seam: &Seam) -> Result<Self>;
}

impl<P> RemoveSeam for Image<P>
where
    P: Pixel + 'static,
{
    fn remove_seam(&self, seam: &Seam) -> Result<Self> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height, "remove_seam")?;
        seam.validate(width, height)?;
        remove_unchecked(self, seam)
    }
}

/// Removal for seams already known to fit the image
pub(crate) fn remove_unchecked<P>(image: &Image<P>, seam: &Seam) -> Result<Image<P>>
where
    P: Pixel + 'static,
{
    let (width, height) = image.dimensions();
    debug_assert!(seam.is_valid_for(width, height));

    let channels = usize::from(P::CHANNEL_COUNT);
    let stride = width as usize * channels;
    let mut data = Vec::with_capacity(stride.saturating_sub(channels) * height as usize);

    for (row, &column) in image.as_raw().chunks_exact(stride.max(1)).zip(seam.columns()) {
        let cut = column as usize * channels;
        data.extend_from_slice(&row[..cut]);
        data.extend_from_slice(&row[cut + channels..]);
    }

    ImageBuffer::from_raw(width - 1, height, data).ok_or(SeamCarveError::ImageBufferCreationFailed)
}
