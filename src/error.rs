use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SeamCarveError>;

/// Error type for seam carving operations
///
/// Every operation builds new buffers instead of mutating its input, so
/// any of these errors leaves the caller's image exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeamCarveError {
    /// The image has no spatial extent
    ///
    /// Energy cannot be computed for an image whose width or height is zero.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The requested size is larger than the image or zero
    ///
    /// Carving only ever shrinks an image, one seam at a time.
    #[error("Cannot carve a {width}x{height} image to {target_width}x{target_height}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },

    /// The seam search strategy name is not recognised
    #[error("Unknown algorithm '{0}': expected 'greedy' or 'dp'")]
    UnknownAlgorithm(String),

    /// A seam entry points outside the image row
    #[error("Seam column {column} in row {row} is outside 0..{width}")]
    IndexOutOfRange { row: u32, column: u32, width: u32 },

    /// A seam does not have one entry per image row
    #[error("Seam has {actual} entries but the image has {expected} rows")]
    SeamLengthMismatch { expected: u32, actual: u32 },

    /// Two consecutive seam entries are more than one column apart
    #[error("Seam jumps from column {from} to {to} at row {row}")]
    DisconnectedSeam { row: u32, from: u32, to: u32 },

    /// Image and mask (or overlay base) dimensions do not match
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// The resize would remove more seams than the configured cap
    #[error("Resize needs {required} seam removals but the limit is {limit}")]
    SeamLimitExceeded { required: usize, limit: usize },

    /// Invalid parameter provided to the operation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failed to create ImageBuffer from carved pixels
    #[error("Failed to create ImageBuffer from carved pixels")]
    ImageBufferCreationFailed,
}
