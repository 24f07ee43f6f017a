mod error;
mod seam_carving;
#[cfg(test)]
mod test_utils;
mod utils;

use image::{ImageBuffer, Pixel};

pub use error::{Result, SeamCarveError};
pub use seam_carving::accumulate::{Axis, DrawSeams, SeamTrail, TracedSeam};
pub use seam_carving::carve::{
    compare_strategies, CarveOptions, CarveOutput, CarveProgress, MaskRefresh, SeamCarve,
    SeamCarver, StrategyComparison,
};
pub use seam_carving::energy::{
    energy_heatmap, ComputeEnergy, EnergyMap, ProtectionMask, PROTECTION_FACTOR,
};
pub use seam_carving::remove::RemoveSeam;
pub use seam_carving::seam::{FindSeam, Seam, SeamSearch, Strategy};
pub use seam_carving::segment::{ProtectRegion, Segmenter};
pub use seam_carving::transpose::Transpose;
pub use utils::parse_seam_count;

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
