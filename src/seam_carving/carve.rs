//! Iterative resize controller.
//!
//! Each removal runs energy → seam search → seam removal on the current
//! image; nothing is reused between removals. Width is reduced first. The
//! working state is then transposed so the same loop lowers the height, and
//! transposed back at the end.

use crate::error::{Result, SeamCarveError};
use crate::seam_carving::accumulate::{origin_map, Axis, OriginMap, SeamTrail};
use crate::seam_carving::energy::{validate_protection_factor, ComputeEnergy, EnergyMap};
use crate::seam_carving::energy::{ProtectionMask, PROTECTION_FACTOR};
use crate::seam_carving::remove::remove_unchecked;
use crate::seam_carving::seam::{FindSeam, SeamSearch, Strategy};
use crate::seam_carving::segment::Segmenter;
use crate::seam_carving::transpose::Transpose;
use crate::utils::{validate_matching_dimensions, validate_non_empty_image, validate_target};
use crate::Image;
use image::Pixel;
use log::{debug, info};
use std::fmt;

/// How the protection mask follows the shrinking image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MaskRefresh {
    /// Segment once, then remove every seam from the mask as well
    ///
    /// Mask pixels travel with their image pixels, so the mask never drifts.
    #[default]
    Carve,
    /// Ask the segmenter again before every seam search
    Resegment,
}

/// Settings for one carve
#[derive(Debug, Clone, PartialEq)]
pub struct CarveOptions {
    pub strategy: Strategy,
    /// Energy multiplier under the protection mask
    pub protection_factor: f32,
    pub mask_refresh: MaskRefresh,
    /// Refuse resizes needing more removals than this
    pub max_seams: Option<usize>,
}

impl Default for CarveOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Greedy,
            protection_factor: PROTECTION_FACTOR,
            mask_refresh: MaskRefresh::Carve,
            max_seams: None,
        }
    }
}

impl CarveOptions {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_protection_factor(mut self, factor: f32) -> Self {
        self.protection_factor = factor;
        self
    }

    pub fn with_mask_refresh(mut self, refresh: MaskRefresh) -> Self {
        self.mask_refresh = refresh;
        self
    }

    pub fn with_max_seams(mut self, limit: usize) -> Self {
        self.max_seams = Some(limit);
        self
    }
}

/// Snapshot reported after every removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveProgress {
    pub axis: Axis,
    /// Seams removed so far, both axes
    pub removed: usize,
    /// Seams the whole carve removes
    pub total: usize,
}

impl CarveProgress {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.removed * 100 / self.total
        }
    }
}

/// Result of a carve
#[derive(Clone)]
pub struct CarveOutput<P: Pixel> {
    pub image: Image<P>,
    /// Energy of the final image, for heatmaps
    pub energy: EnergyMap,
    /// Removed seams in original-image coordinates
    pub trail: SeamTrail,
}

// Buffers are summarised by size; `Image<P>` is only `Debug` for some subpixels.
impl<P: Pixel> fmt::Debug for CarveOutput<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarveOutput")
            .field("image", &self.image.dimensions())
            .field("energy", &self.energy.dimensions())
            .field("trail", &self.trail)
            .finish()
    }
}

/// Greedy and exact results for the same input
#[derive(Clone)]
pub struct StrategyComparison<P: Pixel> {
    pub greedy: CarveOutput<P>,
    pub exact: CarveOutput<P>,
}

impl<P: Pixel> fmt::Debug for StrategyComparison<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyComparison")
            .field("greedy", &self.greedy)
            .field("exact", &self.exact)
            .finish()
    }
}

/// Working state of a carve; every removal produces a new one
struct CarveState<P: Pixel> {
    image: Image<P>,
    origin: OriginMap,
    mask: Option<ProtectionMask>,
    trail: SeamTrail,
    transposed: bool,
}

impl<P> CarveState<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    fn new(image: &Image<P>, mask: Option<ProtectionMask>) -> Result<Self> {
        let (width, height) = image.dimensions();
        Ok(Self {
            image: image.clone(),
            origin: origin_map(width, height)?,
            mask,
            trail: SeamTrail::new(width, height),
            transposed: false,
        })
    }

    fn axis(&self) -> Axis {
        if self.transposed {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    fn without_seam(self, search: SeamSearch) -> Result<Self> {
        let axis = self.axis();
        let image = remove_unchecked(&self.image, &search.seam)?;
        let origin = remove_unchecked(&self.origin, &search.seam)?;
        let mask = match &self.mask {
            Some(mask) => Some(remove_unchecked(mask, &search.seam)?),
            None => None,
        };
        let mut trail = self.trail;
        trail.record(axis, search, &self.origin);

        Ok(Self {
            image,
            origin,
            mask,
            trail,
            transposed: self.transposed,
        })
    }

    fn transposed(self) -> Self {
        Self {
            image: self.image.transpose(),
            origin: self.origin.transpose(),
            mask: self.mask.as_ref().map(Transpose::transpose),
            trail: self.trail,
            transposed: !self.transposed,
        }
    }
}

/// シームカービングによるリサイズを実行する構造体
///
/// Holds the options, an optional segmentation collaborator and an optional
/// progress observer. One carver can run any number of carves.
pub struct SeamCarver<'a, P: Pixel> {
    options: CarveOptions,
    segmenter: Option<&'a dyn Segmenter<P>>,
    progress: Option<Box<dyn FnMut(CarveProgress) + 'a>>,
}

impl<'a, P> SeamCarver<'a, P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    pub fn new(options: CarveOptions) -> Self {
        Self {
            options,
            segmenter: None,
            progress: None,
        }
    }

    /// Enables content-aware mode
    pub fn with_segmenter(mut self, segmenter: &'a dyn Segmenter<P>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Registers a callback invoked after every removed seam
    pub fn on_progress(mut self, observer: impl FnMut(CarveProgress) + 'a) -> Self {
        self.progress = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &CarveOptions {
        &self.options
    }

    /// Carves `image` down to `target_width` x `target_height`
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::InvalidImage` - the image has a zero width or height
    /// * `SeamCarveError::InvalidDimensions` - a target is zero or larger than the image
    /// * `SeamCarveError::SeamLimitExceeded` - more removals than `max_seams` allows
    /// * `SeamCarveError::InvalidParameter` - the protection factor is unusable
    /// * `SeamCarveError::DimensionMismatch` - the segmenter returned a mask of the wrong shape
    pub fn carve(
        &mut self,
        image: &Image<P>,
        target_width: u32,
        target_height: u32,
    ) -> Result<CarveOutput<P>> {
        let (width, height) = image.dimensions();
        validate_non_empty_image(width, height, "carve")?;
        validate_target((width, height), (target_width, target_height))?;
        validate_protection_factor(self.options.protection_factor)?;

        let vertical = (width - target_width) as usize;
        let horizontal = (height - target_height) as usize;
        let total = vertical + horizontal;
        if let Some(limit) = self.options.max_seams {
            if total > limit {
                return Err(SeamCarveError::SeamLimitExceeded {
                    required: total,
                    limit,
                });
            }
        }

        info!(
            "carving {}x{} to {}x{} with {} ({} seams)",
            width, height, target_width, target_height, self.options.strategy, total
        );

        let mask = match (self.segmenter, self.options.mask_refresh) {
            (Some(segmenter), MaskRefresh::Carve) => Some(segment(segmenter, image, false)?),
            _ => None,
        };

        let state = CarveState::new(image, mask)?;
        let state = self.reduce(state, target_width, 0, total)?;
        let state = self.reduce(state.transposed(), target_height, vertical, total)?;
        let state = state.transposed();

        let energy = state.image.compute_energy(None)?;
        info!(
            "carved to {}x{}, removed seam energy {:.1}",
            state.image.width(),
            state.image.height(),
            state.trail.total_cost()
        );

        Ok(CarveOutput {
            image: state.image,
            energy,
            trail: state.trail,
        })
    }

    /// Removes `vertical` seams (narrowing) and `horizontal` seams (lowering)
    ///
    /// # Errors
    ///
    /// As [`SeamCarver::carve`]; a count that would leave no columns or no rows
    /// fails with `SeamCarveError::InvalidDimensions`.
    pub fn carve_seams(
        &mut self,
        image: &Image<P>,
        vertical: u32,
        horizontal: u32,
    ) -> Result<CarveOutput<P>> {
        let (width, height) = image.dimensions();
        validate_non_empty_image(width, height, "carve_seams")?;
        let target_width = width.saturating_sub(vertical);
        let target_height = height.saturating_sub(horizontal);
        self.carve(image, target_width, target_height)
    }

    fn reduce(
        &mut self,
        mut state: CarveState<P>,
        target: u32,
        done: usize,
        total: usize,
    ) -> Result<CarveState<P>> {
        let axis = state.axis();
        let mut removed = done;

        while state.image.width() > target {
            let search = {
                let fresh;
                let mask = match (self.segmenter, self.options.mask_refresh) {
                    (Some(segmenter), MaskRefresh::Resegment) => {
                        fresh = segment(segmenter, &state.image, state.transposed)?;
                        Some(&fresh)
                    }
                    _ => state.mask.as_ref(),
                };
                let energy = state
                    .image
                    .compute_energy_with_factor(mask, self.options.protection_factor)?;
                energy.find_seam(self.options.strategy)?
            };

            removed += 1;
            debug!(
                "removing {:?} seam {}/{}: extent {} -> {}, cost {:.1}",
                axis,
                removed,
                total,
                state.image.width(),
                target,
                search.cost
            );

            state = state.without_seam(search)?;
            self.report(CarveProgress {
                axis,
                removed,
                total,
            });
        }

        Ok(state)
    }

    fn report(&mut self, progress: CarveProgress) {
        let step = (progress.total / 10).max(1);
        if progress.removed % step == 0 || progress.removed == progress.total {
            info!("progress: {}%", progress.percent());
        }
        if let Some(observer) = self.progress.as_mut() {
            observer(progress);
        }
    }
}

/// Runs the segmenter on the image as the caller sees it
///
/// During the height phase the working image is transposed; the segmenter is
/// shown the upright image and its mask is transposed to match.
fn segment<P>(
    segmenter: &dyn Segmenter<P>,
    image: &Image<P>,
    transposed: bool,
) -> Result<ProtectionMask>
where
    P: Pixel + 'static,
{
    let mask = if transposed {
        segmenter.segment(&image.transpose()).transpose()
    } else {
        segmenter.segment(image)
    };
    validate_matching_dimensions(image.dimensions(), mask.dimensions())?;
    Ok(mask)
}

/// シームカービングによるリサイズ機能を提供するトレイト
pub trait SeamCarve<P: Pixel> {
    /// Carves the image to `target_width` x `target_height`
    ///
    /// Asking for the current size performs no removals and returns an equal
    /// image.
    ///
    /// # Errors
    ///
    /// * `SeamCarveError::InvalidImage` - the image has a zero width or height
    /// * `SeamCarveError::InvalidDimensions` - a target is zero or larger than the image
    fn seam_carve(&self, target_width: u32, target_height: u32, strategy: Strategy)
        -> Result<Image<P>>;

    /// Carves with full options, returning the energy map and removed seams too
    fn seam_carve_with(
        &self,
        target_width: u32,
        target_height: u32,
        options: &CarveOptions,
    ) -> Result<CarveOutput<P>>;
}

impl<P> SeamCarve<P> for Image<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    fn seam_carve(
        &self,
        target_width: u32,
        target_height: u32,
        strategy: Strategy,
    ) -> Result<Image<P>> {
        let options = CarveOptions::default().with_strategy(strategy);
        self.seam_carve_with(target_width, target_height, &options)
            .map(|output| output.image)
    }

    fn seam_carve_with(
        &self,
        target_width: u32,
        target_height: u32,
        options: &CarveOptions,
    ) -> Result<CarveOutput<P>> {
        SeamCarver::new(options.clone()).carve(self, target_width, target_height)
    }
}

/// Removes the same seam counts with both strategies, on independent copies
///
/// `options.strategy` is ignored; everything else applies to both runs.
pub fn compare_strategies<P>(
    image: &Image<P>,
    vertical: u32,
    horizontal: u32,
    options: &CarveOptions,
) -> Result<StrategyComparison<P>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let greedy = SeamCarver::new(options.clone().with_strategy(Strategy::Greedy))
        .carve_seams(image, vertical, horizontal)?;
    let exact = SeamCarver::new(options.clone().with_strategy(Strategy::ExactDp))
        .carve_seams(image, vertical, horizontal)?;

    info!(
        "removed seam energy: greedy {:.1}, dp {:.1}",
        greedy.trail.total_cost(),
        exact.trail.total_cost()
    );

    Ok(StrategyComparison { greedy, exact })
}
