use colorbar_common::types::rgba_to_u8;
use colorbar_image::RgbaImage;
use colorbar_scales::color_interpolator::ColorInterpolator;
use colorbar_scales::error::ColorbarScaleError;

use crate::error::ColorbarGuidesError;

pub const DEFAULT_SAMPLES: usize = 256;

/// Rasterize an interpolator into a one-pixel-tall strip.
///
/// Column `i` holds the color at `i / (samples - 1)`, so the first and last
/// columns are the interpolator's endpoints.
pub fn make_ramp(
    interpolator: &dyn ColorInterpolator,
    samples: usize,
) -> Result<RgbaImage, ColorbarGuidesError> {
    if samples < 2 {
        return Err(ColorbarGuidesError::InvalidSampleCount(samples));
    }

    let last = (samples - 1) as f32;
    let positions: Vec<f32> = (0..samples).map(|i| i as f32 / last).collect();
    let colors = interpolator.interpolate(&positions)?;
    if colors.len() != samples {
        return Err(ColorbarScaleError::InterpolationError(format!(
            "Expected {samples} colors, interpolator produced {}",
            colors.len()
        ))
        .into());
    }

    log::trace!("Sampled {samples} ramp colors from {interpolator:?}");

    let data: Vec<u8> = colors.iter().flat_map(rgba_to_u8).collect();
    Ok(RgbaImage::try_new(samples as u32, 1, data)?)
}
