use crate::error::ColorbarScaleError;
use colorbar_common::types::Rgba;
use palette::{Hsla, IntoColor, Laba, Mix, Srgba};
use std::fmt::Debug;

/// Maps normalized positions in [0, 1] to RGBA colors
pub trait ColorInterpolator: Debug + Send + Sync + 'static {
    fn interpolate(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError>;

    /// Convenience for sampling a single position
    fn interpolate_one(&self, value: f32) -> Result<Rgba, ColorbarScaleError> {
        self.interpolate(&[value])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ColorbarScaleError::InterpolationError(format!("No color produced for {value}"))
            })
    }
}

fn validate_stops(colors: &[Rgba]) -> Result<(), ColorbarScaleError> {
    if colors.is_empty() {
        return Err(ColorbarScaleError::EmptyRange);
    }
    Ok(())
}

/// Interpolates evenly spaced color stops in sRGB space
#[derive(Clone, Debug)]
pub struct SrgbaColorInterpolator {
    colors: Vec<Rgba>,
}

impl SrgbaColorInterpolator {
    pub fn try_new(colors: Vec<Rgba>) -> Result<Self, ColorbarScaleError> {
        validate_stops(&colors)?;
        Ok(Self { colors })
    }
}

impl ColorInterpolator for SrgbaColorInterpolator {
    fn interpolate(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        let srgba_colors: Vec<Srgba> = self
            .colors
            .iter()
            .map(|c| Srgba::from_components((c[0], c[1], c[2], c[3])))
            .collect();
        Ok(interpolate_color(&srgba_colors, values))
    }
}

/// Interpolates evenly spaced color stops in HSL space
#[derive(Clone, Debug)]
pub struct HslaColorInterpolator {
    colors: Vec<Rgba>,
}

impl HslaColorInterpolator {
    pub fn try_new(colors: Vec<Rgba>) -> Result<Self, ColorbarScaleError> {
        validate_stops(&colors)?;
        Ok(Self { colors })
    }
}

impl ColorInterpolator for HslaColorInterpolator {
    fn interpolate(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        let hsla_colors: Vec<Hsla> = self
            .colors
            .iter()
            .map(|c| Srgba::from_components((c[0], c[1], c[2], c[3])).into_color())
            .collect();
        Ok(interpolate_color(&hsla_colors, values))
    }
}

/// Interpolates evenly spaced color stops in CIE Lab space
#[derive(Clone, Debug)]
pub struct LabaColorInterpolator {
    colors: Vec<Rgba>,
}

impl LabaColorInterpolator {
    pub fn try_new(colors: Vec<Rgba>) -> Result<Self, ColorbarScaleError> {
        validate_stops(&colors)?;
        Ok(Self { colors })
    }
}

impl ColorInterpolator for LabaColorInterpolator {
    fn interpolate(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        let laba_colors: Vec<Laba> = self
            .colors
            .iter()
            .map(|c| Srgba::from_components((c[0], c[1], c[2], c[3])).into_color())
            .collect();
        Ok(interpolate_color(&laba_colors, values))
    }
}

/// Interpolator backed by an arbitrary, possibly fallible, color function
pub struct FnColorInterpolator<F>
where
    F: Fn(f32) -> Result<Rgba, ColorbarScaleError> + Send + Sync + 'static,
{
    name: String,
    f: F,
}

impl<F> FnColorInterpolator<F>
where
    F: Fn(f32) -> Result<Rgba, ColorbarScaleError> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Debug for FnColorInterpolator<F>
where
    F: Fn(f32) -> Result<Rgba, ColorbarScaleError> + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnColorInterpolator")
            .field("name", &self.name)
            .finish()
    }
}

impl<F> ColorInterpolator for FnColorInterpolator<F>
where
    F: Fn(f32) -> Result<Rgba, ColorbarScaleError> + Send + Sync + 'static,
{
    fn interpolate(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        values.iter().map(|v| (self.f)(*v)).collect()
    }
}

/// A trait for color spaces that stops can be mixed in
pub trait ColorSpace:
    Mix<Scalar = f32> + Copy + IntoColor<Srgba> + Debug + Send + Sync + 'static
{
}

impl<T: Mix<Scalar = f32> + Copy + IntoColor<Srgba> + Debug + Send + Sync + 'static> ColorSpace
    for T
{
}

/// Piecewise interpolation over evenly spaced stops using palette's `Mix` trait.
/// Positions outside [0, 1] clamp to the end stops, non-finite positions are transparent.
fn interpolate_color<C: ColorSpace>(colors: &[C], values: &[f32]) -> Vec<Rgba> {
    let scale_factor = (colors.len() - 1) as f32;
    values
        .iter()
        .map(|v| {
            if !v.is_finite() {
                return [0.0, 0.0, 0.0, 0.0];
            }
            let continuous_index = (v * scale_factor).clamp(0.0, scale_factor);
            let lower_index = continuous_index.floor() as usize;
            let upper_index = continuous_index.ceil() as usize;

            let srgba_color: Srgba = if lower_index == upper_index {
                colors[lower_index].into_color()
            } else {
                let t = continuous_index - lower_index as f32;
                colors[lower_index].mix(colors[upper_index], t).into_color()
            };
            let (r, g, b, a) = srgba_color.into_components();
            [r, g, b, a]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
    const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];

    #[test]
    fn test_srgba_endpoints_and_midpoint() -> Result<(), ColorbarScaleError> {
        let interp = SrgbaColorInterpolator::try_new(vec![RED, BLUE])?;
        let colors = interp.interpolate(&[0.0, 0.5, 1.0, 2.0])?;
        assert_eq!(colors[0], RED);
        assert_approx_eq!(f32, colors[1][0], 0.5);
        assert_approx_eq!(f32, colors[1][2], 0.5);
        assert_eq!(colors[2], BLUE);
        assert_eq!(colors[3], BLUE);
        Ok(())
    }

    #[test]
    fn test_lab_and_hsl_hit_stops() -> Result<(), ColorbarScaleError> {
        let lab = LabaColorInterpolator::try_new(vec![RED, BLUE])?;
        let hsl = HslaColorInterpolator::try_new(vec![RED, BLUE])?;
        for interp in [&lab as &dyn ColorInterpolator, &hsl] {
            let end = interp.interpolate_one(1.0)?;
            assert_approx_eq!(f32, end[2], 1.0, epsilon = 1e-3);
            assert_approx_eq!(f32, end[0], 0.0, epsilon = 1e-3);
        }
        Ok(())
    }

    #[test]
    fn test_empty_stops_rejected() {
        assert_eq!(
            SrgbaColorInterpolator::try_new(vec![]).unwrap_err(),
            ColorbarScaleError::EmptyRange
        );
    }

    #[test]
    fn test_fn_interpolator_propagates_errors() {
        let interp = FnColorInterpolator::new("half", |t: f32| {
            if t > 0.5 {
                Err(ColorbarScaleError::InterpolationError(format!("{t} out of range")))
            } else {
                Ok([t, t, t, 1.0])
            }
        });
        assert_eq!(interp.interpolate(&[0.25]).unwrap(), vec![[0.25, 0.25, 0.25, 1.0]]);
        assert!(interp.interpolate(&[0.0, 0.75]).is_err());
    }
}
