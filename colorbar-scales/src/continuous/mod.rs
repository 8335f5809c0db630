use std::sync::Arc;

use colorbar_common::types::Rgba;

use crate::array::{self, tick_increment};
use crate::color_interpolator::ColorInterpolator;
use crate::error::ColorbarScaleError;
use crate::formatter::{linear_tick_format, SpecifierFormatter};

/// A sequential color scale: a numeric domain normalized linearly to [0, 1] and
/// passed through a color interpolator
#[derive(Clone, Debug)]
pub struct ContinuousColorScale {
    domain_start: f32,
    domain_end: f32,
    clamp: bool,
    interpolator: Arc<dyn ColorInterpolator>,
}

impl ContinuousColorScale {
    pub fn try_new(
        domain: (f32, f32),
        interpolator: Arc<dyn ColorInterpolator>,
    ) -> Result<Self, ColorbarScaleError> {
        validate_domain(domain)?;
        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            clamp: false,
            interpolator,
        })
    }

    pub fn with_domain(mut self, domain: (f32, f32)) -> Result<Self, ColorbarScaleError> {
        validate_domain(domain)?;
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        Ok(self)
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Arc<dyn ColorInterpolator>) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<f32>) -> Self {
        if self.domain_start == self.domain_end {
            return self;
        }

        let (mut start, mut stop) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let count = count.unwrap_or(10.0);
        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == prestep || !step.is_finite() || step <= 0.0 {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            prestep = step;
        }

        if self.domain_start <= self.domain_end {
            self.domain_start = start;
            self.domain_end = stop;
        } else {
            self.domain_start = stop;
            self.domain_end = start;
        }
        self
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    pub fn clamp(&self) -> bool {
        self.clamp
    }

    pub fn interpolator(&self) -> &Arc<dyn ColorInterpolator> {
        &self.interpolator
    }

    /// Position of `value` in the interpolator's [0, 1] input space
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.domain_end - self.domain_start;
        let t = if span == 0.0 {
            0.0
        } else {
            (value - self.domain_start) / span
        };
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    pub fn scale(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        let normalized: Vec<f32> = values.iter().map(|v| self.normalize(*v)).collect();
        self.interpolator.interpolate(&normalized)
    }

    /// Approximately `count` nicely rounded values spanning the domain
    pub fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        array::ticks(self.domain_start, self.domain_end, count.unwrap_or(10.0))
    }

    /// Formatter whose precision matches the spacing of `ticks(count)`
    pub fn tick_format(
        &self,
        count: Option<f32>,
        specifier: Option<&str>,
    ) -> Result<SpecifierFormatter, ColorbarScaleError> {
        linear_tick_format(
            self.domain_start,
            self.domain_end,
            count.unwrap_or(10.0),
            specifier,
        )
    }
}

fn validate_domain(domain: (f32, f32)) -> Result<(), ColorbarScaleError> {
    if !domain.0.is_finite() || !domain.1.is_finite() {
        return Err(ColorbarScaleError::NonFiniteDomain(vec![domain.0, domain.1]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_interpolator::SrgbaColorInterpolator;
    use crate::formatter::NumberFormatter;
    use float_cmp::assert_approx_eq;

    fn gray_scale(domain: (f32, f32)) -> ContinuousColorScale {
        let interp =
            SrgbaColorInterpolator::try_new(vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]])
                .unwrap();
        ContinuousColorScale::try_new(domain, Arc::new(interp)).unwrap()
    }

    #[test]
    fn test_normalize_and_scale() -> Result<(), ColorbarScaleError> {
        let scale = gray_scale((10.0, 20.0));
        assert_approx_eq!(f32, scale.normalize(15.0), 0.5);
        assert_approx_eq!(f32, scale.normalize(30.0), 2.0);
        assert_approx_eq!(f32, scale.clone().with_clamp(true).normalize(30.0), 1.0);

        let colors = scale.scale(&[10.0, 15.0])?;
        assert_eq!(colors[0], [0.0, 0.0, 0.0, 1.0]);
        assert_approx_eq!(f32, colors[1][0], 0.5);
        Ok(())
    }

    #[test]
    fn test_degenerate_domain_normalizes_to_zero() {
        assert_eq!(gray_scale((5.0, 5.0)).normalize(7.0), 0.0);
    }

    #[test]
    fn test_reversed_domain() {
        let scale = gray_scale((1.0, 0.0));
        assert_approx_eq!(f32, scale.normalize(0.25), 0.75);
        assert_eq!(scale.ticks(Some(2.0)), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_non_finite_domain_rejected() {
        let interp = Arc::new(SrgbaColorInterpolator::try_new(vec![[0.0; 4]]).unwrap());
        assert!(matches!(
            ContinuousColorScale::try_new((0.0, f32::NAN), interp),
            Err(ColorbarScaleError::NonFiniteDomain(_))
        ));
    }

    #[test]
    fn test_nice_domain() {
        let scale = gray_scale((0.13, 9.7)).nice(Some(10.0));
        assert_eq!(scale.domain(), (0.0, 10.0));
    }

    #[test]
    fn test_ticks_and_format() -> Result<(), ColorbarScaleError> {
        let scale = gray_scale((0.0, 100.0));
        let ticks = scale.ticks(Some(2.5));
        assert_eq!(ticks, vec![0.0, 50.0, 100.0]);
        let fmt = scale.tick_format(Some(2.5), None)?;
        assert_eq!(fmt.format(&ticks), vec!["0", "50", "100"]);
        Ok(())
    }
}
