use std::sync::Arc;

use colorbar_common::types::Rgba;

use crate::array::{bisect_right, quantile_sorted};
use crate::color_interpolator::ColorInterpolator;
use crate::error::ColorbarScaleError;

/// A sequential quantile color scale.
///
/// The domain is a sample population. A value is mapped to its rank within the
/// sorted samples, normalized to [0, 1], and passed through the color interpolator.
/// Unlike continuous scales there is no native tick generation: legends synthesize
/// ticks from the domain's quantiles.
#[derive(Debug, Clone)]
pub struct QuantileColorScale {
    domain: Vec<f32>,
    interpolator: Arc<dyn ColorInterpolator>,
}

impl QuantileColorScale {
    /// Non-finite samples are dropped and the remainder sorted
    pub fn try_new(
        domain: Vec<f32>,
        interpolator: Arc<dyn ColorInterpolator>,
    ) -> Result<Self, ColorbarScaleError> {
        Ok(Self {
            domain: sorted_samples(domain)?,
            interpolator,
        })
    }

    /// Sets the domain from a sample population
    pub fn with_domain(mut self, domain: Vec<f32>) -> Result<Self, ColorbarScaleError> {
        self.domain = sorted_samples(domain)?;
        Ok(self)
    }

    pub fn with_interpolator(mut self, interpolator: Arc<dyn ColorInterpolator>) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Returns the sorted sample population
    pub fn domain(&self) -> &[f32] {
        &self.domain
    }

    pub fn interpolator(&self) -> &Arc<dyn ColorInterpolator> {
        &self.interpolator
    }

    /// Rank of `value` among the samples, normalized to [0, 1]. NaN for non-finite input.
    pub fn normalize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return f32::NAN;
        }
        let n = self.domain.len();
        if n < 2 {
            return 0.0;
        }
        let rank = bisect_right(&self.domain, value).max(1) - 1;
        rank as f32 / (n - 1) as f32
    }

    /// Maps values to colors, non-finite values map to transparent
    pub fn scale(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        let normalized: Vec<f32> = values.iter().map(|v| self.normalize(*v)).collect();
        self.interpolator.interpolate(&normalized)
    }

    /// The `n + 1` quantiles of the domain at fractions `0, 1/n, ..., 1`
    pub fn quantiles(&self, n: usize) -> Vec<f32> {
        if n == 0 {
            return self.domain.first().cloned().into_iter().collect();
        }
        (0..=n)
            .filter_map(|i| quantile_sorted(&self.domain, i as f32 / n as f32))
            .collect()
    }
}

fn sorted_samples(domain: Vec<f32>) -> Result<Vec<f32>, ColorbarScaleError> {
    let total = domain.len();
    let mut domain: Vec<f32> = domain.into_iter().filter(|v| v.is_finite()).collect();
    if domain.len() < total {
        log::debug!(
            "Dropped {} non-finite quantile domain samples",
            total - domain.len()
        );
    }
    if domain.is_empty() {
        return Err(ColorbarScaleError::EmptyDomain);
    }
    domain.sort_by(f32::total_cmp);
    Ok(domain)
}
