use colorbar_common::types::Rgba;

use crate::array::bisect_right;
use crate::error::ColorbarScaleError;

/// A threshold color scale maps values to discrete colors based on explicit
/// threshold boundaries.
///
/// `n` ascending thresholds split the number line into `n + 1` segments, each with
/// its own color. Colorbar legends only support sequential scales, so this type
/// exists to be identified and rejected with a clear error rather than rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdColorScale {
    thresholds: Vec<f32>,
    range: Vec<Rgba>,
    default: Rgba,
}

impl ThresholdColorScale {
    pub fn try_new(
        thresholds: Vec<f32>,
        range: Vec<Rgba>,
        default: Rgba,
    ) -> Result<Self, ColorbarScaleError> {
        validate(&thresholds, &range)?;
        Ok(Self {
            thresholds,
            range,
            default,
        })
    }

    pub fn with_thresholds_and_range(
        mut self,
        thresholds: Vec<f32>,
        range: Vec<Rgba>,
    ) -> Result<Self, ColorbarScaleError> {
        validate(&thresholds, &range)?;
        self.thresholds = thresholds;
        self.range = range;
        Ok(self)
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    pub fn range(&self) -> &[Rgba] {
        &self.range
    }

    /// Color used for non-finite input
    pub fn default_color(&self) -> Rgba {
        self.default
    }

    pub fn scale(&self, values: &[f32]) -> Vec<Rgba> {
        values
            .iter()
            .map(|x| {
                if x.is_finite() {
                    self.range[bisect_right(&self.thresholds, *x)]
                } else {
                    self.default
                }
            })
            .collect()
    }
}

fn validate(thresholds: &[f32], range: &[Rgba]) -> Result<(), ColorbarScaleError> {
    if !thresholds.windows(2).all(|w| w[0] <= w[1]) {
        return Err(ColorbarScaleError::ThresholdsNotAscending(
            thresholds.to_vec(),
        ));
    }
    if range.len() != thresholds.len() + 1 {
        return Err(ColorbarScaleError::ThresholdDomainMismatch {
            domain_len: thresholds.len(),
            range_len: range.len(),
        });
    }
    Ok(())
}
