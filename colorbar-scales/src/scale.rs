use std::sync::Arc;

use colorbar_common::types::Rgba;

use crate::color_interpolator::ColorInterpolator;
use crate::continuous::ContinuousColorScale;
use crate::error::ColorbarScaleError;
use crate::quantile::QuantileColorScale;
use crate::threshold::ThresholdColorScale;

/// Discriminator for the supported color scale kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ColorScaleKind {
    Continuous,
    Quantile,
    Threshold,
}

/// A color scale that can drive a legend
#[derive(Debug, Clone)]
pub enum ColorScale {
    Continuous(ContinuousColorScale),
    Quantile(QuantileColorScale),
    Threshold(ThresholdColorScale),
}

impl ColorScale {
    pub fn kind(&self) -> ColorScaleKind {
        match self {
            ColorScale::Continuous(_) => ColorScaleKind::Continuous,
            ColorScale::Quantile(_) => ColorScaleKind::Quantile,
            ColorScale::Threshold(_) => ColorScaleKind::Threshold,
        }
    }

    /// Domain values: the two endpoints for continuous scales, the sorted samples
    /// for quantile scales and the thresholds for threshold scales
    pub fn domain(&self) -> Vec<f32> {
        match self {
            ColorScale::Continuous(s) => {
                let (d0, d1) = s.domain();
                vec![d0, d1]
            }
            ColorScale::Quantile(s) => s.domain().to_vec(),
            ColorScale::Threshold(s) => s.thresholds().to_vec(),
        }
    }

    /// Interpolator over [0, 1], threshold scales have none
    pub fn interpolator(&self) -> Option<&Arc<dyn ColorInterpolator>> {
        match self {
            ColorScale::Continuous(s) => Some(s.interpolator()),
            ColorScale::Quantile(s) => Some(s.interpolator()),
            ColorScale::Threshold(_) => None,
        }
    }

    /// Whether the scale generates and formats its own ticks
    pub fn has_native_ticks(&self) -> bool {
        matches!(self, ColorScale::Continuous(_))
    }

    /// Position of `value` in [0, 1], `None` for scales without an interpolator
    pub fn normalize(&self, value: f32) -> Option<f32> {
        match self {
            ColorScale::Continuous(s) => Some(s.normalize(value)),
            ColorScale::Quantile(s) => Some(s.normalize(value)),
            ColorScale::Threshold(_) => None,
        }
    }

    pub fn scale(&self, values: &[f32]) -> Result<Vec<Rgba>, ColorbarScaleError> {
        match self {
            ColorScale::Continuous(s) => s.scale(values),
            ColorScale::Quantile(s) => s.scale(values),
            ColorScale::Threshold(s) => Ok(s.scale(values)),
        }
    }
}

impl From<ContinuousColorScale> for ColorScale {
    fn from(value: ContinuousColorScale) -> Self {
        ColorScale::Continuous(value)
    }
}

impl From<QuantileColorScale> for ColorScale {
    fn from(value: QuantileColorScale) -> Self {
        ColorScale::Quantile(value)
    }
}

impl From<ThresholdColorScale> for ColorScale {
    fn from(value: ThresholdColorScale) -> Self {
        ColorScale::Threshold(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_interpolator::SrgbaColorInterpolator;

    fn interp() -> Arc<dyn ColorInterpolator> {
        Arc::new(
            SrgbaColorInterpolator::try_new(vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]])
                .unwrap(),
        )
    }

    #[test]
    fn test_capabilities_by_kind() -> Result<(), ColorbarScaleError> {
        let continuous: ColorScale = ContinuousColorScale::try_new((0.0, 1.0), interp())?.into();
        let quantile: ColorScale = QuantileColorScale::try_new(vec![1.0, 2.0], interp())?.into();
        let threshold: ColorScale =
            ThresholdColorScale::try_new(vec![0.5], vec![[0.0; 4], [1.0; 4]], [0.0; 4])?.into();

        assert!(continuous.has_native_ticks());
        assert!(!quantile.has_native_ticks());
        assert!(!threshold.has_native_ticks());

        assert!(continuous.interpolator().is_some());
        assert!(quantile.interpolator().is_some());
        assert!(threshold.interpolator().is_none());

        assert_eq!(threshold.kind().to_string(), "threshold");
        assert_eq!(quantile.domain(), vec![1.0, 2.0]);
        assert_eq!(threshold.normalize(0.1), None);
        Ok(())
    }

    #[test]
    fn test_scale_dispatch() -> Result<(), ColorbarScaleError> {
        let continuous: ColorScale = ContinuousColorScale::try_new((0.0, 1.0), interp())?.into();
        assert_eq!(continuous.scale(&[1.0])?, vec![[1.0, 1.0, 1.0, 1.0]]);

        let threshold: ColorScale =
            ThresholdColorScale::try_new(vec![0.5], vec![[0.0; 4], [1.0; 4]], [0.0; 4])?.into();
        assert_eq!(threshold.scale(&[0.7])?, vec![[1.0; 4]]);
        Ok(())
    }
}
