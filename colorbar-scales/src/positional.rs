use crate::error::ColorbarScaleError;
use crate::formatter::SpecifierFormatter;
use crate::scale::ColorScale;

/// Maps a color scale's domain onto a horizontal pixel interval.
///
/// Built from a copy of the color scale, so positioning a legend never
/// touches the scale it was created from.
#[derive(Debug, Clone)]
pub struct PositionalScale {
    scale: ColorScale,
    range: (f32, f32),
}

impl PositionalScale {
    pub fn new(scale: &ColorScale, range: (f32, f32)) -> Self {
        Self {
            scale: scale.clone(),
            range,
        }
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn pixel_range(&self) -> (f32, f32) {
        self.range
    }

    /// Rounded pixel position of `value`, NaN when the scale can't normalize it
    pub fn to_pixel(&self, value: f32) -> f32 {
        let (min, max) = self.range;
        match self.scale.normalize(value) {
            Some(t) if t.is_finite() => (min + t * (max - min)).round(),
            _ => f32::NAN,
        }
    }

    pub fn to_pixels(&self, values: &[f32]) -> Vec<f32> {
        values.iter().map(|v| self.to_pixel(*v)).collect()
    }

    /// Native ticks, only continuous scales provide them
    pub fn ticks(&self, count: f32) -> Option<Vec<f32>> {
        match &self.scale {
            ColorScale::Continuous(s) => Some(s.ticks(Some(count))),
            _ => None,
        }
    }

    /// Native tick formatter, only continuous scales provide one
    pub fn tick_format(
        &self,
        count: f32,
        specifier: Option<&str>,
    ) -> Option<Result<SpecifierFormatter, ColorbarScaleError>> {
        match &self.scale {
            ColorScale::Continuous(s) => Some(s.tick_format(Some(count), specifier)),
            _ => None,
        }
    }
}
