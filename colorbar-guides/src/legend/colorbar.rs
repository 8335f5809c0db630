use std::sync::Arc;

use colorbar_common::types::{FontWeightNameSpec, FontWeightSpec, TextAlignSpec, TextBaselineSpec};
use colorbar_scales::array::MAX_TICK_COUNT;
use colorbar_scales::formatter::{NumberFormatter, SpecifierFormatter, DEFAULT_TICK_SPECIFIER};
use colorbar_scales::positional::PositionalScale;
use colorbar_scales::quantile::QuantileColorScale;
use colorbar_scales::scale::ColorScale;
use colorbar_scenegraph::marks::group::SceneGroup;
use colorbar_scenegraph::marks::image::SceneImageMark;
use colorbar_scenegraph::marks::text::SceneTextMark;
use colorbar_scenegraph::scene_graph::SceneGraph;
use itertools::izip;
use serde::Deserialize;

use crate::axis::bottom::make_bottom_axis_marks;
use crate::axis::opts::AxisConfig;
use crate::axis::Tick;
use crate::error::ColorbarGuidesError;
use crate::legend::ramp::{make_ramp, DEFAULT_SAMPLES};

/// Offset of tick marks from the rounded pixel position, aligning 1px strokes to the pixel grid
const TICK_OFFSET: f32 = 0.5;

/// Gap between the title baseline and the top of the ramp
const TITLE_OFFSET: f32 = 6.0;

/// How tick labels are produced
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "String")]
pub enum TickFormat {
    /// A d3-style format specifier such as `".2f"` or `"%"`
    Specifier(String),
    /// A formatting function that replaces specifier-based formatting entirely
    Formatter(Arc<dyn NumberFormatter>),
}

impl From<String> for TickFormat {
    fn from(value: String) -> Self {
        TickFormat::Specifier(value)
    }
}

impl From<&str> for TickFormat {
    fn from(value: &str) -> Self {
        TickFormat::Specifier(value.to_string())
    }
}

impl From<Arc<dyn NumberFormatter>> for TickFormat {
    fn from(value: Arc<dyn NumberFormatter>) -> Self {
        TickFormat::Formatter(value)
    }
}

/// Colorbar layout options, unset fields take their defaults on `resolve`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorbarConfig {
    pub tick_size: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub margin_top: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub margin_left: Option<f32>,
    /// Approximate number of ticks
    pub ticks: Option<f32>,
    pub tick_format: Option<TickFormat>,
    /// Explicit tick values, bypassing tick generation
    pub tick_values: Option<Vec<f32>>,
    /// Number of columns in the rasterized ramp
    pub samples: Option<usize>,
}

impl ColorbarConfig {
    pub fn resolve(&self) -> ResolvedColorbarConfig {
        let tick_size = self.tick_size.unwrap_or(6.0);
        let width = self.width.unwrap_or(320.0);
        ResolvedColorbarConfig {
            tick_size,
            width,
            height: self.height.unwrap_or(44.0 + tick_size),
            margin_top: self.margin_top.unwrap_or(18.0),
            margin_right: self.margin_right.unwrap_or(0.0),
            margin_bottom: self.margin_bottom.unwrap_or(16.0 + tick_size),
            margin_left: self.margin_left.unwrap_or(0.0),
            ticks: self.ticks.unwrap_or(width / 128.0),
            tick_format: self.tick_format.clone(),
            tick_values: self.tick_values.clone(),
            samples: self.samples.unwrap_or(DEFAULT_SAMPLES),
        }
    }
}

/// A `ColorbarConfig` with every default filled in
#[derive(Debug, Clone)]
pub struct ResolvedColorbarConfig {
    pub tick_size: f32,
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub ticks: f32,
    pub tick_format: Option<TickFormat>,
    pub tick_values: Option<Vec<f32>>,
    pub samples: usize,
}

impl ResolvedColorbarConfig {
    pub fn drawable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn drawable_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    pub fn validate(&self) -> Result<(), ColorbarGuidesError> {
        let dims = [
            ("tick_size", self.tick_size),
            ("width", self.width),
            ("height", self.height),
            ("margin_top", self.margin_top),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("ticks", self.ticks),
        ];
        if let Some((name, value)) = dims.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ColorbarGuidesError::InvalidGeometry(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.drawable_width() <= 0.0 {
            return Err(ColorbarGuidesError::InvalidGeometry(format!(
                "width {} leaves no room between margins {} and {}",
                self.width, self.margin_left, self.margin_right
            )));
        }
        if self.drawable_height() <= 0.0 {
            return Err(ColorbarGuidesError::InvalidGeometry(format!(
                "height {} leaves no room between margins {} and {}",
                self.height, self.margin_top, self.margin_bottom
            )));
        }
        if self.ticks > MAX_TICK_COUNT {
            return Err(ColorbarGuidesError::InvalidGeometry(format!(
                "ticks must be at most {MAX_TICK_COUNT}, got {}",
                self.ticks
            )));
        }
        if let Some(values) = &self.tick_values {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ColorbarGuidesError::InvalidGeometry(format!(
                    "tick values must be finite, got {values:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Build a colorbar legend: a gradient ramp over the scale's interpolator, a
/// labeled bottom axis and a bold title.
///
/// Only scales with an interpolator can be drawn. The scale is read, never
/// modified, and identical inputs produce identical marks.
pub fn make_colorbar_marks(
    scale: &ColorScale,
    title: &str,
    config: &ColorbarConfig,
) -> Result<SceneGroup, ColorbarGuidesError> {
    let Some(interpolator) = scale.interpolator() else {
        return Err(ColorbarGuidesError::UnsupportedScale(scale.kind()));
    };

    let config = config.resolve();
    config.validate()?;

    let x = PositionalScale::new(
        scale,
        (config.margin_left, config.width - config.margin_right),
    );

    let ramp = make_ramp(&**interpolator, config.samples)?;
    let image = SceneImageMark {
        name: "ramp".to_string(),
        aspect: false,
        smooth: false,
        image: ramp.into(),
        x: config.margin_left.into(),
        y: config.margin_top.into(),
        width: config.drawable_width().into(),
        height: config.drawable_height().into(),
        ..Default::default()
    };

    let (values, labels) = resolve_ticks(scale, &x, &config)?;
    let ticks: Vec<Tick> = izip!(&values, labels)
        .map(|(v, label)| Tick::new(x.to_pixel(*v) + TICK_OFFSET, label))
        .collect();

    let axis_config = AxisConfig {
        tick_size: config.tick_size,
        tick_extent: config.drawable_height(),
        ..Default::default()
    };
    let axis = make_bottom_axis_marks(
        &ticks,
        [0.0, config.height - config.margin_bottom],
        &axis_config,
    );

    let title = SceneTextMark {
        name: "title".to_string(),
        text: title.to_string().into(),
        x: config.margin_left.into(),
        y: (config.margin_top - TITLE_OFFSET).into(),
        align: TextAlignSpec::Left.into(),
        baseline: TextBaselineSpec::Alphabetic.into(),
        font: axis_config.font.clone().into(),
        font_size: axis_config.font_size.into(),
        font_weight: FontWeightSpec::Name(FontWeightNameSpec::Bold).into(),
        color: axis_config.color.into(),
        ..Default::default()
    };

    let group = SceneGroup::new("colorbar", [0.0, 0.0])
        .with_mark(image)
        .with_mark(axis)
        .with_mark(title);
    group.validate()?;
    Ok(group)
}

/// Build the legend and append it to `container`
pub fn append_colorbar(
    container: &mut SceneGroup,
    scale: &ColorScale,
    title: &str,
    config: &ColorbarConfig,
) -> Result<(), ColorbarGuidesError> {
    let group = make_colorbar_marks(scale, title, config)?;
    container.push(group);
    Ok(())
}

/// Build the legend as a standalone scene sized to the configured width and height
pub fn make_colorbar_scene(
    scale: &ColorScale,
    title: &str,
    config: &ColorbarConfig,
) -> Result<SceneGraph, ColorbarGuidesError> {
    let resolved = config.resolve();
    let group = make_colorbar_marks(scale, title, config)?;
    Ok(SceneGraph::new(resolved.width, resolved.height).with_mark(group))
}

/// Tick values and their labels
fn resolve_ticks(
    scale: &ColorScale,
    x: &PositionalScale,
    config: &ResolvedColorbarConfig,
) -> Result<(Vec<f32>, Vec<String>), ColorbarGuidesError> {
    let formatter = match &config.tick_format {
        Some(TickFormat::Formatter(f)) => Some(f.clone()),
        _ => None,
    };
    let specifier = match &config.tick_format {
        Some(TickFormat::Specifier(s)) => Some(s.as_str()),
        _ => None,
    };

    if let Some(native) = x.ticks(config.ticks) {
        let values = config.tick_values.clone().unwrap_or(native);
        let labels = match (formatter, x.tick_format(config.ticks, specifier)) {
            (Some(f), _) => f.format(&values),
            (None, Some(native_format)) => native_format?.format(&values),
            (None, None) => values.iter().map(|v| v.to_string()).collect(),
        };
        return Ok((values, labels));
    }

    let values = match (&config.tick_values, scale) {
        (Some(values), _) => values.clone(),
        (None, ColorScale::Quantile(quantile)) => {
            let values = quantile_ticks(quantile, config.ticks);
            log::debug!("Synthesized quantile tick values {values:?}");
            values
        }
        (None, other) => return Err(ColorbarGuidesError::UnsupportedScale(other.kind())),
    };

    let labels = match formatter {
        Some(f) => f.format(&values),
        None => {
            let specifier = specifier.unwrap_or(DEFAULT_TICK_SPECIFIER);
            log::debug!("Formatting quantile ticks with specifier {specifier:?}");
            SpecifierFormatter::try_from_specifier(specifier)?.format(&values)
        }
    };
    Ok((values, labels))
}

/// `n` evenly spaced quantiles of `domain` where `n` is one more than the tick
/// count rounded half to even, and never less than 2
fn quantile_ticks(scale: &QuantileColorScale, ticks: f32) -> Vec<f32> {
    let n = (ticks.clamp(0.0, MAX_TICK_COUNT).round_ties_even() as usize)
        .saturating_add(1)
        .max(2);
    scale.quantiles(n - 1)
}
