use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use colorbar_guides::legend::colorbar::{ColorbarConfig, TickFormat};
use colorbar_scales::color_interpolator::{
    ColorInterpolator, HslaColorInterpolator, LabaColorInterpolator, SrgbaColorInterpolator,
};
use colorbar_scales::continuous::ContinuousColorScale;
use colorbar_scales::quantile::QuantileColorScale;
use colorbar_scales::scale::ColorScale;
use colorbar_scales::scheme::{parse_css_color, ColorScheme};
use serde::Deserialize;

/// Color space that stops are interpolated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Space {
    Srgb,
    Hsl,
    Lab,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Named color scheme
    #[arg(long, default_value_t = ColorScheme::Viridis)]
    pub scheme: ColorScheme,

    /// Comma separated CSS colors to interpolate, overrides --scheme
    #[arg(long, value_delimiter = ',')]
    pub colors: Vec<String>,

    /// Color space used between stops
    #[arg(long, value_enum, default_value_t = Space::Srgb)]
    pub space: Space,

    /// Continuous domain
    #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true, conflicts_with = "quantile_domain")]
    pub domain: Option<Vec<f32>>,

    /// Comma separated samples for a quantile scale
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub quantile_domain: Option<Vec<f32>>,

    /// Extend a continuous domain to round values
    #[arg(long)]
    pub nice: bool,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub width: Option<f32>,

    #[arg(long)]
    pub height: Option<f32>,

    #[arg(long)]
    pub tick_size: Option<f32>,

    #[arg(long)]
    pub margin_top: Option<f32>,

    #[arg(long)]
    pub margin_right: Option<f32>,

    #[arg(long)]
    pub margin_bottom: Option<f32>,

    #[arg(long)]
    pub margin_left: Option<f32>,

    /// Approximate tick count
    #[arg(long)]
    pub ticks: Option<f32>,

    /// d3-style format specifier for tick labels, e.g. ".2f" or "%"
    #[arg(long)]
    pub tick_format: Option<String>,

    /// Comma separated explicit tick values
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub tick_values: Option<Vec<f32>>,

    /// Ramp resolution
    #[arg(long)]
    pub samples: Option<usize>,

    /// JSON file with legend options, command line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file, .svg or .png
    #[arg(short, long, default_value = "colorbar.svg")]
    pub output: PathBuf,

    /// Scale factor for PNG output
    #[arg(short, long, default_value_t = 2.0)]
    pub scale: f32,
}

/// Legend options as stored in a JSON config file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendFile {
    pub title: Option<String>,
    #[serde(flatten)]
    pub colorbar: ColorbarConfig,
}

impl LegendFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

impl RenderArgs {
    pub fn interpolator(&self) -> anyhow::Result<Arc<dyn ColorInterpolator>> {
        let stops = if self.colors.is_empty() {
            self.scheme.colors()?
        } else {
            self.colors
                .iter()
                .map(|c| parse_css_color(c))
                .collect::<Result<Vec<_>, _>>()?
        };
        let interpolator: Arc<dyn ColorInterpolator> = match self.space {
            Space::Srgb => Arc::new(SrgbaColorInterpolator::try_new(stops)?),
            Space::Hsl => Arc::new(HslaColorInterpolator::try_new(stops)?),
            Space::Lab => Arc::new(LabaColorInterpolator::try_new(stops)?),
        };
        Ok(interpolator)
    }

    pub fn color_scale(&self) -> anyhow::Result<ColorScale> {
        let interpolator = self.interpolator()?;
        if let Some(samples) = &self.quantile_domain {
            return Ok(QuantileColorScale::try_new(samples.clone(), interpolator)?.into());
        }

        let domain = match self.domain.as_deref() {
            None => (0.0, 1.0),
            Some([start, end]) => (*start, *end),
            Some(other) => bail!("--domain takes two values, got {other:?}"),
        };
        let mut scale = ContinuousColorScale::try_new(domain, interpolator)?;
        if self.nice {
            scale = scale.nice(self.ticks);
        }
        Ok(scale.into())
    }

    /// Merge flags over the optional config file, returning the title and layout
    pub fn legend(&self) -> anyhow::Result<(String, ColorbarConfig)> {
        let file = match &self.config {
            Some(path) => LegendFile::load(path)?,
            None => LegendFile::default(),
        };
        let base = file.colorbar;
        let title = self.title.clone().or(file.title).unwrap_or_default();
        let config = ColorbarConfig {
            tick_size: self.tick_size.or(base.tick_size),
            width: self.width.or(base.width),
            height: self.height.or(base.height),
            margin_top: self.margin_top.or(base.margin_top),
            margin_right: self.margin_right.or(base.margin_right),
            margin_bottom: self.margin_bottom.or(base.margin_bottom),
            margin_left: self.margin_left.or(base.margin_left),
            ticks: self.ticks.or(base.ticks),
            tick_format: self
                .tick_format
                .clone()
                .map(TickFormat::from)
                .or(base.tick_format),
            tick_values: self.tick_values.clone().or(base.tick_values),
            samples: self.samples.or(base.samples),
        };
        Ok((title, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RenderArgs,
    }

    fn parse(args: &[&str]) -> RenderArgs {
        let argv = std::iter::once("colorbar").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_continuous_from_flags() -> anyhow::Result<()> {
        let args = parse(&["--domain", "-5", "5", "--scheme", "magma", "--ticks", "4"]);
        let scale = args.color_scale()?;
        assert!(scale.has_native_ticks());
        assert_eq!(scale.domain(), vec![-5.0, 5.0]);

        let (title, config) = args.legend()?;
        assert_eq!(title, "");
        assert_eq!(config.ticks, Some(4.0));
        Ok(())
    }

    #[test]
    fn test_quantile_from_flags() -> anyhow::Result<()> {
        let args = parse(&[
            "--quantile-domain",
            "3,1,2",
            "--colors",
            "red,#0000ff",
            "--space",
            "lab",
        ]);
        let scale = args.color_scale()?;
        assert!(!scale.has_native_ticks());
        assert_eq!(scale.domain(), vec![1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let args = parse(&["--colors", "red,notacolor"]);
        assert!(args.color_scale().is_err());
    }

    #[test]
    fn test_flags_override_config_file() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("colorbar-cli-test-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"title": "From file", "width": 400, "tickFormat": ".1f", "marginLeft": 8}"#,
        )?;
        let path_str = path.to_string_lossy().to_string();
        let args = parse(&["--config", path_str.as_str(), "--width", "500"]);
        let (title, config) = args.legend()?;
        fs::remove_file(&path)?;

        assert_eq!(title, "From file");
        assert_eq!(config.width, Some(500.0));
        assert_eq!(config.margin_left, Some(8.0));
        assert!(matches!(config.tick_format, Some(TickFormat::Specifier(ref s)) if s == ".1f"));
        Ok(())
    }
}
