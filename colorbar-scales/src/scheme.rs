use std::sync::Arc;

use colorbar_common::types::Rgba;
use css_color_parser::Color;
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::color_interpolator::{ColorInterpolator, SrgbaColorInterpolator};
use crate::error::ColorbarScaleError;

/// Named sequential and diverging color schemes, sampled at evenly spaced stops
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ColorScheme {
    Viridis,
    Magma,
    Inferno,
    Plasma,
    Blues,
    RdYlBu,
}

impl ColorScheme {
    pub fn hex_stops(&self) -> &'static [&'static str] {
        match self {
            ColorScheme::Viridis => &[
                "#440154", "#472d7b", "#3b528b", "#2c728e", "#21918c", "#28ae80", "#5ec962",
                "#addc30", "#fde725",
            ],
            ColorScheme::Magma => &[
                "#000004", "#1c1044", "#4f127b", "#812581", "#b5367a", "#e55964", "#fb8761",
                "#fec287", "#fcfdbf",
            ],
            ColorScheme::Inferno => &[
                "#000004", "#1f0c48", "#550f6d", "#88226a", "#ba3655", "#e35933", "#f98e09",
                "#f9cb35", "#fcffa4",
            ],
            ColorScheme::Plasma => &[
                "#0d0887", "#4c02a1", "#7e03a8", "#a92395", "#cc4778", "#e56b5d", "#f89540",
                "#fdc527", "#f0f921",
            ],
            ColorScheme::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
            ColorScheme::RdYlBu => &[
                "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#e0f3f8", "#abd9e9",
                "#74add1", "#4575b4", "#313695",
            ],
        }
    }

    pub fn colors(&self) -> Result<Vec<Rgba>, ColorbarScaleError> {
        self.hex_stops().iter().map(|s| parse_css_color(s)).collect()
    }

    /// sRGB interpolator over the scheme's stops
    pub fn interpolator(&self) -> Result<Arc<dyn ColorInterpolator>, ColorbarScaleError> {
        Ok(Arc::new(SrgbaColorInterpolator::try_new(self.colors()?)?))
    }
}

/// Parse any CSS color string (hex, rgb(), hsl(), named) to normalized RGBA
pub fn parse_css_color(s: &str) -> Result<Rgba, ColorbarScaleError> {
    let color = s
        .trim()
        .parse::<Color>()
        .map_err(|_| ColorbarScaleError::InvalidColor(s.to_string()))?;
    Ok([
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_scheme_parses() -> Result<(), ColorbarScaleError> {
        for scheme in ColorScheme::iter() {
            assert!(scheme.colors()?.len() >= 9, "{scheme}");
        }
        Ok(())
    }

    #[test]
    fn test_scheme_names_round_trip() {
        assert_eq!(ColorScheme::from_str("rd-yl-bu"), Ok(ColorScheme::RdYlBu));
        assert_eq!(ColorScheme::from_str("Viridis"), Ok(ColorScheme::Viridis));
        assert_eq!(ColorScheme::Magma.to_string(), "magma");
        assert!(ColorScheme::VARIANTS.contains(&"plasma"));
    }

    #[test]
    fn test_parse_css_color() {
        assert_eq!(parse_css_color("#ff0000"), Ok([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse_css_color(" white "), Ok([1.0, 1.0, 1.0, 1.0]));
        assert!(matches!(
            parse_css_color("not-a-color"),
            Err(ColorbarScaleError::InvalidColor(_))
        ));
    }
}
