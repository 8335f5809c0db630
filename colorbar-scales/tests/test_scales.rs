use colorbar_scales::continuous::ContinuousColorScale;
use colorbar_scales::error::ColorbarScaleError;
use colorbar_scales::formatter::{NumberFormatter, SpecifierFormatter};
use colorbar_scales::positional::PositionalScale;
use colorbar_scales::quantile::QuantileColorScale;
use colorbar_scales::scale::ColorScale;
use colorbar_scales::scheme::ColorScheme;
use float_cmp::assert_approx_eq;
use rstest::rstest;

#[rstest]
#[case(ColorScheme::Viridis, "#440154", "#fde725")]
#[case(ColorScheme::Blues, "#f7fbff", "#08306b")]
fn test_scheme_endpoints(
    #[case] scheme: ColorScheme,
    #[case] first: &str,
    #[case] last: &str,
) -> Result<(), ColorbarScaleError> {
    let stops = scheme.hex_stops();
    assert_eq!(stops.first(), Some(&first));
    assert_eq!(stops.last(), Some(&last));

    let interp = scheme.interpolator()?;
    let start = interp.interpolate_one(0.0)?;
    let expected = colorbar_scales::scheme::parse_css_color(first)?;
    for (a, b) in start.iter().zip(expected.iter()) {
        assert_approx_eq!(f32, *a, *b, epsilon = 1e-4);
    }
    Ok(())
}

#[test]
fn test_quantile_legend_ticks_over_one_to_ten() -> Result<(), ColorbarScaleError> {
    let domain: Vec<f32> = (1..=10).map(|v| v as f32).collect();
    let quantile = QuantileColorScale::try_new(domain, ColorScheme::Viridis.interpolator()?)?;

    let values = quantile.quantiles(2);
    let scale: ColorScale = quantile.into();
    assert_eq!(values.len(), 3);
    assert_approx_eq!(f32, values[0], 1.0);
    assert_approx_eq!(f32, values[1], 5.5);
    assert_approx_eq!(f32, values[2], 10.0);

    let positional = PositionalScale::new(&scale, (0.0, 320.0));
    assert_eq!(positional.to_pixel(1.0), 0.0);
    assert_eq!(positional.to_pixel(10.0), 320.0);

    let labels = SpecifierFormatter::try_from_specifier(",f")?.format(&values);
    assert_eq!(labels, vec!["1.000000", "5.500000", "10.000000"]);
    Ok(())
}

#[test]
fn test_positional_scale_leaves_color_scale_untouched() -> Result<(), ColorbarScaleError> {
    let scale: ColorScale =
        ContinuousColorScale::try_new((0.0, 1.0), ColorScheme::Magma.interpolator()?)?.into();
    let before = scale.domain();
    let _ = PositionalScale::new(&scale, (0.0, 100.0)).to_pixel(0.5);
    assert_eq!(scale.domain(), before);
    Ok(())
}
