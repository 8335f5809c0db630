use colorbar_guides::legend::colorbar::{make_colorbar_marks, make_colorbar_scene, ColorbarConfig};
use colorbar_image::RgbaImage;
use colorbar_scales::continuous::ContinuousColorScale;
use colorbar_scales::quantile::QuantileColorScale;
use colorbar_scales::scale::ColorScale;
use colorbar_scales::scheme::ColorScheme;
use colorbar_svg::SvgRenderer;
use rstest::rstest;
use usvg::roxmltree;

fn continuous() -> ColorScale {
    ContinuousColorScale::try_new((0.0, 100.0), ColorScheme::Magma.interpolator().unwrap())
        .unwrap()
        .into()
}

fn quantile() -> ColorScale {
    let domain: Vec<f32> = (1..=10).map(|v| v as f32).collect();
    QuantileColorScale::try_new(domain, ColorScheme::RdYlBu.interpolator().unwrap())
        .unwrap()
        .into()
}

fn render(scale: &ColorScale, title: &str) -> String {
    let scene = make_colorbar_scene(scale, title, &ColorbarConfig::default()).unwrap();
    SvgRenderer::render_scene(&scene).unwrap()
}

#[rstest]
#[case(continuous(), vec!["0", "50", "100"])]
#[case(quantile(), vec!["1.000000", "5.500000", "10.000000"])]
fn test_colorbar_document(#[case] scale: ColorScale, #[case] expected_labels: Vec<&str>) {
    let svg = render(&scale, "Value & <units>");
    let doc = roxmltree::Document::parse(&svg).expect("well-formed SVG");

    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("width"), Some("320"));
    assert_eq!(root.attribute("height"), Some("50"));
    assert_eq!(root.attribute("viewBox"), Some("0 0 320 50"));
    assert_eq!(root.attribute("style"), Some("overflow: visible; display: block"));

    let image = doc
        .descendants()
        .find(|n| n.has_tag_name("image"))
        .expect("ramp image");
    assert_eq!(image.attribute("width"), Some("320"));
    assert_eq!(image.attribute("height"), Some("10"));
    assert_eq!(image.attribute("preserveAspectRatio"), Some("none"));
    assert_eq!(image.attribute("style"), Some("image-rendering: pixelated"));
    let href = image.attribute("href").expect("image href");
    let ramp = RgbaImage::from_data_url(href).expect("embedded PNG ramp");
    assert_eq!((ramp.width, ramp.height), (256, 1));

    let lines: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("line")).collect();
    assert_eq!(lines.len(), expected_labels.len());
    for line in &lines {
        assert_eq!(line.attribute("y1"), Some("-10"));
        assert_eq!(line.attribute("y2"), Some("6"));
    }

    let texts: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("text")).collect();
    let labels: Vec<&str> = texts
        .iter()
        .filter(|n| n.attribute("text-anchor") == Some("middle"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(labels, expected_labels);

    let title = texts
        .iter()
        .find(|n| n.attribute("font-weight") == Some("bold"))
        .expect("title");
    assert_eq!(title.text(), Some("Value & <units>"));
    assert_eq!(title.attribute("text-anchor"), Some("start"));
    assert_eq!(title.attribute("y"), Some("12"));
}

#[test]
fn test_svg_is_deterministic() {
    assert_eq!(render(&quantile(), "Rank"), render(&quantile(), "Rank"));
}

#[test]
fn test_fragment_is_single_group() {
    let group = make_colorbar_marks(&continuous(), "", &ColorbarConfig::default()).unwrap();
    let fragment = SvgRenderer::render_group(&group).unwrap();
    let doc = roxmltree::Document::parse(&fragment).expect("well-formed fragment");
    assert_eq!(doc.root_element().tag_name().name(), "g");
    assert_eq!(doc.root_element().attribute("class"), Some("colorbar"));
}
