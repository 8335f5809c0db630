use std::fmt::Write;

use colorbar_common::types::{
    FontStyleSpec, FontWeightNameSpec, FontWeightSpec, StrokeCap, TextAlignSpec, TextBaselineSpec,
};
use colorbar_scenegraph::marks::group::SceneGroup;
use colorbar_scenegraph::marks::image::SceneImageMark;
use colorbar_scenegraph::marks::mark::SceneMark;
use colorbar_scenegraph::marks::rule::SceneRuleMark;
use colorbar_scenegraph::marks::text::SceneTextMark;
use colorbar_scenegraph::scene_graph::SceneGraph;
use itertools::izip;

use crate::error::ColorbarSvgError;
use crate::xml::{escape_xml, paint_attrs};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serializes scene graphs to SVG markup.
///
/// Groups become `<g>` elements translated by their origin, so marks are
/// written in group-local coordinates. Marks within a group are emitted in
/// zindex order and the output is deterministic.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    svg: String,
    depth: usize,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standalone SVG document sized to the scene
    pub fn render_scene(scene_graph: &SceneGraph) -> Result<String, ColorbarSvgError> {
        let mut renderer = Self::new();
        renderer.set_scene(scene_graph)?;
        Ok(renderer.finish())
    }

    /// A single `<g>` element, for embedding in a larger document
    pub fn render_group(group: &SceneGroup) -> Result<String, ColorbarSvgError> {
        group.validate()?;
        let mut renderer = Self::new();
        renderer.add_group_mark(group)?;
        Ok(renderer.finish())
    }

    pub fn finish(self) -> String {
        self.svg
    }

    pub fn set_scene(&mut self, scene_graph: &SceneGraph) -> Result<(), ColorbarSvgError> {
        scene_graph.validate()?;
        let (width, height) = (scene_graph.width, scene_graph.height);
        self.open(&format!(
            r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" style="overflow: visible; display: block">"#
        ))?;

        let [ox, oy] = scene_graph.origin;
        let translated = ox != 0.0 || oy != 0.0;
        if translated {
            self.open(&format!(r#"<g transform="translate({ox},{oy})">"#))?;
        }
        self.add_marks(&scene_graph.marks)?;
        if translated {
            self.close("</g>")?;
        }

        self.close("</svg>")
    }

    pub fn add_group_mark(&mut self, group: &SceneGroup) -> Result<(), ColorbarSvgError> {
        let [x, y] = group.origin;
        let mut tag = String::from("<g");
        if !group.name.is_empty() {
            write!(tag, r#" class="{}""#, escape_xml(&group.name))?;
        }
        if x != 0.0 || y != 0.0 {
            write!(tag, r#" transform="translate({x},{y})""#)?;
        }
        tag.push('>');

        self.open(&tag)?;
        self.add_marks(&group.marks)?;
        self.close("</g>")
    }

    pub fn add_rule_mark(&mut self, mark: &SceneRuleMark) -> Result<(), ColorbarSvgError> {
        let dashes: Box<dyn Iterator<Item = Option<&Vec<f32>>> + '_> = match mark.stroke_dash_iter() {
            Some(iter) => Box::new(iter.map(Some)),
            None => Box::new(std::iter::repeat(None)),
        };
        for ([x1, y1, x2, y2], stroke, width, cap, dash) in izip!(
            mark.segment_iter([0.0, 0.0]),
            mark.stroke_iter(),
            mark.stroke_width_iter(),
            mark.stroke_cap_iter(),
            dashes,
        ) {
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                log::debug!("Skipping non-finite segment in {}", mark.name);
                continue;
            }
            let mut line = format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" {} stroke-width="{width}""#,
                paint_attrs("stroke", stroke)
            );
            match cap {
                StrokeCap::Butt => {}
                StrokeCap::Round => line.push_str(r#" stroke-linecap="round""#),
                StrokeCap::Square => line.push_str(r#" stroke-linecap="square""#),
            }
            if let Some(dash) = dash.filter(|d| !d.is_empty()) {
                let dash: Vec<String> = dash.iter().map(|d| d.to_string()).collect();
                write!(line, r#" stroke-dasharray="{}""#, dash.join(","))?;
            }
            line.push_str("/>");
            self.line(&line)?;
        }
        Ok(())
    }

    pub fn add_text_mark(&mut self, mark: &SceneTextMark) -> Result<(), ColorbarSvgError> {
        for (text, x, y, align, baseline, angle, color, font, size, weight, style) in izip!(
            mark.text_iter(),
            mark.x_iter(),
            mark.y_iter(),
            mark.align_iter(),
            mark.baseline_iter(),
            mark.angle_iter(),
            mark.color_iter(),
            mark.font_iter(),
            mark.font_size_iter(),
            mark.font_weight_iter(),
            mark.font_style_iter(),
        ) {
            if !x.is_finite() || !y.is_finite() {
                log::debug!("Skipping non-finite text position in {}", mark.name);
                continue;
            }
            let mut el = format!(r#"<text x="{x}" y="{y}""#);
            if *angle != 0.0 {
                write!(el, r#" transform="rotate({angle},{x},{y})""#)?;
            }
            let anchor = match align {
                TextAlignSpec::Left => "start",
                TextAlignSpec::Center => "middle",
                TextAlignSpec::Right => "end",
            };
            write!(el, r#" text-anchor="{anchor}""#)?;
            if let Some(dy) = baseline_dy(baseline) {
                write!(el, r#" dy="{dy}""#)?;
            }
            write!(
                el,
                r#" font-family="{}" font-size="{size}""#,
                escape_xml(font)
            )?;
            match weight {
                FontWeightSpec::Name(FontWeightNameSpec::Normal) => {}
                FontWeightSpec::Name(FontWeightNameSpec::Bold) => {
                    el.push_str(r#" font-weight="bold""#)
                }
                FontWeightSpec::Number(w) => write!(el, r#" font-weight="{w}""#)?,
            }
            if let FontStyleSpec::Italic = style {
                el.push_str(r#" font-style="italic""#);
            }
            write!(el, " {}>{}</text>", paint_attrs("fill", color), escape_xml(text))?;
            self.line(&el)?;
        }
        Ok(())
    }

    pub fn add_image_mark(&mut self, mark: &SceneImageMark) -> Result<(), ColorbarSvgError> {
        for (img, bounds) in mark.image_iter().zip(mark.bounds_iter([0.0, 0.0])) {
            let mut el = format!(
                r#"<image x="{}" y="{}" width="{}" height="{}""#,
                bounds.left, bounds.top, bounds.width, bounds.height
            );
            if !mark.aspect {
                el.push_str(r#" preserveAspectRatio="none""#);
            }
            if !mark.smooth {
                el.push_str(r#" style="image-rendering: pixelated""#);
            }
            write!(el, r#" href="{}"/>"#, img.to_data_url()?)?;
            self.line(&el)?;
        }
        Ok(())
    }

    fn add_marks(&mut self, marks: &[SceneMark]) -> Result<(), ColorbarSvgError> {
        let mut indices: Vec<usize> = (0..marks.len()).collect();
        indices.sort_by_key(|i| marks[*i].zindex().unwrap_or(0));

        for mark_ind in indices {
            match &marks[mark_ind] {
                SceneMark::Rule(mark) => self.add_rule_mark(mark)?,
                SceneMark::Text(mark) => self.add_text_mark(mark)?,
                SceneMark::Image(mark) => self.add_image_mark(mark)?,
                SceneMark::Group(group) => self.add_group_mark(group)?,
            }
        }
        Ok(())
    }

    fn line(&mut self, content: &str) -> Result<(), ColorbarSvgError> {
        writeln!(self.svg, "{:indent$}{content}", "", indent = self.depth * 2)?;
        Ok(())
    }

    fn open(&mut self, tag: &str) -> Result<(), ColorbarSvgError> {
        self.line(tag)?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, tag: &str) -> Result<(), ColorbarSvgError> {
        self.depth = self.depth.saturating_sub(1);
        self.line(tag)
    }
}

/// Vertical shift applied to a text element so `y` lands on the requested baseline
fn baseline_dy(baseline: &TextBaselineSpec) -> Option<&'static str> {
    match baseline {
        TextBaselineSpec::Alphabetic => None,
        TextBaselineSpec::Top => Some("0.71em"),
        TextBaselineSpec::Middle => Some("0.32em"),
        TextBaselineSpec::Bottom => Some("-0.21em"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorbar_common::value::ScalarOrArray;
    use colorbar_image::RgbaImage;

    #[test]
    fn test_group_fragment() -> Result<(), ColorbarSvgError> {
        let group = SceneGroup::new("axis", [0.0, 28.0])
            .with_mark(SceneRuleMark {
                len: 2,
                x: vec![0.5, 320.5].into(),
                x2: vec![0.5, 320.5].into(),
                y: ScalarOrArray::new_scalar(-10.0),
                y2: ScalarOrArray::new_scalar(6.0),
                ..Default::default()
            })
            .with_mark(SceneTextMark {
                text: ScalarOrArray::new_scalar("a < b".to_string()),
                x: ScalarOrArray::new_scalar(0.5),
                y: ScalarOrArray::new_scalar(9.0),
                align: TextAlignSpec::Center.into(),
                baseline: TextBaselineSpec::Top.into(),
                ..Default::default()
            });

        let svg = SvgRenderer::render_group(&group)?;
        let expected = r#"<g class="axis" transform="translate(0,28)">
  <line x1="0.5" y1="-10" x2="0.5" y2="6" stroke="rgb(0,0,0)" stroke-width="1"/>
  <line x1="320.5" y1="-10" x2="320.5" y2="6" stroke="rgb(0,0,0)" stroke-width="1"/>
  <text x="0.5" y="9" text-anchor="middle" dy="0.71em" font-family="sans-serif" font-size="10" fill="rgb(0,0,0)">a &lt; b</text>
</g>
"#;
        assert_eq!(svg, expected);
        Ok(())
    }

    #[test]
    fn test_pixelated_stretched_image() -> Result<(), ColorbarSvgError> {
        let image = SceneImageMark {
            aspect: false,
            smooth: false,
            image: ScalarOrArray::new_scalar(RgbaImage::try_new(2, 1, vec![255; 8])?),
            width: ScalarOrArray::new_scalar(320.0),
            height: ScalarOrArray::new_scalar(10.0),
            ..Default::default()
        };
        let svg = SvgRenderer::render_group(&SceneGroup::default().with_mark(image))?;
        assert!(svg.starts_with("<g>\n"));
        assert!(svg.contains(r#"preserveAspectRatio="none""#));
        assert!(svg.contains(r#"style="image-rendering: pixelated""#));
        assert!(svg.contains(r#"href="data:image/png;base64,"#));
        Ok(())
    }

    #[test]
    fn test_zindex_orders_marks() -> Result<(), ColorbarSvgError> {
        let group = SceneGroup::default()
            .with_mark(SceneTextMark {
                text: ScalarOrArray::new_scalar("second".to_string()),
                zindex: Some(1),
                ..Default::default()
            })
            .with_mark(SceneTextMark {
                text: ScalarOrArray::new_scalar("first".to_string()),
                ..Default::default()
            });
        let svg = SvgRenderer::render_group(&group)?;
        let first = svg.find("first").unwrap_or(usize::MAX);
        let second = svg.find("second").unwrap_or(0);
        assert!(first < second);
        Ok(())
    }

    #[test]
    fn test_document_root() -> Result<(), ColorbarSvgError> {
        let svg = SvgRenderer::render_scene(&SceneGraph::new(320.0, 50.0))?;
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"320\" height=\"50\" viewBox=\"0 0 320 50\" style=\"overflow: visible; display: block\">\n</svg>\n"
        );
        Ok(())
    }
}
