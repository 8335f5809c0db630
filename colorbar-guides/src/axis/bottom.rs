use colorbar_common::types::{TextAlignSpec, TextBaselineSpec};
use colorbar_common::value::ScalarOrArray;
use colorbar_scenegraph::marks::{group::SceneGroup, rule::SceneRuleMark, text::SceneTextMark};

use super::opts::AxisConfig;
use super::Tick;

/// Build a horizontal axis whose labels hang below it.
///
/// The group is translated to `origin`, with the axis at local y = 0. No domain
/// line is drawn. Tick marks run from `-tick_extent` to `tick_size` and labels
/// are centered under each tick, `tick_padding` past the tick end.
pub fn make_bottom_axis_marks(ticks: &[Tick], origin: [f32; 2], config: &AxisConfig) -> SceneGroup {
    let mut group = SceneGroup::new("axis", origin);

    let positions: Vec<f32> = ticks.iter().map(|t| t.position).collect();
    let labels: Vec<String> = ticks.iter().map(|t| t.label.clone()).collect();
    let len = ticks.len() as u32;

    group.push(SceneRuleMark {
        name: "axis_ticks".to_string(),
        len,
        x: ScalarOrArray::new_array(positions.clone()),
        x2: ScalarOrArray::new_array(positions.clone()),
        y: (-config.tick_extent).into(),
        y2: config.tick_size.into(),
        stroke: config.color.into(),
        stroke_width: 1.0.into(),
        ..Default::default()
    });

    group.push(SceneTextMark {
        name: "axis_labels".to_string(),
        len,
        text: ScalarOrArray::new_array(labels),
        x: ScalarOrArray::new_array(positions),
        y: (config.tick_size.max(0.0) + config.tick_padding).into(),
        align: TextAlignSpec::Center.into(),
        baseline: TextBaselineSpec::Top.into(),
        color: config.color.into(),
        font: config.font.clone().into(),
        font_size: config.font_size.into(),
        ..Default::default()
    });

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorbar_scenegraph::marks::mark::SceneMark;

    #[test]
    fn test_bottom_axis_layout() {
        let ticks = vec![Tick::new(0.5, "0"), Tick::new(160.5, "50")];
        let config = AxisConfig {
            tick_extent: 10.0,
            ..Default::default()
        };
        let group = make_bottom_axis_marks(&ticks, [0.0, 28.0], &config);
        assert_eq!(group.origin, [0.0, 28.0]);
        assert_eq!(group.marks.len(), 2);
        assert!(group.validate().is_ok());

        let Some(SceneMark::Rule(rule)) = group.find_mark("axis_ticks") else {
            panic!("missing tick marks");
        };
        let segments: Vec<_> = rule.segment_iter([0.0, 0.0]).collect();
        assert_eq!(segments[1], [160.5, -10.0, 160.5, 6.0]);

        let Some(SceneMark::Text(text)) = group.find_mark("axis_labels") else {
            panic!("missing labels");
        };
        assert_eq!(text.y, ScalarOrArray::new_scalar(9.0));
        assert_eq!(text.text_iter().cloned().collect::<Vec<_>>(), vec!["0", "50"]);
    }

    #[test]
    fn test_empty_ticks() {
        let group = make_bottom_axis_marks(&[], [0.0, 0.0], &AxisConfig::default());
        assert_eq!(group.marks.len(), 2);
        assert!(group.validate().is_ok());
    }
}
