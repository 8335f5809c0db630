use std::sync::Arc;

use colorbar_common::types::{
    FontStyleSpec, FontWeightNameSpec, FontWeightSpec, Rgba, TextAlignSpec, TextBaselineSpec,
    BLACK,
};
use colorbar_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};

use super::mark::{indices_iter, validate_channel, validate_indices, SceneMark};
use crate::error::ColorbarSceneGraphError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneTextMark {
    pub name: String,
    pub len: u32,
    pub text: ScalarOrArray<String>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub align: ScalarOrArray<TextAlignSpec>,
    pub baseline: ScalarOrArray<TextBaselineSpec>,
    pub angle: ScalarOrArray<f32>,
    pub color: ScalarOrArray<Rgba>,
    pub font: ScalarOrArray<String>,
    pub font_size: ScalarOrArray<f32>,
    pub font_weight: ScalarOrArray<FontWeightSpec>,
    pub font_style: ScalarOrArray<FontStyleSpec>,
    pub indices: Option<Arc<Vec<usize>>>,
    pub zindex: Option<i32>,
}

impl SceneTextMark {
    pub fn text_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.text.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn align_iter(&self) -> Box<dyn Iterator<Item = &TextAlignSpec> + '_> {
        self.align.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn baseline_iter(&self) -> Box<dyn Iterator<Item = &TextBaselineSpec> + '_> {
        self.baseline
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn angle_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.angle.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn color_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.color.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.font.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_size_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.font_size
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_weight_iter(&self) -> Box<dyn Iterator<Item = &FontWeightSpec> + '_> {
        self.font_weight
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn font_style_iter(&self) -> Box<dyn Iterator<Item = &FontStyleSpec> + '_> {
        self.font_style
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn indices_iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        indices_iter(self.len, self.indices.as_ref())
    }

    pub fn validate(&self) -> Result<(), ColorbarSceneGraphError> {
        validate_channel(&self.name, "text", self.len, &self.text)?;
        validate_channel(&self.name, "x", self.len, &self.x)?;
        validate_channel(&self.name, "y", self.len, &self.y)?;
        validate_channel(&self.name, "align", self.len, &self.align)?;
        validate_channel(&self.name, "baseline", self.len, &self.baseline)?;
        validate_channel(&self.name, "angle", self.len, &self.angle)?;
        validate_channel(&self.name, "color", self.len, &self.color)?;
        validate_channel(&self.name, "font", self.len, &self.font)?;
        validate_channel(&self.name, "font_size", self.len, &self.font_size)?;
        validate_channel(&self.name, "font_weight", self.len, &self.font_weight)?;
        validate_channel(&self.name, "font_style", self.len, &self.font_style)?;
        validate_indices(&self.name, self.len, self.indices.as_ref())
    }
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            len: 1,
            text: ScalarOrArray::new_scalar(String::new()),
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            align: ScalarOrArray::new_scalar(TextAlignSpec::Left),
            baseline: ScalarOrArray::new_scalar(TextBaselineSpec::Alphabetic),
            angle: ScalarOrArray::new_scalar(0.0),
            color: ScalarOrArray::new_scalar(BLACK),
            font: ScalarOrArray::new_scalar("sans-serif".to_string()),
            font_size: ScalarOrArray::new_scalar(10.0),
            font_weight: ScalarOrArray::new_scalar(FontWeightSpec::Name(
                FontWeightNameSpec::Normal,
            )),
            font_style: ScalarOrArray::new_scalar(FontStyleSpec::Normal),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(Arc::new(mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_select_labels() {
        let mark = SceneTextMark {
            len: 3,
            text: vec!["a".to_string(), "b".to_string(), "c".to_string()].into(),
            x: vec![0.0, 1.0, 2.0].into(),
            indices: Some(Arc::new(vec![2, 0])),
            ..Default::default()
        };
        assert!(mark.validate().is_ok());
        let labels: Vec<_> = mark.text_iter().cloned().collect();
        assert_eq!(labels, vec!["c", "a"]);
        assert_eq!(mark.font_size_iter().count(), 2);
        assert_eq!(mark.indices_iter().collect::<Vec<_>>(), vec![2, 0]);
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_index() {
        let mark = SceneTextMark {
            len: 1,
            indices: Some(Arc::new(vec![1])),
            ..Default::default()
        };
        assert_eq!(
            mark.validate(),
            Err(ColorbarSceneGraphError::IndexOutOfBounds {
                mark: "text_mark".to_string(),
                index: 1,
                len: 1,
            })
        );
    }
}
