use super::mark::{indices_iter, validate_channel, validate_indices, SceneMark};
use crate::error::ColorbarSceneGraphError;
use colorbar_common::types::{Rgba, StrokeCap, BLACK};
use colorbar_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Line segments from (x, y) to (x2, y2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRuleMark {
    pub name: String,
    pub len: u32,
    pub stroke_dash: Option<ScalarOrArray<Vec<f32>>>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub x2: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub stroke: ScalarOrArray<Rgba>,
    pub stroke_width: ScalarOrArray<f32>,
    pub stroke_cap: ScalarOrArray<StrokeCap>,
    pub indices: Option<Arc<Vec<usize>>>,
    pub zindex: Option<i32>,
}

impl SceneRuleMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn x2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x2.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn stroke_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.stroke
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn stroke_width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.stroke_width
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn stroke_cap_iter(&self) -> Box<dyn Iterator<Item = &StrokeCap> + '_> {
        self.stroke_cap
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn stroke_dash_iter(&self) -> Option<Box<dyn Iterator<Item = &Vec<f32>> + '_>> {
        self.stroke_dash
            .as_ref()
            .map(|stroke_dash| stroke_dash.as_iter(self.len as usize, self.indices.as_ref()))
    }

    pub fn indices_iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        indices_iter(self.len, self.indices.as_ref())
    }

    /// Segment endpoints `[x, y, x2, y2]` translated by `origin`
    pub fn segment_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = [f32; 4]> + '_> {
        Box::new(
            izip!(self.x_iter(), self.y_iter(), self.x2_iter(), self.y2_iter()).map(
                move |(x0, y0, x1, y1)| {
                    [
                        *x0 + origin[0],
                        *y0 + origin[1],
                        *x1 + origin[0],
                        *y1 + origin[1],
                    ]
                },
            ),
        )
    }

    pub fn validate(&self) -> Result<(), ColorbarSceneGraphError> {
        validate_channel(&self.name, "x", self.len, &self.x)?;
        validate_channel(&self.name, "y", self.len, &self.y)?;
        validate_channel(&self.name, "x2", self.len, &self.x2)?;
        validate_channel(&self.name, "y2", self.len, &self.y2)?;
        validate_channel(&self.name, "stroke", self.len, &self.stroke)?;
        validate_channel(&self.name, "stroke_width", self.len, &self.stroke_width)?;
        validate_channel(&self.name, "stroke_cap", self.len, &self.stroke_cap)?;
        if let Some(stroke_dash) = &self.stroke_dash {
            validate_channel(&self.name, "stroke_dash", self.len, stroke_dash)?;
        }
        validate_indices(&self.name, self.len, self.indices.as_ref())
    }
}

impl Default for SceneRuleMark {
    fn default() -> Self {
        Self {
            name: "rule_mark".to_string(),
            len: 1,
            stroke_dash: None,
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            x2: ScalarOrArray::new_scalar(0.0),
            y2: ScalarOrArray::new_scalar(0.0),
            stroke: ScalarOrArray::new_scalar(BLACK),
            stroke_width: ScalarOrArray::new_scalar(1.0),
            stroke_cap: ScalarOrArray::new_scalar(StrokeCap::Butt),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneRuleMark> for SceneMark {
    fn from(mark: SceneRuleMark) -> Self {
        SceneMark::Rule(mark)
    }
}
