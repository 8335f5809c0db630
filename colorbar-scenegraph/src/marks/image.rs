use std::sync::Arc;

use colorbar_common::types::{ImageAlign, ImageBaseline};
use colorbar_common::value::ScalarOrArray;
use colorbar_image::RgbaImage;
use itertools::izip;
use serde::{Deserialize, Serialize};

use super::mark::{indices_iter, validate_channel, validate_indices, SceneMark};
use crate::error::ColorbarSceneGraphError;

/// Placed raster images.
///
/// `aspect` preserves the source aspect ratio inside each (width, height) box;
/// `smooth` selects interpolated rather than nearest-neighbor resampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneImageMark {
    pub name: String,
    pub len: u32,
    pub aspect: bool,
    pub smooth: bool,
    pub image: ScalarOrArray<RgbaImage>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub width: ScalarOrArray<f32>,
    pub height: ScalarOrArray<f32>,
    pub align: ScalarOrArray<ImageAlign>,
    pub baseline: ScalarOrArray<ImageBaseline>,
    pub indices: Option<Arc<Vec<usize>>>,
    pub zindex: Option<i32>,
}

/// Resolved placement of one image instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SceneImageMark {
    pub fn image_iter(&self) -> Box<dyn Iterator<Item = &RgbaImage> + '_> {
        self.image.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.width.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn height_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.height
            .as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn align_iter(&self) -> Box<dyn Iterator<Item = &ImageAlign> + '_> {
        self.align.as_iter(self.len as usize, self.indices.as_ref())
    }
    pub fn baseline_iter(&self) -> Box<dyn Iterator<Item = &ImageBaseline> + '_> {
        self.baseline
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn indices_iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        indices_iter(self.len, self.indices.as_ref())
    }

    /// Placement of each image after applying align, baseline and aspect, translated by `origin`
    pub fn bounds_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = ImageBounds> + '_> {
        Box::new(
            izip!(
                self.image_iter(),
                self.x_iter(),
                self.y_iter(),
                self.width_iter(),
                self.height_iter(),
                self.baseline_iter(),
                self.align_iter(),
            )
            .map(move |(img, x, y, width, height, baseline, align)| {
                let x = *x + origin[0];
                let y = *y + origin[1];

                let left = match *align {
                    ImageAlign::Left => x,
                    ImageAlign::Center => x - *width / 2.0,
                    ImageAlign::Right => x - *width,
                };

                let top = match *baseline {
                    ImageBaseline::Top => y,
                    ImageBaseline::Middle => y - *height / 2.0,
                    ImageBaseline::Bottom => y - *height,
                };

                if !self.aspect || img.width == 0 || img.height == 0 {
                    return ImageBounds {
                        left,
                        top,
                        width: *width,
                        height: *height,
                    };
                }

                let img_aspect = img.width as f32 / img.height as f32;
                let outline_aspect = *width / *height;
                if img_aspect > outline_aspect {
                    // wider than the box: fit to width, center vertically
                    let aspect_height = *width / img_aspect;
                    ImageBounds {
                        left,
                        top: top + (*height - aspect_height) / 2.0,
                        width: *width,
                        height: aspect_height,
                    }
                } else if img_aspect < outline_aspect {
                    // taller than the box: fit to height, center horizontally
                    let aspect_width = *height * img_aspect;
                    ImageBounds {
                        left: left + (*width - aspect_width) / 2.0,
                        top,
                        width: aspect_width,
                        height: *height,
                    }
                } else {
                    ImageBounds {
                        left,
                        top,
                        width: *width,
                        height: *height,
                    }
                }
            }),
        )
    }

    pub fn validate(&self) -> Result<(), ColorbarSceneGraphError> {
        validate_channel(&self.name, "image", self.len, &self.image)?;
        validate_channel(&self.name, "x", self.len, &self.x)?;
        validate_channel(&self.name, "y", self.len, &self.y)?;
        validate_channel(&self.name, "width", self.len, &self.width)?;
        validate_channel(&self.name, "height", self.len, &self.height)?;
        validate_channel(&self.name, "align", self.len, &self.align)?;
        validate_channel(&self.name, "baseline", self.len, &self.baseline)?;
        validate_indices(&self.name, self.len, self.indices.as_ref())
    }
}

impl Default for SceneImageMark {
    fn default() -> Self {
        Self {
            name: "image_mark".to_string(),
            len: 1,
            aspect: true,
            smooth: true,
            image: ScalarOrArray::new_scalar(RgbaImage::default()),
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            width: ScalarOrArray::new_scalar(0.0),
            height: ScalarOrArray::new_scalar(0.0),
            align: ScalarOrArray::new_scalar(ImageAlign::Left),
            baseline: ScalarOrArray::new_scalar(ImageBaseline::Top),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneImageMark> for SceneMark {
    fn from(mark: SceneImageMark) -> Self {
        SceneMark::Image(Arc::new(mark))
    }
}
