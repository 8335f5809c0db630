use colorbar_image::error::ColorbarImageError;
use colorbar_scales::error::ColorbarScaleError;
use colorbar_scales::scale::ColorScaleKind;
use colorbar_scenegraph::error::ColorbarSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorbarGuidesError {
    #[error("A color ramp needs at least 2 samples, got {0}")]
    InvalidSampleCount(usize),

    #[error("Invalid legend geometry: {0}")]
    InvalidGeometry(String),

    #[error("A colorbar can't be drawn for a {0} scale")]
    UnsupportedScale(ColorScaleKind),

    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] ColorbarScaleError),

    #[error("Image error: {0}")]
    ImageError(#[from] ColorbarImageError),

    #[error("Invalid scene graph: {0}")]
    SceneGraphError(#[from] ColorbarSceneGraphError),
}
