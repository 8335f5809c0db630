use colorbar_image::error::ColorbarImageError;
use colorbar_scenegraph::error::ColorbarSceneGraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorbarSvgError {
    #[error("Image error: {0}")]
    ImageError(#[from] ColorbarImageError),

    #[error("Invalid scene graph: {0}")]
    SceneGraphError(#[from] ColorbarSceneGraphError),

    #[error("Failed to write SVG output")]
    FmtError(#[from] std::fmt::Error),
}
