#[derive(Debug, thiserror::Error)]
pub enum ColorbarImageError {
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Unsupported image source: {0}")]
    UnsupportedImageSource(String),

    #[error("Image buffer of {len} bytes does not match {width}x{height} RGBA dimensions")]
    InvalidBufferSize { width: u32, height: u32, len: usize },

    #[error("image error")]
    ImageError(#[from] image::ImageError),

    #[error("base64 decode error")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[cfg(feature = "svg")]
    #[error("usvg error: {0}")]
    UsvgError(#[from] usvg::Error),

    #[cfg(feature = "svg")]
    #[error("roxml Error: {0}")]
    RoxmlError(#[from] usvg::roxmltree::Error),
}
