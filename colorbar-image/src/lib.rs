pub mod error;

#[cfg(feature = "svg")]
pub mod svg;

use std::io::Cursor;

use base64::{prelude::BASE64_STANDARD, Engine};
use error::ColorbarImageError;
use serde::{Deserialize, Serialize};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Row-major RGBA8 pixel buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Build an image from raw RGBA8 bytes, validating the buffer length
    pub fn try_new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ColorbarImageError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(ColorbarImageError::InvalidBufferSize {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn to_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    pub fn from_image(img: &image::RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.to_vec(),
        }
    }

    /// RGBA bytes of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode the image as PNG bytes
    pub fn to_png(&self) -> Result<Vec<u8>, ColorbarImageError> {
        let img = self.to_image().ok_or(ColorbarImageError::InvalidBufferSize {
            width: self.width,
            height: self.height,
            len: self.data.len(),
        })?;
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    /// Encode the image as a self-contained `data:image/png;base64,` URL
    pub fn to_data_url(&self) -> Result<String, ColorbarImageError> {
        let png = self.to_png()?;
        Ok(format!("{PNG_DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(png)))
    }

    /// Decode a `data:image/png;base64,` URL back to an RgbaImage
    pub fn from_data_url(s: &str) -> Result<Self, ColorbarImageError> {
        let Some(data) = s.strip_prefix(PNG_DATA_URL_PREFIX) else {
            return Err(ColorbarImageError::UnsupportedImageSource(
                s.chars().take(32).collect(),
            ));
        };
        let decoded = BASE64_STANDARD.decode(data)?;
        let img = image::load_from_memory(&decoded)?;
        Ok(Self::from_image(&img.into_rgba8()))
    }
}
