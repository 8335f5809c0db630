use lazy_static::lazy_static;
use resvg::render;
use std::sync::{Arc, Mutex};
use usvg::fontdb::Database;

use crate::error::ColorbarImageError;

lazy_static! {
    pub static ref FONT_DB: Mutex<usvg::fontdb::Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> usvg::fontdb::Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    log::debug!("Loaded {} system font faces", font_database.len());
    font_database
}

/// Rasterize an SVG document to PNG bytes at the given scale factor
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, ColorbarImageError> {
    // Clone the database so the lock isn't held while rendering
    let fontdb = {
        let font_database = FONT_DB.lock().map_err(|_| {
            ColorbarImageError::InternalError("Font database lock poisoned".to_string())
        })?;
        Arc::new(font_database.clone())
    };

    let xml_opt = usvg::roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let doc = usvg::roxmltree::Document::parse_with_options(svg, xml_opt)?;
    let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

    let width = (rtree.size().width() * scale).ceil() as u32;
    let height = (rtree.size().height() * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        ColorbarImageError::InternalError(format!("Invalid pixmap size {width}x{height}"))
    })?;

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    render(&rtree, transform, &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|err| ColorbarImageError::InternalError(err.to_string()))
}
