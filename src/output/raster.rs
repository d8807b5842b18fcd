//! SVG to RGBA rasterization via resvg

use std::sync::Arc;

use image::RgbaImage;

use super::OutputError;

/// Upper bound on `width * height`, about 400 MB of RGBA
///
/// Only the area is bounded so tall documents with thousands of rows still
/// render.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Font database with the system fonts loaded
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
}

/// Rasterize `svg` 1:1 at its declared width and height
///
/// The returned image holds straight (non-premultiplied) RGBA, ready for PNG
/// encoding. Documents larger than [`MAX_PIXELS`] in total area are rejected
/// with [`OutputError::Raster`]; either side alone may be arbitrarily long.
pub fn rasterize(svg: &str, fontdb: Arc<usvg::fontdb::Database>) -> Result<RgbaImage, OutputError> {
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(OutputError::Raster { width, height });
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(OutputError::Raster { width, height })?;
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, rgba).ok_or(OutputError::Raster { width, height })
}
