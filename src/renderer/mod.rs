//! SVG renderer: sponsor glyphs and the composed document
//!
//! This module turns classified sponsorships into a single SVG string with
//! prefixed CSS classes for styling.

pub mod avatar;
pub mod compose;
pub mod config;
pub mod glyph;
pub mod svg;

pub use compose::compose;
pub use config::SvgConfig;
pub use glyph::{render_glyph, truncate_name, Glyph};
pub use svg::Composer;
