//! The SVG document under construction

use crate::config::{BadgePreset, Padding};
use crate::layout::{GridGeometry, Point};
use crate::model::Sponsorship;

use super::glyph::render_glyph;
use super::SvgConfig;

/// Build the SVG body incrementally while tracking a vertical cursor
///
/// One `Composer` belongs to one render pass. Hooks receive it as `&mut` and
/// may append markup and advance the cursor; everything below the cursor is
/// free space.
#[derive(Debug, Clone)]
pub struct Composer {
    config: SvgConfig,
    width: f64,
    height: f64,
    fragments: Vec<String>,
}

impl Composer {
    /// Create an empty composer for a document `width` pixels wide
    pub fn new(width: f64, config: SvgConfig) -> Self {
        Self {
            config,
            width,
            height: 0.0,
            fragments: vec![],
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current vertical cursor
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &SvgConfig {
        &self.config
    }

    /// Emitted fragments in document order
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Advance the cursor without emitting anything
    pub fn add_span(&mut self, height: f64) -> &mut Self {
        self.height += height;
        self
    }

    /// Append markup verbatim at the current position; the cursor does not move
    pub fn add_raw(&mut self, markup: impl Into<String>) -> &mut Self {
        self.fragments.push(markup.into());
        self
    }

    /// Append a horizontally centered line of text and advance past it
    pub fn add_text(&mut self, text: &str, class: &str) -> &mut Self {
        let band = self.config.title_height;
        self.fragments.push(format!(
            r#"<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            escape_xml(class),
            self.width / 2.0,
            self.height + band / 2.0,
            escape_xml(text)
        ));
        self.height += band;
        self
    }

    /// Append a tier title and advance past it
    pub fn add_title(&mut self, text: &str) -> &mut Self {
        let class = self.config.class("tier-title");
        self.add_text(text, &class)
    }

    /// Lay out `sponsors` in a grid starting at the cursor and advance past it
    pub fn add_sponsor_grid(
        &mut self,
        sponsors: &[Sponsorship],
        preset: &BadgePreset,
    ) -> GridGeometry {
        let geometry =
            GridGeometry::compute(preset, sponsors.len(), self.width, Padding::default());
        let top = self.height;
        for (index, sponsorship) in sponsors.iter().enumerate() {
            let cell = geometry.cell_origin(index);
            let glyph = render_glyph(
                &sponsorship.sponsor,
                Point::new(cell.x, cell.y + top),
                preset,
                &self.config,
            );
            self.fragments.push(glyph.markup);
        }
        self.height += geometry.grid_height();
        geometry
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    /// Build the final SVG string, sized to the document width and the cursor
    pub fn build(self, inline_css: &str) -> String {
        let nl = self.newline();
        let indent = self.indent_str();
        let mut svg = String::new();

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push_str(nl);

        if !inline_css.trim().is_empty() {
            svg.push_str(indent);
            svg.push_str("<style><![CDATA[");
            svg.push_str(nl);
            svg.push_str(&escape_cdata(inline_css.trim()));
            svg.push_str(nl);
            svg.push_str(indent);
            svg.push_str("]]></style>");
            svg.push_str(nl);
        }

        for fragment in &self.fragments {
            svg.push_str(indent);
            svg.push_str(fragment);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Split any `]]>` so the text stays inside one logical CDATA section
fn escape_cdata(s: &str) -> String {
    s.replace("]]>", "]]]]><![CDATA[>")
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
