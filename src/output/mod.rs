//! Format coordination: one SVG string, several artifacts
//!
//! The composed document passes through the `on_svg_generated` hook once and
//! is then handed to an [`OutputSink`] per requested format. A failing format
//! is recorded in the [`EmitReport`] and does not stop the others.

pub mod fs;
pub mod raster;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Hooks, OutputFormat};
use crate::model::Sponsorship;
use crate::{HookStage, RenderError};

pub use fs::FsSink;
pub use raster::rasterize;

/// Errors raised while producing a single artifact
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid SVG document: {0}")]
    Svg(#[from] usvg::Error),

    #[error("cannot rasterize a {width}x{height} document")]
    Raster { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutputError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Destination for generated artifacts
pub trait OutputSink {
    fn write_svg(&mut self, svg: &str) -> Result<PathBuf, OutputError>;

    /// Rasterize `svg` and store it as PNG
    fn write_png(&mut self, svg: &str) -> Result<PathBuf, OutputError>;

    /// Store the classified sponsorship list
    fn write_json(&mut self, sponsorships: &[Sponsorship]) -> Result<PathBuf, OutputError>;
}

/// Outcome of one emit pass
#[derive(Debug)]
pub struct EmitReport {
    /// The document after `on_svg_generated`
    pub svg: String,
    pub written: Vec<(OutputFormat, PathBuf)>,
    pub failures: Vec<(OutputFormat, OutputError)>,
}

impl EmitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn path(&self, format: OutputFormat) -> Option<&Path> {
        self.written
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, p)| p.as_path())
    }

    /// Turn the first recorded failure into an error
    pub fn into_result(mut self) -> Result<Self, RenderError> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        let (format, source) = self.failures.remove(0);
        Err(RenderError::Output { format, source })
    }
}

/// Produce every requested artifact from one composed document
///
/// `on_svg_generated` runs exactly once before any artifact is written; a
/// returned string replaces the document. Both the SVG and PNG outputs use
/// the final document. Formats are processed in [`OutputFormat`] order.
#[tracing::instrument(skip_all, fields(formats = formats.len()))]
pub fn emit(
    svg: String,
    sponsorships: &[Sponsorship],
    formats: &BTreeSet<OutputFormat>,
    hooks: &Hooks,
    sink: &mut dyn OutputSink,
) -> Result<EmitReport, RenderError> {
    let svg = match &hooks.on_svg_generated {
        Some(hook) => match hook(&svg) {
            Ok(Some(replaced)) => {
                tracing::debug!("on_svg_generated replaced the document");
                replaced
            }
            Ok(None) => svg,
            Err(error) => return Err(RenderError::hook(HookStage::OnSvgGenerated, None, error)),
        },
        None => svg,
    };

    let mut report = EmitReport {
        svg,
        written: Vec::new(),
        failures: Vec::new(),
    };
    for &format in formats {
        let result = match format {
            OutputFormat::Svg => sink.write_svg(&report.svg),
            OutputFormat::Png => sink.write_png(&report.svg),
            OutputFormat::Json => sink.write_json(sponsorships),
        };
        match result {
            Ok(path) => {
                tracing::info!(%format, path = %path.display(), "wrote artifact");
                report.written.push((format, path));
            }
            Err(err) => {
                tracing::warn!(%format, "artifact failed: {err}");
                report.failures.push((format, err));
            }
        }
    }
    Ok(report)
}
