//! File system sink: `<output_dir>/<name>.<ext>`

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{OutputFormat, RenderConfig};
use crate::model::Sponsorship;

use super::raster::{rasterize, system_fontdb};
use super::{OutputError, OutputSink};

/// Writes artifacts next to each other in one directory
pub struct FsSink {
    output_dir: PathBuf,
    name: String,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
}

impl FsSink {
    pub fn new(output_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            name: name.into(),
            fontdb: None,
        }
    }

    /// Sink for the directory and base name of `config`
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.output_dir.clone(), config.name.clone())
    }

    /// Use a prepared font database instead of loading the system fonts
    pub fn with_fontdb(mut self, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        self.fontdb = Some(fontdb);
        self
    }

    pub fn path_for(&self, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.name, format.extension()))
    }

    fn prepare(&self, format: OutputFormat) -> Result<PathBuf, OutputError> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|source| OutputError::io(&self.output_dir, source))?;
        Ok(self.path_for(format))
    }
}

impl fmt::Debug for FsSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsSink")
            .field("output_dir", &self.output_dir)
            .field("name", &self.name)
            .field("fontdb_loaded", &self.fontdb.is_some())
            .finish()
    }
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), OutputError> {
    std::fs::write(path, contents).map_err(|source| OutputError::io(path, source))
}

impl OutputSink for FsSink {
    fn write_svg(&mut self, svg: &str) -> Result<PathBuf, OutputError> {
        let path = self.prepare(OutputFormat::Svg)?;
        write_file(&path, svg)?;
        Ok(path)
    }

    fn write_png(&mut self, svg: &str) -> Result<PathBuf, OutputError> {
        let path = self.prepare(OutputFormat::Png)?;
        let fontdb = self.fontdb.get_or_insert_with(system_fontdb).clone();
        let image = rasterize(svg, fontdb)?;
        image.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(path)
    }

    fn write_json(&mut self, sponsorships: &[Sponsorship]) -> Result<PathBuf, OutputError> {
        let path = self.prepare(OutputFormat::Json)?;
        let json = serde_json::to_string_pretty(sponsorships)?;
        write_file(&path, json)?;
        Ok(path)
    }
}
