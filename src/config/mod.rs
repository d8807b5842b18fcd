//! Configuration surface
//!
//! [`SponsorkitConfig`] is what callers write (usually `sponsorkit.toml` plus
//! hooks attached in code). Every optional field is resolved exactly once by
//! [`SponsorkitConfig::resolve`] into a [`RenderConfig`], so the layout and
//! rendering stages never deal with absent values.

pub mod hooks;
pub mod preset;
pub mod resolve;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

pub use hooks::{ComposeHook, Hooks, TierHooks, TierStrategy};
pub use preset::BadgePreset;
pub use resolve::{Padding, RenderConfig, Tier};

/// Environment variable consulted when `login` is not configured
pub const ENV_LOGIN: &str = "SPONSORKIT_LOGIN";
/// Environment variable consulted when `output_dir` is not configured
pub const ENV_DIR: &str = "SPONSORKIT_DIR";

/// Artifact kinds a render pass can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Svg, OutputFormat::Png, OutputFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{other}' (expected svg, png or json)")),
        }
    }
}

/// Vertical padding as written in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaddingConfig {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

/// A preset given either by built-in name or inline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PresetSpec {
    Named(String),
    Inline(BadgePreset),
}

impl From<BadgePreset> for PresetSpec {
    fn from(preset: BadgePreset) -> Self {
        PresetSpec::Inline(preset)
    }
}

/// One tier as written in configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    /// Lower bound (inclusive) of the monthly amount for this tier
    #[serde(default)]
    pub monthly_dollars: f64,
    pub title: Option<String>,
    pub preset: Option<PresetSpec>,
    #[serde(default)]
    pub padding: PaddingConfig,
    #[serde(skip)]
    pub hooks: TierHooks,
}

impl TierConfig {
    pub fn new(monthly_dollars: f64) -> Self {
        Self {
            monthly_dollars,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_preset(mut self, preset: impl Into<PresetSpec>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    pub fn with_named_preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(PresetSpec::Named(name.into()));
        self
    }

    pub fn with_padding(mut self, top: f64, bottom: f64) -> Self {
        self.padding = PaddingConfig {
            top: Some(top),
            bottom: Some(bottom),
        };
        self
    }

    pub fn with_hooks(mut self, hooks: TierHooks) -> Self {
        self.hooks = hooks;
        self
    }
}

/// Top-level configuration, typically loaded from `sponsorkit.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SponsorkitConfig {
    /// Account whose sponsorships are rendered
    pub login: Option<String>,
    /// Bypass the sponsorship cache
    #[serde(default)]
    pub force: bool,
    /// Directory of output files (default `./sponsorkit`)
    pub output_dir: Option<PathBuf>,
    /// Base name of output files (default `sponsors`)
    pub name: Option<String>,
    /// Output formats (default all three)
    pub formats: Option<Vec<OutputFormat>>,
    /// Tiers in render order; `None` means a single catch-all tier
    pub tiers: Option<Vec<TierConfig>>,
    /// Width of the image (default 700)
    pub width: Option<f64>,
    /// Sponsorship cache (default `<output_dir>/.cache.json`)
    pub cache_file: Option<PathBuf>,
    #[serde(default)]
    pub padding: PaddingConfig,
    /// Inline CSS of the generated SVG
    pub svg_inline_css: Option<String>,
    /// Inline avatars that point at local files as `data:` URIs
    #[serde(default)]
    pub embed_avatars: bool,
    /// Reject presets whose avatar does not fit the box
    #[serde(default)]
    pub strict: bool,
    #[serde(skip)]
    pub hooks: Hooks,
}

impl SponsorkitConfig {
    /// Create an empty configuration (every field defaulted)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Fill `login` and `output_dir` from the process environment when unset
    pub fn with_env_defaults(self) -> Self {
        self.with_defaults_from(|key| std::env::var(key).ok())
    }

    /// Fill `login` and `output_dir` from `lookup` when unset
    pub fn with_defaults_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.login.is_none() {
            self.login = lookup(ENV_LOGIN);
        }
        if self.output_dir.is_none() {
            self.output_dir = lookup(ENV_DIR).map(PathBuf::from);
        }
        self
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        self.formats = Some(formats.into_iter().collect());
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<TierConfig>) -> Self {
        self.tiers = Some(tiers);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_padding(mut self, top: f64, bottom: f64) -> Self {
        self.padding = PaddingConfig {
            top: Some(top),
            bottom: Some(bottom),
        };
        self
    }

    pub fn with_inline_css(mut self, css: impl Into<String>) -> Self {
        self.svg_inline_css = Some(css.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = SponsorkitConfig::from_str(
            r##"
login = "octocat"
output_dir = "out"
name = "badges"
formats = ["svg", "json"]
width = 800
embed_avatars = true

[padding]
top = 10
bottom = 30

[[tiers]]
title = "Backers"
preset = "small"

[[tiers]]
title = "Gold"
monthly_dollars = 100
padding = { top = 5, bottom = 15 }
preset = { size = 60, box_width = 200, box_height = 80, display_name = true, side_padding = 10 }
"##,
        )
        .expect("Should parse");

        assert_eq!(config.login.as_deref(), Some("octocat"));
        assert_eq!(config.formats, Some(vec![OutputFormat::Svg, OutputFormat::Json]));
        assert_eq!(config.padding.top, Some(10.0));
        assert!(config.embed_avatars);
        let tiers = config.tiers.expect("tiers");
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].monthly_dollars, 0.0);
        assert_eq!(tiers[0].preset, Some(PresetSpec::Named("small".to_string())));
        assert_eq!(tiers[1].monthly_dollars, 100.0);
        assert!(matches!(tiers[1].preset, Some(PresetSpec::Inline(_))));
        assert_eq!(tiers[1].padding.bottom, Some(15.0));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = SponsorkitConfig::from_str("colour = \"red\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(SponsorkitConfig::from_str(r#"formats = ["gif"]"#).is_err());
    }

    #[test]
    fn test_env_defaults_only_fill_missing() {
        let lookup = |key: &str| match key {
            ENV_LOGIN => Some("from-env".to_string()),
            ENV_DIR => Some("/tmp/env-dir".to_string()),
            _ => None,
        };
        let config = SponsorkitConfig::new()
            .with_login("explicit")
            .with_defaults_from(lookup);
        assert_eq!(config.login.as_deref(), Some("explicit"));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/env-dir")));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert!("gif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
