//! Layered-defaults resolution of [`SponsorkitConfig`] into [`RenderConfig`]

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::layout::lint::{self, LintCategory};
use crate::renderer::SvgConfig;

use super::{
    BadgePreset, Hooks, OutputFormat, PaddingConfig, PresetSpec, SponsorkitConfig, TierConfig,
    TierStrategy,
};

pub const DEFAULT_WIDTH: f64 = 700.0;
pub const DEFAULT_OUTPUT_DIR: &str = "./sponsorkit";
pub const DEFAULT_NAME: &str = "sponsors";
pub const DEFAULT_PADDING: f64 = 20.0;
const CACHE_FILE_NAME: &str = ".cache.json";

/// Resolved vertical padding
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    fn resolve(config: &PaddingConfig, default: f64) -> Self {
        Self {
            top: config.top.unwrap_or(default),
            bottom: config.bottom.unwrap_or(default),
        }
    }
}

/// A fully resolved tier
#[derive(Debug, Clone)]
pub struct Tier {
    /// Inclusive lower bound of the monthly amount
    pub threshold: f64,
    pub title: Option<String>,
    pub preset: BadgePreset,
    pub padding: Padding,
    pub strategy: TierStrategy,
}

impl Tier {
    /// A grid tier with the default preset and no padding
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            title: None,
            preset: BadgePreset::default(),
            padding: Padding::default(),
            strategy: TierStrategy::Grid,
        }
    }

    pub fn with_preset(mut self, preset: BadgePreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_padding(mut self, top: f64, bottom: f64) -> Self {
        self.padding = Padding::new(top, bottom);
        self
    }

    /// Label used in logs and error messages
    pub fn label(&self, index: usize) -> String {
        match &self.title {
            Some(title) => format!("#{index} \"{title}\""),
            None => format!("#{index} (>= {})", self.threshold),
        }
    }
}

/// Everything a render pass needs, with no optional layout fields left
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub login: Option<String>,
    pub output_dir: PathBuf,
    pub name: String,
    pub formats: BTreeSet<OutputFormat>,
    pub width: f64,
    pub padding: Padding,
    pub svg_inline_css: String,
    pub cache_file: PathBuf,
    pub force: bool,
    pub embed_avatars: bool,
    pub strict: bool,
    pub tiers: Vec<Tier>,
    pub svg: SvgConfig,
    pub hooks: Hooks,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let svg = SvgConfig::default();
        let output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
        Self {
            login: None,
            cache_file: output_dir.join(CACHE_FILE_NAME),
            output_dir,
            name: DEFAULT_NAME.to_string(),
            formats: OutputFormat::ALL.into_iter().collect(),
            width: DEFAULT_WIDTH,
            padding: Padding::new(DEFAULT_PADDING, DEFAULT_PADDING),
            svg_inline_css: svg.default_inline_css(),
            force: false,
            embed_avatars: false,
            strict: false,
            tiers: vec![default_tier()],
            svg,
            hooks: Hooks::default(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_padding(mut self, top: f64, bottom: f64) -> Self {
        self.padding = Padding::new(top, bottom);
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn with_inline_css(mut self, css: impl Into<String>) -> Self {
        self.svg_inline_css = css.into();
        self
    }

    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }
}

fn default_tier() -> Tier {
    Tier::new(0.0).with_title("Backers")
}

impl SponsorkitConfig {
    /// Resolve every optional field, validating numeric ranges and preset names
    ///
    /// In strict mode a preset whose avatar does not fit its box is an error;
    /// otherwise it is reported as a warning and rendering proceeds.
    pub fn resolve(self) -> Result<RenderConfig, ConfigError> {
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::invalid_value(
                "width",
                format!("must be a positive number, got {width}"),
            ));
        }

        let padding = Padding::resolve(&self.padding, DEFAULT_PADDING);
        check_finite("padding.top", padding.top)?;
        check_finite("padding.bottom", padding.bottom)?;

        let tiers = match self.tiers {
            Some(tiers) => tiers
                .into_iter()
                .enumerate()
                .map(|(index, tier)| resolve_tier(index, tier))
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![default_tier()],
        };

        let output_dir = self
            .output_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let cache_file = self
            .cache_file
            .unwrap_or_else(|| output_dir.join(CACHE_FILE_NAME));
        let formats: BTreeSet<OutputFormat> = match self.formats {
            Some(formats) => formats.into_iter().collect(),
            None => OutputFormat::ALL.into_iter().collect(),
        };
        let svg = SvgConfig::default();
        let svg_inline_css = self
            .svg_inline_css
            .unwrap_or_else(|| svg.default_inline_css());

        let config = RenderConfig {
            login: self.login,
            output_dir,
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            formats,
            width,
            padding,
            svg_inline_css,
            cache_file,
            force: self.force,
            embed_avatars: self.embed_avatars,
            strict: self.strict,
            tiers,
            svg,
            hooks: self.hooks,
        };

        let warnings = lint::check(&config);
        for warning in &warnings {
            if config.strict && matches!(warning.category, LintCategory::Overlap) {
                return Err(ConfigError::PresetOverlap {
                    tier: warning.tier,
                    reason: warning.message.clone(),
                });
            }
            tracing::warn!(category = %warning.category, tier = warning.tier, "{}", warning.message);
        }

        Ok(config)
    }
}

fn resolve_tier(index: usize, tier: TierConfig) -> Result<Tier, ConfigError> {
    let preset = match tier.preset {
        None => BadgePreset::default(),
        Some(PresetSpec::Inline(preset)) => preset,
        Some(PresetSpec::Named(name)) => match BadgePreset::named(&name) {
            Some(preset) => preset,
            None => {
                return Err(ConfigError::UnknownPreset {
                    suggestions: find_similar(BadgePreset::names(), &name, 2),
                    name,
                    tier: index,
                })
            }
        },
    };

    for (field, value) in [
        ("size", preset.size),
        ("box_width", preset.box_width),
        ("box_height", preset.box_height),
        ("side_padding", preset.side_padding),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::invalid_value(
                format!("tiers[{index}].preset.{field}"),
                format!("must be a non-negative number, got {value}"),
            ));
        }
    }

    let padding = Padding::resolve(&tier.padding, 0.0);
    check_finite(&format!("tiers[{index}].padding.top"), padding.top)?;
    check_finite(&format!("tiers[{index}].padding.bottom"), padding.bottom)?;

    Ok(Tier {
        threshold: tier.monthly_dollars,
        title: tier.title,
        preset,
        padding,
        strategy: tier.hooks.into_strategy(),
    })
}

fn check_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(field, "must be a finite number"))
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Known names within `max_distance` edits of `target`, closest first
fn find_similar(known: &[&str], target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .iter()
        .map(|name| (*name, levenshtein_distance(name, target)))
        .filter(|(_, dist)| *dist <= max_distance && *dist > 0)
        .collect();
    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TierHooks;

    #[test]
    fn test_defaults() {
        let config = SponsorkitConfig::new().resolve().unwrap();
        assert_eq!(config.width, 700.0);
        assert_eq!(config.name, "sponsors");
        assert_eq!(config.padding, Padding::new(20.0, 20.0));
        assert_eq!(config.formats.len(), 3);
        assert_eq!(config.cache_file, PathBuf::from("./sponsorkit/.cache.json"));
        assert_eq!(config.tiers.len(), 1);
        assert_eq!(config.tiers[0].threshold, 0.0);
        assert!(config.svg_inline_css.contains("sponsorkit-tier-title"));
    }

    #[test]
    fn test_explicit_empty_tier_list_is_kept() {
        let config = SponsorkitConfig::new().with_tiers(vec![]).resolve().unwrap();
        assert!(config.tiers.is_empty());
    }

    #[test]
    fn test_tier_padding_defaults_to_zero() {
        let config = SponsorkitConfig::new()
            .with_tiers(vec![TierConfig::new(10.0)])
            .resolve()
            .unwrap();
        assert_eq!(config.tiers[0].padding, Padding::new(0.0, 0.0));
        assert_eq!(config.tiers[0].preset, BadgePreset::default());
    }

    #[test]
    fn test_cache_file_follows_output_dir() {
        let config = SponsorkitConfig::new()
            .with_output_dir("/tmp/out")
            .resolve()
            .unwrap();
        assert_eq!(config.cache_file, PathBuf::from("/tmp/out/.cache.json"));
    }

    #[test]
    fn test_unknown_preset_suggests() {
        let err = SponsorkitConfig::new()
            .with_tiers(vec![TierConfig::new(0.0).with_named_preset("smal")])
            .resolve()
            .unwrap_err();
        match err {
            ConfigError::UnknownPreset {
                name,
                tier,
                suggestions,
            } => {
                assert_eq!(name, "smal");
                assert_eq!(tier, 0);
                assert_eq!(suggestions.first().map(String::as_str), Some("small"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_width() {
        let err = SponsorkitConfig::new().with_width(0.0).resolve().unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_negative_preset_field_rejected() {
        let preset = BadgePreset::new(-1.0, 10.0, 10.0);
        let err = SponsorkitConfig::new()
            .with_tiers(vec![TierConfig::new(0.0).with_preset(preset)])
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("tiers[0].preset.size"));
    }

    #[test]
    fn test_overlap_is_warning_unless_strict() {
        let cramped = BadgePreset::new(50.0, 40.0, 60.0);
        let tiers = || vec![TierConfig::new(0.0).with_preset(cramped.clone())];

        assert!(SponsorkitConfig::new().with_tiers(tiers()).resolve().is_ok());

        let err = SponsorkitConfig::new()
            .with_tiers(tiers())
            .with_strict(true)
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::PresetOverlap { tier: 0, .. }));
    }

    #[test]
    fn test_hooks_become_strategy() {
        let hooks = TierHooks::default().compose(|_, _, _| Ok(()));
        let config = SponsorkitConfig::new()
            .with_tiers(vec![TierConfig::new(0.0).with_hooks(hooks)])
            .resolve()
            .unwrap();
        assert!(matches!(config.tiers[0].strategy, TierStrategy::Replace { .. }));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("small", "small"), 0);
        assert_eq!(levenshtein_distance("small", "smal"), 1);
        assert_eq!(levenshtein_distance("xs", "xl"), 1);
        assert_eq!(levenshtein_distance("", "base"), 4);
    }
}
