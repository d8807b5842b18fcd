//! Sponsorkit - badge sheets for sponsorship records
//!
//! This library classifies sponsorships into monetary tiers, lays each tier
//! out as a grid of avatar badges, and composes the result into one SVG
//! document that can be written as SVG, PNG and a JSON manifest.
//!
//! # Example
//!
//! ```rust
//! use sponsorkit::model::{Sponsor, Sponsorship};
//! use sponsorkit::{render, RenderConfig};
//!
//! let sponsors = vec![Sponsorship::new(
//!     Sponsor::user("octocat", "The Octocat", "https://avatars.example/octocat.png"),
//!     10.0,
//!     "2024-01-01T00:00:00Z",
//! )];
//!
//! let svg = render(&sponsors, &RenderConfig::default()).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("octocat.png"));
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod output;
pub mod renderer;
pub mod source;

use std::fmt;
use std::path::Path;

pub use config::{BadgePreset, Hooks, OutputFormat, RenderConfig, SponsorkitConfig, Tier};
pub use error::ConfigError;
pub use output::{emit, EmitReport, FsSink, OutputError, OutputSink};
pub use renderer::{Composer, SvgConfig};
pub use source::{CachedSource, JsonFileSource, SourceError, SponsorSource};

use thiserror::Error;

use model::Sponsorship;

/// Extension point a hook error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    OnSponsorsFetched,
    ComposeBefore,
    Compose,
    ComposeAfter,
    CustomComposer,
    OnSvgGenerated,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookStage::OnSponsorsFetched => "on_sponsors_fetched",
            HookStage::ComposeBefore => "compose_before",
            HookStage::Compose => "compose",
            HookStage::ComposeAfter => "compose_after",
            HookStage::CustomComposer => "custom_composer",
            HookStage::OnSvgGenerated => "on_svg_generated",
        };
        f.write_str(name)
    }
}

/// Errors that abort a render pass
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot load sponsorships: {0}")]
    Source(#[from] SourceError),

    /// A caller-supplied hook failed; hooks are never isolated
    #[error("{stage} hook failed{}: {error:#}", tier_suffix(.tier))]
    Hook {
        stage: HookStage,
        tier: Option<usize>,
        error: anyhow::Error,
    },

    #[error("cannot produce {format} output: {source}")]
    Output {
        format: OutputFormat,
        #[source]
        source: OutputError,
    },
}

impl RenderError {
    pub fn hook(stage: HookStage, tier: Option<usize>, error: anyhow::Error) -> Self {
        Self::Hook { stage, tier, error }
    }
}

fn tier_suffix(tier: &Option<usize>) -> String {
    tier.map(|t| format!(" in tier #{t}")).unwrap_or_default()
}

/// Render sponsorships to an SVG string
///
/// Classifies the list against `config.tiers` and composes the document.
/// Global hooks other than the custom composer are not run here; see [`run`].
///
/// # Example
///
/// ```rust
/// use sponsorkit::config::{BadgePreset, Tier};
/// use sponsorkit::model::{Sponsor, Sponsorship};
/// use sponsorkit::{render, RenderConfig};
///
/// let config = RenderConfig::new().with_tiers(vec![
///     Tier::new(50.0).with_title("Gold").with_preset(BadgePreset::named("large").unwrap()),
///     Tier::new(0.0).with_title("Backers"),
/// ]);
/// let sponsors = vec![Sponsorship::new(
///     Sponsor::user("ada", "Ada", "ada.png"),
///     100.0,
///     "2024-01-01T00:00:00Z",
/// )];
///
/// let svg = render(&sponsors, &config).unwrap();
/// assert!(svg.contains("Gold"));
/// assert!(!svg.contains("Backers"));
/// ```
pub fn render(sponsorships: &[Sponsorship], config: &RenderConfig) -> Result<String, RenderError> {
    if config.embed_avatars {
        let mut embedded = sponsorships.to_vec();
        renderer::avatar::embed_local_avatars(&mut embedded, Path::new("."));
        return render_classified(&embedded, config);
    }
    render_classified(sponsorships, config)
}

fn render_classified(
    sponsorships: &[Sponsorship],
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let partition = layout::classify(sponsorships, &config.tiers);
    if !partition.excluded.is_empty() {
        tracing::debug!(
            excluded = partition.excluded.len(),
            "sponsorships below every tier threshold"
        );
    }
    renderer::compose(sponsorships, &partition, config)
}

/// Run a complete pass: load, mutate, render, emit
///
/// The source is consulted through the cache at `config.cache_file` unless
/// `config.force` is set. Per-format failures are collected in the returned
/// report; everything else aborts the pass.
#[tracing::instrument(skip_all, fields(name = %config.name))]
pub fn run(
    config: &RenderConfig,
    source: &dyn SponsorSource,
    sink: &mut dyn OutputSink,
) -> Result<EmitReport, RenderError> {
    let cached = CachedSource::new(source, &config.cache_file).with_force(config.force);
    let mut sponsorships = cached.fetch()?;
    tracing::info!(sponsors = sponsorships.len(), "sponsorships loaded");

    if let Some(hook) = &config.hooks.on_sponsors_fetched {
        hook(&mut sponsorships)
            .map_err(|error| RenderError::hook(HookStage::OnSponsorsFetched, None, error))?;
    }

    let svg = render(&sponsorships, config)?;
    emit(svg, &sponsorships, &config.formats, &config.hooks, sink)
}
