//! Caller-supplied extension points
//!
//! Hooks run inline on the render thread. An error returned from any hook
//! aborts the whole pass.

use std::fmt;
use std::sync::Arc;

use crate::model::Sponsorship;
use crate::renderer::Composer;

use super::RenderConfig;

/// Writes markup into the composer for one tier (or the whole document)
pub type ComposeHook =
    Arc<dyn Fn(&mut Composer, &[Sponsorship], &RenderConfig) -> anyhow::Result<()> + Send + Sync>;

/// Mutates the sponsorship list before anything is rendered
pub type SponsorsFetchedHook =
    Arc<dyn Fn(&mut Vec<Sponsorship>) -> anyhow::Result<()> + Send + Sync>;

/// Inspects the final markup; returning `Some` replaces it
pub type SvgGeneratedHook = Arc<dyn Fn(&str) -> anyhow::Result<Option<String>> + Send + Sync>;

/// Document-wide hooks
#[derive(Clone, Default)]
pub struct Hooks {
    pub on_sponsors_fetched: Option<SponsorsFetchedHook>,
    pub on_svg_generated: Option<SvgGeneratedHook>,
    /// Replaces the per-tier loop outright; per-tier hooks are ignored when set
    pub custom_composer: Option<ComposeHook>,
}

impl Hooks {
    pub fn on_sponsors_fetched<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Vec<Sponsorship>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on_sponsors_fetched = Some(Arc::new(f));
        self
    }

    pub fn on_svg_generated<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Option<String>> + Send + Sync + 'static,
    {
        self.on_svg_generated = Some(Arc::new(f));
        self
    }

    pub fn custom_composer<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Composer, &[Sponsorship], &RenderConfig) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.custom_composer = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_sponsors_fetched", &self.on_sponsors_fetched.is_some())
            .field("on_svg_generated", &self.on_svg_generated.is_some())
            .field("custom_composer", &self.custom_composer.is_some())
            .finish()
    }
}

/// Per-tier hooks as supplied by the caller
#[derive(Clone, Default)]
pub struct TierHooks {
    /// Replaces the default grid for this tier
    pub compose: Option<ComposeHook>,
    pub compose_before: Option<ComposeHook>,
    pub compose_after: Option<ComposeHook>,
}

impl TierHooks {
    pub fn compose<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Composer, &[Sponsorship], &RenderConfig) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.compose = Some(Arc::new(f));
        self
    }

    pub fn before<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Composer, &[Sponsorship], &RenderConfig) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.compose_before = Some(Arc::new(f));
        self
    }

    pub fn after<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Composer, &[Sponsorship], &RenderConfig) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.compose_after = Some(Arc::new(f));
        self
    }

    /// Collapse the optional hooks into the strategy the composer runs
    pub fn into_strategy(self) -> TierStrategy {
        match (self.compose, self.compose_before, self.compose_after) {
            (Some(compose), before, after) => TierStrategy::Replace {
                compose,
                before,
                after,
            },
            (None, None, None) => TierStrategy::Grid,
            (None, before, after) => TierStrategy::Decorated { before, after },
        }
    }
}

impl fmt::Debug for TierHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TierHooks")
            .field("compose", &self.compose.is_some())
            .field("compose_before", &self.compose_before.is_some())
            .field("compose_after", &self.compose_after.is_some())
            .finish()
    }
}

/// How a tier's body is produced
#[derive(Clone)]
pub enum TierStrategy {
    /// The default sponsor grid
    Grid,
    /// The default grid with markup emitted around it
    Decorated {
        before: Option<ComposeHook>,
        after: Option<ComposeHook>,
    },
    /// A caller hook owns the body and must commit its own height
    Replace {
        compose: ComposeHook,
        before: Option<ComposeHook>,
        after: Option<ComposeHook>,
    },
}

impl TierStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            TierStrategy::Grid => "grid",
            TierStrategy::Decorated { .. } => "decorated",
            TierStrategy::Replace { .. } => "replace",
        }
    }
}

impl fmt::Debug for TierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
