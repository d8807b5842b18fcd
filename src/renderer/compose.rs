//! Document composition: tiers in declaration order, each through its strategy

use crate::config::{ComposeHook, RenderConfig, Tier, TierStrategy};
use crate::layout::Partition;
use crate::model::Sponsorship;
use crate::{HookStage, RenderError};

use super::Composer;

/// Compose the full SVG document for one render pass
///
/// The cursor starts at the global top padding. Unless a global custom
/// composer takes over, each tier runs its strategy in declaration order.
/// The document height is the final cursor plus the global bottom padding.
#[tracing::instrument(skip_all, fields(tiers = config.tiers.len(), sponsors = sponsorships.len()))]
pub fn compose(
    sponsorships: &[Sponsorship],
    partition: &Partition,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let mut composer = Composer::new(config.width, config.svg.clone());
    composer.add_span(config.padding.top);

    match &config.hooks.custom_composer {
        Some(custom) => {
            tracing::debug!("custom composer replaces the tier loop");
            custom(&mut composer, sponsorships, config)
                .map_err(|error| RenderError::hook(HookStage::CustomComposer, None, error))?;
        }
        None => {
            for (index, tier) in config.tiers.iter().enumerate() {
                compose_tier(&mut composer, index, tier, partition.tier(index), config)?;
            }
        }
    }

    composer.add_span(config.padding.bottom);
    tracing::debug!(
        width = composer.width(),
        height = composer.height(),
        "document composed"
    );
    Ok(composer.build(&config.svg_inline_css))
}

fn compose_tier(
    composer: &mut Composer,
    index: usize,
    tier: &Tier,
    sponsors: &[Sponsorship],
    config: &RenderConfig,
) -> Result<(), RenderError> {
    tracing::debug!(
        tier = %tier.label(index),
        strategy = tier.strategy.name(),
        sponsors = sponsors.len(),
        "composing tier"
    );
    match &tier.strategy {
        TierStrategy::Grid => compose_grid(composer, tier, sponsors),
        TierStrategy::Decorated { before, after } => {
            run_hook(before.as_ref(), HookStage::ComposeBefore, index, composer, sponsors, config)?;
            compose_grid(composer, tier, sponsors);
            run_hook(after.as_ref(), HookStage::ComposeAfter, index, composer, sponsors, config)?;
        }
        TierStrategy::Replace {
            compose,
            before,
            after,
        } => {
            run_hook(before.as_ref(), HookStage::ComposeBefore, index, composer, sponsors, config)?;
            run_hook(Some(compose), HookStage::Compose, index, composer, sponsors, config)?;
            run_hook(after.as_ref(), HookStage::ComposeAfter, index, composer, sponsors, config)?;
        }
    }
    Ok(())
}

fn run_hook(
    hook: Option<&ComposeHook>,
    stage: HookStage,
    index: usize,
    composer: &mut Composer,
    sponsors: &[Sponsorship],
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let Some(hook) = hook else {
        return Ok(());
    };
    hook(composer, sponsors, config).map_err(|error| RenderError::hook(stage, Some(index), error))
}

/// The default tier body: padding, optional title, sponsor grid, padding
///
/// Tiers without sponsors, or whose preset hides avatars, contribute nothing.
fn compose_grid(composer: &mut Composer, tier: &Tier, sponsors: &[Sponsorship]) {
    if sponsors.is_empty() || tier.preset.is_hidden() {
        return;
    }
    composer.add_span(tier.padding.top);
    if let Some(title) = &tier.title {
        let gap = composer.config().title_gap;
        composer.add_title(title).add_span(gap);
    }
    let geometry = composer.add_sponsor_grid(sponsors, &tier.preset);
    composer.add_span(tier.padding.bottom);
    tracing::trace!(
        columns = geometry.columns,
        rows = geometry.rows,
        tier_height = geometry.tier_height,
        "tier grid"
    );
}
