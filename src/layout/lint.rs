//! Lint pass for detecting preset defects before rendering.
//!
//! Checks each resolved tier for mechanical issues: avatars that do not fit
//! their box (neighbouring glyphs overlap) and name labels that cannot fit
//! next to the avatar at their maximum length.

use std::fmt;

use crate::config::{BadgePreset, RenderConfig};

/// Approximate glyph advance as a fraction of the font size
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// A lint warning about a tier's preset
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    /// Index of the tier in declaration order
    pub tier: usize,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// Avatar plus side padding exceeds the box; glyphs overlap
    Overlap,
    /// The label at `name_length` characters runs past the box edge
    Label,
    /// The preset is wider than the whole document
    Width,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Label => write!(f, "label"),
            LintCategory::Width => write!(f, "width"),
        }
    }
}

/// Run all lint checks on a resolved configuration.
pub fn check(config: &RenderConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for (index, tier) in config.tiers.iter().enumerate() {
        let preset = &tier.preset;
        if preset.is_hidden() {
            continue;
        }
        check_overlap(index, preset, &mut warnings);
        check_label(index, preset, config.svg.label_font_size, &mut warnings);
        check_width(index, preset, config.width, &mut warnings);
    }
    warnings
}

fn check_overlap(tier: usize, preset: &BadgePreset, warnings: &mut Vec<LintWarning>) {
    if preset.box_width < preset.min_box_width() {
        warnings.push(LintWarning {
            category: LintCategory::Overlap,
            tier,
            message: format!(
                "box_width {} is smaller than size + 2 * side_padding = {}",
                preset.box_width,
                preset.min_box_width()
            ),
        });
    }
    if preset.box_height < preset.size {
        warnings.push(LintWarning {
            category: LintCategory::Overlap,
            tier,
            message: format!(
                "box_height {} is smaller than size {}",
                preset.box_height, preset.size
            ),
        });
    }
}

/// Estimated width of a label of `chars` characters
pub fn estimate_label_width(chars: usize, font_size: f64) -> f64 {
    chars as f64 * font_size * CHAR_WIDTH_RATIO
}

fn check_label(
    tier: usize,
    preset: &BadgePreset,
    font_size: f64,
    warnings: &mut Vec<LintWarning>,
) {
    if !preset.display_name {
        return;
    }
    // Unbounded names cannot be checked statically
    let Some(chars) = preset.name_length else {
        return;
    };
    let needed = preset.size + 3.0 * preset.side_padding + estimate_label_width(chars, font_size);
    if needed > preset.box_width {
        warnings.push(LintWarning {
            category: LintCategory::Label,
            tier,
            message: format!(
                "a {chars}-character name needs about {needed:.0}px but box_width is {}",
                preset.box_width
            ),
        });
    }
}

fn check_width(tier: usize, preset: &BadgePreset, width: f64, warnings: &mut Vec<LintWarning>) {
    if preset.box_width > width {
        warnings.push(LintWarning {
            category: LintCategory::Width,
            tier,
            message: format!(
                "box_width {} exceeds document width {width}; rows will overflow",
                preset.box_width
            ),
        });
    }
}
