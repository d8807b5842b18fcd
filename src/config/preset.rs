//! Badge presets: the rendering parameters shared by every sponsor in a tier

use serde::Deserialize;

/// Rendering parameters for one tier's sponsors, in pixels
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BadgePreset {
    /// Avatar edge length
    pub size: f64,
    pub box_width: f64,
    pub box_height: f64,
    #[serde(default)]
    pub display_name: bool,
    /// Horizontal padding inside a cell, left of the avatar and between avatar and label
    #[serde(default)]
    pub side_padding: f64,
    #[serde(default)]
    pub text_color: Option<String>,
    /// Hard limit on the rendered name, in characters
    #[serde(default)]
    pub name_length: Option<usize>,
    /// Extra CSS classes attached to each glyph group
    #[serde(default)]
    pub classes: Vec<String>,
}

impl BadgePreset {
    /// Create an avatar-only preset with no side padding
    pub fn new(size: f64, box_width: f64, box_height: f64) -> Self {
        Self {
            size,
            box_width,
            box_height,
            display_name: false,
            side_padding: 0.0,
            text_color: None,
            name_length: None,
            classes: vec![],
        }
    }

    /// Show the sponsor name, optionally truncated to `name_length` characters
    pub fn with_name(mut self, name_length: Option<usize>) -> Self {
        self.display_name = true;
        self.name_length = name_length;
        self
    }

    pub fn with_side_padding(mut self, padding: f64) -> Self {
        self.side_padding = padding;
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Width the avatar needs inside its box: `size + 2 * side_padding`
    pub fn min_box_width(&self) -> f64 {
        self.size + 2.0 * self.side_padding
    }

    /// A preset with a zero avatar size renders nothing for its tier
    pub fn is_hidden(&self) -> bool {
        self.size <= 0.0
    }

    /// Look up a built-in preset by name
    pub fn named(name: &str) -> Option<Self> {
        let preset = match name {
            "none" => Self::new(0.0, 0.0, 0.0),
            "xs" => Self::new(25.0, 30.0, 30.0).with_side_padding(2.5),
            "small" => Self::new(35.0, 40.0, 40.0).with_side_padding(2.5),
            "base" => Self::new(40.0, 48.0, 48.0).with_side_padding(4.0),
            "medium" => Self::new(50.0, 210.0, 60.0)
                .with_side_padding(5.0)
                .with_name(Some(16)),
            "large" => Self::new(70.0, 240.0, 90.0)
                .with_side_padding(10.0)
                .with_name(Some(16)),
            "xl" => Self::new(90.0, 300.0, 110.0)
                .with_side_padding(10.0)
                .with_name(Some(20)),
            _ => return None,
        };
        Some(preset)
    }

    /// Names accepted by [`BadgePreset::named`]
    pub fn names() -> &'static [&'static str] {
        &["none", "xs", "small", "base", "medium", "large", "xl"]
    }
}

impl Default for BadgePreset {
    fn default() -> Self {
        Self::new(40.0, 48.0, 48.0).with_side_padding(4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_preset_resolves() {
        for name in BadgePreset::names() {
            assert!(BadgePreset::named(name).is_some(), "missing preset {name}");
        }
        assert!(BadgePreset::named("huge").is_none());
    }

    #[test]
    fn test_named_presets_fit_their_boxes() {
        for name in BadgePreset::names() {
            let p = BadgePreset::named(name).unwrap();
            assert!(p.box_width >= p.min_box_width(), "{name} overlaps horizontally");
            assert!(p.box_height >= p.size, "{name} overlaps vertically");
        }
    }

    #[test]
    fn test_default_is_base() {
        assert_eq!(BadgePreset::default(), BadgePreset::named("base").unwrap());
    }

    #[test]
    fn test_none_is_hidden() {
        assert!(BadgePreset::named("none").unwrap().is_hidden());
        assert!(!BadgePreset::default().is_hidden());
    }

    #[test]
    fn test_deserialize_inline_preset() {
        let p: BadgePreset = toml::from_str(
            r#"
size = 60
box_width = 200
box_height = 80
display_name = true
name_length = 12
classes = ["gold"]
"#,
        )
        .unwrap();
        assert_eq!(p.size, 60.0);
        assert!(p.display_name);
        assert_eq!(p.side_padding, 0.0);
        assert_eq!(p.name_length, Some(12));
        assert_eq!(p.classes, vec!["gold".to_string()]);
    }
}
