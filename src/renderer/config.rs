//! Configuration for SVG rendering

/// Text color used when a preset does not set one
pub const DEFAULT_TEXT_COLOR: &str = "#777777";

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Whether to emit one fragment per line
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "sponsorkit-" for "sponsorkit-link")
    pub class_prefix: Option<String>,

    /// Font size of sponsor name labels
    pub label_font_size: f64,

    /// Height of the band a tier title occupies
    pub title_height: f64,

    /// Gap between a tier title and its grid
    pub title_gap: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            class_prefix: Some("sponsorkit-".to_string()),
            label_font_size: 14.0,
            title_height: 20.0,
            title_gap: 5.0,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    /// Prefixed class name, e.g. `class("link")` -> `sponsorkit-link`
    pub fn class(&self, name: &str) -> String {
        format!("{}{}", self.class_prefix.as_deref().unwrap_or_default(), name)
    }

    /// Stylesheet embedded when the caller does not supply one
    pub fn default_inline_css(&self) -> String {
        format!(
            r#"text {{
  font-weight: 300;
  font-size: {font_size}px;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
}}
.{link} {{
  cursor: pointer;
}}
.{title} {{
  font-weight: 500;
  font-size: 20px;
  fill: {color};
}}"#,
            font_size = self.label_font_size,
            link = self.class("link"),
            title = self.class("tier-title"),
            color = DEFAULT_TEXT_COLOR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("sponsorkit-".to_string()));
        assert_eq!(config.label_font_size, 14.0);
        assert_eq!(config.title_height, 20.0);
        assert_eq!(config.title_gap, 5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_pretty_print(false)
            .with_class_prefix("sk-")
            .with_label_font_size(12.0);

        assert!(!config.pretty_print);
        assert_eq!(config.class("link"), "sk-link");
        assert_eq!(config.label_font_size, 12.0);
    }

    #[test]
    fn test_class_without_prefix() {
        let config = SvgConfig::new().without_class_prefix();
        assert_eq!(config.class("avatar"), "avatar");
    }

    #[test]
    fn test_default_css_uses_prefix() {
        let css = SvgConfig::new().with_class_prefix("sk-").default_inline_css();
        assert!(css.contains(".sk-link"));
        assert!(css.contains(".sk-tier-title"));
        assert!(css.contains("font-size: 14px"));
    }
}
