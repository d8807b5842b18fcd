//! Rendering of a single sponsor: avatar, optional name label, optional link

use crate::config::BadgePreset;
use crate::layout::{BoundingBox, Point};
use crate::model::Sponsor;

use super::config::DEFAULT_TEXT_COLOR;
use super::svg::escape_xml;
use super::SvgConfig;

/// Markup for one sponsor plus the cell it occupies
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub markup: String,
    pub bounds: BoundingBox,
}

/// Cut `name` to at most `limit` characters (Unicode scalar values), without an ellipsis
pub fn truncate_name(name: &str, limit: Option<usize>) -> &str {
    match limit {
        Some(limit) => match name.char_indices().nth(limit) {
            Some((end, _)) => &name[..end],
            None => name,
        },
        None => name,
    }
}

/// Render `sponsor` into the cell whose top-left corner is `origin`
///
/// The avatar sits `side_padding` from the left edge, vertically centered in
/// the box. The label, when enabled, starts `side_padding` right of the avatar.
pub fn render_glyph(
    sponsor: &Sponsor,
    origin: Point,
    preset: &BadgePreset,
    config: &SvgConfig,
) -> Glyph {
    let group_classes = std::iter::once(config.class("sponsor"))
        .chain(preset.classes.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");

    let mut markup = String::new();
    if let Some(url) = &sponsor.link_url {
        markup.push_str(&format!(
            r#"<a class="{}" href="{}" target="_blank" rel="noopener">"#,
            config.class("link"),
            escape_xml(url)
        ));
    }

    markup.push_str(&format!(
        r#"<g class="{}" transform="translate({} {})">"#,
        escape_xml(&group_classes),
        origin.x,
        origin.y
    ));

    let avatar_y = (preset.box_height - preset.size) / 2.0;
    markup.push_str(&format!(
        r#"<image class="{}" x="{}" y="{}" width="{}" height="{}" href="{}" preserveAspectRatio="xMidYMid slice"/>"#,
        config.class("avatar"),
        preset.side_padding,
        avatar_y,
        preset.size,
        preset.size,
        escape_xml(&sponsor.avatar_url)
    ));

    if preset.display_name {
        let name = truncate_name(&sponsor.name, preset.name_length);
        let color = preset.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR);
        markup.push_str(&format!(
            r#"<text class="{}" x="{}" y="{}" dominant-baseline="middle" font-size="{}" fill="{}">{}</text>"#,
            config.class("name"),
            preset.side_padding + preset.size + preset.side_padding,
            preset.box_height / 2.0,
            config.label_font_size,
            escape_xml(color),
            escape_xml(name)
        ));
    }

    markup.push_str("</g>");
    if sponsor.link_url.is_some() {
        markup.push_str("</a>");
    }

    Glyph {
        markup,
        bounds: BoundingBox::at(origin, preset.box_width, preset.box_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sponsor(name: &str) -> Sponsor {
        Sponsor::user("login", name, "https://avatars.example/u/1")
    }

    fn named_preset(limit: Option<usize>) -> BadgePreset {
        BadgePreset::new(40.0, 200.0, 50.0)
            .with_side_padding(5.0)
            .with_name(limit)
    }

    #[test]
    fn test_truncate_name_exact_length() {
        assert_eq!(truncate_name("Alexander", Some(4)), "Alex");
        assert_eq!(truncate_name("Alexander", Some(9)), "Alexander");
        assert_eq!(truncate_name("Alexander", Some(20)), "Alexander");
        assert_eq!(truncate_name("Alexander", Some(0)), "");
        assert_eq!(truncate_name("Alexander", None), "Alexander");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_name("Zoë Ångström", Some(5)), "Zoë Å");
        assert_eq!(truncate_name("日本語の名前", Some(3)), "日本語");
        assert_eq!(truncate_name("Zoë Ångström", Some(5)).chars().count(), 5);
    }

    #[test]
    fn test_plain_glyph_markup() {
        let glyph = render_glyph(
            &sponsor("Ada"),
            Point::new(10.0, 20.0),
            &named_preset(None),
            &SvgConfig::default(),
        );
        assert_eq!(
            glyph.markup,
            concat!(
                r#"<g class="sponsorkit-sponsor" transform="translate(10 20)">"#,
                r#"<image class="sponsorkit-avatar" x="5" y="5" width="40" height="40" href="https://avatars.example/u/1" preserveAspectRatio="xMidYMid slice"/>"#,
                "<text class=\"sponsorkit-name\" x=\"50\" y=\"25\" dominant-baseline=\"middle\" font-size=\"14\" fill=\"#777777\">Ada</text>",
                "</g>"
            )
        );
        assert_eq!(glyph.bounds, BoundingBox::new(10.0, 20.0, 200.0, 50.0));
    }

    #[test]
    fn test_link_wraps_group() {
        let linked = sponsor("Ada").with_link("https://ada.example/?a=1&b=2");
        let glyph = render_glyph(
            &linked,
            Point::new(0.0, 0.0),
            &named_preset(None),
            &SvgConfig::default(),
        );
        assert!(glyph.markup.starts_with(
            r#"<a class="sponsorkit-link" href="https://ada.example/?a=1&amp;b=2" target="_blank" rel="noopener"><g "#
        ));
        assert!(glyph.markup.ends_with("</g></a>"));
    }

    #[test]
    fn test_no_link_no_anchor() {
        let glyph = render_glyph(
            &sponsor("Ada"),
            Point::new(0.0, 0.0),
            &named_preset(None),
            &SvgConfig::default(),
        );
        assert!(!glyph.markup.contains("<a "));
        assert!(!glyph.markup.contains("</a>"));
    }

    #[test]
    fn test_display_name_false_emits_no_text() {
        let long_name = "A".repeat(500);
        let preset = BadgePreset::new(40.0, 48.0, 48.0);
        let glyph = render_glyph(
            &sponsor(&long_name),
            Point::new(0.0, 0.0),
            &preset,
            &SvgConfig::default(),
        );
        assert!(!glyph.markup.contains("<text"));
        assert!(!glyph.markup.contains(&long_name));
    }

    #[test]
    fn test_label_is_truncated_and_escaped() {
        let glyph = render_glyph(
            &sponsor("Tom & Jerry Productions"),
            Point::new(0.0, 0.0),
            &named_preset(Some(7)),
            &SvgConfig::default(),
        );
        assert!(glyph.markup.contains(">Tom &amp; J</text>"));
    }

    #[test]
    fn test_text_color_and_classes() {
        let preset = named_preset(None)
            .with_text_color("#ff0000")
            .with_class("gold")
            .with_class("featured");
        let glyph = render_glyph(
            &sponsor("Ada"),
            Point::new(0.0, 0.0),
            &preset,
            &SvgConfig::default(),
        );
        assert!(glyph.markup.contains(r#"class="sponsorkit-sponsor gold featured""#));
        assert!(glyph.markup.contains("fill=\"#ff0000\""));
    }
}
