//! Layout tree of the preview card
//!
//! A pure function of a [`PreviewCard`] builds a small tree of styled
//! boxes, text runs and badges. Nothing here knows about SVG; see
//! [`super::svg`] for the vector stage.

use std::borrow::Cow;

use super::PreviewCard;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

/// Descriptions longer than this many characters are cut and suffixed with `...`
pub const DESCRIPTION_LIMIT: usize = 120;

/// At most this many tech stack pills are shown
pub const MAX_TECH_TAGS: usize = 5;

pub const FOOTER_MARK: &str = ">_ Project Journal";

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, alpha excluded
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

pub const BACKGROUND: Color = Color::rgb(0x0f, 0x17, 0x2a);
pub const TITLE_COLOR: Color = Color::rgb(0xf1, 0xf5, 0xf9);
pub const DESCRIPTION_COLOR: Color = Color::rgb(0x94, 0xa3, 0xb8);
pub const FOOTER_COLOR: Color = Color::rgb(0x64, 0x74, 0x8b);
pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
pub const PILL_TEXT: Color = Color::rgb(0x8b, 0x5c, 0xf6);
pub const PILL_BACKGROUND: Color = Color::rgba(109, 40, 217, 0.2);

pub const STATUS_COMPLETE: Color = Color::rgb(0x10, 0xb9, 0x81);
pub const STATUS_IN_PROGRESS: Color = Color::rgb(0xf5, 0x9e, 0x0b);
pub const STATUS_ABANDONED: Color = Color::rgb(0xef, 0x44, 0x44);
pub const STATUS_FALLBACK: Color = Color::rgb(0x6d, 0x28, 0xd9);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

/// Main-axis distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    SpaceBetween,
}

/// Cross-axis alignment; `Start` stretches boxes and text to the full width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxStyle {
    pub direction: Direction,
    pub justify: Justify,
    pub align: Align,
    pub gap: f32,
    pub padding: Edges,
    pub background: Option<Color>,
    pub wrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    pub line_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeStyle {
    pub text: TextStyle,
    pub background: Color,
    pub padding: Edges,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Container { style: BoxStyle, children: Vec<Node> },
    Text { style: TextStyle, content: String },
    Badge { style: BadgeStyle, label: String },
}

impl Node {
    /// Every badge in document order
    pub fn badges(&self) -> Vec<(&str, &BadgeStyle)> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if let Node::Badge { style, label } = node {
                found.push((label.as_str(), style));
            }
        });
        found
    }

    /// Every text run in document order
    pub fn texts(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if let Node::Text { content, .. } = node {
                found.push(content.as_str());
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        if let Node::Container { children, .. } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }
}

/// Badge color for a status; unknown values get the fallback color
pub fn status_color(status: &str) -> Color {
    match status {
        "complete" => STATUS_COMPLETE,
        "in-progress" => STATUS_IN_PROGRESS,
        "abandoned" => STATUS_ABANDONED,
        _ => STATUS_FALLBACK,
    }
}

/// Status with its first character upper-cased, e.g. `In-progress`
pub fn status_label(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut to [`DESCRIPTION_LIMIT`] characters plus `...`; shorter text is untouched
pub fn truncate_description(description: &str) -> Cow<'_, str> {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &description[..cut])),
        None => Cow::Borrowed(description),
    }
}

fn text(content: impl Into<String>, font_size: f32, color: Color, line_height: f32) -> Node {
    Node::Text {
        style: TextStyle {
            font_size,
            color,
            line_height,
        },
        content: content.into(),
    }
}

fn status_badge(status: &str) -> Node {
    Node::Badge {
        style: BadgeStyle {
            text: TextStyle {
                font_size: 20.0,
                color: WHITE,
                line_height: 1.2,
            },
            background: status_color(status),
            padding: Edges::symmetric(4.0, 16.0),
            radius: 9999.0,
        },
        label: status_label(status),
    }
}

fn tech_pill(tech: &str) -> Node {
    Node::Badge {
        style: BadgeStyle {
            text: TextStyle {
                font_size: 18.0,
                color: PILL_TEXT,
                line_height: 1.2,
            },
            background: PILL_BACKGROUND,
            padding: Edges::symmetric(6.0, 14.0),
            radius: 8.0,
        },
        label: tech.to_string(),
    }
}

/// Build the card layout
pub fn build(card: &PreviewCard<'_>) -> Node {
    let header = Node::Container {
        style: BoxStyle {
            direction: Direction::Column,
            gap: 20.0,
            ..Default::default()
        },
        children: vec![
            Node::Container {
                style: BoxStyle {
                    direction: Direction::Row,
                    align: Align::Center,
                    gap: 12.0,
                    ..Default::default()
                },
                children: vec![status_badge(card.status)],
            },
            text(card.title, 52.0, TITLE_COLOR, 1.2),
            text(
                truncate_description(card.description),
                24.0,
                DESCRIPTION_COLOR,
                1.4,
            ),
        ],
    };

    let tech_row = Node::Container {
        style: BoxStyle {
            direction: Direction::Row,
            gap: 8.0,
            wrap: true,
            ..Default::default()
        },
        children: card
            .tech_stack
            .iter()
            .take(MAX_TECH_TAGS)
            .map(|tech| tech_pill(tech))
            .collect(),
    };

    let footer = Node::Container {
        style: BoxStyle {
            direction: Direction::Row,
            justify: Justify::SpaceBetween,
            align: Align::End,
            ..Default::default()
        },
        children: vec![tech_row, text(FOOTER_MARK, 20.0, FOOTER_COLOR, 1.2)],
    };

    Node::Container {
        style: BoxStyle {
            direction: Direction::Column,
            justify: Justify::SpaceBetween,
            padding: Edges::all(60.0),
            background: Some(BACKGROUND),
            ..Default::default()
        },
        children: vec![header, footer],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::chars;

    fn card<'a>(description: &'a str, status: &'a str, tech: &'a [String]) -> PreviewCard<'a> {
        PreviewCard {
            title: "X",
            description,
            status,
            tech_stack: tech,
        }
    }

    fn tech(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("tech-{}", i)).collect()
    }

    #[test]
    fn test_truncate_boundaries() {
        assert_eq!(truncate_description(&chars(119)), chars(119));
        assert_eq!(truncate_description(&chars(120)), chars(120));
        let input = chars(121);
        let long = truncate_description(&input);
        assert_eq!(long, format!("{}...", chars(120)));
        assert_eq!(long.chars().count(), 123);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let accented: String = "é".repeat(130);
        let cut = truncate_description(&accented);
        assert_eq!(cut, format!("{}...", "é".repeat(120)));
    }

    #[test]
    fn test_status_palette() {
        assert_eq!(status_color("complete"), STATUS_COMPLETE);
        assert_eq!(status_color("in-progress"), STATUS_IN_PROGRESS);
        assert_eq!(status_color("abandoned"), STATUS_ABANDONED);
        assert_eq!(status_color("on-hold"), STATUS_FALLBACK);
        assert_eq!(status_color(""), STATUS_FALLBACK);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label("complete"), "Complete");
        assert_eq!(status_label("in-progress"), "In-progress");
        assert_eq!(status_label(""), "");
    }

    #[test]
    fn test_tech_tags_capped() {
        let stack = tech(8);
        let tree = build(&card("d", "complete", &stack));
        let pills: Vec<_> = tree.badges().into_iter().skip(1).map(|(l, _)| l).collect();
        assert_eq!(pills, vec!["tech-0", "tech-1", "tech-2", "tech-3", "tech-4"]);
    }

    #[test]
    fn test_empty_tech_stack() {
        let tree = build(&card("d", "complete", &[]));
        assert_eq!(tree.badges().len(), 1);
    }

    #[test]
    fn test_unknown_status_uses_fallback() {
        let tree = build(&card("d", "paused", &[]));
        let (label, style) = tree.badges()[0];
        assert_eq!(label, "Paused");
        assert_eq!(style.background, STATUS_FALLBACK);
    }

    #[test]
    fn test_end_to_end_card() {
        let description = chars(130);
        let stack: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tree = build(&card(&description, "complete", &stack));

        let badges = tree.badges();
        assert_eq!(badges[0].0, "Complete");
        assert_eq!(badges[0].1.background, STATUS_COMPLETE);
        let pills: Vec<_> = badges[1..].iter().map(|(l, _)| *l).collect();
        assert_eq!(pills, vec!["a", "b", "c", "d", "e"]);

        let texts = tree.texts();
        assert_eq!(texts[0], "X");
        assert!(texts[1].ends_with("..."));
        assert_eq!(texts[2], FOOTER_MARK);
    }

    #[test]
    fn test_title_not_truncated() {
        let title = chars(300);
        let tree = build(&PreviewCard {
            title: &title,
            description: "d",
            status: "complete",
            tech_stack: &[],
        });
        assert_eq!(tree.texts()[0], title);
    }
}
