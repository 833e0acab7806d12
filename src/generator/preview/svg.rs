//! Vector stage: positions the layout tree and writes SVG markup.
//!
//! Boxes follow a reduced flexbox model: a row or column of children with
//! gaps, padding, `space-between` distribution, cross-axis alignment and
//! optional wrapping. Text is wrapped on word boundaries, measured with the
//! advances of the face it is drawn in.

use super::layout::{Align, BadgeStyle, BoxStyle, Color, Direction, Justify, Node, TextStyle};
use super::metrics::TextMetrics;

/// Baseline position within the em box, as a fraction of the font size
const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Size {
    w: f32,
    h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// Render the tree as a `width` x `height` SVG document
pub fn render(
    root: &Node,
    width: u32,
    height: u32,
    font_family: &str,
    metrics: &TextMetrics,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    ));
    out.push('\n');

    let mut painter = Painter {
        out: &mut out,
        font_family: escape(font_family),
        metrics,
    };
    painter.node(
        root,
        Rect {
            x: 0.0,
            y: 0.0,
            w: width as f32,
            h: height as f32,
        },
    );

    out.push_str("</svg>\n");
    out
}

/// Greedy word wrap; words longer than a line are split by character
fn wrap_lines(metrics: &TextMetrics, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    // Tolerate rounding when re-wrapping at a previously measured width
    let limit = max_width + 1e-3;
    let fits = |s: &str| metrics.width(s, font_size) <= limit;
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word;

        while !fits(word) && word.chars().count() > 1 {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            // longest prefix that fits, at least one character
            let mut used = 0.0;
            let mut cut = 0;
            for (i, c) in word.char_indices() {
                let advance = metrics.advance(c) * font_size;
                if cut > 0 && used + advance > limit {
                    break;
                }
                used += advance;
                cut = i + c.len_utf8();
            }
            lines.push(word[..cut].to_string());
            word = &word[cut..];
        }

        if line.is_empty() {
            line.push_str(word);
        } else if fits(&format!("{} {}", line, word)) {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn measure(metrics: &TextMetrics, node: &Node, max_width: f32) -> Size {
    match node {
        Node::Text { style, content } => {
            let lines = wrap_lines(metrics, content, style.font_size, max_width);
            let widest = lines
                .iter()
                .map(|l| metrics.width(l, style.font_size))
                .fold(0.0, f32::max);
            Size {
                w: widest.min(max_width),
                h: lines.len() as f32 * style.font_size * style.line_height,
            }
        }
        Node::Badge { style, label } => badge_size(metrics, style, label),
        Node::Container { style, children } => {
            let inner = (max_width - style.padding.horizontal()).max(0.0);
            let content = match style.direction {
                Direction::Column => {
                    let sizes: Vec<_> =
                        children.iter().map(|c| measure(metrics, c, inner)).collect();
                    Size {
                        w: sizes.iter().map(|s| s.w).fold(0.0, f32::max),
                        h: sizes.iter().map(|s| s.h).sum::<f32>() + total_gap(style, sizes.len()),
                    }
                }
                Direction::Row => {
                    let lines = row_lines(metrics, style, children, inner);
                    let w = lines.iter().map(|l| l.width).fold(0.0, f32::max);
                    let h = lines.iter().map(|l| l.height).sum::<f32>()
                        + style.gap * lines.len().saturating_sub(1) as f32;
                    Size { w, h }
                }
            };
            Size {
                w: content.w + style.padding.horizontal(),
                h: content.h + style.padding.vertical(),
            }
        }
    }
}

fn badge_size(metrics: &TextMetrics, style: &BadgeStyle, label: &str) -> Size {
    Size {
        w: metrics.width(label, style.text.font_size) + style.padding.horizontal(),
        h: style.text.font_size * style.text.line_height + style.padding.vertical(),
    }
}

fn total_gap(style: &BoxStyle, count: usize) -> f32 {
    style.gap * count.saturating_sub(1) as f32
}

/// One line of a row container
struct RowLine {
    items: Vec<(usize, Size)>,
    width: f32,
    height: f32,
}

/// Measure row children left to right, each against the space still free,
/// breaking into new lines when wrapping is enabled
fn row_lines(
    metrics: &TextMetrics,
    style: &BoxStyle,
    children: &[Node],
    inner: f32,
) -> Vec<RowLine> {
    let mut lines = vec![RowLine {
        items: Vec::new(),
        width: 0.0,
        height: 0.0,
    }];

    for (i, child) in children.iter().enumerate() {
        let (empty, used) = lines
            .last()
            .map(|l| (l.items.is_empty(), l.width))
            .unwrap_or((true, 0.0));
        let offset = if empty { 0.0 } else { used + style.gap };
        let size = measure(metrics, child, (inner - offset).max(0.0));

        let size = if style.wrap && !empty && offset + size.w > inner {
            lines.push(RowLine {
                items: Vec::new(),
                width: 0.0,
                height: 0.0,
            });
            measure(metrics, child, inner)
        } else {
            size
        };

        if let Some(current) = lines.last_mut() {
            if !current.items.is_empty() {
                current.width += style.gap;
            }
            current.width += size.w;
            current.height = current.height.max(size.h);
            current.items.push((i, size));
        }
    }

    lines
}

/// Spacing between consecutive items along the main axis
fn main_axis_spacing(style: &BoxStyle, free: f32, count: usize) -> f32 {
    match style.justify {
        Justify::SpaceBetween if count > 1 => style.gap + free.max(0.0) / (count - 1) as f32,
        _ => style.gap,
    }
}

fn cross_offset(align: Align, available: f32, size: f32) -> f32 {
    match align {
        Align::Start => 0.0,
        Align::Center => (available - size) / 2.0,
        Align::End => available - size,
    }
}

/// Whether a child fills the cross axis of a column
fn stretches(node: &Node) -> bool {
    !matches!(node, Node::Badge { .. })
}

struct Painter<'a> {
    out: &'a mut String,
    font_family: String,
    metrics: &'a TextMetrics,
}

impl Painter<'_> {
    fn node(&mut self, node: &Node, rect: Rect) {
        match node {
            Node::Container { style, children } => self.container(style, children, rect),
            Node::Text { style, content } => self.text(style, content, rect),
            Node::Badge { style, label } => self.badge(style, label, rect),
        }
    }

    fn container(&mut self, style: &BoxStyle, children: &[Node], rect: Rect) {
        if let Some(background) = style.background {
            self.rect(rect, background, 0.0);
        }

        let inner = Rect {
            x: rect.x + style.padding.left,
            y: rect.y + style.padding.top,
            w: (rect.w - style.padding.horizontal()).max(0.0),
            h: (rect.h - style.padding.vertical()).max(0.0),
        };

        match style.direction {
            Direction::Column => self.column(style, children, inner),
            Direction::Row => self.row(style, children, inner),
        }
    }

    fn column(&mut self, style: &BoxStyle, children: &[Node], inner: Rect) {
        let sizes: Vec<_> = children
            .iter()
            .map(|c| measure(self.metrics, c, inner.w))
            .collect();
        let used = sizes.iter().map(|s| s.h).sum::<f32>() + total_gap(style, sizes.len());
        let spacing = main_axis_spacing(style, inner.h - used, sizes.len());

        let mut y = inner.y;
        for (child, size) in children.iter().zip(&sizes) {
            let (x, w) = if style.align == Align::Start && stretches(child) {
                (inner.x, inner.w)
            } else {
                (inner.x + cross_offset(style.align, inner.w, size.w), size.w)
            };
            self.node(child, Rect { x, y, w, h: size.h });
            y += size.h + spacing;
        }
    }

    fn row(&mut self, style: &BoxStyle, children: &[Node], inner: Rect) {
        let lines = row_lines(self.metrics, style, children, inner.w);

        // A single line aligns within the whole box; wrapped lines stack from the top
        let single = lines.len() == 1;
        let mut y = inner.y;
        for line in &lines {
            let line_height = if single { inner.h.max(line.height) } else { line.height };
            let spacing = main_axis_spacing(style, inner.w - line.width, line.items.len());
            let mut x = inner.x;
            for &(i, size) in &line.items {
                let offset = cross_offset(style.align, line_height, size.h);
                self.node(
                    &children[i],
                    Rect {
                        x,
                        y: y + offset,
                        w: size.w,
                        h: size.h,
                    },
                );
                x += size.w + spacing;
            }
            y += line.height + style.gap;
        }
    }

    fn text(&mut self, style: &TextStyle, content: &str, rect: Rect) {
        let line_box = style.font_size * style.line_height;
        let lines = wrap_lines(self.metrics, content, style.font_size, rect.w);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = rect.y
                + i as f32 * line_box
                + (line_box - style.font_size) / 2.0
                + style.font_size * ASCENT;
            self.glyphs(line, rect.x, baseline, style);
        }
    }

    fn badge(&mut self, style: &BadgeStyle, label: &str, rect: Rect) {
        let radius = style.radius.min(rect.h / 2.0);
        self.rect(rect, style.background, radius);

        let text = &style.text;
        let line_box = text.font_size * text.line_height;
        let baseline = rect.y
            + style.padding.top
            + (line_box - text.font_size) / 2.0
            + text.font_size * ASCENT;
        self.glyphs(label, rect.x + style.padding.left, baseline, text);
    }

    fn rect(&mut self, rect: Rect, fill: Color, radius: f32) {
        self.out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            num(rect.x),
            num(rect.y),
            num(rect.w),
            num(rect.h)
        ));
        if radius > 0.0 {
            self.out.push_str(&format!(r#" rx="{}""#, num(radius)));
        }
        self.out.push_str(&paint(fill));
        self.out.push_str("/>\n");
    }

    fn glyphs(&mut self, text: &str, x: f32, baseline: f32, style: &TextStyle) {
        self.out.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="700""#,
            num(x),
            num(baseline),
            self.font_family,
            num(style.font_size)
        ));
        self.out.push_str(&paint(style.color));
        self.out.push_str(&format!(">{}</text>\n", escape(text)));
    }
}

fn paint(color: Color) -> String {
    if color.is_opaque() {
        format!(r#" fill="{}""#, color.hex())
    } else {
        format!(r#" fill="{}" fill-opacity="{}""#, color.hex(), num(color.a))
    }
}

/// Numbers rounded to two decimals without trailing zeros
fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
