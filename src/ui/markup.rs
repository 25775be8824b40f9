//! Inline color markup for the output pane.
//!
//! Lines are stored as plain strings carrying color tags:
//! - `[#rrggbb]` switches the foreground color,
//! - `[-]` restores the base style,
//! - `[[` is a literal `[`.
//!
//! Anything else between brackets is kept as literal text. Message content is
//! passed through [`escape`] before it is stored so it can never inject tags.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::utils::color::{color_to_hex, parse_hex_color};

pub const RESET: &str = "[-]";

/// Markup tag selecting `color`. Colors without a fixed RGB value fall back
/// to the base style.
pub fn tag(color: Color) -> String {
    match color_to_hex(color) {
        Some(hex) => format!("[{hex}]"),
        None => RESET.to_string(),
    }
}

pub fn escape(text: &str) -> String {
    text.replace('[', "[[")
}

fn resolve_tag(name: &str, base: Style, current: Style) -> Option<Style> {
    if name == "-" {
        return Some(base);
    }
    if name.starts_with('#') {
        return parse_hex_color(name).map(|color| current.fg(color));
    }
    None
}

/// Convert one markup line into styled spans on top of `base`.
pub fn parse_line(line: &str, base: Style) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style = base;
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        if let Some(stripped) = after.strip_prefix('[') {
            text.push('[');
            rest = stripped;
            continue;
        }

        let next_style = after
            .find(']')
            .and_then(|close| resolve_tag(&after[..close], base, style).map(|s| (close, s)));

        match next_style {
            Some((close, next)) => {
                if !text.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut text), style));
                }
                style = next;
                rest = &after[close + 1..];
            }
            None => {
                text.push('[');
                rest = after;
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

/// The visible text of a markup line.
pub fn strip(line: &str) -> String {
    parse_line(line, Style::default())
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}
