//! Diagram rendering — automation lists to self-contained markup.
//!
//! Two renderers share the same input: [`cards`](cards::render) produces
//! HTML cards, [`flowchart`](flowchart::render) produces an SVG flowchart.
//! Both escape every user-controlled string.

pub mod cards;
pub mod flowchart;

use serde::Deserialize;

/// Which renderer fills which envelope field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// HTML cards in the `html` envelope field.
    #[default]
    Cards,
    /// SVG flowchart in the `svg` envelope field.
    Flowchart,
}

/// Escape text for inclusion in HTML or SVG markup.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
