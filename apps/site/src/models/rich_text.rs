//! Block-tree rich text as stored by the content system.
//!
//! Renderers match every variant; node kinds the site does not know about
//! decode to `Unsupported` and render as nothing. Lists may nest: a list's
//! children are items or further lists.

use serde::{Deserialize, Serialize};

use crate::models::null_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph {
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<Inline>,
    },
    Heading {
        level: u8,
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<Inline>,
    },
    List {
        format: ListFormat,
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<ListNode>,
    },
    Quote {
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<Inline>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ListNode {
    ListItem {
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<Inline>,
    },
    List {
        format: ListFormat,
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<ListNode>,
    },
    #[serde(other)]
    Unsupported,
}

impl ListNode {
    pub fn item(children: Vec<Inline>) -> Self {
        ListNode::ListItem { children }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, deserialize_with = "null_default")]
        bold: bool,
        #[serde(default, deserialize_with = "null_default")]
        italic: bool,
        #[serde(default, deserialize_with = "null_default")]
        underline: bool,
        #[serde(default, deserialize_with = "null_default")]
        strikethrough: bool,
        #[serde(default, deserialize_with = "null_default")]
        code: bool,
    },
    Link {
        url: String,
        #[serde(default, deserialize_with = "null_default")]
        children: Vec<Inline>,
    },
    #[serde(other)]
    Unsupported,
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            code: false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Plain text
// ────────────────────────────────────────────────────────────────────────────

/// Flattens blocks into plain text, one blank line between blocks.
pub fn to_plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(block_plain_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_plain_text(block: &Block) -> Option<String> {
    match block {
        Block::Paragraph { children } | Block::Heading { children, .. } | Block::Quote { children } => {
            Some(inlines_plain_text(children))
        }
        Block::List { format, children } => {
            let mut lines = Vec::new();
            list_lines(*format, children, 0, &mut lines);
            Some(lines.join("\n"))
        }
        Block::Unsupported => None,
    }
}

/// One line per item, nested lists indented two spaces per level.
/// Ordered numbering counts items only.
fn list_lines(format: ListFormat, nodes: &[ListNode], depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let mut number = 0;
    for node in nodes {
        match node {
            ListNode::ListItem { children } => {
                number += 1;
                let marker = match format {
                    ListFormat::Ordered => format!("{number}."),
                    ListFormat::Unordered => "-".to_string(),
                };
                lines.push(format!("{indent}{marker} {}", inlines_plain_text(children)));
            }
            ListNode::List { format, children } => list_lines(*format, children, depth + 1, lines),
            ListNode::Unsupported => {}
        }
    }
}

fn inlines_plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text { text, .. } => text.clone(),
            Inline::Link { children, .. } => inlines_plain_text(children),
            Inline::Unsupported => String::new(),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// HTML
// ────────────────────────────────────────────────────────────────────────────

pub fn to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Paragraph { children } => {
                out.push_str("<p>");
                push_inlines(&mut out, children);
                out.push_str("</p>");
            }
            Block::Heading { level, children } => {
                let level = (*level).clamp(1, 6);
                out.push_str(&format!("<h{level}>"));
                push_inlines(&mut out, children);
                out.push_str(&format!("</h{level}>"));
            }
            Block::List { format, children } => push_list(&mut out, *format, children),
            Block::Quote { children } => {
                out.push_str("<blockquote>");
                push_inlines(&mut out, children);
                out.push_str("</blockquote>");
            }
            Block::Unsupported => {}
        }
    }
    out
}

/// A nested list goes inside the preceding `<li>`, or its own `<li>` when it
/// comes first.
fn push_list(out: &mut String, format: ListFormat, nodes: &[ListNode]) {
    let tag = match format {
        ListFormat::Ordered => "ol",
        ListFormat::Unordered => "ul",
    };
    out.push_str(&format!("<{tag}>"));
    let mut item_open = false;
    for node in nodes {
        match node {
            ListNode::ListItem { children } => {
                if item_open {
                    out.push_str("</li>");
                }
                out.push_str("<li>");
                push_inlines(out, children);
                item_open = true;
            }
            ListNode::List { format, children } => {
                if !item_open {
                    out.push_str("<li>");
                    item_open = true;
                }
                push_list(out, *format, children);
            }
            ListNode::Unsupported => {}
        }
    }
    if item_open {
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
}

fn push_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text {
                text,
                bold,
                italic,
                underline,
                strikethrough,
                code,
            } => {
                let marks: Vec<&str> = [
                    (*bold, "strong"),
                    (*italic, "em"),
                    (*underline, "u"),
                    (*strikethrough, "s"),
                    (*code, "code"),
                ]
                .into_iter()
                .filter_map(|(on, tag)| on.then_some(tag))
                .collect();
                for tag in &marks {
                    out.push_str(&format!("<{tag}>"));
                }
                out.push_str(&escape_html(text));
                for tag in marks.iter().rev() {
                    out.push_str(&format!("</{tag}>"));
                }
            }
            Inline::Link { url, children } => {
                out.push_str(&format!("<a href=\"{}\">", escape_html(url)));
                push_inlines(out, children);
                out.push_str("</a>");
            }
            Inline::Unsupported => {}
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
