//! Reply markup dialect
//!
//! Canned replies use a tiny dialect: `**bold**` spans, lines starting with
//! `• ` as list items (adjacent items form one list), blank lines as
//! paragraph breaks and single newlines as line breaks inside a paragraph.
//!
//! Text is parsed into a [`Document`] first. Rendering only wraps that
//! structure in presentation markup, so formatting never reorders content
//! and re-parsing the serialized form yields the same document.

use serde::Serialize;
use std::fmt::Write as _;
use std::sync::LazyLock;
use thiserror::Error;

/// Prefix that turns a line into a list item
pub const BULLET: &str = "• ";

static BOLD: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

/// Malformed markup. Canned replies are static, so this is a bug in the
/// rule table rather than something a caller recovers from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("unclosed bold marker on line {line}")]
    UnclosedBold { line: usize },
}

/// Inline content of a single line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Bold(String),
}

/// A run of lines inside one item or paragraph
pub type Line = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "lines", rename_all = "snake_case")]
pub enum Block {
    /// Consecutive non-bullet lines, rendered with line breaks between them
    Paragraph(Vec<Line>),
    /// Consecutive bullet lines, one entry per item
    List(Vec<Line>),
}

/// Parsed reply text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Serialize back into the markup dialect.
    pub fn to_markup(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(lines) => lines
                    .iter()
                    .map(|line| line_to_markup(line))
                    .collect::<Vec<_>>()
                    .join("\n"),
                Block::List(items) => items
                    .iter()
                    .map(|item| format!("{BULLET}{}", line_to_markup(item)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render as HTML. All text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(lines) => {
                    html.push_str("<p>");
                    for (i, line) in lines.iter().enumerate() {
                        if i > 0 {
                            html.push_str("<br>");
                        }
                        push_line_html(&mut html, line);
                    }
                    html.push_str("</p>");
                }
                Block::List(items) => {
                    html.push_str("<ul>");
                    for item in items {
                        html.push_str("<li>");
                        push_line_html(&mut html, item);
                        html.push_str("</li>");
                    }
                    html.push_str("</ul>");
                }
            }
        }
        html
    }

    /// Total number of list items across all lists
    pub fn list_item_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::List(items) => items.len(),
                Block::Paragraph(_) => 0,
            })
            .sum()
    }
}

/// Parse reply text into a document.
pub fn parse(text: &str) -> Result<Document, MarkupError> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;

        if raw.trim().is_empty() {
            blocks.extend(current.take());
            continue;
        }

        if let Some(item) = raw.strip_prefix(BULLET) {
            let inlines = parse_inlines(item, line_number)?;
            if let Some(Block::List(items)) = current.as_mut() {
                items.push(inlines);
            } else {
                blocks.extend(current.take());
                current = Some(Block::List(vec![inlines]));
            }
        } else {
            let inlines = parse_inlines(raw, line_number)?;
            if let Some(Block::Paragraph(lines)) = current.as_mut() {
                lines.push(inlines);
            } else {
                blocks.extend(current.take());
                current = Some(Block::Paragraph(vec![inlines]));
            }
        }
    }
    blocks.extend(current);

    Ok(Document { blocks })
}

/// Parse and render in one step.
pub fn render_html(text: &str) -> Result<String, MarkupError> {
    parse(text).map(|doc| doc.to_html())
}

/// Render text that must not be interpreted as markup (user input).
pub fn render_plain_html(text: &str) -> String {
    let mut html = String::from("<p>");
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            html.push_str("<br>");
        }
        push_escaped(&mut html, line);
    }
    html.push_str("</p>");
    html
}

fn parse_inlines(line: &str, line_number: usize) -> Result<Line, MarkupError> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(&mut inlines, line.get(last..whole.start()).unwrap_or_default());
        inlines.push(Inline::Bold(inner.as_str().to_string()));
        last = whole.end();
    }
    push_text(&mut inlines, line.get(last..).unwrap_or_default());

    let unclosed = inlines
        .iter()
        .any(|inline| matches!(inline, Inline::Text(text) if text.contains("**")));
    if unclosed {
        return Err(MarkupError::UnclosedBold { line: line_number });
    }

    Ok(inlines)
}

fn push_text(inlines: &mut Line, text: &str) {
    if !text.is_empty() {
        inlines.push(Inline::Text(text.to_string()));
    }
}

fn line_to_markup(line: &[Inline]) -> String {
    let mut out = String::new();
    for inline in line {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Bold(text) => {
                let _ = write!(out, "**{text}**");
            }
        }
    }
    out
}

fn push_line_html(html: &mut String, line: &[Inline]) {
    for inline in line {
        match inline {
            Inline::Text(text) => push_escaped(html, text),
            Inline::Bold(text) => {
                html.push_str("<strong>");
                push_escaped(html, text);
                html.push_str("</strong>");
            }
        }
    }
}

fn push_escaped(html: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            _ => html.push(c),
        }
    }
}
