//! Block-level rendering of a post body.
//!
//! Walks the body line by line and groups lines into blocks:
//!
//! - **Paragraphs**: consecutive non-blank lines, joined with single spaces.
//! - **Headings**: `#` to `######` followed by a space. The first level-1
//!   heading is taken as the post's implicit title and is not emitted; any
//!   later level-1 heading renders as a normal `<h1>`.
//! - **Lists**: lines starting with `- ` become `<li>` items of one `<ul>`.
//!
//! A blank line ends the current paragraph and closes any open list. Block
//! text is passed through [`render_inline`].
//!
//! Besides the HTML fragment, the renderer reports the plain text of the
//! first paragraph (for excerpts) and the implicit title.

use crate::inline::{render_inline, strip_markup};

const BLOCK_INDENT: &str = "      ";
const MAX_HEADING_LEVEL: usize = 6;

/// Result of rendering a post body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    /// HTML fragment of block elements, already escaped.
    pub html: String,
    /// Markup-stripped text of the first paragraph, empty if none.
    pub first_paragraph: String,
    /// Markup-stripped text of the first level-1 heading.
    pub implicit_title: Option<String>,
}

/// Render a post body into block HTML.
pub fn render_block(body: &str) -> RenderedBlock {
    let mut html = String::with_capacity(body.len() * 2);
    let mut paragraph: Vec<&str> = Vec::new();
    let mut first_paragraph: Option<String> = None;
    let mut implicit_title: Option<String> = None;
    let mut in_list = false;

    for line in body.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut html, &mut paragraph, &mut first_paragraph);
            close_list(&mut html, &mut in_list);
            continue;
        }

        if let Some(level) = heading_level(trimmed) {
            flush_paragraph(&mut html, &mut paragraph, &mut first_paragraph);
            close_list(&mut html, &mut in_list);
            let text = trimmed[level..].trim();
            if level == 1 && implicit_title.is_none() {
                implicit_title = Some(strip_markup(text).trim().to_string());
                continue;
            }
            html.push_str(&format!(
                "{BLOCK_INDENT}<h{level}>{}</h{level}>\n",
                render_inline(text)
            ));
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            flush_paragraph(&mut html, &mut paragraph, &mut first_paragraph);
            if !in_list {
                html.push_str(BLOCK_INDENT);
                html.push_str("<ul>\n");
                in_list = true;
            }
            html.push_str(BLOCK_INDENT);
            html.push_str("  <li>");
            html.push_str(&render_inline(item.trim()));
            html.push_str("</li>\n");
            continue;
        }

        paragraph.push(trimmed);
    }

    flush_paragraph(&mut html, &mut paragraph, &mut first_paragraph);
    close_list(&mut html, &mut in_list);

    RenderedBlock {
        html,
        first_paragraph: first_paragraph
            .map(|p| p.trim().to_string())
            .unwrap_or_default(),
        implicit_title,
    }
}

/// Heading level of a trimmed line: 1-6 `#` followed by a space.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    (line.as_bytes().get(level) == Some(&b' ')).then_some(level)
}

fn flush_paragraph(html: &mut String, lines: &mut Vec<&str>, first: &mut Option<String>) {
    if lines.is_empty() {
        return;
    }
    let raw = lines.join(" ");
    lines.clear();
    if first.is_none() {
        *first = Some(strip_markup(&raw));
    }
    html.push_str(BLOCK_INDENT);
    html.push_str("<p>");
    html.push_str(&render_inline(&raw));
    html.push_str("</p>\n");
}

fn close_list(html: &mut String, in_list: &mut bool) {
    if *in_list {
        html.push_str(BLOCK_INDENT);
        html.push_str("</ul>\n");
        *in_list = false;
    }
}
