//! Inline markup rendering.
//!
//! Converts one paragraph, heading, or list item of text into escaped HTML:
//!
//! | Source | Output |
//! |--------|--------|
//! | `**text**` | `<strong>text</strong>` |
//! | `*text*`, `_text_` | `<em>text</em>` |
//! | `` `text` `` | `<code>text</code>` |
//! | `[text](url)` | `<a href="url">text</a>` |
//!
//! ## Span matching
//!
//! Markers toggle spans by *kind* using a stack: a marker closes the
//! innermost open span if it is the same kind, otherwise it opens a new one.
//! `*` and `_` are the same kind, so `*word_` is a complete emphasis span.
//! Spans still open at the end of input are closed innermost-first, so the
//! output is always well-formed even when the source is not.
//!
//! Link text is rendered recursively; the URL is never interpreted as
//! markup. An opening `[` that does not complete the `[text](url)` shape is
//! literal text.

/// An inline span kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Strong,
    Emphasis,
    Code,
}

impl Span {
    fn open_tag(self) -> &'static str {
        match self {
            Span::Strong => "<strong>",
            Span::Emphasis => "<em>",
            Span::Code => "<code>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Span::Strong => "</strong>",
            Span::Emphasis => "</em>",
            Span::Code => "</code>",
        }
    }
}

/// Outcome of trying to read a `[text](url)` link at the scan position.
#[derive(Debug, PartialEq)]
enum LinkMatch {
    Matched { consumed: usize, html: String },
    NoMatch,
}

/// Render inline markup in `text` to HTML. All literal text is escaped.
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut stack: Vec<Span> = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if rest.starts_with("**") {
            toggle(&mut stack, &mut out, Span::Strong);
            pos += 2;
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        match c {
            '*' | '_' => toggle(&mut stack, &mut out, Span::Emphasis),
            '`' => toggle(&mut stack, &mut out, Span::Code),
            '[' => match match_link(rest) {
                LinkMatch::Matched { consumed, html } => {
                    out.push_str(&html);
                    pos += consumed;
                    continue;
                }
                LinkMatch::NoMatch => push_escaped(&mut out, c),
            },
            _ => push_escaped(&mut out, c),
        }
        pos += c.len_utf8();
    }

    while let Some(span) = stack.pop() {
        out.push_str(span.close_tag());
    }
    out
}

fn toggle(stack: &mut Vec<Span>, out: &mut String, span: Span) {
    if stack.last() == Some(&span) {
        stack.pop();
        out.push_str(span.close_tag());
    } else {
        stack.push(span);
        out.push_str(span.open_tag());
    }
}

/// Try to read `[text](url)` from the start of `rest`, which begins with `[`.
///
/// The first `]` ends the text and must be followed directly by `(`; the
/// first `)` after that ends the url.
fn match_link(rest: &str) -> LinkMatch {
    let Some(text_end) = rest.find(']') else {
        return LinkMatch::NoMatch;
    };
    let Some(after_text) = rest[text_end + 1..].strip_prefix('(') else {
        return LinkMatch::NoMatch;
    };
    let Some(url_len) = after_text.find(')') else {
        return LinkMatch::NoMatch;
    };

    let label = &rest[1..text_end];
    let url = &after_text[..url_len];
    let html = format!(
        "<a href=\"{}\">{}</a>",
        escape_attribute(url),
        render_inline(label)
    );
    LinkMatch::Matched {
        // "[" label "](" url ")"
        consumed: text_end + 2 + url_len + 1,
        html,
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&#34;"),
        _ => out.push(c),
    }
}

/// Escape `&`, `<`, `>` and `"` for use in HTML text.
pub fn escape_text(s: &str) -> String {
    if !s.contains(['&', '<', '>', '"']) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Escape a value for a double- or single-quoted HTML attribute.
pub fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => out.push_str("&#39;"),
            _ => push_escaped(&mut out, c),
        }
    }
    out
}

/// Remove markup characters (`*`, `_`, `` ` ``) literally, without parsing.
///
/// Used for plain-text titles and excerpts. Link syntax is left as-is.
pub fn strip_markup(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '*' | '_' | '`')).collect()
}
