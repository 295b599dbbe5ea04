//! Text transforms for reading content.
//!
//! Reading text arrives from the data store as plain text with a small
//! markdown subset: blank lines separate paragraphs, `**x**` is strong and
//! `*x*` is emphasis. Anything else is treated as literal text and escaped.
//! Longer-form copy that ships with the binary (static pages, book blurbs)
//! goes through `pulldown-cmark` in [`crate::render`] instead.

use maud::{Markup, PreEscaped, html};
use regex::Regex;
use std::sync::LazyLock;

/// Character budget for `<meta name="description">`.
pub const META_DESCRIPTION_MAX: usize = 155;

const ELLIPSIS: char = '…';

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").expect("valid regex"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("valid regex"));
/// `body (Source, p. 12)` or `body (Source, p. 12-14)` at the very end.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("valid regex"));
static ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*?)\s*\(([^()]+?),\s*p\.\s*(\d+(?:\s*[-–]\s*\d+)?)\)\s*$")
        .expect("valid regex")
});

/// Split on blank lines. Escaped `\\n\\n` sequences that survived a JSON
/// round-trip count as blank lines too.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace("\\n\\n", "\n\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Escape `text` for HTML, then apply `**strong**` and `*em*`.
///
/// Operates on a single paragraph; markers never pair across a newline.
pub fn inline_markdown(text: &str) -> String {
    let escaped = html! { (text) }.into_string();
    let strong = STRONG.replace_all(&escaped, "<strong>$1</strong>");
    EMPHASIS.replace_all(&strong, "<em>$1</em>").into_owned()
}

/// Render text as a sequence of `<p>` blocks.
pub fn paragraphs(text: &str) -> Markup {
    html! {
        @for para in split_paragraphs(text) {
            p { (PreEscaped(inline_markdown(&para))) }
        }
    }
}

/// A quote split into its body and trailing literature reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParts {
    pub body: String,
    /// Source title; empty when the quote has no attribution.
    pub attribution: String,
    /// Page or page range, e.g. `"42"` or `"42-43"`.
    pub pages: String,
}

impl QuoteParts {
    /// `"Book Title, p. 42"`, or empty.
    pub fn citation(&self) -> String {
        if self.attribution.is_empty() {
            String::new()
        } else {
            format!("{}, p. {}", self.attribution, self.pages)
        }
    }
}

pub fn parse_quote(raw: &str) -> QuoteParts {
    let raw = raw.trim();
    match ATTRIBUTION.captures(raw) {
        Some(caps) => QuoteParts {
            body: caps[1].trim().to_string(),
            attribution: caps[2].trim().to_string(),
            pages: caps[3].split_whitespace().collect(),
        },
        None => QuoteParts {
            body: raw.to_string(),
            attribution: String::new(),
            pages: String::new(),
        },
    }
}

/// Render a quote as an emphasized blockquote with an optional citation.
pub fn quote_block(raw: &str) -> Markup {
    let quote = parse_quote(raw);
    html! {
        blockquote.quote {
            p { em { (PreEscaped(inline_markdown(&quote.body))) } }
            @if !quote.attribution.is_empty() {
                footer { cite { (quote.citation()) } }
            }
        }
    }
}

/// Drop HTML tags and markdown emphasis markers, collapse whitespace.
///
/// Only `<` followed by a letter or `/` opens a tag, so prose like `I <3`
/// survives intact.
pub fn strip_markup(text: &str) -> String {
    let unescaped = text.replace("\\n", " ");
    let untagged = HTML_TAG.replace_all(&unescaped, " ");
    let plain: String = untagged.chars().filter(|c| !matches!(c, '*' | '#')).collect();
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max` characters, ellipsis included, at the last
/// whitespace before the limit. Text that already fits is returned as is.
///
/// A single word longer than the budget is the one case that gets cut
/// mid-word, since there is no boundary to fall back to.
pub fn truncate_at_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(1);
    let cut = text
        .char_indices()
        .nth(budget)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (head, rest) = text.split_at(cut);
    let head = if rest.starts_with(char::is_whitespace) {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(ws) => &head[..ws],
            None => head,
        }
    };
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':'));
    format!("{head}{ELLIPSIS}")
}

/// Plain-text description for `<meta>` tags.
pub fn meta_description(text: &str) -> String {
    truncate_at_word(&strip_markup(text), META_DESCRIPTION_MAX)
}
