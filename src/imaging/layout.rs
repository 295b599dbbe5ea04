//! Declarative card layout and its SVG serialisation.
//!
//! A card is three rows stacked on a 1200×630 canvas:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ DAYBOOK                                      │  header: site mark
//! │                                              │
//! │ FEBRUARY 29                                  │  body: date label,
//! │ Title, wrapped to two lines                  │        title,
//! │ "Quote body, truncated to 140 characters…"   │        quote,
//! │ Basic Text, p. 42                            │        citation
//! │                                              │
//! │ One day at a time.       daybook.example.org │  footer
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`card_layout`] decides *what* goes in each row; [`to_svg`] decides
//! where it lands. Keeping the two apart lets the layout be tested without
//! fonts or a rasterizer.

use crate::config::{ColorScheme, OgConfig, SiteInfo};
use crate::text;
use crate::types::Reading;
use maud::html;

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;
/// Character budget for the quote body on a card.
pub const CARD_QUOTE_MAX: usize = 140;

const MARGIN_X: u32 = 80;
const TITLE_WRAP: usize = 34;
const TITLE_LINES: usize = 2;
const QUOTE_WRAP: usize = 56;
const QUOTE_LINES: usize = 3;

/// Which of the three configured families a block uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Quote,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Text,
    Muted,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    End,
}

/// A run of pre-wrapped lines sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: FontRole,
    pub size: u32,
    pub line_height: u32,
    pub tone: Tone,
    pub italic: bool,
    pub align: Align,
}

impl TextBlock {
    fn new(lines: Vec<String>, font: FontRole, size: u32, tone: Tone) -> Self {
        Self {
            lines,
            font,
            size,
            line_height: size * 6 / 5,
            tone,
            italic: false,
            align: Align::Start,
        }
    }

    fn single(line: &str, font: FontRole, size: u32, tone: Tone) -> Self {
        Self::new(vec![line.to_string()], font, size, tone)
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn end(mut self) -> Self {
        self.align = Align::End;
        self
    }

    fn height(&self) -> u32 {
        self.line_height * self.lines.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub header: Vec<TextBlock>,
    pub body: Vec<TextBlock>,
    pub footer: Vec<TextBlock>,
}

fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut().filter(|l| !l.ends_with('…')) {
            last.push('…');
        }
    }
    lines
}

/// Build the card for one reading.
pub fn card_layout(reading: &Reading, site: &SiteInfo) -> CardLayout {
    let quote = text::parse_quote(&reading.quote);
    let quote_body = text::truncate_at_word(&text::strip_markup(&quote.body), CARD_QUOTE_MAX);

    let mut body = vec![
        TextBlock::single(
            &reading.date_label().to_uppercase(),
            FontRole::Label,
            26,
            Tone::Accent,
        ),
        TextBlock::new(
            wrap(reading.display_title(), TITLE_WRAP, TITLE_LINES),
            FontRole::Title,
            60,
            Tone::Text,
        ),
    ];
    if !quote_body.is_empty() {
        body.push(
            TextBlock::new(
                wrap(&format!("“{quote_body}”"), QUOTE_WRAP, QUOTE_LINES),
                FontRole::Quote,
                32,
                Tone::Text,
            )
            .italic(),
        );
        let citation = quote.citation();
        if !citation.is_empty() {
            body.push(TextBlock::single(&citation, FontRole::Label, 22, Tone::Muted));
        }
    }

    CardLayout {
        header: vec![TextBlock::single(
            &site.name.to_uppercase(),
            FontRole::Label,
            24,
            Tone::Accent,
        )],
        body,
        footer: vec![
            TextBlock::single(&site.tagline, FontRole::Quote, 24, Tone::Muted).italic(),
            TextBlock::single(&site.domain, FontRole::Label, 22, Tone::Muted).end(),
        ],
    }
}

fn family<'a>(fonts: &'a OgConfig, role: FontRole) -> &'a str {
    match role {
        FontRole::Title => &fonts.title_font,
        FontRole::Quote => &fonts.quote_font,
        FontRole::Label => &fonts.label_font,
    }
}

fn fill<'a>(colors: &'a ColorScheme, tone: Tone) -> &'a str {
    match tone {
        Tone::Text => &colors.text,
        Tone::Muted => &colors.text_muted,
        Tone::Accent => &colors.accent,
    }
}

/// One positioned `<text>` element per block. `top` is the y of the first
/// line's top edge.
fn text_block(block: &TextBlock, top: u32, fonts: &OgConfig, colors: &ColorScheme) -> maud::Markup {
    let (x, anchor) = match block.align {
        Align::Start => (MARGIN_X, "start"),
        Align::End => (CARD_WIDTH - MARGIN_X, "end"),
    };
    let generic = match block.font {
        FontRole::Title | FontRole::Quote => "serif",
        FontRole::Label => "sans-serif",
    };
    html! {
        text x=(x) font-family={ "'" (family(fonts, block.font)) "', " (generic) }
            font-size=(block.size) fill=(fill(colors, block.tone)) text-anchor=(anchor)
            font-style=(if block.italic { "italic" } else { "normal" }) {
            @for (i, line) in block.lines.iter().enumerate() {
                // Baseline sits one font size below the line's top edge.
                tspan x=(x) y=(top + block.line_height * i as u32 + block.size) { (line) }
            }
        }
    }
}

/// Serialise a layout to an SVG document.
///
/// The header hangs from the top margin, the footer sits on the bottom
/// margin, and the body is vertically centred in the space between.
pub fn to_svg(layout: &CardLayout, fonts: &OgConfig, colors: &ColorScheme) -> String {
    const TOP: u32 = 64;
    const BOTTOM: u32 = CARD_HEIGHT - 56;
    const GAP: u32 = 24;

    let header_height = layout.header.iter().map(TextBlock::height).max().unwrap_or(0);
    let footer_height = layout.footer.iter().map(TextBlock::height).max().unwrap_or(0);
    let body_height: u32 = layout.body.iter().map(TextBlock::height).sum::<u32>()
        + GAP * layout.body.len().saturating_sub(1) as u32;

    let free_top = TOP + header_height;
    let free_bottom = BOTTOM - footer_height;
    let mut y = free_top + free_bottom.saturating_sub(free_top).saturating_sub(body_height) / 2;
    let mut body_tops = Vec::with_capacity(layout.body.len());
    for block in &layout.body {
        body_tops.push(y);
        y += block.height() + GAP;
    }

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(CARD_WIDTH) height=(CARD_HEIGHT)
            viewBox={ "0 0 " (CARD_WIDTH) " " (CARD_HEIGHT) } {
            rect width="100%" height="100%" fill=(colors.background) {}
            rect x=(MARGIN_X) y=(TOP - 24) width="64" height="4" fill=(colors.accent) {}
            @for block in &layout.header {
                (text_block(block, TOP, fonts, colors))
            }
            @for (block, top) in layout.body.iter().zip(&body_tops) {
                (text_block(block, *top, fonts, colors))
            }
            rect x=(MARGIN_X) y=(free_bottom - 20) width=(CARD_WIDTH - 2 * MARGIN_X) height="1"
                fill=(colors.border) {}
            @for block in &layout.footer {
                (text_block(block, free_bottom, fonts, colors))
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::test_helpers::reading;

    fn site() -> SiteInfo {
        SiteConfig::default().site
    }

    #[test]
    fn three_rows_with_citation() {
        let layout = card_layout(&reading(60), &site());
        assert_eq!(layout.header[0].lines, vec!["DAYBOOK"]);
        assert_eq!(layout.body[0].lines, vec!["FEBRUARY 29"]);
        assert_eq!(layout.body[1].lines, vec!["Reading for day 60"]);
        assert!(layout.body[2].italic);
        assert_eq!(layout.body[3].lines, vec!["Basic Text, p. 60"]);
        assert_eq!(layout.footer.len(), 2);
    }

    #[test]
    fn quote_is_truncated_to_budget() {
        let mut r = reading(1);
        r.quote = format!("{} (Source, p. 3)", "acceptance brings serenity ".repeat(20));
        let layout = card_layout(&r, &site());
        let quote: String = layout.body[2].lines.join(" ");
        // Curly quotes wrap the truncated body.
        let inner = quote.trim_start_matches('“').trim_end_matches('”');
        assert!(inner.chars().count() <= CARD_QUOTE_MAX);
        assert!(inner.ends_with('…'));
        assert!(layout.body[2].lines.len() <= QUOTE_LINES);
    }

    #[test]
    fn empty_quote_drops_quote_rows() {
        let mut r = reading(1);
        r.quote.clear();
        r.title.clear();
        let layout = card_layout(&r, &site());
        assert_eq!(layout.body.len(), 2);
        assert_eq!(layout.body[1].lines, vec!["Untitled"]);
    }

    #[test]
    fn long_title_wraps_to_two_lines() {
        let mut r = reading(1);
        r.title = "A very long title that keeps going well past the width of a single card line and then some".into();
        let layout = card_layout(&r, &site());
        assert_eq!(layout.body[1].lines.len(), TITLE_LINES);
    }

    #[test]
    fn svg_is_well_formed_and_escaped() {
        let mut r = reading(1);
        r.title = "Fear & <Faith>".into();
        let config = SiteConfig::default();
        let svg = to_svg(
            &card_layout(&r, &config.site),
            &config.og,
            &config.colors.light,
        );
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("Fear &amp; &lt;Faith&gt;"));
        assert!(svg.contains("'Playfair Display', serif"));
        assert!(svg.contains(r#"viewBox="0 0 1200 630""#));
        // Empty elements must be closed for the XML parser.
        assert!(svg.contains("</rect>"));
    }
}
