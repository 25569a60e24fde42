//! # Rendering Module
//!
//! ## Purpose
//! Turns merged articles and session state into terminal text: article cards
//! with provenance, highlighted matches, facet rows, and result counts. All
//! functions build plain `String`s so callers decide where output goes.
//!
//! ## Input/Output Specification
//! - **Input**: Merged articles, card status flags, the active query
//! - **Output**: Display strings, optionally colored with ANSI styling
//! - **Color**: Match segments render black on yellow when color is enabled
//!
//! ## Key Features
//! - Provenance path omits blank chapter titles
//! - Width-aware title truncation for narrow terminals
//! - Color-free output for piped or scripted use

use crate::highlight::{highlight, Segment};
use crate::merge::MergedArticle;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown in place of the article list when every article was filtered out.
pub const NO_RESULTS: &str = "Sin resultados.";

/// Output settings for one render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Style match segments with ANSI colors
    pub color: bool,
    /// Truncate card titles to this display width
    pub max_width: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            color: true,
            max_width: None,
        }
    }
}

/// Presentation flags for one article card.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleStatus {
    pub expanded: bool,
    pub pinned: bool,
    pub copied: bool,
}

/// Render `text` with match segments of `query` highlighted.
pub fn render_text(text: &str, query: &str, options: &RenderOptions) -> String {
    let mut out = String::new();
    for segment in highlight(text, query) {
        match segment {
            Segment::Match(matched) if options.color => {
                out.push_str(&format!(
                    "{}{}{matched}{ResetColor}",
                    SetBackgroundColor(Color::Yellow),
                    SetForegroundColor(Color::Black)
                ));
            }
            Segment::Match(matched) | Segment::Plain(matched) => out.push_str(matched),
        }
    }
    out
}

/// Render one article card. Collapsed cards show the headline and provenance;
/// expanded cards add every body paragraph, literal, and numeral.
pub fn render_article(
    article: &MergedArticle<'_>,
    status: &ArticleStatus,
    query: &str,
    options: &RenderOptions,
) -> String {
    let prefix = format!("[{}] ", article.id);
    let title = match options.max_width {
        Some(max_width) => truncate_to_width(
            &article.article.article_title,
            max_width.saturating_sub(prefix.as_str().width()),
        ),
        None => article.article.article_title.clone(),
    };
    let mut out = String::new();
    out.push_str(&prefix);
    out.push_str(&render_text(&title, query, options));
    if status.pinned {
        out.push_str(" [fijado]");
    }
    if status.copied {
        out.push_str(" [copiado]");
    }
    out.push('\n');
    out.push_str("    ");
    out.push_str(&provenance_path(article));
    if status.expanded {
        let body = article.article;
        for text in body.body_texts() {
            out.push('\n');
            out.push_str("    ");
            out.push_str(&render_text(text, query, options));
        }
        for literal in &body.literals {
            out.push('\n');
            out.push_str(&format!(
                "    {}) {}",
                literal.literal_letter,
                render_text(&literal.text, query, options)
            ));
            for numeral in &literal.numerals {
                out.push('\n');
                out.push_str(&format!(
                    "       {}. {}",
                    numeral.numeral_number,
                    render_text(&numeral.text, query, options)
                ));
                if let Some(text2) = numeral.text2.as_deref().filter(|t| !t.is_empty()) {
                    out.push('\n');
                    out.push_str(&format!("          {}", render_text(text2, query, options)));
                }
            }
        }
    }
    out
}

/// The provenance line of a card. Blank chapter titles drop out of the path.
pub fn provenance_path(article: &MergedArticle<'_>) -> String {
    let mut path = article.source_name.to_string();
    if !article.chapter_title.trim().is_empty() {
        path.push_str(" → ");
        path.push_str(article.chapter_title);
    }
    if !article.topic_title.trim().is_empty() {
        path.push_str(" → ");
        path.push_str(article.topic_title);
    }
    path
}

/// One facet row, selected entries in brackets: `Fuentes: [LEAD] RPSAD`.
pub fn render_option_row(label: &str, options: &[(&str, bool)]) -> String {
    let mut out = String::from(label);
    for (name, selected) in options {
        out.push(' ');
        if *selected {
            out.push('[');
            out.push_str(name);
            out.push(']');
        } else {
            out.push_str(name);
        }
    }
    out
}

/// Result count shown while a query is active: `3 Artículos`.
pub fn render_result_count(count: usize) -> String {
    format!("{count} Artículo{}", if count == 1 { "" } else { "s" })
}

/// Cut `text` to at most `max_width` display columns, ending with an ellipsis
/// when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > budget {
            break;
        }
        used += char_width;
        out.push(c);
    }
    out.push('…');
    out
}
