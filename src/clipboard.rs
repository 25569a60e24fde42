//! # Clipboard Module
//!
//! ## Purpose
//! Renders one article as flat plain text for the system clipboard and writes
//! it there. The layout mirrors the on-screen article: title, provenance path,
//! body paragraphs, then indented literals and numerals.
//!
//! ## Input/Output Specification
//! - **Input**: One merged article with provenance
//! - **Output**: Trimmed plain-text block; no markup, no highlight markers
//! - **Failure**: Clipboard access errors surface as `NormaError::Clipboard`
//!
//! ## Key Features
//! - Deterministic layout independent of any active query
//! - Absent optional fields leave no blank lines behind
//! - Nested numbering indented three spaces per level

use crate::errors::Result;
use crate::merge::MergedArticle;

/// Render `article` as the plain-text block placed on the clipboard.
pub fn format_article(article: &MergedArticle<'_>) -> String {
    let body = article.article;
    let mut out = String::new();
    out.push_str(&format!("{}\n", body.article_title));
    out.push_str(&format!(
        "{} → {} → {}\n\n",
        article.source_name, article.chapter_title, article.topic_title
    ));
    for text in body.body_texts() {
        out.push_str(&format!("{text}\n"));
    }
    for literal in &body.literals {
        out.push_str(&format!("{}) {}\n", literal.literal_letter, literal.text));
        for numeral in &literal.numerals {
            out.push_str(&format!("   {}. {}\n", numeral.numeral_number, numeral.text));
            if let Some(text2) = numeral.text2.as_deref().filter(|t| !t.is_empty()) {
                out.push_str(&format!("      {text2}\n"));
            }
        }
    }
    out.trim().to_string()
}

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
