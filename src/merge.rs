//! # Document Merger Module
//!
//! ## Purpose
//! Flattens the currently selected sources into a single ordered list of
//! articles. Each flattened record keeps provenance (source, chapter, topic)
//! so a result can always say where it came from.
//!
//! ## Input/Output Specification
//! - **Input**: Loaded sources plus the set of selected source names
//! - **Output**: `Vec<MergedArticle>` sorted by numeric article number
//! - **Ordering**: Numeric article numbers ascending; non-numeric numbers
//!   after all numeric ones; ties broken by source name, then raw number
//!
//! ## Key Features
//! - Borrowed records over the immutable corpus (no cloning of article bodies)
//! - Stable, deterministic ordering for repeatable renders
//! - Document-order traversal of every searchable text field

use crate::corpus::{Article, Source};
use crate::ArticleId;
use std::cmp::Ordering;
use std::collections::HashSet;

/// One article decorated with its provenance path.
#[derive(Debug, Clone)]
pub struct MergedArticle<'a> {
    pub id: ArticleId,
    pub source_name: &'a str,
    pub chapter_title: &'a str,
    pub topic_title: &'a str,
    pub article: &'a Article,
}

impl<'a> MergedArticle<'a> {
    /// Every searchable text field of the article in document order: title,
    /// body paragraphs, then literal and numeral texts.
    pub fn searchable_texts(&self) -> impl Iterator<Item = &'a str> + 'a {
        let article = self.article;
        std::iter::once(article.article_title.as_str())
            .chain(article.body_texts())
            .chain(article.literals.iter().flat_map(|literal| {
                std::iter::once(literal.text.as_str()).chain(
                    literal.numerals.iter().flat_map(|numeral| {
                        std::iter::once(numeral.text.as_str()).chain(numeral.text2.as_deref())
                    }),
                )
            }))
    }
}

/// Flatten the selected sources into one sorted article list.
pub fn merge<'a>(sources: &'a [Source], selected: &HashSet<String>) -> Vec<MergedArticle<'a>> {
    let mut merged = Vec::new();
    for source in sources.iter().filter(|s| selected.contains(&s.name)) {
        for chapter in &source.chapters {
            for topic in &chapter.topics {
                for article in &topic.articles {
                    merged.push(MergedArticle {
                        id: ArticleId::new(&source.name, &article.article_number),
                        source_name: &source.name,
                        chapter_title: &chapter.chapter_title,
                        topic_title: &topic.topic_title,
                        article,
                    });
                }
            }
        }
    }
    merged.sort_by(compare_articles);
    merged
}

/// Numeric value of an article number, when it has one.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn compare_articles(a: &MergedArticle, b: &MergedArticle) -> Ordering {
    let number_a = parse_number(&a.article.article_number);
    let number_b = parse_number(&b.article.article_number);
    match (number_a, number_b) {
        (Some(na), Some(nb)) => na
            .total_cmp(&nb)
            .then_with(|| a.source_name.cmp(b.source_name))
            .then_with(|| a.article.article_number.cmp(&b.article.article_number)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .source_name
            .cmp(b.source_name)
            .then_with(|| a.article.article_number.cmp(&b.article.article_number)),
    }
}
