//! # Query Engine Module
//!
//! ## Purpose
//! Filtering over the merged article list: a facet filter on article numbers,
//! a pinned-only toggle, and a free-text query matched accent- and
//! case-insensitively against every text field of each article.
//!
//! ## Input/Output Specification
//! - **Input**: Merged article list plus the active filter parameters
//! - **Output**: The sublist passing every filter, original order preserved
//! - **Matching**: Substring containment on folded text, any field suffices
//!
//! ## Key Features
//! - Empty query and empty facet selection act as no-ops
//! - The query is folded once per run, not once per article
//! - Derives facet options from the merged set in first-appearance order

use crate::merge::MergedArticle;
use crate::normalize::{folded_contains, normalize};
use crate::ArticleId;
use std::collections::HashSet;

/// Filter parameters applied to one merged article list.
#[derive(Debug, Clone)]
pub struct ArticleFilter<'s> {
    /// Free-text query, matched folded; empty matches everything
    pub query: &'s str,
    /// Facet selection over article numbers; empty selects everything
    pub selected_numbers: &'s HashSet<String>,
    /// Pinned article ids, consulted when `pinned_only` is set
    pub pinned: &'s HashSet<ArticleId>,
    /// Restrict results to pinned articles
    pub pinned_only: bool,
}

impl ArticleFilter<'_> {
    /// Apply every active filter, keeping the input order.
    pub fn apply<'a>(&self, articles: &[MergedArticle<'a>]) -> Vec<MergedArticle<'a>> {
        let folded_query = normalize(self.query);
        articles
            .iter()
            .filter(|article| self.number_selected(article))
            .filter(|article| self.passes_pinned(article))
            .filter(|article| matches_query(article, &folded_query))
            .cloned()
            .collect()
    }

    fn number_selected(&self, article: &MergedArticle) -> bool {
        self.selected_numbers.is_empty()
            || self.selected_numbers.contains(&article.article.article_number)
    }

    fn passes_pinned(&self, article: &MergedArticle) -> bool {
        !self.pinned_only || self.pinned.contains(&article.id)
    }
}

/// True when any searchable field of the article contains the folded query.
/// An empty query matches every article.
pub fn matches_query(article: &MergedArticle, folded_query: &str) -> bool {
    if folded_query.is_empty() {
        return true;
    }
    article
        .searchable_texts()
        .any(|field| folded_contains(field, folded_query))
}

/// Distinct article numbers over the merged list, in first-appearance order.
/// These are the facet options offered to the user.
pub fn number_options<'a>(articles: &[MergedArticle<'a>]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for article in articles {
        let number = article.article.article_number.as_str();
        if seen.insert(number) {
            options.push(number);
        }
    }
    options
}
