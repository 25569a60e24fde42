//! # Session State Module
//!
//! ## Purpose
//! Transient per-session browsing state over an immutable corpus: which
//! sources and article numbers are selected, the active query, pinned and
//! expanded articles, and the timed copy-confirmation marker.
//!
//! ## Input/Output Specification
//! - **Input**: Toggle and query mutations from the hosting shell
//! - **Output**: Recomputed `SessionView` snapshots (merged, filtered, faceted)
//! - **Lifecycle**: Views are derived on demand and never cached
//!
//! ## Key Features
//! - Pure membership-set toggles, no validation against the corpus
//! - Facet options always derive from the merged set, not the filtered one
//! - Copy feedback expires on read after a configurable window

use crate::corpus::Source;
use crate::merge::{merge, MergedArticle};
use crate::query::{number_options, ArticleFilter};
use crate::ArticleId;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// How long a copy confirmation stays visible unless superseded.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Browsing state for one session. All mutation goes through toggle and set
/// methods; derived data comes from [`SessionState::view`].
pub struct SessionState {
    sources: Vec<Source>,
    selected_sources: HashSet<String>,
    selected_numbers: HashSet<String>,
    pinned: HashSet<ArticleId>,
    expanded: HashSet<ArticleId>,
    pinned_only: bool,
    query: String,
    copy_feedback: Option<CopyFeedback>,
    feedback_window: Duration,
}

struct CopyFeedback {
    id: ArticleId,
    expires_at: Instant,
}

/// One recomputed snapshot of the derived browse state.
pub struct SessionView<'a> {
    /// Articles passing every active filter, in merged order
    pub articles: Vec<MergedArticle<'a>>,
    /// Facet options: distinct article numbers over the merged set
    pub number_options: Vec<&'a str>,
    /// Size of the merged set before filtering
    pub total_merged: usize,
}

impl SessionState {
    pub fn new(sources: Vec<Source>) -> Self {
        Self::with_feedback_window(sources, DEFAULT_COPY_FEEDBACK)
    }

    pub fn with_feedback_window(sources: Vec<Source>, feedback_window: Duration) -> Self {
        SessionState {
            sources,
            selected_sources: HashSet::new(),
            selected_numbers: HashSet::new(),
            pinned: HashSet::new(),
            expanded: HashSet::new(),
            pinned_only: false,
            query: String::new(),
            copy_feedback: None,
            feedback_window,
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.name.as_str())
    }

    pub fn is_source_selected(&self, name: &str) -> bool {
        self.selected_sources.contains(name)
    }

    /// Toggle a source selection. Returns true when the source is selected
    /// after the call.
    pub fn toggle_source(&mut self, name: &str) -> bool {
        toggle(&mut self.selected_sources, name.to_string())
    }

    pub fn is_number_selected(&self, number: &str) -> bool {
        self.selected_numbers.contains(number)
    }

    /// Toggle an article-number facet. Returns true when the number is
    /// selected after the call.
    pub fn toggle_number(&mut self, number: &str) -> bool {
        toggle(&mut self.selected_numbers, number.to_string())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn pinned_only(&self) -> bool {
        self.pinned_only
    }

    /// Flip the pinned-only restriction. Returns the new value.
    pub fn toggle_pinned_only(&mut self) -> bool {
        self.pinned_only = !self.pinned_only;
        self.pinned_only
    }

    pub fn is_pinned(&self, id: &ArticleId) -> bool {
        self.pinned.contains(id)
    }

    pub fn pinned_count(&self) -> usize {
        self.pinned.len()
    }

    /// Pin or unpin an article. Returns true when the article is pinned after
    /// the call.
    pub fn toggle_pin(&mut self, id: ArticleId) -> bool {
        toggle(&mut self.pinned, id)
    }

    pub fn is_expanded(&self, id: &ArticleId) -> bool {
        self.expanded.contains(id)
    }

    /// Expand or collapse an article. Returns true when the article is
    /// expanded after the call.
    pub fn toggle_expanded(&mut self, id: ArticleId) -> bool {
        toggle(&mut self.expanded, id)
    }

    /// Flatten the selected sources into the ordered article list.
    pub fn merged(&self) -> Vec<MergedArticle<'_>> {
        merge(&self.sources, &self.selected_sources)
    }

    /// Recompute the full derived view: merged articles, facet options, and
    /// the filtered result list.
    pub fn view(&self) -> SessionView<'_> {
        let merged = self.merged();
        let options = number_options(&merged);
        let filter = ArticleFilter {
            query: &self.query,
            selected_numbers: &self.selected_numbers,
            pinned: &self.pinned,
            pinned_only: self.pinned_only,
        };
        let articles = filter.apply(&merged);
        SessionView {
            articles,
            number_options: options,
            total_merged: merged.len(),
        }
    }

    /// Arm the copy confirmation for `id`. A newer confirmation replaces any
    /// older one still showing.
    pub fn mark_copied(&mut self, id: ArticleId, now: Instant) {
        self.copy_feedback = Some(CopyFeedback {
            id,
            expires_at: now + self.feedback_window,
        });
    }

    /// The article whose copy confirmation is still showing, if any. Expired
    /// confirmations are cleared here.
    pub fn copy_feedback(&mut self, now: Instant) -> Option<&ArticleId> {
        if self
            .copy_feedback
            .as_ref()
            .is_some_and(|feedback| now >= feedback.expires_at)
        {
            self.copy_feedback = None;
        }
        self.copy_feedback.as_ref().map(|feedback| &feedback.id)
    }
}

fn toggle<T: std::hash::Hash + Eq>(set: &mut HashSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Article, Chapter, Topic};

    fn article(number: &str, title: &str, body: &str) -> Article {
        Article {
            article_number: number.to_string(),
            article_title: title.to_string(),
            text: Some(body.to_string()),
            text1: None,
            text2: None,
            text3: None,
            literals: Vec::new(),
        }
    }

    fn source(name: &str, articles: Vec<Article>) -> Source {
        Source {
            name: name.to_string(),
            chapters: vec![Chapter {
                chapter_title: "Capítulo único".to_string(),
                topics: vec![Topic {
                    topic_title: "General".to_string(),
                    articles,
                }],
            }],
        }
    }

    fn session() -> SessionState {
        SessionState::new(vec![
            source(
                "LEAD",
                vec![
                    article("1", "Objeto", "La presente ley regula la educación."),
                    article("2", "Ámbito", "Se aplica a los centros públicos."),
                ],
            ),
            source(
                "RPSAD",
                vec![article("1", "Finalidad", "Protección social de las familias.")],
            ),
        ])
    }

    #[test]
    fn test_toggle_source_flips_membership() {
        let mut state = session();
        assert!(!state.is_source_selected("LEAD"));
        assert!(state.toggle_source("LEAD"));
        assert!(state.is_source_selected("LEAD"));
        assert!(!state.toggle_source("LEAD"));
        assert!(!state.is_source_selected("LEAD"));
    }

    #[test]
    fn test_view_is_empty_until_a_source_is_selected() {
        let mut state = session();
        assert!(state.view().articles.is_empty());
        state.toggle_source("LEAD");
        assert_eq!(state.view().articles.len(), 2);
    }

    #[test]
    fn test_view_recomputes_after_each_mutation() {
        let mut state = session();
        state.toggle_source("LEAD");
        state.toggle_source("RPSAD");
        assert_eq!(state.view().articles.len(), 3);
        state.set_query("educación");
        assert_eq!(state.view().articles.len(), 1);
        state.set_query("");
        assert_eq!(state.view().articles.len(), 3);
    }

    #[test]
    fn test_facet_options_come_from_merged_not_filtered() {
        let mut state = session();
        state.toggle_source("LEAD");
        state.set_query("sin resultados posibles zzz");
        let view = state.view();
        assert!(view.articles.is_empty());
        assert_eq!(view.number_options, vec!["1", "2"]);
        assert_eq!(view.total_merged, 2);
    }

    #[test]
    fn test_number_facet_narrows_view() {
        let mut state = session();
        state.toggle_source("LEAD");
        state.toggle_number("2");
        let view = state.view();
        assert_eq!(view.articles.len(), 1);
        assert_eq!(view.articles[0].article.article_number, "2");
    }

    #[test]
    fn test_pinned_only_view() {
        let mut state = session();
        state.toggle_source("LEAD");
        state.toggle_pin(ArticleId::from("LEAD-2"));
        assert!(state.toggle_pinned_only());
        let view = state.view();
        assert_eq!(view.articles.len(), 1);
        assert_eq!(view.articles[0].id.as_str(), "LEAD-2");
    }

    #[test]
    fn test_expansion_survives_filtering() {
        let mut state = session();
        state.toggle_source("LEAD");
        let id = ArticleId::from("LEAD-1");
        state.toggle_expanded(id.clone());
        state.set_query("centros");
        assert!(state.view().articles.iter().all(|a| a.id.as_str() != "LEAD-1"));
        assert!(state.is_expanded(&id));
    }

    #[test]
    fn test_double_toggle_pin_restores_original_state() {
        let mut state = session();
        let id = ArticleId::from("LEAD-1");
        assert!(state.toggle_pin(id.clone()));
        assert!(!state.toggle_pin(id.clone()));
        assert!(!state.is_pinned(&id));
        assert_eq!(state.pinned_count(), 0);
    }

    #[test]
    fn test_toggles_accept_unknown_values() {
        let mut state = session();
        assert!(state.toggle_source("NO-EXISTE"));
        assert!(state.toggle_number("99"));
        assert!(state.toggle_pin(ArticleId::from("NADA-1")));
        assert!(state.view().articles.is_empty());
    }

    #[test]
    fn test_copy_feedback_visible_within_window() {
        let mut state = session();
        let t0 = Instant::now();
        state.mark_copied(ArticleId::from("LEAD-1"), t0);
        let visible = state.copy_feedback(t0 + Duration::from_millis(1999));
        assert_eq!(visible.map(ArticleId::as_str), Some("LEAD-1"));
    }

    #[test]
    fn test_copy_feedback_expires_at_deadline() {
        let mut state = session();
        let t0 = Instant::now();
        state.mark_copied(ArticleId::from("LEAD-1"), t0);
        assert!(state.copy_feedback(t0 + Duration::from_millis(2000)).is_none());
        assert!(state.copy_feedback(t0 + Duration::from_millis(2001)).is_none());
    }

    #[test]
    fn test_newer_copy_supersedes_older_one() {
        let mut state = session();
        let t0 = Instant::now();
        state.mark_copied(ArticleId::from("LEAD-1"), t0);
        let t1 = t0 + Duration::from_millis(1500);
        state.mark_copied(ArticleId::from("LEAD-2"), t1);
        // the first marker's deadline passes, the second is still showing
        let visible = state.copy_feedback(t0 + Duration::from_millis(2500));
        assert_eq!(visible.map(ArticleId::as_str), Some("LEAD-2"));
    }

    #[test]
    fn test_custom_feedback_window() {
        let mut state = SessionState::with_feedback_window(
            vec![source("LEAD", vec![article("1", "Objeto", "Texto.")])],
            Duration::from_millis(500),
        );
        let t0 = Instant::now();
        state.mark_copied(ArticleId::from("LEAD-1"), t0);
        assert!(state.copy_feedback(t0 + Duration::from_millis(499)).is_some());
        assert!(state.copy_feedback(t0 + Duration::from_millis(500)).is_none());
    }
}
