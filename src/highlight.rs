//! # Highlighter Module
//!
//! ## Purpose
//! Splits display text into plain and matched segments for one query, scanning
//! left to right without overlaps. Matching happens on folded text, but the
//! emitted segments are slices of the original, so accents and case survive
//! into the rendered output.
//!
//! ## Input/Output Specification
//! - **Input**: One original text and the active query
//! - **Output**: Alternating `Plain`/`Match` segments covering the text
//! - **Guarantee**: Concatenating all segments reproduces the input exactly
//!
//! ## Key Features
//! - Lazy iterator, nothing allocated per segment
//! - Match spans widen to whole characters when folding changed lengths
//! - Empty query or empty text yields the text as a single plain segment

use crate::normalize::{normalize, NormalizedText};

/// A piece of display text, either outside or inside a query match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Match(text) => text,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

/// Split `text` into highlight segments for `query`. Matching is accent- and
/// case-insensitive; occurrences are taken left to right without overlap.
pub fn highlight<'a>(text: &'a str, query: &str) -> Highlights<'a> {
    let folded_query = normalize(query);
    let normalized = if folded_query.is_empty() || text.is_empty() {
        None
    } else {
        Some(NormalizedText::new(text))
    };
    Highlights {
        original: text,
        normalized,
        folded_query,
        cursor: 0,
        emitted: 0,
        pending: None,
        done: false,
    }
}

/// Iterator over highlight segments. Obtain a fresh one from [`highlight`] to
/// scan the same text again.
pub struct Highlights<'a> {
    original: &'a str,
    /// `None` when there is nothing to match: the whole text is one segment
    normalized: Option<NormalizedText<'a>>,
    folded_query: String,
    /// next folded byte offset to search from
    cursor: usize,
    /// original bytes emitted so far
    emitted: usize,
    /// match queued behind its preceding plain segment
    pending: Option<(usize, usize)>,
    done: bool,
}

impl<'a> Iterator for Highlights<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.done {
            return None;
        }
        if let Some((start, end)) = self.pending.take() {
            self.emitted = end;
            return Some(Segment::Match(&self.original[start..end]));
        }
        let Some(normalized) = self.normalized.as_ref() else {
            self.done = true;
            return Some(Segment::Plain(self.original));
        };
        loop {
            match normalized.find(&self.folded_query, self.cursor) {
                Some((folded_start, folded_end)) => {
                    self.cursor = folded_end;
                    let (span_start, span_end) =
                        normalized.original_span(folded_start, folded_end);
                    let span_start = span_start.max(self.emitted);
                    if span_end <= span_start {
                        // occurrence folded into text already emitted
                        continue;
                    }
                    if span_start > self.emitted {
                        self.pending = Some((span_start, span_end));
                        return Some(Segment::Plain(&self.original[self.emitted..span_start]));
                    }
                    self.emitted = span_end;
                    return Some(Segment::Match(&self.original[span_start..span_end]));
                }
                None => {
                    self.done = true;
                    if self.emitted < self.original.len() {
                        return Some(Segment::Plain(&self.original[self.emitted..]));
                    }
                    return None;
                }
            }
        }
    }
}
