//! # Text Normalization Module
//!
//! ## Purpose
//! Canonical comparison form for all matching in the browser: decompose to NFD,
//! drop combining marks, lowercase. "Artículo" and "ARTICULO" normalize to the
//! same string, so queries match regardless of accents or case.
//!
//! ## Input/Output Specification
//! - **Input**: Arbitrary UTF-8 text (corpus fields or user queries)
//! - **Output**: Folded strings, plus byte-offset maps back into the original
//! - **Guarantee**: Folding is idempotent
//!
//! ## Key Features
//! - Unicode NFD decomposition with combining-mark removal
//! - Byte-offset map from folded text to original text for span recovery
//! - Match spans never split an original character

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold one character: NFD-decompose, drop combining marks, lowercase what
/// remains. May emit zero or several characters.
fn fold_char(c: char, emit: &mut impl FnMut(char)) {
    for decomposed in std::iter::once(c).nfd() {
        if !is_combining_mark(decomposed) {
            for lowered in decomposed.to_lowercase() {
                emit(lowered);
            }
        }
    }
}

/// Fold `text` into its canonical comparison form.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        fold_char(c, &mut |lowered| folded.push(lowered));
    }
    folded
}

/// True when `haystack` contains `folded_needle` under folding. The needle
/// must already be folded; an empty needle matches everything.
pub fn folded_contains(haystack: &str, folded_needle: &str) -> bool {
    if folded_needle.is_empty() {
        return true;
    }
    normalize(haystack).contains(folded_needle)
}

/// A string folded for matching, with a byte-offset map back to the original.
/// Lets match positions found in the folded text be reported as spans of the
/// original, accents and all.
pub struct NormalizedText<'a> {
    original: &'a str,
    folded: String,
    /// `starts[i]` is the byte offset in `original` of the character that
    /// produced folded byte `i`; one sentinel entry at the end.
    starts: Vec<usize>,
}

impl<'a> NormalizedText<'a> {
    pub fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut starts = Vec::with_capacity(original.len() + 1);
        for (offset, c) in original.char_indices() {
            fold_char(c, &mut |lowered| {
                folded.push(lowered);
                for _ in 0..lowered.len_utf8() {
                    starts.push(offset);
                }
            });
        }
        starts.push(original.len());
        NormalizedText {
            original,
            folded,
            starts,
        }
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Find `folded_needle` at or after folded byte `from`. Returns the folded
    /// byte range of the match. The needle must be non-empty and folded.
    pub fn find(&self, folded_needle: &str, from: usize) -> Option<(usize, usize)> {
        let tail = self.folded.get(from..)?;
        tail.find(folded_needle)
            .map(|i| (from + i, from + i + folded_needle.len()))
    }

    /// Map a folded byte range back to a byte range of the original text. The
    /// returned span always covers whole original characters.
    pub fn original_span(&self, start: usize, end: usize) -> (usize, usize) {
        let orig_start = self.starts[start];
        let mut orig_end = self.starts[end];
        if orig_end <= orig_start {
            // the range fell inside one original character's fold expansion
            orig_end = self.original[orig_start..]
                .chars()
                .next()
                .map(|c| orig_start + c.len_utf8())
                .unwrap_or(self.original.len());
        }
        (orig_start, orig_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("É"), "e");
        assert_eq!(normalize("Artículo"), "articulo");
        assert_eq!(normalize("educación"), "educacion");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("DERECHO"), "derecho");
    }

    #[test]
    fn test_normalize_folds_enye() {
        assert_eq!(normalize("España"), "espana");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Régimen Jurídico ESPAÑOL");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_folded_contains_ignores_accents_and_case() {
        assert!(folded_contains(
            "La educación básica",
            &normalize("EDUCACIÓN")
        ));
        assert!(folded_contains("La educación básica", &normalize("basica")));
        assert!(!folded_contains("La educación básica", &normalize("superior")));
    }

    #[test]
    fn test_folded_contains_empty_needle_matches_everything() {
        assert!(folded_contains("cualquier texto", ""));
        assert!(folded_contains("", ""));
    }

    #[test]
    fn test_find_reports_folded_positions() {
        let normalized = NormalizedText::new("Artículo único");
        assert_eq!(normalized.folded(), "articulo unico");
        assert_eq!(normalized.find("tic", 0), Some((2, 5)));
        assert_eq!(normalized.find("unico", 0), Some((9, 14)));
        assert_eq!(normalized.find("zzz", 0), None);
    }

    #[test]
    fn test_find_respects_start_offset() {
        let normalized = NormalizedText::new("la ley y la norma");
        assert_eq!(normalized.find("la", 0), Some((0, 2)));
        assert_eq!(normalized.find("la", 2), Some((9, 11)));
    }

    #[test]
    fn test_original_span_covers_whole_accented_characters() {
        let text = "Artículo";
        let normalized = NormalizedText::new(text);
        let (fs, fe) = normalized.find("tic", 0).unwrap();
        let (os, oe) = normalized.original_span(fs, fe);
        assert_eq!(&text[os..oe], "tíc");
    }

    #[test]
    fn test_original_span_at_end_of_text() {
        let text = "Artículo";
        let normalized = NormalizedText::new(text);
        let (fs, fe) = normalized.find("lo", 0).unwrap();
        let (os, oe) = normalized.original_span(fs, fe);
        assert_eq!(&text[os..oe], "lo");
        assert_eq!(oe, text.len());
    }

    #[test]
    fn test_original_span_never_splits_a_character() {
        // folded "espana": the "n" comes from "ñ"
        let text = "España";
        let normalized = NormalizedText::new(text);
        let (fs, fe) = normalized.find("n", 0).unwrap();
        let (os, oe) = normalized.original_span(fs, fe);
        assert_eq!(&text[os..oe], "ñ");
    }

    #[test]
    fn test_decomposed_input_folds_and_spans_whole_graphemes() {
        // "é" written as "e" plus a combining acute accent
        let text = "Cafe\u{301}";
        assert_eq!(normalize(text), "cafe");
        let normalized = NormalizedText::new(text);
        let (fs, fe) = normalized.find(&normalize("café"), 0).unwrap();
        let (os, oe) = normalized.original_span(fs, fe);
        assert_eq!(&text[os..oe], text);
    }
}
