//! # Corpus Module
//!
//! ## Purpose
//! Document model and loading for structured legal-text corpora. Each corpus
//! file holds one source (a statute or regulation) as a chapter/topic/article
//! hierarchy with optional lettered literals and numbered numerals.
//!
//! ## Input/Output Specification
//! - **Input**: JSON corpus files with camelCase field names
//! - **Output**: Typed `Source` trees, validated for structural rules
//! - **Validation**: Non-blank unique acronyms, non-blank article numbers
//!
//! ## Key Features
//! - Serde-based deserialization matching the corpus wire format
//! - Optional body fields treated as absent when missing or empty
//! - Structural validation before a corpus is accepted

use crate::errors::{NormaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One named corpus: a statute or regulation identified by its acronym.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Display acronym, unique across loaded sources
    #[serde(rename = "acronym")]
    pub name: String,
    /// Ordered chapters
    pub chapters: Vec<Chapter>,
}

/// A chapter grouping within a source. The title may be blank for sources
/// that go straight to topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub chapter_title: String,
    pub topics: Vec<Topic>,
}

/// A topic grouping within a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub topic_title: String,
    pub articles: Vec<Article>,
}

/// One article: the retrieval unit of the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Usually numeric ("12") but free-form values like "4 bis" occur
    pub article_number: String,
    pub article_title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text1: Option<String>,
    #[serde(default)]
    pub text2: Option<String>,
    #[serde(default)]
    pub text3: Option<String>,
    #[serde(default)]
    pub literals: Vec<Literal>,
}

/// A lettered subdivision of an article ("a) ...").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Literal {
    pub literal_letter: String,
    pub text: String,
    #[serde(default)]
    pub numerals: Vec<Numeral>,
}

/// A numbered subdivision of a literal ("1. ..."), with an optional
/// continuation paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Numeral {
    pub numeral_number: String,
    pub text: String,
    #[serde(default)]
    pub text2: Option<String>,
}

impl Article {
    /// Non-empty body paragraphs in their declared order.
    pub fn body_texts(&self) -> impl Iterator<Item = &str> {
        [&self.text, &self.text1, &self.text2, &self.text3]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|text| !text.is_empty())
    }
}

impl Source {
    /// Total number of articles across all chapters and topics.
    pub fn article_count(&self) -> usize {
        self.chapters
            .iter()
            .flat_map(|chapter| &chapter.topics)
            .map(|topic| topic.articles.len())
            .sum()
    }
}

/// Load a single corpus file.
pub fn load_source(path: &Path) -> Result<Source> {
    debug!(path = %path.display(), "Loading corpus file");
    let content = std::fs::read_to_string(path).map_err(|err| NormaError::CorpusRead {
        path: path.to_path_buf(),
        source: err,
    })?;
    let source: Source = serde_json::from_str(&content).map_err(|err| NormaError::CorpusParse {
        path: path.to_path_buf(),
        source: err,
    })?;
    info!(
        source = %source.name,
        articles = source.article_count(),
        "Loaded corpus"
    );
    Ok(source)
}

/// Load and validate a set of corpus files. Order of the result follows the
/// order of `paths`.
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    let sources = paths
        .iter()
        .map(|path| load_source(path))
        .collect::<Result<Vec<_>>>()?;
    validate_sources(&sources)?;
    Ok(sources)
}

/// Check structural rules over a loaded set of sources: acronyms must be
/// non-blank and unique, article numbers must be non-blank.
pub fn validate_sources(sources: &[Source]) -> Result<()> {
    let mut seen = HashSet::new();
    for source in sources {
        if source.name.trim().is_empty() {
            return Err(NormaError::CorpusValidation {
                source_name: source.name.clone(),
                reason: "acronym must not be blank".to_string(),
            });
        }
        if !seen.insert(source.name.as_str()) {
            return Err(NormaError::CorpusValidation {
                source_name: source.name.clone(),
                reason: "duplicate acronym".to_string(),
            });
        }
        for chapter in &source.chapters {
            for topic in &chapter.topics {
                for article in &topic.articles {
                    if article.article_number.trim().is_empty() {
                        return Err(NormaError::CorpusValidation {
                            source_name: source.name.clone(),
                            reason: format!(
                                "article '{}' has a blank article number",
                                article.article_title
                            ),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "acronym": "LEAD",
        "chapters": [
            {
                "chapterTitle": "Capítulo I",
                "topics": [
                    {
                        "topicTitle": "Derechos",
                        "articles": [
                            {
                                "articleNumber": "1",
                                "articleTitle": "Objeto",
                                "text": "Primer párrafo.",
                                "text2": "Tercer párrafo.",
                                "literals": [
                                    {
                                        "literalLetter": "a",
                                        "text": "Primer literal.",
                                        "numerals": [
                                            {
                                                "numeralNumber": "1",
                                                "text": "Primer numeral.",
                                                "text2": "Continuación."
                                            }
                                        ]
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    fn sample_source() -> Source {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_parse_corpus_wire_format() {
        let source = sample_source();
        assert_eq!(source.name, "LEAD");
        assert_eq!(source.chapters.len(), 1);
        assert_eq!(source.chapters[0].chapter_title, "Capítulo I");
        let article = &source.chapters[0].topics[0].articles[0];
        assert_eq!(article.article_number, "1");
        assert_eq!(article.text.as_deref(), Some("Primer párrafo."));
        assert!(article.text1.is_none());
        let literal = &article.literals[0];
        assert_eq!(literal.literal_letter, "a");
        assert_eq!(literal.numerals[0].text2.as_deref(), Some("Continuación."));
    }

    #[test]
    fn test_body_texts_keeps_declared_order_and_skips_gaps() {
        let article = &sample_source().chapters[0].topics[0].articles[0];
        let bodies: Vec<&str> = article.body_texts().collect();
        assert_eq!(bodies, vec!["Primer párrafo.", "Tercer párrafo."]);
    }

    #[test]
    fn test_body_texts_ignores_empty_strings() {
        let mut article = sample_source().chapters[0].topics[0].articles[0].clone();
        article.text = Some(String::new());
        let bodies: Vec<&str> = article.body_texts().collect();
        assert_eq!(bodies, vec!["Tercer párrafo."]);
    }

    #[test]
    fn test_missing_optional_sections_default_to_empty() {
        let source: Source = serde_json::from_str(
            r#"{
                "acronym": "MIN",
                "chapters": [
                    {
                        "topics": [
                            {
                                "topicTitle": "Único",
                                "articles": [
                                    { "articleNumber": "1", "articleTitle": "Solo título" }
                                ]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(source.chapters[0].chapter_title, "");
        let article = &source.chapters[0].topics[0].articles[0];
        assert!(article.literals.is_empty());
        assert_eq!(article.body_texts().count(), 0);
    }

    #[test]
    fn test_article_count() {
        assert_eq!(sample_source().article_count(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_acronyms() {
        let sources = vec![sample_source(), sample_source()];
        let err = validate_sources(&sources).unwrap_err();
        assert_eq!(err.category(), "corpus");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_validate_rejects_blank_article_number() {
        let mut source = sample_source();
        source.chapters[0].topics[0].articles[0].article_number = "  ".to_string();
        let err = validate_sources(&[source]).unwrap_err();
        assert!(err.to_string().contains("blank article number"));
    }

    #[test]
    fn test_load_source_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let source = load_source(file.path()).unwrap();
        assert_eq!(source.name, "LEAD");
    }

    #[test]
    fn test_load_source_missing_file() {
        let err = load_source(Path::new("/nonexistent/corpus.json")).unwrap_err();
        assert_eq!(err.category(), "corpus");
    }

    #[test]
    fn test_load_source_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = load_source(file.path()).unwrap_err();
        assert!(matches!(err, NormaError::CorpusParse { .. }));
    }
}
