use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

pub mod classify;
#[cfg(feature = "hanta")]
pub mod hanta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Other,
}

impl PartOfSpeech {
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Other => "other",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the tagger made of a single word. `tag` is an STTS code such as
/// `NN`, `VV(INF)` or `$.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedLemma {
    pub lemma: String,
    pub tag: String,
}

impl AnalyzedLemma {
    pub fn new(lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }
}

#[async_trait]
pub trait Tagger: Send + Sync {
    /// `word` is a single bare word, never carrying a reflexive marker.
    async fn analyze(&self, word: &str) -> anyhow::Result<AnalyzedLemma>;
}

/// Table driven tagger over a `form<TAB>lemma<TAB>tag` lexicon.
#[derive(Debug, Default)]
pub struct LexiconTagger {
    entries: FxHashMap<String, AnalyzedLemma>,
}

impl LexiconTagger {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open lexicon at '{}'", path.as_ref().display()))?;
        Self::from_reader(io::BufReader::new(file))
    }

    pub fn from_reader(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tagger = Self::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(form), Some(lemma), Some(tag)) => tagger.insert(form, lemma, tag),
                _ => anyhow::bail!("lexicon line {} is not `form<TAB>lemma<TAB>tag`", i + 1),
            }
        }
        log::info!("loaded {} lexicon entries", tagger.entries.len());
        Ok(tagger)
    }

    pub fn insert(&mut self, form: &str, lemma: &str, tag: &str) {
        self.entries
            .insert(form.to_string(), AnalyzedLemma::new(lemma, tag));
    }
}

impl<'a> FromIterator<(&'a str, &'a str, &'a str)> for LexiconTagger {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str, &'a str)>>(iter: I) -> Self {
        let mut tagger = Self::default();
        for (form, lemma, tag) in iter {
            tagger.insert(form, lemma, tag);
        }
        tagger
    }
}

#[async_trait]
impl Tagger for LexiconTagger {
    async fn analyze(&self, word: &str) -> anyhow::Result<AnalyzedLemma> {
        if let Some(tag) = classify::non_word_tag(word) {
            return Ok(AnalyzedLemma::new(word, tag));
        }
        self.entries
            .get(word)
            .cloned()
            .with_context(|| format!("\"{word}\" is not in the lexicon"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_tagger() -> LexiconTagger {
        LexiconTagger::from_reader(include_str!("../../blobs/lexicon_de.tsv").as_bytes())
            .expect("sample lexicon must parse")
    }

    #[tokio::test]
    async fn looks_up_forms() {
        let tagger = sample_tagger();
        assert_eq!(
            tagger.analyze("Märkte").await.unwrap(),
            AnalyzedLemma::new("Markt", "NN")
        );
        assert_eq!(
            tagger.analyze("schlafen").await.unwrap(),
            AnalyzedLemma::new("schlafen", "VV(INF)")
        );
    }

    #[tokio::test]
    async fn tags_punctuation_like_stts() {
        let tagger = LexiconTagger::default();
        assert_eq!(tagger.analyze(".").await.unwrap().tag, "$.");
        assert_eq!(tagger.analyze(",").await.unwrap().tag, "$,");
        assert_eq!(tagger.analyze("-").await.unwrap().tag, "$(");
        assert_eq!(tagger.analyze("$").await.unwrap().tag, "XY");
    }

    #[tokio::test]
    async fn unknown_word_is_an_error() {
        let tagger: LexiconTagger = [("Hund", "Hund", "NN")].into_iter().collect();
        assert!(tagger.analyze("Hund").await.is_ok());
        assert!(tagger.analyze("Katze").await.is_err());
    }

    #[test]
    fn malformed_lexicon_line() {
        let err = LexiconTagger::from_reader("Hund\tHund\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
