//! Spelling correction of single words against word-frequency lists.
//!
//! A known word is left alone. An unknown one is replaced by the known word
//! with the fewest edits (at most [`MAX_EDIT_DISTANCE`]), the more frequent
//! one winning a tie. Phrases are never corrected.
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::Context;
use fxhash::FxHashMap;

use crate::lang::Language;

pub const MAX_EDIT_DISTANCE: usize = 2;

pub trait SpellChecker: Send + Sync {
    /// Best known spelling of a lower-cased single word, `None` when the
    /// language has no word list or nothing is close enough.
    fn correction(&self, word: &str, language: Language) -> Option<String>;
}

/// `word[ count]` lists, one per language. Words are stored lower-cased.
#[derive(Debug, Default)]
pub struct FrequencySpeller {
    words: FxHashMap<Language, FxHashMap<String, u64>>,
}

impl FrequencySpeller {
    pub fn load(&mut self, language: Language, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open word list at '{}'", path.as_ref().display()))?;
        self.load_reader(language, io::BufReader::new(file))
    }

    pub fn load_reader(&mut self, language: Language, reader: impl BufRead) -> anyhow::Result<()> {
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            let count = match fields.next() {
                Some(count) => count
                    .parse()
                    .with_context(|| format!("word list line {}: bad count \"{count}\"", i + 1))?,
                None => 1,
            };
            self.insert(language, word, count);
        }
        log::info!("loaded {} {language} words for spelling", self.len(language));
        Ok(())
    }

    pub fn insert(&mut self, language: Language, word: &str, count: u64) {
        *self
            .words
            .entry(language)
            .or_default()
            .entry(word.to_lowercase())
            .or_default() += count;
    }

    pub fn len(&self, language: Language) -> usize {
        self.words.get(&language).map_or(0, FxHashMap::len)
    }
}

impl SpellChecker for FrequencySpeller {
    fn correction(&self, word: &str, language: Language) -> Option<String> {
        let words = self.words.get(&language)?;
        if words.contains_key(word) {
            return Some(word.to_string());
        }
        let len = word.chars().count();
        words
            .iter()
            .filter(|(known, _)| known.chars().count().abs_diff(len) <= MAX_EDIT_DISTANCE)
            .map(|(known, &count)| (strsim::damerau_levenshtein(word, known), count, known))
            .filter(|(distance, ..)| *distance <= MAX_EDIT_DISTANCE)
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(b.2)))
            .map(|(.., known)| known.clone())
    }
}

/// Corrects a single word, keeping it lower-case or capitalised the way it
/// was written. Anything containing a space comes back unchanged.
pub fn correct_spelling(checker: &dyn SpellChecker, word_or_phrase: &str, language: Language) -> String {
    if word_or_phrase.contains(' ') {
        return word_or_phrase.to_string();
    }
    let lowercase = word_or_phrase.to_lowercase();
    let corrected = match checker.correction(&lowercase, language) {
        Some(corrected) if corrected != lowercase => corrected,
        _ => return word_or_phrase.to_string(),
    };

    let corrected = if is_lowercase(word_or_phrase) {
        corrected
    } else {
        capitalize(&corrected)
    };
    log::warn!("spelling of \"{word_or_phrase}\" corrected to \"{corrected}\" ({language})");
    corrected
}

fn is_lowercase(text: &str) -> bool {
    text.chars().any(char::is_lowercase) && !text.chars().any(char::is_uppercase)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
