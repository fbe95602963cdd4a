//! Turns one raw word or phrase into everything a flashcard needs.
//!
//! A single word goes through tagging, classification and, for nouns, the
//! morphology lookup before it is translated and given an example sentence.
//! A phrase skips straight to translation and is always [`PartOfSpeech::Other`].
use serde::Serialize;

use crate::config::Providers;
use crate::dict::{self, NounProperties};
use crate::error::{Error, Result};
use crate::lang::{Language, Languages};
use crate::llm;
use crate::nlp::classify::{self, Surface};
use crate::nlp::PartOfSpeech;
use crate::normalize::{normalize, Normalized};
use crate::reflexive;
use crate::spelling::correct_spelling;
use crate::translate::post_process;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordData {
    pub lemma: String,
    /// Empty for phrases, which are never tagged.
    pub tag_code: String,
    pub part_of_speech: PartOfSpeech,
    pub translated_primary: String,
    pub translated_secondary: String,
    pub noun_properties: Option<NounProperties>,
    pub example_sentence: String,
    pub example_sentence_translated: String,
    pub note_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnglishWordData {
    pub word: String,
    pub translated: String,
    pub example_sentence: String,
    pub example_sentence_translated: String,
}

/// Result of the word branch, or the trivial phrase equivalent.
struct Classified {
    /// Display form, `sich` included.
    lemma: String,
    /// What translators get to see.
    lookup: String,
    tag_code: String,
    part_of_speech: PartOfSpeech,
    noun_properties: Option<NounProperties>,
}

pub struct WordDataBuilder {
    providers: Providers,
    languages: Languages,
}

impl WordDataBuilder {
    pub fn new(providers: Providers, languages: Languages) -> Self {
        Self { providers, languages }
    }

    pub fn languages(&self) -> Languages {
        self.languages
    }

    pub async fn prepare_word_data(&self, input: &str, translation_hint: Option<&str>) -> Result<WordData> {
        let normalized = normalize(input)?;
        log::debug!("normalized \"{input}\": {normalized:?}");
        classify::ensure_word(normalized.bare())?;

        let classified = if normalized.is_phrase {
            phrase(&normalized)
        } else {
            let spelling = self.providers.spelling.as_ref();
            let word = correct_spelling(spelling, normalized.bare(), self.languages.source);
            self.classify_word(&normalized, &word).await?
        };

        let (translated_primary, translated_secondary, (example_sentence, example_sentence_translated)) = tokio::try_join!(
            self.translate_primary(&classified.lookup, classified.part_of_speech),
            self.translate_secondary(&classified.lookup, translation_hint),
            self.example_sentence(&classified.lemma, normalized.is_phrase),
        )?;
        log::debug!("\"{input}\": translated and exemplified");

        Ok(WordData {
            lemma: classified.lemma,
            tag_code: classified.tag_code,
            part_of_speech: classified.part_of_speech,
            translated_primary,
            translated_secondary,
            noun_properties: classified.noun_properties,
            example_sentence,
            example_sentence_translated,
            note_suffix: normalized.note_suffix,
        })
    }

    /// All results in input order, or the first error.
    pub async fn prepare_batch<'a, I>(&self, items: I) -> Result<Vec<WordData>>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let futures = items
            .into_iter()
            .map(|(input, hint)| self.prepare_word_data(input, hint));
        futures::future::try_join_all(futures).await
    }

    /// [`Self::prepare_batch`] for English words.
    pub async fn prepare_english_batch<'a, I>(&self, items: I) -> Result<Vec<EnglishWordData>>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let futures = items
            .into_iter()
            .map(|(input, hint)| self.prepare_english_word_data(input, hint));
        futures::future::try_join_all(futures).await
    }

    pub async fn prepare_english_word_data(&self, input: &str, translation_hint: Option<&str>) -> Result<EnglishWordData> {
        let word = input.trim();
        if word.is_empty() {
            return Err(Error::EmptyInput);
        }
        classify::ensure_word(word)?;
        let corrected = correct_spelling(self.providers.spelling.as_ref(), word, Language::English);
        let word = corrected.as_str();
        let target = self.languages.secondary;

        let translated = match non_empty(translation_hint) {
            Some(hint) => hint.to_string(),
            None => self.translate(word, Language::English, target).await?.to_lowercase(),
        };
        let example_sentence =
            llm::generate_sentence(self.providers.llm.as_ref(), word, Language::English, word.contains(' ')).await?;
        let example_sentence_translated = self.translate(&example_sentence, Language::English, target).await?;

        Ok(EnglishWordData {
            word: word.to_string(),
            translated,
            example_sentence,
            example_sentence_translated,
        })
    }

    /// `bare` is the spelling-corrected word without its reflexive marker.
    async fn classify_word(&self, normalized: &Normalized, bare: &str) -> Result<Classified> {
        let analyzed = self
            .providers
            .tagger
            .analyze(bare)
            .await
            .map_err(|e| Error::Tagger(e.into()))?;
        log::debug!("\"{bare}\": tagged {} as {}", analyzed.lemma, analyzed.tag);

        let surface = Surface {
            word: bare,
            is_reflexive: normalized.is_reflexive,
        };
        let part_of_speech = classify::classify(&surface, &analyzed.tag)?;
        if analyzed.lemma != bare {
            log::info!("\"{bare}\" corrected to lemma \"{}\"", analyzed.lemma);
        }

        let mut noun_properties = None;
        if part_of_speech == PartOfSpeech::Noun {
            let props = dict::resolve(self.providers.nouns.as_ref(), &analyzed.lemma).await?;
            if let Some(hint) = normalized.article_hint {
                if hint != props.article {
                    log::warn!(
                        "\"{}\" was given with \"{hint}\", dictionary says \"{}\"",
                        analyzed.lemma,
                        props.article
                    );
                }
            }
            noun_properties = Some(props);
        }

        Ok(Classified {
            lemma: reflexive::attach_marker(&analyzed.lemma, normalized.is_reflexive),
            lookup: analyzed.lemma,
            tag_code: analyzed.tag,
            part_of_speech,
            noun_properties,
        })
    }

    async fn translate(&self, text: &str, src: Language, dst: Language) -> Result<String> {
        self.providers
            .translator
            .translate(text, src, dst)
            .await
            .map_err(|e| Error::unavailable("translator", e))
    }

    async fn translate_primary(&self, text: &str, pos: PartOfSpeech) -> Result<String> {
        let translated = self
            .translate(text, self.languages.source, self.languages.primary)
            .await?;
        Ok(post_process(&translated.to_lowercase(), pos))
    }

    async fn translate_secondary(&self, text: &str, hint: Option<&str>) -> Result<String> {
        if let Some(hint) = non_empty(hint) {
            return Ok(hint.to_string());
        }
        let translated = self
            .translate(text, self.languages.source, self.languages.secondary)
            .await?;
        Ok(translated.to_lowercase())
    }

    async fn example_sentence(&self, text: &str, is_phrase: bool) -> Result<(String, String)> {
        let sentence =
            llm::generate_sentence(self.providers.llm.as_ref(), text, self.languages.source, is_phrase).await?;
        let translated = self
            .translate(&sentence, self.languages.source, self.languages.primary)
            .await?;
        Ok((sentence, translated))
    }
}

fn phrase(normalized: &Normalized) -> Classified {
    Classified {
        lemma: normalized.core.clone(),
        lookup: normalized.core.clone(),
        tag_code: String::new(),
        part_of_speech: PartOfSpeech::Other,
        noun_properties: None,
    }
}

fn non_empty(hint: Option<&str>) -> Option<&str> {
    hint.map(str::trim).filter(|hint| !hint.is_empty())
}
