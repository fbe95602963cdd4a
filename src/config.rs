//! Which backends answer tagger, dictionary, translator, LLM and spelling
//! calls. Resolved once at startup into [`Providers`] and handed to the builder.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::ValueEnum;

use crate::dict::{CsvNounDictionary, NounDictionary};
use crate::lang::{Language, Languages};
use crate::llm::{self, LlmProvider, OllamaProvider, OpenAiProvider, StubLlmProvider};
use crate::nlp::{LexiconTagger, Tagger};
use crate::spelling::{FrequencySpeller, SpellChecker};
use crate::translate::{GoogleTranslator, StubTranslator, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaggerKind {
    /// HanTa through the embedded Python interpreter
    Hanta,
    /// A `form<TAB>lemma<TAB>tag` lexicon file
    Lexicon,
}

impl Default for TaggerKind {
    /// HanTa when it is compiled in.
    fn default() -> Self {
        if cfg!(feature = "hanta") {
            TaggerKind::Hanta
        } else {
            TaggerKind::Lexicon
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TranslatorKind {
    Google,
    /// Answer every translation with "_"
    Stub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LlmKind {
    Ollama,
    Openai,
    /// Answer every prompt with a placeholder sentence
    Stub,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tagger: TaggerKind,
    pub lexicon: Option<PathBuf>,
    pub nouns: PathBuf,
    pub translator: TranslatorKind,
    pub llm: LlmKind,
    pub ollama_url: String,
    pub ollama_model: String,
    pub openai_model: String,
    /// Word-frequency lists for spelling correction. Languages without one
    /// are not corrected.
    pub spelling: Vec<(Language, PathBuf)>,
    pub languages: Languages,
}

impl Config {
    pub fn new(nouns: impl Into<PathBuf>) -> Self {
        Self {
            tagger: TaggerKind::default(),
            lexicon: None,
            nouns: nouns.into(),
            translator: TranslatorKind::Google,
            llm: LlmKind::Ollama,
            ollama_url: llm::DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: llm::DEFAULT_OLLAMA_MODEL.to_string(),
            openai_model: llm::DEFAULT_OPENAI_MODEL.to_string(),
            spelling: vec![],
            languages: Languages::default(),
        }
    }
}

pub const STUB_TRANSLATION: &str = "_";

#[derive(Clone)]
pub struct Providers {
    pub tagger: Arc<dyn Tagger>,
    pub nouns: Arc<dyn NounDictionary>,
    pub translator: Arc<dyn Translator>,
    pub llm: Arc<dyn LlmProvider>,
    pub spelling: Arc<dyn SpellChecker>,
}

impl Providers {
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let tagger = build_tagger(config).await?;
        let nouns: Arc<dyn NounDictionary> = Arc::new(CsvNounDictionary::from_path(&config.nouns)?);
        Self::with_analysis(config, tagger, nouns).await
    }

    /// Translator, LLM and spelling only. The tagger and noun dictionary are
    /// empty, which is all English words need.
    pub async fn without_analysis(config: &Config) -> anyhow::Result<Self> {
        Self::with_analysis(
            config,
            Arc::new(LexiconTagger::default()),
            Arc::new(CsvNounDictionary::default()),
        )
        .await
    }

    async fn with_analysis(
        config: &Config,
        tagger: Arc<dyn Tagger>,
        nouns: Arc<dyn NounDictionary>,
    ) -> anyhow::Result<Self> {
        let translator: Arc<dyn Translator> = match config.translator {
            TranslatorKind::Google => Arc::new(GoogleTranslator::from_env()),
            TranslatorKind::Stub => Arc::new(StubTranslator::new(STUB_TRANSLATION)),
        };

        let llm: Arc<dyn LlmProvider> = match config.llm {
            LlmKind::Ollama => Arc::new(OllamaProvider::new(&config.ollama_url, &config.ollama_model)),
            LlmKind::Openai => Arc::new(OpenAiProvider::from_env(&config.openai_model)?),
            LlmKind::Stub => Arc::new(StubLlmProvider::new(".".repeat(50))),
        };
        llm.check().await?;

        let mut speller = FrequencySpeller::default();
        for (language, path) in &config.spelling {
            speller.load(*language, path)?;
        }

        log::info!(
            "providers: tagger={:?}, translator={:?}, llm={}",
            config.tagger,
            config.translator,
            llm.name()
        );

        Ok(Self {
            tagger,
            nouns,
            translator,
            llm,
            spelling: Arc::new(speller),
        })
    }
}

pub async fn build_tagger(config: &Config) -> anyhow::Result<Arc<dyn Tagger>> {
    match config.tagger {
        TaggerKind::Lexicon => {
            let path = config
                .lexicon
                .as_ref()
                .context("the lexicon tagger needs a lexicon file (--lexicon)")?;
            Ok(Arc::new(LexiconTagger::from_path(path)?))
        }
        #[cfg(feature = "hanta")]
        TaggerKind::Hanta => {
            let tagger = crate::nlp::hanta::HanoverTagger::init(crate::nlp::hanta::GERMAN_MODEL).await?;
            Ok(Arc::new(tagger))
        }
        #[cfg(not(feature = "hanta"))]
        TaggerKind::Hanta => anyhow::bail!("built without the `hanta` feature, use --tagger lexicon"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tagger_follows_features() {
        let expected = if cfg!(feature = "hanta") {
            TaggerKind::Hanta
        } else {
            TaggerKind::Lexicon
        };
        assert_eq!(TaggerKind::default(), expected);
        assert_eq!(Config::new("nouns.csv").tagger, expected);
    }

    #[tokio::test]
    async fn english_providers_need_no_german_data() {
        let config = Config {
            translator: TranslatorKind::Stub,
            llm: LlmKind::Stub,
            ..Config::new("does/not/exist.csv")
        };
        assert!(Providers::from_config(&config).await.is_err());
        let providers = Providers::without_analysis(&config).await.unwrap();
        assert!(providers.tagger.analyze("Katze").await.is_err());
    }

    #[tokio::test]
    async fn loads_spelling_lists() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "high 100\nheight 10").unwrap();
        let config = Config {
            translator: TranslatorKind::Stub,
            llm: LlmKind::Stub,
            spelling: vec![(Language::English, file.path().to_path_buf())],
            ..Config::new("unused.csv")
        };
        let providers = Providers::without_analysis(&config).await.unwrap();
        assert_eq!(
            providers.spelling.correction("heigh", Language::English).as_deref(),
            Some("high")
        );
        assert_eq!(providers.spelling.correction("heigh", Language::German), None);
    }
}
