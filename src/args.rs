use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{Config, LlmKind, TaggerKind, TranslatorKind};
use crate::lang::{Language, Languages};
use crate::llm;

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Prepare German words and phrases for flashcards")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Prepare card data (lemma, article, plural, translations, example sentence)
    Prepare(PrepareArgs),
    /// Show how an input is normalized before lookup
    Normalize(NormalizeArgs),
    /// Tag and classify a single word
    Analyze(AnalyzeArgs),
    /// Prepare card data for English words and phrases
    English(EnglishArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Secondary translation to use instead of asking the translator
    #[clap(long)]
    pub hint: Option<String>,
    /// Print a human readable card preview instead of JSON lines
    #[clap(long)]
    pub preview: bool,
    #[command(flatten)]
    pub providers: ProviderArgs,
}

#[derive(Clone, Debug, Args)]
pub struct EnglishArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Translation to use instead of asking the translator
    #[clap(long)]
    pub hint: Option<String>,
    #[command(flatten)]
    pub services: ServiceArgs,
}

impl EnglishArgs {
    pub fn config(&self) -> Config {
        self.services.apply(Config::new(""))
    }
}

#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Word(s) or phrase(s) to prepare
    #[clap(long, short)]
    pub word: Vec<String>,
    /// File with one word or phrase per line, optionally followed by a tab
    /// and a translation hint
    #[clap(long, short = 'f')]
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct NormalizeArgs {
    /// Raw input(s) to normalize
    pub input: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Word to tag and classify
    pub word: String,
    /// Tagger backend
    #[clap(long, value_enum, default_value_t)]
    pub tagger: TaggerKind,
    /// Lexicon file for the lexicon tagger
    #[clap(long)]
    pub lexicon: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ProviderArgs {
    /// Tagger backend
    #[clap(long, value_enum, default_value_t)]
    pub tagger: TaggerKind,
    /// Lexicon file for the lexicon tagger
    #[clap(long)]
    pub lexicon: Option<PathBuf>,
    /// Noun dictionary (german-nouns CSV export)
    #[clap(long)]
    pub nouns: PathBuf,
    /// Language the German translation gets grammatical clean-up in
    #[clap(long, value_enum, default_value_t = Language::English)]
    pub primary: Language,
    #[clap(long, value_enum, default_value_t = Language::Russian)]
    pub secondary: Language,
    #[command(flatten)]
    pub services: ServiceArgs,
}

impl ProviderArgs {
    pub fn config(&self) -> Config {
        self.services.apply(Config {
            tagger: self.tagger,
            lexicon: self.lexicon.clone(),
            languages: Languages {
                primary: self.primary,
                secondary: self.secondary,
                ..Languages::default()
            },
            ..Config::new(&self.nouns)
        })
    }
}

/// Backends shared by German and English cards.
#[derive(Clone, Debug, Args)]
pub struct ServiceArgs {
    /// Translation backend
    #[clap(long, value_enum, default_value_t = TranslatorKind::Google)]
    pub translator: TranslatorKind,
    /// LLM backend for example sentences
    #[clap(long, value_enum, default_value_t = LlmKind::Ollama)]
    pub llm_provider: LlmKind,
    #[clap(long, default_value = llm::DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,
    #[clap(long, default_value = llm::DEFAULT_OLLAMA_MODEL)]
    pub ollama_model: String,
    #[clap(long, default_value = llm::DEFAULT_OPENAI_MODEL)]
    pub openai_model: String,
    /// Word-frequency list for spelling correction, as LANG=PATH (e.g.
    /// de=de_full.txt). May be repeated.
    #[clap(long, value_parser = parse_spelling_list)]
    pub spelling: Vec<(Language, PathBuf)>,
}

impl ServiceArgs {
    fn apply(&self, config: Config) -> Config {
        Config {
            translator: self.translator,
            llm: self.llm_provider,
            ollama_url: self.ollama_url.clone(),
            ollama_model: self.ollama_model.clone(),
            openai_model: self.openai_model.clone(),
            spelling: self.spelling.clone(),
            ..config
        }
    }
}

fn parse_spelling_list(arg: &str) -> Result<(Language, PathBuf), String> {
    let (language, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected LANG=PATH, got \"{arg}\""))?;
    let language = Language::from_str(language, true)?;
    Ok((language, PathBuf::from(path)))
}

/// One `word[<TAB>hint]` entry per non-blank line.
pub fn parse_word_list(content: &str) -> Vec<(String, Option<String>)> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((word, hint)) => (word.to_string(), Some(hint.trim().to_string())),
            None => (line.to_string(), None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_with_hints() {
        let list = parse_word_list("Katze\n\n  \nlustig\tсмешной, весёлый\nsich schämen\n");
        assert_eq!(
            list,
            vec![
                ("Katze".to_string(), None),
                ("lustig".to_string(), Some("смешной, весёлый".to_string())),
                ("sich schämen".to_string(), None),
            ]
        );
    }

    #[test]
    fn cli_builds_config() {
        let cli = Cli::try_parse_from([
            "kartei", "prepare", "-w", "Katze", "--nouns", "nouns.csv", "--llm-provider", "stub", "--translator", "stub",
        ])
        .unwrap();
        let Commands::Prepare(args) = cli.cmd else {
            panic!("expected prepare");
        };
        assert_eq!(args.input.word, ["Katze"]);
        let config = args.providers.config();
        assert_eq!(config.llm, LlmKind::Stub);
        assert_eq!(config.translator, TranslatorKind::Stub);
        assert_eq!(config.nouns, PathBuf::from("nouns.csv"));
        assert_eq!(config.tagger, TaggerKind::default());
        assert_eq!(config.languages, Languages::default());
        assert!(config.spelling.is_empty());
    }

    #[test]
    fn languages_and_spelling_lists() {
        let cli = Cli::try_parse_from([
            "kartei", "prepare", "-w", "Katze", "--nouns", "n.csv", "--secondary", "german", "--primary", "ru",
            "--spelling", "de=de_full.txt", "--spelling", "English=en_full.txt",
        ])
        .unwrap();
        let Commands::Prepare(args) = cli.cmd else {
            panic!("expected prepare");
        };
        let config = args.providers.config();
        assert_eq!(config.languages.source, Language::German);
        assert_eq!(config.languages.primary, Language::Russian);
        assert_eq!(config.languages.secondary, Language::German);
        assert_eq!(
            config.spelling,
            vec![
                (Language::German, PathBuf::from("de_full.txt")),
                (Language::English, PathBuf::from("en_full.txt")),
            ]
        );

        let res = Cli::try_parse_from(["kartei", "prepare", "-w", "x", "--nouns", "n.csv", "--spelling", "de_full.txt"]);
        assert!(res.is_err());
        let res = Cli::try_parse_from(["kartei", "prepare", "-w", "x", "--nouns", "n.csv", "--spelling", "xx=a.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn english_needs_no_noun_dictionary() {
        let cli = Cli::try_parse_from([
            "kartei", "english", "-f", "words.txt", "--spelling", "en=en_full.txt", "--llm-provider", "stub",
        ])
        .unwrap();
        let Commands::English(args) = cli.cmd else {
            panic!("expected english");
        };
        assert_eq!(args.input.file, Some(PathBuf::from("words.txt")));
        let config = args.config();
        assert_eq!(config.llm, LlmKind::Stub);
        assert_eq!(config.spelling, vec![(Language::English, PathBuf::from("en_full.txt"))]);
    }

    #[test]
    fn tagger_default_follows_features() {
        let cli = Cli::try_parse_from(["kartei", "analyze", "Katze"]).unwrap();
        let Commands::Analyze(args) = cli.cmd else {
            panic!("expected analyze");
        };
        assert_eq!(args.tagger, TaggerKind::default());
        let cli = Cli::try_parse_from(["kartei", "analyze", "Katze", "--tagger", "lexicon"]).unwrap();
        let Commands::Analyze(args) = cli.cmd else {
            panic!("expected analyze");
        };
        assert_eq!(args.tagger, TaggerKind::Lexicon);
    }

    #[test]
    fn word_and_file_are_exclusive() {
        let res = Cli::try_parse_from(["kartei", "prepare", "-w", "Katze", "-f", "words.txt", "--nouns", "n.csv"]);
        assert!(res.is_err());
        let res = Cli::try_parse_from(["kartei", "prepare", "--nouns", "n.csv"]);
        assert!(res.is_err());
    }
}
