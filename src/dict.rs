//! Noun morphology: genus, article and singular/plural forms looked up in a
//! dictionary keyed by lemma.
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genus {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
    #[serde(rename = "n")]
    Neuter,
    /// Words that only exist in plural form.
    #[serde(rename = "pl")]
    Plural,
}

impl Genus {
    pub fn as_str(self) -> &'static str {
        match self {
            Genus::Masculine => "m",
            Genus::Feminine => "f",
            Genus::Neuter => "n",
            Genus::Plural => "pl",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(Genus::Masculine),
            "f" => Ok(Genus::Feminine),
            "n" => Ok(Genus::Neuter),
            "pl" => Ok(Genus::Plural),
            other => Err(Error::UnexpectedGenus(other.to_string())),
        }
    }

    pub fn article(self) -> Article {
        match self {
            Genus::Masculine => Article::Der,
            Genus::Neuter => Article::Das,
            Genus::Feminine | Genus::Plural => Article::Die,
        }
    }
}

impl fmt::Display for Genus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    pub fn as_str(self) -> &'static str {
        match self {
            Article::Der => "der",
            Article::Die => "die",
            Article::Das => "das",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "der" => Some(Article::Der),
            "die" => Some(Article::Die),
            "das" => Some(Article::Das),
            _ => None,
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Article for a raw genus code as found in dictionary data.
pub fn derive_article(genus: &str) -> Result<Article> {
    Genus::parse(genus).map(Genus::article)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounProperties {
    pub singular_form: String,
    pub plural_form: String,
    pub genus: Genus,
    pub article: Article,
}

/// One dictionary row. `flexion` maps column names such as
/// `"nominativ plural 1"` to the inflected form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NounRecord {
    pub lemma: String,
    pub genus: Option<String>,
    pub flexion: BTreeMap<String, String>,
}

impl NounRecord {
    pub fn form(&self, key: &str) -> Option<&str> {
        self.flexion.get(key).map(String::as_str)
    }

    pub fn singular(&self) -> &str {
        self.form("nominativ singular").unwrap_or("")
    }

    /// The canonical plural, falling back to the first of several registered
    /// alternatives.
    pub fn plural(&self) -> &str {
        self.form("nominativ plural")
            .or_else(|| self.form("nominativ plural 1"))
            .unwrap_or("")
    }
}

#[async_trait]
pub trait NounDictionary: Send + Sync {
    /// All records registered for `lemma`, in dictionary order.
    async fn lookup(&self, lemma: &str) -> anyhow::Result<Vec<NounRecord>>;
}

pub async fn resolve(dictionary: &dyn NounDictionary, lemma: &str) -> Result<NounProperties> {
    let records = dictionary
        .lookup(lemma)
        .await
        .map_err(|e| Error::unavailable("noun dictionary", e))?;
    let Some(record) = records.first() else {
        return Err(Error::UnknownNoun(lemma.to_string()));
    };

    let singular_form = record.singular().to_string();
    let plural_form = record.plural().to_string();
    if singular_form.is_empty() && plural_form.is_empty() {
        return Err(Error::InvalidNounRecord(lemma.to_string()));
    }

    let genus = match record.genus.as_deref() {
        Some(genus) => Genus::parse(genus)?,
        None => Genus::Plural,
    };

    Ok(NounProperties {
        singular_form,
        plural_form,
        genus,
        article: genus.article(),
    })
}

/// In-memory index over the german-nouns Wiktionary CSV export.
#[derive(Debug, Default)]
pub struct CsvNounDictionary {
    index: FxHashMap<String, Vec<NounRecord>>,
}

impl CsvNounDictionary {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path.as_ref()).with_context(|| {
            format!("Failed to open noun dictionary at '{}'", path.as_ref().display())
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl io::Read) -> anyhow::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut dictionary = Self::default();
        for row in rdr.deserialize::<BTreeMap<String, String>>() {
            let row = row.context("Malformed noun dictionary row")?;
            if let Some(record) = record_from_row(row) {
                dictionary.insert(record);
            }
        }
        log::info!("loaded {} noun lemmas", dictionary.len());
        Ok(dictionary)
    }

    pub fn insert(&mut self, record: NounRecord) {
        self.index
            .entry(record.lemma.clone())
            .or_insert(vec![])
            .push(record);
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

const CASES: [&str; 4] = ["nominativ", "genitiv", "dativ", "akkusativ"];

fn record_from_row(mut row: BTreeMap<String, String>) -> Option<NounRecord> {
    row.retain(|_, v| !v.trim().is_empty());
    let lemma = row.remove("lemma")?;
    let genus = row.remove("genus");
    let flexion = row
        .into_iter()
        .filter(|(k, _)| CASES.iter().any(|case| k.starts_with(case)))
        .collect();
    Some(NounRecord { lemma, genus, flexion })
}

#[async_trait]
impl NounDictionary for CsvNounDictionary {
    async fn lookup(&self, lemma: &str) -> anyhow::Result<Vec<NounRecord>> {
        Ok(self.index.get(lemma).cloned().unwrap_or_default())
    }
}
