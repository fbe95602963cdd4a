use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    #[value(alias = "de")]
    German,
    #[value(alias = "en")]
    English,
    #[value(alias = "ru")]
    Russian,
}

impl Language {
    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    /// English name, as used in LLM prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::German => "German",
            Language::English => "English",
            Language::Russian => "Russian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which language a card is learned from and which ones it is explained in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Languages {
    pub source: Language,
    /// Gets the grammatical post-processing (`to ...`, no `the ...`).
    pub primary: Language,
    pub secondary: Language,
}

impl Default for Languages {
    fn default() -> Self {
        Self {
            source: Language::German,
            primary: Language::English,
            secondary: Language::Russian,
        }
    }
}
