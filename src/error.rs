use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("expected a non-empty word or phrase")]
    EmptyInput,

    #[error("not a word: \"{word}\" (tag {tag})")]
    NonWord { word: String, tag: String },

    /// Out-of-vocabulary noun, usually a rare compound.
    #[error("no noun info for word \"{0}\"")]
    UnknownNoun(String),

    #[error("invalid generated sentence: {0}")]
    InvalidGeneration(String),

    #[error("{service} is unavailable")]
    UnavailableService {
        service: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("tagger failed")]
    Tagger(#[source] BoxError),

    #[error("unexpected genus: {0}")]
    UnexpectedGenus(String),

    #[error("noun record for \"{0}\" has neither a singular nor a plural form")]
    InvalidNounRecord(String),
}

impl Error {
    pub(crate) fn unavailable(service: &'static str, source: anyhow::Error) -> Self {
        Self::UnavailableService {
            service,
            source: source.into(),
        }
    }

    /// Whether the caller can fix this by changing the input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput | Error::NonWord { .. } | Error::UnknownNoun(_)
        )
    }

    /// Upstream hiccups that a caller may retry as-is.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::InvalidGeneration(_) | Error::UnavailableService { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
