//! Turns raw user input into the text we actually look up: drops an article
//! hint, splits off a grammatical case note and detects reflexive verbs and
//! multi-word phrases.
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::dict::Article;
use crate::error::{Error, Result};
use crate::reflexive;

lazy_static! {
    static ref CASE_NOTE_RE: Regex = Regex::new(r"\(\+(?:Akk|Dat|Gen)\)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    /// Lookup text, still carrying a reflexive marker if one was given.
    pub core: String,
    pub note_suffix: String,
    pub is_phrase: bool,
    pub is_reflexive: bool,
    /// Article the caller wrote in front of a noun, e.g. `die Katze`.
    pub article_hint: Option<Article>,
}

impl Normalized {
    /// `core` without the reflexive marker.
    pub fn bare(&self) -> &str {
        reflexive::strip_marker(&self.core)
    }
}

pub fn normalize(raw: &str) -> Result<Normalized> {
    let mut core = raw.trim();
    if core.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut article_hint = None;
    if let Some((article, rest)) = split_article(core) {
        article_hint = Some(article);
        core = rest.trim_start();
    }

    // must run before phrase detection, the note sits after a space
    let mut note_suffix = "";
    if let Some(found) = CASE_NOTE_RE.find(core) {
        note_suffix = found.as_str();
        core = core[..found.start()].trim_end();
    }

    if core.is_empty() {
        return Err(Error::EmptyInput);
    }

    let is_reflexive = reflexive::has_marker(core);
    let is_phrase = reflexive::strip_marker(core).contains(' ');

    Ok(Normalized {
        core: core.to_string(),
        note_suffix: note_suffix.to_string(),
        is_phrase,
        is_reflexive,
        article_hint,
    })
}

fn split_article(text: &str) -> Option<(Article, &str)> {
    let article = Article::from_str(text.get(..4)?.strip_suffix(' ')?)?;
    Some((article, &text[4..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_input() {
        for raw in ["", " ", "\t\n", "   "] {
            assert!(matches!(normalize(raw), Err(Error::EmptyInput)), "{raw:?}");
        }
    }

    #[test]
    fn rejects_input_that_is_only_annotations() {
        assert!(matches!(normalize("(+Akk)"), Err(Error::EmptyInput)));
        assert!(matches!(normalize("der (+Dat)"), Err(Error::EmptyInput)));
    }

    #[test]
    fn plain_word() {
        let n = normalize("  Katze ").unwrap();
        assert_eq!(n.core, "Katze");
        assert_eq!(n.note_suffix, "");
        assert!(!n.is_phrase);
        assert!(!n.is_reflexive);
        assert_eq!(n.article_hint, None);
    }

    #[test]
    fn strips_article_hint() {
        let n = normalize("die Katze").unwrap();
        assert_eq!(n.core, "Katze");
        assert_eq!(n.article_hint, Some(Article::Die));
        assert!(!n.is_phrase);

        assert_eq!(normalize("das Band").unwrap().article_hint, Some(Article::Das));
        assert_eq!(normalize("der Markt").unwrap().article_hint, Some(Article::Der));
        // not an article prefix
        assert_eq!(normalize("dieser").unwrap().core, "dieser");
        assert_eq!(normalize("die").unwrap().core, "die");
    }

    #[test]
    fn splits_case_note() {
        let n = normalize("anrufen (+Akk)").unwrap();
        assert_eq!(n.core, "anrufen");
        assert_eq!(n.note_suffix, "(+Akk)");
        assert!(!n.is_phrase);

        let n = normalize("Angst haben vor (+Dat)").unwrap();
        assert_eq!(n.core, "Angst haben vor");
        assert_eq!(n.note_suffix, "(+Dat)");
        assert!(n.is_phrase);

        let n = normalize("gedenken (+Gen)").unwrap();
        assert_eq!(n.note_suffix, "(+Gen)");
    }

    #[test]
    fn case_note_must_be_exact_and_trailing() {
        assert_eq!(normalize("anrufen (+akk)").unwrap().note_suffix, "");
        assert_eq!(normalize("(+Akk) anrufen").unwrap().note_suffix, "");
        assert_eq!(normalize("anrufen (+Nom)").unwrap().note_suffix, "");
    }

    #[test]
    fn reflexive_verb_is_not_a_phrase() {
        let n = normalize("sich interessieren").unwrap();
        assert_eq!(n.core, "sich interessieren");
        assert_eq!(n.bare(), "interessieren");
        assert!(n.is_reflexive);
        assert!(!n.is_phrase);
    }

    #[test]
    fn reflexive_phrase() {
        let n = normalize("sich in Träumerei vertiefen").unwrap();
        assert!(n.is_reflexive);
        assert!(n.is_phrase);
    }

    #[test]
    fn multi_word_phrase() {
        let n = normalize("eine Entscheidung treffen").unwrap();
        assert!(n.is_phrase);
        assert!(!n.is_reflexive);
        assert_eq!(n.core, "eine Entscheidung treffen");
    }

    #[test]
    fn idempotent_on_clean_input() {
        for raw in ["Katze", "schlafen", "eine Entscheidung treffen", "sich schämen", "lustig"] {
            let once = normalize(raw).unwrap();
            let twice = normalize(&once.core).unwrap();
            assert_eq!(once, twice);
        }
    }
}
