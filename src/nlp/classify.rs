//! Tag code to part of speech, plus corrections for known tagger mistakes.
use super::PartOfSpeech;
use crate::error::{Error, Result};

/// The word as the user wrote it, minus article, case note and `sich`.
#[derive(Debug, Clone, Copy)]
pub struct Surface<'a> {
    pub word: &'a str,
    pub is_reflexive: bool,
}

pub type CorrectionRule = fn(&Surface, PartOfSpeech) -> PartOfSpeech;

/// Applied in order, each one sees the output of the previous.
pub const CORRECTION_RULES: &[(&str, CorrectionRule)] = &[
    ("lowercase noun", lowercase_noun_is_other),
    ("reflexive non-verb", reflexive_is_verb),
];

/// STTS code for text without any letters or digits, the way HanTa tags
/// punctuation.
pub fn non_word_tag(text: &str) -> Option<&'static str> {
    if text.chars().any(char::is_alphanumeric) {
        return None;
    }
    let tag = match text {
        "." | "!" | "?" | ":" | ";" | "..." => "$.",
        "," => "$,",
        _ if text.chars().all(|c| "-–—()[]{}\"'„“”‚‘/".contains(c)) => "$(",
        _ => "XY",
    };
    Some(tag)
}

/// Rejects text made of punctuation only. Phrases never reach the tagger, so
/// this runs ahead of it for both words and phrases.
pub fn ensure_word(text: &str) -> Result<()> {
    match non_word_tag(text) {
        Some(tag) => Err(Error::NonWord {
            word: text.to_string(),
            tag: tag.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn is_non_word_tag(tag: &str) -> bool {
    tag == "XY" || tag.starts_with('$')
}

pub fn base_part_of_speech(tag: &str) -> PartOfSpeech {
    if tag == "NN" || tag == "NNI" {
        PartOfSpeech::Noun
    } else if tag.starts_with("VV") {
        PartOfSpeech::Verb
    } else {
        PartOfSpeech::Other
    }
}

pub fn classify(surface: &Surface, tag: &str) -> Result<PartOfSpeech> {
    if is_non_word_tag(tag) {
        return Err(Error::NonWord {
            word: surface.word.to_string(),
            tag: tag.to_string(),
        });
    }

    let mut pos = base_part_of_speech(tag);
    for (name, rule) in CORRECTION_RULES {
        let corrected = rule(surface, pos);
        if corrected != pos {
            log::warn!(
                "\"{}\" tagged {tag} as {pos}, corrected to {corrected} ({name})",
                surface.word
            );
            pos = corrected;
        }
    }
    Ok(pos)
}

/// German common nouns are always capitalised.
pub fn lowercase_noun_is_other(surface: &Surface, pos: PartOfSpeech) -> PartOfSpeech {
    let lowercase = surface.word.chars().next().is_some_and(char::is_lowercase);
    if pos == PartOfSpeech::Noun && lowercase {
        PartOfSpeech::Other
    } else {
        pos
    }
}

pub fn reflexive_is_verb(surface: &Surface, pos: PartOfSpeech) -> PartOfSpeech {
    if surface.is_reflexive {
        PartOfSpeech::Verb
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_capture;

    fn word(word: &str) -> Surface<'_> {
        Surface { word, is_reflexive: false }
    }

    #[test]
    fn base_mapping() {
        assert_eq!(base_part_of_speech("NN"), PartOfSpeech::Noun);
        assert_eq!(base_part_of_speech("NNI"), PartOfSpeech::Noun);
        assert_eq!(base_part_of_speech("NE"), PartOfSpeech::Other);
        assert_eq!(base_part_of_speech("VV(INF)"), PartOfSpeech::Verb);
        assert_eq!(base_part_of_speech("VV(PP)"), PartOfSpeech::Verb);
        assert_eq!(base_part_of_speech("VA(FIN)"), PartOfSpeech::Other);
        assert_eq!(base_part_of_speech("ADJ(D)"), PartOfSpeech::Other);
        assert_eq!(base_part_of_speech("KOUS"), PartOfSpeech::Other);
    }

    #[test]
    fn non_words_are_rejected() {
        for tag in ["XY", "$.", "$,", "$("] {
            assert!(matches!(classify(&word("."), tag), Err(Error::NonWord { .. })), "{tag}");
        }
    }

    #[test]
    fn lowercase_noun_rule() {
        assert_eq!(lowercase_noun_is_other(&word("zwanglos"), PartOfSpeech::Noun), PartOfSpeech::Other);
        assert_eq!(lowercase_noun_is_other(&word("Katze"), PartOfSpeech::Noun), PartOfSpeech::Noun);
        assert_eq!(lowercase_noun_is_other(&word("zwanglos"), PartOfSpeech::Verb), PartOfSpeech::Verb);
        assert_eq!(lowercase_noun_is_other(&word("Ärger"), PartOfSpeech::Noun), PartOfSpeech::Noun);
    }

    #[test]
    fn reflexive_rule() {
        let surface = Surface { word: "beeilen", is_reflexive: true };
        assert_eq!(reflexive_is_verb(&surface, PartOfSpeech::Other), PartOfSpeech::Verb);
        assert_eq!(reflexive_is_verb(&surface, PartOfSpeech::Noun), PartOfSpeech::Verb);
        assert_eq!(reflexive_is_verb(&word("lustig"), PartOfSpeech::Other), PartOfSpeech::Other);
    }

    #[test]
    fn rules_apply_in_sequence() {
        assert_eq!(classify(&word("zwanglos"), "NN").unwrap(), PartOfSpeech::Other);
        assert_eq!(classify(&word("Katze"), "NN").unwrap(), PartOfSpeech::Noun);
        // lower-case noun first drops to Other, then reflexive usage makes it a verb
        let surface = Surface { word: "wundern", is_reflexive: true };
        assert_eq!(classify(&surface, "NN").unwrap(), PartOfSpeech::Verb);
    }

    #[test]
    fn punctuation_only_text() {
        assert_eq!(non_word_tag("."), Some("$."));
        assert_eq!(non_word_tag(","), Some("$,"));
        assert_eq!(non_word_tag("„"), Some("$("));
        assert_eq!(non_word_tag("- -"), Some("XY"));
        assert_eq!(non_word_tag("Katze"), None);
        assert_eq!(non_word_tag("3"), None);

        assert!(ensure_word("eine Entscheidung treffen").is_ok());
        for text in ["- -", ". ,", "$ $"] {
            assert!(matches!(ensure_word(text), Err(Error::NonWord { word, .. }) if word == text));
        }
    }

    #[test]
    fn corrections_are_logged() {
        log_capture::start();
        classify(&word("zwanglos"), "NN").unwrap();
        let warnings = log_capture::warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"zwanglos\""));
        assert!(warnings[0].contains("lowercase noun"));

        log_capture::start();
        let surface = Surface { word: "beeilen", is_reflexive: true };
        classify(&surface, "ADJ(A)").unwrap();
        let warnings = log_capture::warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("reflexive non-verb"));
    }

    #[test]
    fn nothing_logged_without_correction() {
        log_capture::start();
        classify(&word("Katze"), "NN").unwrap();
        classify(&Surface { word: "schämen", is_reflexive: true }, "VV(INF)").unwrap();
        assert!(log_capture::warnings().is_empty());
    }
}
