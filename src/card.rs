//! How a prepared word is shown on a flashcard.
use crate::builder::WordData;

/// Short plural notation for a card: `die Wohnung, -en`, `der Lehrer, =`.
/// Umlaut plurals are spelled out in full (`die Äpfel`).
pub fn shorten_plural_form(singular: &str, plural: &str) -> String {
    if singular == plural {
        "=".to_string()
    } else if let Some(ending) = plural.strip_prefix(singular) {
        format!("-{ending}")
    } else {
        format!("die {plural}")
    }
}

/// Front side text, without the article.
pub fn headword(word: &WordData) -> String {
    let mut text = match &word.noun_properties {
        Some(noun) if noun.plural_form.is_empty() => format!("{} (Sg.)", word.lemma),
        Some(noun) if noun.singular_form.is_empty() => format!("{} (Pl.)", word.lemma),
        Some(noun) => format!(
            "{}, {}",
            word.lemma,
            shorten_plural_form(&noun.singular_form, &noun.plural_form)
        ),
        None => word.lemma.clone(),
    };
    if !word.note_suffix.is_empty() {
        text.push(' ');
        text.push_str(&word.note_suffix);
    }
    text
}

/// What text-to-speech should read out. Never includes the case note.
pub fn spoken_word(word: &WordData) -> String {
    match &word.noun_properties {
        Some(noun) => format!("{} {}", noun.article, word.lemma),
        None => word.lemma.clone(),
    }
}

pub fn combined_translation(word: &WordData) -> String {
    format!("{}, {}", word.translated_secondary, word.translated_primary)
}
