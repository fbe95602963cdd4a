pub const REFLEXIVE_MARKER: &str = "sich ";

pub fn has_marker(text: &str) -> bool {
    text.starts_with(REFLEXIVE_MARKER)
}

/// The lexical lookup key: `text` without a leading `sich `.
pub fn strip_marker(text: &str) -> &str {
    text.strip_prefix(REFLEXIVE_MARKER)
        .map(str::trim_start)
        .unwrap_or(text)
}

pub fn attach_marker(lemma: &str, is_reflexive: bool) -> String {
    if is_reflexive && !has_marker(lemma) {
        format!("{REFLEXIVE_MARKER}{lemma}")
    } else {
        lemma.to_string()
    }
}
