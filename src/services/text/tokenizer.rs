/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of word characters (alphanumerics or `_`) at least
/// two characters long, so single letters and punctuation never reach the
/// vocabulary.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
