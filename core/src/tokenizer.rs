/// Split text on the space character. Runs of spaces collapse and no empty
/// tokens are produced; tabs and newlines are kept inside tokens.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// A word is valid when it has no control characters (codepoints below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}
